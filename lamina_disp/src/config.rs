// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer configuration model.
//!
//! [`LayerConfig`] is the typed equivalent of the driver's layer-parameter
//! block: working mode, pipe assignment, framebuffer description (plane
//! layout, pixel format, channel order, plane addresses), source and screen
//! windows, and the color-key enable bit. [`crate::raw`] turns it into the
//! wire layout.

/// Working mode of an overlay layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkMode {
    /// Plain framebuffer layer.
    Normal,
    /// Palette-indexed layer.
    Palette,
    /// Layer sourced from an internal framebuffer.
    InternalFramebuffer,
    /// Gamma-correction layer.
    Gamma,
    /// Scaler layer; the only mode the presentation engine requests.
    Scaler,
}

/// How the planes of the framebuffer are laid out in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneMode {
    /// Fully planar, non-macroblocked (YV12-style).
    NonMbPlanar,
    /// Single interleaved plane (YUYV/UYVY-style).
    Interleaved,
    /// Planar luma with combined interleaved chroma, non-macroblocked
    /// (NV12-style).
    NonMbUvCombined,
    /// Macroblock-tiled planar layout.
    MbPlanar,
    /// Macroblock-tiled luma with combined chroma; the decoder's internal
    /// output layout.
    MbUvCombined,
}

/// Pixel format of the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FbFormat {
    /// 4:2:0 subsampled YUV.
    Yuv420,
    /// 4:2:2 subsampled YUV.
    Yuv422,
}

/// Byte order of channels within an interleaved or combined plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// U then V within the combined chroma plane.
    Uvuv,
    /// Y-U-Y-V interleaved.
    Yuyv,
    /// U-Y-V-Y interleaved.
    Uyvy,
}

/// Color-space conversion matrix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// ITU-R BT.601; the engine always presents with this.
    Bt601,
    /// ITU-R BT.709.
    Bt709,
}

/// Framebuffer description within a layer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FramebufferConfig {
    /// Plane layout.
    pub mode: PlaneMode,
    /// Pixel format.
    pub format: FbFormat,
    /// Channel order.
    pub order: ChannelOrder,
    /// Color-space matrix.
    pub color_space: ColorSpace,
    /// Whether red and blue channels are swapped.
    pub swap_red_blue: bool,
    /// DMA-visible physical addresses of the three planes. Unused planes
    /// carry the address computed for them anyway; the driver reads only
    /// what the plane mode needs.
    pub planes: [u32; 3],
    /// Full frame width in pixels.
    pub width: u32,
    /// Full frame height in pixels.
    pub height: u32,
}

/// A window in layer coordinates.
///
/// `x`/`y` are signed because screen placement may start above or left of
/// the visible origin before clipping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerWindow {
    /// Horizontal origin.
    pub x: i32,
    /// Vertical origin.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Complete parameter block for one overlay layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerConfig {
    /// Working mode.
    pub work_mode: WorkMode,
    /// Hardware composition pipe.
    pub pipe: u32,
    /// Framebuffer description.
    pub fb: FramebufferConfig,
    /// Crop window within the source frame.
    pub source: LayerWindow,
    /// Placement window on screen.
    pub screen: LayerWindow,
    /// Whether color-key compositing applies to this layer.
    pub color_key_enable: bool,
}

/// Per-channel color-key matching rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// The channel always matches.
    Always,
    /// The channel matches only the exact keyed value.
    Exact,
}

/// Screen-wide transparency color key.
///
/// Window pixels whose channels fall inside `[min, max]` under the per-
/// channel rules are treated as transparent, letting the overlay layer show
/// through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey {
    /// Lower bound, `[r, g, b]`.
    pub min: [u8; 3],
    /// Upper bound, `[r, g, b]`.
    pub max: [u8; 3],
    /// Rule for the red channel.
    pub red_rule: MatchRule,
    /// Rule for the green channel.
    pub green_rule: MatchRule,
    /// Rule for the blue channel.
    pub blue_rule: MatchRule,
}

impl ColorKey {
    /// A key matching exactly one RGB triple on all three channels.
    #[must_use]
    pub const fn exact(rgb: [u8; 3]) -> Self {
        Self {
            min: rgb,
            max: rgb,
            red_rule: MatchRule::Exact,
            green_rule: MatchRule::Exact,
            blue_rule: MatchRule::Exact,
        }
    }
}
