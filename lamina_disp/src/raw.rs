// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire layout of the control protocol.
//!
//! Every request is a numbered control call carrying a four-word argument
//! block `{reserved, layer-or-pointer, pointer-or-scalar, reserved}`. This
//! module keeps the request-code table and the `#[repr(C)]` structures the
//! driver reads, plus the exhaustive mapping from the typed configuration
//! model to their raw field values. Nothing here touches a descriptor; see
//! [`crate::device`] for the calls.

use crate::config::{
    ChannelOrder, ColorKey, ColorSpace, FbFormat, LayerConfig, LayerWindow, MatchRule, PlaneMode,
    WorkMode,
};

/// The four-word argument block accompanying every request.
///
/// Words are pointer-sized so that argument-block pointers survive on
/// 64-bit user space even though the protocol predates it.
pub type ArgBlock = [usize; 4];

/// Request codes understood by the display controller.
///
/// The table is exhaustive for the engine's needs; codes the engine never
/// issues are deliberately absent.
pub mod request {
    /// Query/negotiate the driver protocol version.
    pub const VERSION: u32 = 0x00;
    /// Set the screen-wide transparency color key.
    pub const SET_COLOR_KEY: u32 = 0x23;
    /// Request a layer in a given working mode.
    pub const LAYER_REQUEST: u32 = 0x40;
    /// Release a layer.
    pub const LAYER_RELEASE: u32 = 0x41;
    /// Make a layer visible.
    pub const LAYER_OPEN: u32 = 0x42;
    /// Hide a layer.
    pub const LAYER_CLOSE: u32 = 0x43;
    /// Apply a layer parameter block.
    pub const LAYER_SET_PARA: u32 = 0x4a;
    /// Move a layer to the bottom of the z-order.
    pub const LAYER_BOTTOM: u32 = 0x4d;
    /// Set the brightness register.
    pub const LAYER_SET_BRIGHT: u32 = 0x58;
    /// Set the contrast register.
    pub const LAYER_SET_CONTRAST: u32 = 0x5a;
    /// Set the saturation register.
    pub const LAYER_SET_SATURATION: u32 = 0x5c;
    /// Set the hue register.
    pub const LAYER_SET_HUE: u32 = 0x5e;
    /// Enable color enhancement.
    pub const LAYER_ENHANCE_ON: u32 = 0x60;
    /// Disable color enhancement.
    pub const LAYER_ENHANCE_OFF: u32 = 0x61;
}

/// Raw window geometry.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawWindow {
    /// Horizontal origin.
    pub x: i32,
    /// Vertical origin.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Raw framebuffer description.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFramebuffer {
    /// Physical plane addresses.
    pub addr: [u32; 3],
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format code.
    pub format: u32,
    /// Channel-order code.
    pub seq: u32,
    /// Plane-layout code.
    pub mode: u32,
    /// Non-zero to swap red and blue.
    pub br_swap: u32,
    /// Color-space code.
    pub cs_mode: u32,
}

/// Raw layer parameter block, the pointee of `LAYER_SET_PARA`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawLayerInfo {
    /// Working-mode code.
    pub mode: u32,
    /// Composition pipe.
    pub pipe: u32,
    /// Z-priority hint; the engine leaves it zero and forces bottom
    /// placement explicitly.
    pub prio: u32,
    /// Per-layer alpha enable; unused by the engine.
    pub alpha_enable: u32,
    /// Per-layer alpha value; unused by the engine.
    pub alpha_value: u32,
    /// Non-zero to composite against the color key.
    pub ck_enable: u32,
    /// Crop window within the source frame.
    pub src_win: RawWindow,
    /// Placement window on screen.
    pub scn_win: RawWindow,
    /// Framebuffer description.
    pub fb: RawFramebuffer,
}

/// Raw color-key block, the pointee of `SET_COLOR_KEY`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawColorKey {
    /// Lower bound, `[r, g, b]` plus padding.
    pub min: [u8; 4],
    /// Upper bound, `[r, g, b]` plus padding.
    pub max: [u8; 4],
    /// Red matching-rule code.
    pub red_match_rule: u32,
    /// Green matching-rule code.
    pub green_match_rule: u32,
    /// Blue matching-rule code.
    pub blue_match_rule: u32,
}

/// Working-mode wire values.
#[must_use]
pub const fn work_mode_code(mode: WorkMode) -> u32 {
    match mode {
        WorkMode::Normal => 0x00,
        WorkMode::Palette => 0x01,
        WorkMode::InternalFramebuffer => 0x02,
        WorkMode::Gamma => 0x03,
        WorkMode::Scaler => 0x04,
    }
}

/// Plane-layout wire values.
#[must_use]
pub const fn plane_mode_code(mode: PlaneMode) -> u32 {
    match mode {
        PlaneMode::NonMbPlanar => 0x00,
        PlaneMode::Interleaved => 0x01,
        PlaneMode::NonMbUvCombined => 0x02,
        PlaneMode::MbPlanar => 0x04,
        PlaneMode::MbUvCombined => 0x06,
    }
}

/// Pixel-format wire values.
#[must_use]
pub const fn fb_format_code(format: FbFormat) -> u32 {
    match format {
        FbFormat::Yuv422 => 0x0a,
        FbFormat::Yuv420 => 0x0b,
    }
}

/// Channel-order wire values.
#[must_use]
pub const fn channel_order_code(order: ChannelOrder) -> u32 {
    match order {
        ChannelOrder::Yuyv => 0x03,
        ChannelOrder::Uyvy => 0x05,
        ChannelOrder::Uvuv => 0x08,
    }
}

/// Color-space wire values.
#[must_use]
pub const fn color_space_code(space: ColorSpace) -> u32 {
    match space {
        ColorSpace::Bt601 => 0x00,
        ColorSpace::Bt709 => 0x01,
    }
}

/// Matching-rule wire values.
#[must_use]
pub const fn match_rule_code(rule: MatchRule) -> u32 {
    match rule {
        MatchRule::Always => 0x00,
        MatchRule::Exact => 0x02,
    }
}

const fn raw_window(window: LayerWindow) -> RawWindow {
    RawWindow {
        x: window.x,
        y: window.y,
        width: window.width,
        height: window.height,
    }
}

/// Encodes a typed layer configuration into the wire block.
#[must_use]
pub const fn encode_layer_info(config: &LayerConfig) -> RawLayerInfo {
    RawLayerInfo {
        mode: work_mode_code(config.work_mode),
        pipe: config.pipe,
        prio: 0,
        alpha_enable: 0,
        alpha_value: 0,
        ck_enable: config.color_key_enable as u32,
        src_win: raw_window(config.source),
        scn_win: raw_window(config.screen),
        fb: RawFramebuffer {
            addr: config.fb.planes,
            width: config.fb.width,
            height: config.fb.height,
            format: fb_format_code(config.fb.format),
            seq: channel_order_code(config.fb.order),
            mode: plane_mode_code(config.fb.mode),
            br_swap: config.fb.swap_red_blue as u32,
            cs_mode: color_space_code(config.fb.color_space),
        },
    }
}

/// Encodes a typed color key into the wire block.
#[must_use]
pub const fn encode_color_key(key: &ColorKey) -> RawColorKey {
    RawColorKey {
        min: [key.min[0], key.min[1], key.min[2], 0],
        max: [key.max[0], key.max[1], key.max[2], 0],
        red_match_rule: match_rule_code(key.red_rule),
        green_match_rule: match_rule_code(key.green_rule),
        blue_match_rule: match_rule_code(key.blue_rule),
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_color_key, encode_layer_info, plane_mode_code, work_mode_code};
    use crate::config::{
        ChannelOrder, ColorKey, ColorSpace, FbFormat, FramebufferConfig, LayerConfig, LayerWindow,
        PlaneMode, WorkMode,
    };

    fn sample_config() -> LayerConfig {
        LayerConfig {
            work_mode: WorkMode::Scaler,
            pipe: 1,
            fb: FramebufferConfig {
                mode: PlaneMode::MbUvCombined,
                format: FbFormat::Yuv420,
                order: ChannelOrder::Uvuv,
                color_space: ColorSpace::Bt601,
                swap_red_blue: false,
                planes: [0x4000_0000, 0x4010_0000, 0x4014_0000],
                width: 1280,
                height: 720,
            },
            source: LayerWindow {
                x: 0,
                y: 8,
                width: 1280,
                height: 704,
            },
            screen: LayerWindow {
                x: 64,
                y: 0,
                width: 1280,
                height: 704,
            },
            color_key_enable: true,
        }
    }

    #[test]
    fn layer_info_carries_geometry_and_codes() {
        let raw = encode_layer_info(&sample_config());
        assert_eq!(raw.mode, work_mode_code(WorkMode::Scaler));
        assert_eq!(raw.pipe, 1);
        assert_eq!(raw.ck_enable, 1);
        assert_eq!((raw.src_win.y, raw.src_win.height), (8, 704));
        assert_eq!((raw.scn_win.x, raw.scn_win.width), (64, 1280));
        assert_eq!(raw.fb.mode, plane_mode_code(PlaneMode::MbUvCombined));
        assert_eq!(raw.fb.addr[1], 0x4010_0000);
        assert_eq!(raw.fb.br_swap, 0);
    }

    #[test]
    fn color_key_encodes_exact_rules() {
        let raw = encode_color_key(&ColorKey::exact([0x00, 0x01, 0x02]));
        assert_eq!(raw.min, raw.max);
        assert_eq!(&raw.min[..3], &[0x00, 0x01, 0x02]);
        assert_eq!(raw.red_match_rule, 2);
        assert_eq!(raw.green_match_rule, 2);
        assert_eq!(raw.blue_match_rule, 2);
    }

    #[test]
    fn wire_codes_are_distinct_per_plane_mode() {
        let codes = [
            plane_mode_code(PlaneMode::NonMbPlanar),
            plane_mode_code(PlaneMode::Interleaved),
            plane_mode_code(PlaneMode::NonMbUvCombined),
            plane_mode_code(PlaneMode::MbPlanar),
            plane_mode_code(PlaneMode::MbUvCombined),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b, "plane-mode codes must be distinct");
            }
        }
    }
}
