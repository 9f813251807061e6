// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-format tags and color types.
//!
//! The engine's format algebra is deliberately narrow: output surfaces are
//! packed 32-bit RGBA-family buffers, and only the
//! `{B8g8r8a8, I8A8, B8g8r8x8}` combination of the indexed upload path is
//! implemented. Every other recognized combination is accepted and ignored
//! (success as no-op), preserving API conformance for callers that probe
//! unsupported paths.

/// Packed 32-bit RGBA-family surface formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RgbaFormat {
    /// Packed 8-bit BGRA, the only fully supported surface format.
    #[default]
    B8g8r8a8,
    /// Packed 8-bit RGBA; creatable and reported as supported by the
    /// capability query, but not wired into the upload paths.
    R8g8b8a8,
    /// Packed 10-10-10-2 RGBA; recognized but reported as unsupported.
    R10g10b10a2,
    /// Packed 10-10-10-2 BGRA; recognized but reported as unsupported.
    B10g10r10a2,
    /// 8-bit alpha-only; recognized but reported as unsupported.
    A8,
}

/// Indexed source formats for [`put_bits_indexed`].
///
/// [`put_bits_indexed`]: crate::surface::OutputSurface::put_bits_indexed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexedFormat {
    /// One 8-bit palette index followed by one 8-bit alpha per pixel.
    I8A8,
}

/// Color-table entry layouts for the indexed upload path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTableFormat {
    /// Packed 8-bit BGRX; the X byte is ignored and replaced by source alpha.
    B8g8r8x8,
}

/// Declared color formats of decoded video frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YcbcrFormat {
    /// Interleaved 4:2:2, Y-U-Y-V byte order.
    Yuyv,
    /// Interleaved 4:2:2, U-Y-V-Y byte order.
    Uyvy,
    /// Planar luma plus combined interleaved chroma (NV12-style).
    Nv12,
    /// Fully planar 4:2:0 (YV12-style).
    Yv12,
    /// The decoder's macroblock-tiled internal layout; also the fallback
    /// interpretation for anything not listed above.
    Internal,
}

/// An RGBA color with floating-point components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
    /// Alpha component.
    pub alpha: f32,
}

impl Color {
    /// Opaque black, the default presentation-queue background.
    pub const BLACK: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
}

/// Blend factors accepted by the composite operations.
///
/// Stored for API conformance; the current composite path performs a direct
/// copy and does not evaluate blend equations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BlendFactor {
    /// Factor 0.
    Zero,
    /// Factor 1.
    #[default]
    One,
    /// Source alpha.
    SrcAlpha,
    /// 1 − source alpha.
    OneMinusSrcAlpha,
}

/// Per-operation blend configuration, accepted but not evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlendState {
    /// Factor applied to source color.
    pub src_color: BlendFactor,
    /// Factor applied to destination color.
    pub dst_color: BlendFactor,
    /// Factor applied to source alpha.
    pub src_alpha: BlendFactor,
    /// Factor applied to destination alpha.
    pub dst_alpha: BlendFactor,
}
