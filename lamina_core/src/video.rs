// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoded-frame descriptors and color-enhancement settings.
//!
//! A [`VideoFrame`] describes a decoder-owned planar buffer that is already
//! resident in video-engine memory. The engine never allocates or touches
//! the planes; it only turns the descriptor into hardware layer parameters.
//! Frames are attached to an output surface by an external submission path
//! (the mixer) together with a source crop and an on-screen placement rect.

use crate::format::YcbcrFormat;

/// Descriptor for a decoder-owned planar frame buffer.
///
/// The luma plane starts at `virt_base` and is `plane_size` bytes; the
/// chroma planes follow contiguously, each one quarter of `plane_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoFrame {
    /// Virtual base address of the luma plane in the caller's mapping.
    pub virt_base: usize,
    /// Size of the luma plane in bytes.
    pub plane_size: u32,
    /// Declared source color format.
    pub format: YcbcrFormat,
    /// Logical frame width in pixels.
    pub width: u32,
    /// Logical frame height in pixels.
    pub height: u32,
}

/// Color-enhancement parameters applied to the hardware layer.
///
/// Brightness and hue default to `0.0`, contrast and saturation to `1.0`.
/// The hardware mapping uses fixed linear scale factors with no exact
/// colorimetric meaning; see `lamina_present`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSettings {
    /// Brightness offset, nominally in `[-1, 1]`.
    pub brightness: f32,
    /// Contrast gain, nominally in `[0, 10]`.
    pub contrast: f32,
    /// Saturation gain, nominally in `[0, 10]`.
    pub saturation: f32,
    /// Hue rotation in radians.
    pub hue: f32,
}

impl ColorSettings {
    /// The neutral settings every surface starts with.
    pub const DEFAULT: Self = Self {
        brightness: 0.0,
        contrast: 1.0,
        saturation: 1.0,
        hue: 0.0,
    };
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
