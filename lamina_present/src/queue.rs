// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation queues and the display-frame path.
//!
//! A queue binds a device to a target and stores a background color. The
//! display path runs inline: it punches composited graphics through the
//! color-keyed window, programs the overlay layer with the surface's
//! attached video frame, and pushes color-enhancement values when they
//! changed since the last frame. There is no frame queue depth; by the time
//! `display` returns the hardware has been reprogrammed.

use lamina_core::surface::OutputSurface;
use lamina_core::{Color, HostTime, Result, Status, YcbcrFormat, debug_once};
use lamina_disp::config::{
    ChannelOrder, ColorSpace, FbFormat, FramebufferConfig, LayerConfig, LayerWindow, PlaneMode,
    WorkMode,
};

use crate::device::{Device, VideoMemory};
use crate::registry::{DeviceHandle, TargetHandle};
use crate::target::PresentationTarget;

/// Bias added to physical plane addresses to form DMA-visible ones.
///
/// The video engine addresses memory through a fixed aperture; this is its
/// base. Opaque calibration constant, matched to the hardware.
const DMA_ADDRESS_BIAS: u32 = 0x4000_0000;

/// Presentation status reported for a displayed surface.
///
/// There is no asynchronous queue depth; surfaces are modeled as
/// immediately and permanently visible once displayed, so status queries
/// always report [`Visible`](Self::Visible).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceStatus {
    /// Not queued for display.
    Idle,
    /// Queued but not yet on screen.
    Queued,
    /// On screen.
    Visible,
}

/// One device-plus-target binding with a stored background color.
#[derive(Debug)]
pub struct PresentationQueue {
    pub(crate) device: DeviceHandle,
    pub(crate) target: TargetHandle,
    pub(crate) background: Color,
}

impl PresentationQueue {
    pub(crate) const fn new(device: DeviceHandle, target: TargetHandle) -> Self {
        Self {
            device,
            target,
            background: Color::BLACK,
        }
    }
}

/// Punch-through alpha threshold: pixels above it are drawn into the window.
const ALPHA_THRESHOLD: u32 = 0x80;

/// Programs one frame: window punch-through plus overlay-layer setup.
pub(crate) fn display_frame(
    device: &mut Device,
    target: &mut PresentationTarget,
    surface: &mut OutputSurface,
    earliest: HostTime,
) -> Result<()> {
    let Some(frame) = surface.video().copied() else {
        // Created but never fed video data; nothing to show yet.
        debug_once!("display: surface has no attached video frame, skipping");
        return Ok(());
    };
    if !earliest.is_unavailable() {
        debug_once!("display: earliest-presentation-time is not honored, presenting immediately");
    }

    let window = target.window;
    let (origin_x, origin_y) = device.window_system().translate_to_root(window);
    device.window_system().clear_window(window);

    if !surface.is_cleared()
        && let Some(pixels) = surface.pixels()
    {
        let ws = device.window_system();
        let width = surface.width();
        for y in 0..surface.height() {
            for x in 0..width {
                let value = pixels[(y * width + x) as usize];
                if value >> 24 > ALPHA_THRESHOLD {
                    ws.draw_point(window, x, y, value & 0x00ff_ffff);
                }
            }
        }
        ws.flush();
    }

    let (mode, format, order) = layer_format(frame.format);
    let src = surface.video_src_rect();
    let dst = surface.video_dst_rect();
    let mut source = LayerWindow {
        x: src.x0 as i32,
        y: src.y0 as i32,
        width: src.width(),
        height: src.height(),
    };
    let mut screen = LayerWindow {
        x: origin_x.saturating_add(dst.x0 as i32),
        y: origin_y.saturating_add(dst.y0 as i32),
        width: dst.width(),
        height: dst.height(),
    };
    clip_top_overflow(&mut source, &mut screen);

    let config = LayerConfig {
        work_mode: WorkMode::Scaler,
        pipe: 1,
        fb: FramebufferConfig {
            mode,
            format,
            order,
            color_space: ColorSpace::Bt601,
            swap_red_blue: false,
            planes: plane_addresses(frame.virt_base, frame.plane_size, device.video_memory()),
            width: frame.width,
            height: frame.height,
        },
        source,
        screen,
        color_key_enable: true,
    };

    let disp = &mut target.disp;
    let layer = target.layer;
    disp.layer_set_config(layer, &config)
        .map_err(|_| Status::Error)?;
    // Bottom of the z-order, so the window's color-keyed drawing always
    // composites above the raw video.
    disp.layer_to_bottom(layer).map_err(|_| Status::Error)?;
    disp.layer_open(layer).map_err(|_| Status::Error)?;

    if let Some(settings) = surface.pending_color_update() {
        disp.enhance_off(layer).map_err(|_| Status::Error)?;
        disp.set_brightness(layer, brightness_code(settings.brightness))
            .map_err(|_| Status::Error)?;
        disp.set_contrast(layer, contrast_code(settings.contrast))
            .map_err(|_| Status::Error)?;
        disp.set_saturation(layer, saturation_code(settings.saturation))
            .map_err(|_| Status::Error)?;
        disp.set_hue(layer, hue_code(settings.hue))
            .map_err(|_| Status::Error)?;
        disp.enhance_on(layer).map_err(|_| Status::Error)?;
        surface.color_settings_applied();
    }
    Ok(())
}

/// Maps a declared frame color format to the layer's plane-layout fields.
///
/// Format and order fall back to `Yuv420`/`Uvuv` when the mode alone
/// determines the layout.
const fn layer_format(format: YcbcrFormat) -> (PlaneMode, FbFormat, ChannelOrder) {
    match format {
        YcbcrFormat::Yuyv => (PlaneMode::Interleaved, FbFormat::Yuv422, ChannelOrder::Yuyv),
        YcbcrFormat::Uyvy => (PlaneMode::Interleaved, FbFormat::Yuv422, ChannelOrder::Uyvy),
        YcbcrFormat::Nv12 => (
            PlaneMode::NonMbUvCombined,
            FbFormat::Yuv420,
            ChannelOrder::Uvuv,
        ),
        YcbcrFormat::Yv12 => (
            PlaneMode::NonMbPlanar,
            FbFormat::Yuv420,
            ChannelOrder::Uvuv,
        ),
        YcbcrFormat::Internal => (
            PlaneMode::MbUvCombined,
            FbFormat::Yuv420,
            ChannelOrder::Uvuv,
        ),
    }
}

/// DMA-visible addresses of luma and the two chroma planes.
///
/// Planes are laid out contiguously after luma; each chroma plane is a
/// quarter of the luma plane size.
fn plane_addresses(virt_base: usize, plane_size: u32, memory: &dyn VideoMemory) -> [u32; 3] {
    let luma = virt_base;
    let chroma0 = luma + plane_size as usize;
    let chroma1 = chroma0 + (plane_size / 4) as usize;
    [
        memory.virt_to_phys(luma).wrapping_add(DMA_ADDRESS_BIAS),
        memory.virt_to_phys(chroma0).wrapping_add(DMA_ADDRESS_BIAS),
        memory.virt_to_phys(chroma1).wrapping_add(DMA_ADDRESS_BIAS),
    ]
}

/// Crops the top of the video when the screen window starts above y = 0.
fn clip_top_overflow(source: &mut LayerWindow, screen: &mut LayerWindow) {
    if screen.y >= 0 {
        return;
    }
    let cutoff = screen.y.unsigned_abs();
    source.y = source.y.saturating_add_unsigned(cutoff);
    source.height = source.height.saturating_sub(cutoff);
    screen.height = screen.height.saturating_sub(cutoff);
    screen.y = 0;
}

// Enhancement register scales: approximate, empirically chosen mappings
// with no exact colorimetric meaning.

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "register values are defined by the truncated cast of the scaled input"
)]
fn brightness_code(value: f32) -> u32 {
    (255.0 * value + 32.0) as i32 as u32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "register values are defined by the truncated cast of the scaled input"
)]
fn contrast_code(value: f32) -> u32 {
    (32.0 * value) as i32 as u32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "register values are defined by the truncated cast of the scaled input"
)]
fn saturation_code(value: f32) -> u32 {
    (32.0 * value) as i32 as u32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "register values are defined by the truncated cast of the scaled input"
)]
fn hue_code(value: f32) -> u32 {
    (32.0 / core::f32::consts::PI * value + 32.0) as i32 as u32
}

#[cfg(test)]
mod tests {
    use super::{
        brightness_code, clip_top_overflow, contrast_code, hue_code, layer_format,
        plane_addresses, saturation_code,
    };
    use crate::device::VideoMemory;
    use lamina_core::YcbcrFormat;
    use lamina_disp::config::{ChannelOrder, FbFormat, LayerWindow, PlaneMode};

    #[derive(Debug)]
    struct Identity;

    impl VideoMemory for Identity {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test addresses fit in 32 bits"
        )]
        fn virt_to_phys(&self, virt: usize) -> u32 {
            virt as u32
        }
    }

    #[test]
    fn format_mapping_matches_the_hardware_table() {
        assert_eq!(
            layer_format(YcbcrFormat::Yuyv),
            (PlaneMode::Interleaved, FbFormat::Yuv422, ChannelOrder::Yuyv)
        );
        assert_eq!(
            layer_format(YcbcrFormat::Uyvy),
            (PlaneMode::Interleaved, FbFormat::Yuv422, ChannelOrder::Uyvy)
        );
        assert_eq!(layer_format(YcbcrFormat::Nv12).0, PlaneMode::NonMbUvCombined);
        assert_eq!(layer_format(YcbcrFormat::Yv12).0, PlaneMode::NonMbPlanar);
        assert_eq!(
            layer_format(YcbcrFormat::Internal).0,
            PlaneMode::MbUvCombined
        );
        // Non-interleaved modes keep the 4:2:0 default.
        assert_eq!(layer_format(YcbcrFormat::Nv12).1, FbFormat::Yuv420);
    }

    #[test]
    fn plane_addresses_are_contiguous_and_biased() {
        let planes = plane_addresses(0x1000, 0x400, &Identity);
        assert_eq!(planes[0], 0x4000_1000);
        assert_eq!(planes[1], 0x4000_1400);
        assert_eq!(planes[2], 0x4000_1500, "chroma planes are quarter-size");
    }

    #[test]
    fn negative_screen_y_shifts_the_source_crop() {
        let mut source = LayerWindow {
            x: 0,
            y: 10,
            width: 640,
            height: 480,
        };
        let mut screen = LayerWindow {
            x: 100,
            y: -30,
            width: 640,
            height: 480,
        };
        clip_top_overflow(&mut source, &mut screen);
        assert_eq!(source.y, 40);
        assert_eq!(source.height, 450);
        assert_eq!(screen.y, 0);
        assert_eq!(screen.height, 450);
        assert_eq!(screen.x, 100, "horizontal placement is untouched");
    }

    #[test]
    fn non_negative_screen_y_is_left_alone() {
        let mut source = LayerWindow {
            x: 0,
            y: 0,
            width: 64,
            height: 48,
        };
        let mut screen = source;
        let before = (source, screen);
        clip_top_overflow(&mut source, &mut screen);
        assert_eq!((source, screen), before);
    }

    #[test]
    fn enhancement_codes_scale_around_the_register_midpoint() {
        // Neutral defaults.
        assert_eq!(brightness_code(0.0), 32);
        assert_eq!(contrast_code(1.0), 32);
        assert_eq!(saturation_code(1.0), 32);
        assert_eq!(hue_code(0.0), 32);

        assert_eq!(brightness_code(1.0), 287);
        assert_eq!(contrast_code(0.5), 16);
        assert_eq!(saturation_code(2.0), 64);
    }
}
