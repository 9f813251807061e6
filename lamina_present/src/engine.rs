// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: handle-based facade over devices, surfaces, targets and
//! queues.
//!
//! Every public operation resolves its handles against the engine's
//! registries and reports [`Status::InvalidHandle`] on a miss, so stale
//! handles degrade into errors instead of undefined behavior. The engine
//! itself holds no locks; callers serialize access per engine as described
//! in the crate docs.

use lamina_core::surface::{MAX_DIMENSION, OutputSurface, SurfaceParameters, SurfaceView};
use lamina_core::{
    BlendState, Color, ColorSettings, ColorTableFormat, HostTime, IndexedFormat, Rect, Result,
    RgbaFormat, Status, VideoFrame, YcbcrFormat, warn_once,
};

use crate::device::{Device, DeviceConfig};
use crate::queue::{self, PresentationQueue, SurfaceStatus};
use crate::registry::{Arena, DeviceHandle, QueueHandle, SurfaceHandle, TargetHandle};
use crate::target::PresentationTarget;
use crate::time;
use crate::window::WindowId;

/// Handle to a bitmap surface.
///
/// Bitmap surfaces are not implemented; the handle type exists so the
/// bitmap-composite stub has a signature, and no operation ever creates
/// one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitmapHandle(pub u32);

/// Answer to an output-surface capability query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceCapabilities {
    /// Whether surfaces of the queried format can be created and displayed.
    pub supported: bool,
    /// Largest supported width.
    pub max_width: u32,
    /// Largest supported height.
    pub max_height: u32,
}

/// Top-level object registry and operation dispatcher.
#[derive(Debug)]
pub struct Engine {
    devices: Arena<Device>,
    surfaces: Arena<OutputSurface>,
    targets: Arena<PresentationTarget>,
    queues: Arena<PresentationQueue>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an empty engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: Arena::new(),
            surfaces: Arena::new(),
            targets: Arena::new(),
            queues: Arena::new(),
        }
    }

    // -- Devices -----------------------------------------------------------

    /// Registers a device built from the given host integrations.
    pub fn create_device(&mut self, config: DeviceConfig) -> DeviceHandle {
        DeviceHandle(self.devices.insert(Device::new(config)))
    }

    /// Destroys a device.
    ///
    /// Targets and queues created from it keep their own resources; they
    /// must be destroyed separately, and displaying through them afterwards
    /// fails with [`Status::InvalidHandle`] when they resolve the device.
    pub fn destroy_device(&mut self, device: DeviceHandle) -> Result<()> {
        self.devices
            .remove(device.0)
            .map(drop)
            .ok_or(Status::InvalidHandle)
    }

    // -- Output surfaces ---------------------------------------------------

    /// Creates an output surface with no pixel backing yet.
    pub fn create_output_surface(
        &mut self,
        device: DeviceHandle,
        format: RgbaFormat,
        width: u32,
        height: u32,
    ) -> Result<SurfaceHandle> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        let surface = OutputSurface::new(format, width, height)?;
        Ok(SurfaceHandle(self.surfaces.insert(surface)))
    }

    /// Destroys an output surface, freeing its pixel backing.
    pub fn destroy_output_surface(&mut self, surface: SurfaceHandle) -> Result<()> {
        self.surfaces
            .remove(surface.0)
            .map(drop)
            .ok_or(Status::InvalidHandle)
    }

    /// Returns the creation parameters of a surface.
    pub fn output_surface_parameters(&self, surface: SurfaceHandle) -> Result<SurfaceParameters> {
        let surface = self.surfaces.get(surface.0).ok_or(Status::InvalidHandle)?;
        Ok(surface.parameters())
    }

    /// Uploads indexed pixels through a color table.
    ///
    /// See [`OutputSurface::put_bits_indexed`] for the supported format
    /// combination and validation rules.
    pub fn put_bits_indexed(
        &mut self,
        surface: SurfaceHandle,
        source_format: IndexedFormat,
        source: &[u8],
        source_pitch: u32,
        dest_rect: Rect,
        table_format: ColorTableFormat,
        table: &[u32],
    ) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        surface.put_bits_indexed(
            source_format,
            source,
            source_pitch,
            dest_rect,
            table_format,
            table,
        )
    }

    /// Accepts a native-format upload without performing it.
    pub fn put_bits_native(
        &mut self,
        surface: SurfaceHandle,
        source: &[u8],
        source_pitch: u32,
        dest_rect: Option<Rect>,
    ) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        surface.put_bits_native(source, source_pitch, dest_rect)
    }

    /// Reads back native-format pixels; always fails.
    ///
    /// Readback is recognized so callers get a handle check, but the packed
    /// backing is never exported and the call reports [`Status::Error`].
    pub fn get_bits_native(
        &self,
        surface: SurfaceHandle,
        source_rect: Option<Rect>,
        destination: &mut [u8],
        destination_pitch: u32,
    ) -> Result<()> {
        let _ = (source_rect, destination, destination_pitch);
        self.surfaces
            .get(surface.0)
            .ok_or(Status::InvalidHandle)?;
        Err(Status::Error)
    }

    /// Accepts a YCbCr upload without performing it.
    pub fn put_bits_ycbcr(
        &mut self,
        surface: SurfaceHandle,
        source_format: YcbcrFormat,
        planes: &[&[u8]],
        pitches: &[u32],
        dest_rect: Option<Rect>,
    ) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        surface.put_bits_ycbcr(source_format, planes, pitches, dest_rect)
    }

    /// Composites one surface into another, or clears the destination.
    ///
    /// A `None` source clears the destination by freeing its backing; no
    /// geometry is computed for that path. With a source, the overlapping
    /// region sized by the minimum of the two rects is copied top-left
    /// aligned. `colors`, `blend` and `flags` are accepted for signature
    /// conformance and not evaluated.
    pub fn render_output_surface(
        &mut self,
        destination: SurfaceHandle,
        destination_rect: Rect,
        source: Option<SurfaceHandle>,
        source_rect: Rect,
        colors: Option<&[Color]>,
        blend: Option<&BlendState>,
        flags: u32,
    ) -> Result<()> {
        let _ = (colors, blend, flags);
        let Some(source) = source else {
            let dest = self
                .surfaces
                .get_mut(destination.0)
                .ok_or(Status::InvalidHandle)?;
            dest.clear_backing();
            return Ok(());
        };
        if source == destination {
            // Self-composite: snapshot the backing so source and
            // destination do not alias.
            let dest = self
                .surfaces
                .get_mut(destination.0)
                .ok_or(Status::InvalidHandle)?;
            let snapshot = dest.pixels().map(<[u32]>::to_vec);
            let view = SurfaceView {
                width: dest.width(),
                height: dest.height(),
                pixels: snapshot.as_deref(),
            };
            return dest.render_from(destination_rect, view, source_rect);
        }
        let (dest, source) = self
            .surfaces
            .get_pair_mut(destination.0, source.0)
            .ok_or(Status::InvalidHandle)?;
        dest.render_from(destination_rect, source.view(), source_rect)
    }

    /// Accepts a bitmap-surface composite without performing it.
    pub fn render_bitmap_surface(
        &mut self,
        destination: SurfaceHandle,
        destination_rect: Rect,
        source: Option<BitmapHandle>,
        source_rect: Rect,
        colors: Option<&[Color]>,
        blend: Option<&BlendState>,
        flags: u32,
    ) -> Result<()> {
        let _ = (destination_rect, source, source_rect, colors, blend, flags);
        self.surfaces
            .get(destination.0)
            .ok_or(Status::InvalidHandle)?;
        warn_once!("render_bitmap_surface: unimplemented, ignoring");
        Ok(())
    }

    /// Reports whether surfaces of `format` can be created, and the size
    /// limits that apply.
    pub fn query_output_surface_capabilities(
        &self,
        device: DeviceHandle,
        format: RgbaFormat,
    ) -> Result<SurfaceCapabilities> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        Ok(SurfaceCapabilities {
            supported: matches!(format, RgbaFormat::B8g8r8a8 | RgbaFormat::R8g8b8a8),
            max_width: MAX_DIMENSION / 2,
            max_height: MAX_DIMENSION / 2,
        })
    }

    /// Reports whether the native upload path supports `format`.
    ///
    /// Always false; the path is a stub.
    pub fn query_put_bits_native_capability(
        &self,
        device: DeviceHandle,
        format: RgbaFormat,
    ) -> Result<bool> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        let _ = format;
        Ok(false)
    }

    /// Reports whether the indexed upload path advertises `formats`.
    ///
    /// Always false: the implemented combination is narrower than any
    /// advertisable pair, so probing callers are steered away from it.
    pub fn query_put_bits_indexed_capability(
        &self,
        device: DeviceHandle,
        surface_format: RgbaFormat,
        source_format: IndexedFormat,
        table_format: ColorTableFormat,
    ) -> Result<bool> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        let _ = (surface_format, source_format, table_format);
        Ok(false)
    }

    /// Reports whether the YCbCr upload path supports the format pair.
    ///
    /// Always false; the path is a stub.
    pub fn query_put_bits_ycbcr_capability(
        &self,
        device: DeviceHandle,
        surface_format: RgbaFormat,
        source_format: YcbcrFormat,
    ) -> Result<bool> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        let _ = (surface_format, source_format);
        Ok(false)
    }

    // -- Video attachment (external submission seam) -----------------------

    /// Attaches a decoded frame to a surface with crop and placement rects.
    ///
    /// This is the hand-off point for the external video-submission path;
    /// the next display of the surface programs the overlay from it.
    pub fn attach_video_frame(
        &mut self,
        surface: SurfaceHandle,
        frame: VideoFrame,
        source_rect: Rect,
        dest_rect: Rect,
    ) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        surface.attach_video(frame, source_rect, dest_rect);
        Ok(())
    }

    /// Updates a surface's color-enhancement parameters.
    ///
    /// The hardware is touched on the next display, and only when the
    /// values differ from the last applied ones.
    pub fn set_surface_color_settings(
        &mut self,
        surface: SurfaceHandle,
        settings: ColorSettings,
    ) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        surface.set_color_settings(settings);
        Ok(())
    }

    // -- Presentation targets ----------------------------------------------

    /// Binds a window to a freshly claimed overlay layer.
    pub fn create_presentation_target(
        &mut self,
        device: DeviceHandle,
        window: WindowId,
    ) -> Result<TargetHandle> {
        let dev = self.devices.get_mut(device.0).ok_or(Status::InvalidHandle)?;
        let target = PresentationTarget::create(dev, window)?;
        Ok(TargetHandle(self.targets.insert(target)))
    }

    /// Destroys a target, closing its layer before releasing it.
    ///
    /// Queues still bound to the target go stale; displaying through them
    /// fails with [`Status::InvalidHandle`].
    pub fn destroy_presentation_target(&mut self, target: TargetHandle) -> Result<()> {
        let mut target = self.targets.remove(target.0).ok_or(Status::InvalidHandle)?;
        target.shutdown();
        Ok(())
    }

    // -- Presentation queues -----------------------------------------------

    /// Creates a queue bound to one device and one target.
    pub fn create_presentation_queue(
        &mut self,
        device: DeviceHandle,
        target: TargetHandle,
    ) -> Result<QueueHandle> {
        self.devices.get(device.0).ok_or(Status::InvalidHandle)?;
        self.targets.get(target.0).ok_or(Status::InvalidHandle)?;
        Ok(QueueHandle(
            self.queues.insert(PresentationQueue::new(device, target)),
        ))
    }

    /// Destroys a queue without touching its target.
    pub fn destroy_presentation_queue(&mut self, queue: QueueHandle) -> Result<()> {
        self.queues
            .remove(queue.0)
            .map(drop)
            .ok_or(Status::InvalidHandle)
    }

    /// Stores the queue's background color.
    ///
    /// The color is a plain attribute in the current scope; the window
    /// background stays at the reserved punch-through key.
    pub fn set_queue_background(&mut self, queue: QueueHandle, background: Color) -> Result<()> {
        let queue = self.queues.get_mut(queue.0).ok_or(Status::InvalidHandle)?;
        queue.background = background;
        Ok(())
    }

    /// Returns the queue's stored background color.
    pub fn queue_background(&self, queue: QueueHandle) -> Result<Color> {
        let queue = self.queues.get(queue.0).ok_or(Status::InvalidHandle)?;
        Ok(queue.background)
    }

    /// Current monotonic time, as the queue's presentation clock.
    pub fn queue_time(&self, queue: QueueHandle) -> Result<HostTime> {
        self.queues.get(queue.0).ok_or(Status::InvalidHandle)?;
        Ok(time::now())
    }

    /// Presents a surface through a queue's target, immediately.
    ///
    /// `clip_width`/`clip_height` and `earliest` are accepted for signature
    /// conformance: the overlay is clipped against the window geometry
    /// instead, and presentation never waits. See the crate docs for the
    /// full frame path.
    pub fn display(
        &mut self,
        queue: QueueHandle,
        surface: SurfaceHandle,
        clip_width: u32,
        clip_height: u32,
        earliest: HostTime,
    ) -> Result<()> {
        let _ = (clip_width, clip_height);
        let queue = self.queues.get(queue.0).ok_or(Status::InvalidHandle)?;
        let surface = self
            .surfaces
            .get_mut(surface.0)
            .ok_or(Status::InvalidHandle)?;
        let target = self
            .targets
            .get_mut(queue.target.0)
            .ok_or(Status::InvalidHandle)?;
        let device = self
            .devices
            .get_mut(queue.device.0)
            .ok_or(Status::InvalidHandle)?;
        queue::display_frame(device, target, surface, earliest)
    }

    /// Waits until a displayed surface leaves the screen.
    ///
    /// Presentation is immediate and permanent in this design, so this
    /// returns at once with the current time as the first-presentation
    /// stamp.
    pub fn block_until_surface_idle(
        &self,
        queue: QueueHandle,
        surface: SurfaceHandle,
    ) -> Result<HostTime> {
        self.queues.get(queue.0).ok_or(Status::InvalidHandle)?;
        self.surfaces.get(surface.0).ok_or(Status::InvalidHandle)?;
        Ok(time::now())
    }

    /// Reports a surface's presentation status and first-presentation time.
    ///
    /// Always [`SurfaceStatus::Visible`] with "now"; there is no queue
    /// depth to wait on.
    pub fn query_surface_status(
        &self,
        queue: QueueHandle,
        surface: SurfaceHandle,
    ) -> Result<(SurfaceStatus, HostTime)> {
        self.queues.get(queue.0).ok_or(Status::InvalidHandle)?;
        self.surfaces.get(surface.0).ok_or(Status::InvalidHandle)?;
        Ok((SurfaceStatus::Visible, time::now()))
    }
}
