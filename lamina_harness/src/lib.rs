// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording fakes for exercising the presentation engine without hardware.
//!
//! The engine's host seams are traits, so tests can substitute fakes that
//! record every call: [`RecordingDispOpener`] stands in for the display
//! controller, [`RecordingWindowSystem`] for the window system, and
//! [`IdentityMemory`] for the video-memory translator. The shared logs are
//! `Rc`-backed, so a test keeps a handle to them while the engine owns the
//! fakes.
//!
//! ```
//! use lamina_harness::recording_device;
//! use lamina_present::Engine;
//!
//! let (config, disp_log, window_log) = recording_device((0, 0));
//! let mut engine = Engine::new();
//! let device = engine.create_device(config);
//! // ... exercise the engine, then assert on disp_log / window_log.
//! # let _ = (device, disp_log, window_log);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use lamina_core::{VideoFrame, YcbcrFormat};
use lamina_disp::config::{ColorKey, LayerConfig, WorkMode};
use lamina_disp::{DispControl, DispError, DispOpen, LayerHandle};
use lamina_present::{DeviceConfig, VideoMemory, WindowId, WindowSystem};

/// One recorded display-controller call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DispCall {
    /// Version negotiation with the caller's requested version.
    Version {
        /// Version the engine asked for.
        requested: u32,
    },
    /// Layer claim in the given working mode.
    LayerRequest {
        /// Requested working mode.
        mode: WorkMode,
    },
    /// Layer returned to the driver.
    LayerRelease {
        /// Released layer.
        layer: LayerHandle,
    },
    /// Layer shown.
    LayerOpen {
        /// Opened layer.
        layer: LayerHandle,
    },
    /// Layer hidden.
    LayerClose {
        /// Closed layer.
        layer: LayerHandle,
    },
    /// Full parameter block applied to a layer.
    LayerSetConfig {
        /// Configured layer.
        layer: LayerHandle,
        /// The applied block.
        config: LayerConfig,
    },
    /// Layer moved to the bottom of the z-order.
    LayerToBottom {
        /// Moved layer.
        layer: LayerHandle,
    },
    /// Color enhancement enabled.
    EnhanceOn {
        /// Affected layer.
        layer: LayerHandle,
    },
    /// Color enhancement disabled.
    EnhanceOff {
        /// Affected layer.
        layer: LayerHandle,
    },
    /// Brightness register write.
    SetBrightness {
        /// Affected layer.
        layer: LayerHandle,
        /// Register value.
        value: u32,
    },
    /// Contrast register write.
    SetContrast {
        /// Affected layer.
        layer: LayerHandle,
        /// Register value.
        value: u32,
    },
    /// Saturation register write.
    SetSaturation {
        /// Affected layer.
        layer: LayerHandle,
        /// Register value.
        value: u32,
    },
    /// Hue register write.
    SetHue {
        /// Affected layer.
        layer: LayerHandle,
        /// Register value.
        value: u32,
    },
    /// Screen-wide color key programmed.
    SetColorKey {
        /// The programmed key.
        key: ColorKey,
    },
}

/// Shared, clonable log of display-controller calls.
#[derive(Clone, Debug, Default)]
pub struct DispLog(Rc<RefCell<Vec<DispCall>>>);

impl DispLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: DispCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copies out everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DispCall> {
        self.0.borrow().clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Configurable opener producing [`RecordingDisp`] connections.
#[derive(Clone, Debug, Default)]
pub struct RecordingDispOpener {
    /// Log every connection from this opener records into.
    pub log: DispLog,
    /// When set, `open` fails as if the device node were missing.
    pub fail_open: bool,
    /// Version the fake driver reports; `None` echoes the requested one.
    pub reported_version: Option<u32>,
    /// When set, layer requests report exhaustion.
    pub deny_layers: bool,
}

impl RecordingDispOpener {
    /// An opener that succeeds at everything, recording into `log`.
    #[must_use]
    pub fn new(log: DispLog) -> Self {
        Self {
            log,
            fail_open: false,
            reported_version: None,
            deny_layers: false,
        }
    }
}

impl DispOpen for RecordingDispOpener {
    fn open(&self) -> Result<Box<dyn DispControl>, DispError> {
        if self.fail_open {
            return Err(DispError::Open(2));
        }
        Ok(Box::new(RecordingDisp {
            log: self.log.clone(),
            reported_version: self.reported_version,
            deny_layers: self.deny_layers,
            next_layer: 100,
        }))
    }
}

/// A fake display-controller connection that records and succeeds.
#[derive(Debug)]
pub struct RecordingDisp {
    log: DispLog,
    reported_version: Option<u32>,
    deny_layers: bool,
    next_layer: u32,
}

impl DispControl for RecordingDisp {
    fn version(&mut self, requested: u32) -> Result<u32, DispError> {
        self.log.push(DispCall::Version { requested });
        Ok(self.reported_version.unwrap_or(requested))
    }

    fn layer_request(&mut self, mode: WorkMode) -> Result<Option<LayerHandle>, DispError> {
        self.log.push(DispCall::LayerRequest { mode });
        if self.deny_layers {
            return Ok(None);
        }
        let layer = LayerHandle(self.next_layer);
        self.next_layer += 1;
        Ok(Some(layer))
    }

    fn layer_release(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::LayerRelease { layer });
        Ok(())
    }

    fn layer_open(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::LayerOpen { layer });
        Ok(())
    }

    fn layer_close(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::LayerClose { layer });
        Ok(())
    }

    fn layer_set_config(
        &mut self,
        layer: LayerHandle,
        config: &LayerConfig,
    ) -> Result<(), DispError> {
        self.log.push(DispCall::LayerSetConfig {
            layer,
            config: *config,
        });
        Ok(())
    }

    fn layer_to_bottom(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::LayerToBottom { layer });
        Ok(())
    }

    fn enhance_on(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::EnhanceOn { layer });
        Ok(())
    }

    fn enhance_off(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.log.push(DispCall::EnhanceOff { layer });
        Ok(())
    }

    fn set_brightness(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.log.push(DispCall::SetBrightness { layer, value });
        Ok(())
    }

    fn set_contrast(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.log.push(DispCall::SetContrast { layer, value });
        Ok(())
    }

    fn set_saturation(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.log.push(DispCall::SetSaturation { layer, value });
        Ok(())
    }

    fn set_hue(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.log.push(DispCall::SetHue { layer, value });
        Ok(())
    }

    fn set_color_key(&mut self, key: &ColorKey) -> Result<(), DispError> {
        self.log.push(DispCall::SetColorKey { key: *key });
        Ok(())
    }
}

/// One recorded window-system call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowCall {
    /// Root-origin lookup.
    TranslateToRoot {
        /// Queried window.
        window: WindowId,
    },
    /// Window cleared to its background.
    ClearWindow {
        /// Cleared window.
        window: WindowId,
    },
    /// Background color set.
    SetBackground {
        /// Affected window.
        window: WindowId,
        /// Packed `0x00RRGGBB` color.
        rgb: u32,
    },
    /// One punched-through pixel.
    DrawPoint {
        /// Target window.
        window: WindowId,
        /// Window-relative x.
        x: u32,
        /// Window-relative y.
        y: u32,
        /// Packed `0x00RRGGBB` color.
        rgb: u32,
    },
    /// Batched drawing flushed.
    Flush,
}

/// Shared, clonable log of window-system calls.
#[derive(Clone, Debug, Default)]
pub struct WindowLog(Rc<RefCell<Vec<WindowCall>>>);

impl WindowLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: WindowCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copies out everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WindowCall> {
        self.0.borrow().clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A fake window system with a fixed root origin for every window.
#[derive(Clone, Debug)]
pub struct RecordingWindowSystem {
    /// Log this fake records into.
    pub log: WindowLog,
    /// Root-relative origin reported for every window.
    pub origin: (i32, i32),
}

impl RecordingWindowSystem {
    /// A window system reporting `origin` for every window.
    #[must_use]
    pub fn new(log: WindowLog, origin: (i32, i32)) -> Self {
        Self { log, origin }
    }
}

impl WindowSystem for RecordingWindowSystem {
    fn translate_to_root(&mut self, window: WindowId) -> (i32, i32) {
        self.log.push(WindowCall::TranslateToRoot { window });
        self.origin
    }

    fn clear_window(&mut self, window: WindowId) {
        self.log.push(WindowCall::ClearWindow { window });
    }

    fn set_window_background(&mut self, window: WindowId, rgb: u32) {
        self.log.push(WindowCall::SetBackground { window, rgb });
    }

    fn draw_point(&mut self, window: WindowId, x: u32, y: u32, rgb: u32) {
        self.log.push(WindowCall::DrawPoint { window, x, y, rgb });
    }

    fn flush(&mut self) {
        self.log.push(WindowCall::Flush);
    }
}

/// Translator mapping every virtual address to itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMemory;

impl VideoMemory for IdentityMemory {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "harness addresses are chosen to fit in 32 bits"
    )]
    fn virt_to_phys(&self, virt: usize) -> u32 {
        virt as u32
    }
}

/// A small NV12 frame whose plane addresses round to easy-to-spot values
/// under [`IdentityMemory`].
///
/// The luma plane sits at `0x1000` with a `0x400` byte plane size, so the
/// scanout addresses come out as `0x4000_1000`, `0x4000_1400` and
/// `0x4000_1500` once the DMA bias is applied.
#[must_use]
pub const fn nv12_frame() -> VideoFrame {
    VideoFrame {
        virt_base: 0x1000,
        plane_size: 0x400,
        format: YcbcrFormat::Nv12,
        width: 640,
        height: 480,
    }
}

/// A fully working fake device plus handles to both of its logs.
#[must_use]
pub fn recording_device(origin: (i32, i32)) -> (DeviceConfig, DispLog, WindowLog) {
    let disp_log = DispLog::new();
    let window_log = WindowLog::new();
    let config = DeviceConfig {
        window_system: Box::new(RecordingWindowSystem::new(window_log.clone(), origin)),
        disp_opener: Box::new(RecordingDispOpener::new(disp_log.clone())),
        video_memory: Box::new(IdentityMemory),
    };
    (config, disp_log, window_log)
}
