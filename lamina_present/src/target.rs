// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation targets.
//!
//! A target binds one host window to one hardware overlay layer. Creating it
//! opens a display-controller connection, negotiates the protocol version,
//! requests a scaler-mode layer, paints the window background with the
//! reserved color-key color and programs that key screen-wide. Destroying it
//! closes the layer before releasing it; release alone does not reliably
//! take a still-open layer off screen.

use lamina_core::{Result, Status};
use lamina_disp::config::{ColorKey, WorkMode};
use lamina_disp::{DispControl, DispError, LayerHandle, PROTOCOL_VERSION, version_major};

use crate::device::Device;
use crate::window::WindowId;

/// Packed `0x00RRGGBB` background reserved for color-key punch-through.
///
/// Near-black but distinct from true black, so opaque black graphics do not
/// accidentally open a hole to the overlay.
pub const RESERVED_BACKGROUND: u32 = 0x00_00_01_02;

const COLOR_KEY: ColorKey = ColorKey::exact([0x00, 0x01, 0x02]);

/// One window bound to one overlay layer.
#[derive(Debug)]
pub struct PresentationTarget {
    pub(crate) window: WindowId,
    pub(crate) disp: Box<dyn DispControl>,
    pub(crate) layer: LayerHandle,
}

impl PresentationTarget {
    /// Opens the display controller and claims a scaler layer for `window`.
    pub(crate) fn create(device: &mut Device, window: WindowId) -> Result<Self> {
        if window == WindowId::NONE {
            return Err(Status::InvalidPointer);
        }
        let mut disp = device.disp_opener().open().map_err(|err| {
            log::warn!("display controller open failed: {err}");
            Status::Error
        })?;
        let driver = disp.version(PROTOCOL_VERSION).map_err(|err| {
            log::warn!("display controller version query failed: {err}");
            Status::Error
        })?;
        if version_major(driver) != version_major(PROTOCOL_VERSION) {
            log::warn!(
                "display controller rejected: {}",
                DispError::Protocol(driver)
            );
            return Err(Status::Error);
        }
        let layer = disp
            .layer_request(WorkMode::Scaler)
            .map_err(|_| Status::Error)?
            .ok_or(Status::Resources)?;

        device
            .window_system()
            .set_window_background(window, RESERVED_BACKGROUND);
        if let Err(err) = disp.set_color_key(&COLOR_KEY) {
            log::warn!("color key setup failed: {err}");
        }

        Ok(Self {
            window,
            disp,
            layer,
        })
    }

    /// Takes the layer off screen and returns it to the driver.
    pub(crate) fn shutdown(&mut self) {
        // Close first; releasing an open layer would leave it visible.
        if let Err(err) = self.disp.layer_close(self.layer) {
            log::warn!("layer close failed: {err}");
        }
        if let Err(err) = self.disp.layer_release(self.layer) {
            log::warn!("layer release failed: {err}");
        }
    }
}
