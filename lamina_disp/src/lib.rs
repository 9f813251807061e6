// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed display-controller control protocol.
//!
//! The display controller behind the overlay layer is driven through a small
//! set of numbered control requests against an opened device node. This
//! crate replaces the raw "4-word argument block with pointers encoded as
//! integers" convention with a typed request surface:
//!
//! - [`DispControl`] — one method per control request, with typed
//!   parameters validated at this boundary.
//! - [`config`] — the layer configuration model (work mode, framebuffer
//!   block, source/screen windows, color key).
//! - [`raw`] — the explicit, exhaustive mapping from typed requests to
//!   request codes and `#[repr(C)]` argument blocks.
//! - [`device`] — the Linux implementation over the opened device node
//!   (the only place that issues real ioctls).
//!
//! Device-node discovery and display bootstrap remain external concerns;
//! callers hand the engine a [`DispOpen`] implementation and the engine
//! opens one controller per presentation target.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use core::fmt;

pub mod config;
#[cfg(target_os = "linux")]
pub mod device;
pub mod raw;

pub use config::{ColorKey, LayerConfig, WorkMode};

/// Protocol version this crate speaks, encoded as `major << 16 | minor`.
pub const PROTOCOL_VERSION: u32 = encode_version(1, 0);

/// Encodes a protocol version number.
#[must_use]
pub const fn encode_version(major: u16, minor: u16) -> u32 {
    (major as u32) << 16 | minor as u32
}

/// Extracts the major component of an encoded version.
#[must_use]
pub const fn version_major(version: u32) -> u16 {
    (version >> 16) as u16
}

/// Driver-assigned identifier of a requested overlay layer.
///
/// The driver's zero value means "no layer available" and never appears in
/// a `LayerHandle`; [`DispControl::layer_request`] surfaces it as `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u32);

impl fmt::Debug for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerHandle({})", self.0)
    }
}

/// Why a control request failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispError {
    /// The device node could not be opened (raw OS errno).
    Open(i32),
    /// The underlying control call failed (raw OS errno).
    Io(i32),
    /// The driver answered with an unusable value (e.g. a protocol version
    /// from an incompatible major revision).
    Protocol(u32),
}

impl fmt::Display for DispError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(errno) => write!(f, "device open failed (errno {errno})"),
            Self::Io(errno) => write!(f, "control request failed (errno {errno})"),
            Self::Protocol(version) => {
                write!(
                    f,
                    "incompatible driver protocol {}.{}",
                    version_major(*version),
                    version & 0xffff
                )
            }
        }
    }
}

impl core::error::Error for DispError {}

/// One method per display-controller request.
///
/// Implementations translate each call into the device's control protocol
/// ([`device::DispDevice`]) or record it for inspection (the harness
/// recorder). All calls are synchronous and block only for the duration of
/// the underlying request.
pub trait DispControl: fmt::Debug {
    /// Negotiates the driver protocol version, returning the driver's.
    fn version(&mut self, requested: u32) -> Result<u32, DispError>;

    /// Requests a new overlay layer in the given working mode.
    ///
    /// Returns `None` when the driver reports the no-layer sentinel
    /// (hardware layer exhaustion, not an I/O failure).
    fn layer_request(&mut self, mode: WorkMode) -> Result<Option<LayerHandle>, DispError>;

    /// Releases a layer back to the driver.
    ///
    /// Releasing an open layer is not guaranteed to close it; callers close
    /// first.
    fn layer_release(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Makes the layer visible.
    fn layer_open(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Hides the layer.
    fn layer_close(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Applies geometry and format parameters to the layer.
    fn layer_set_config(&mut self, layer: LayerHandle, config: &LayerConfig)
    -> Result<(), DispError>;

    /// Forces the layer to the bottom of the hardware z-order.
    fn layer_to_bottom(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Enables color enhancement for the layer.
    fn enhance_on(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Disables color enhancement for the layer.
    fn enhance_off(&mut self, layer: LayerHandle) -> Result<(), DispError>;

    /// Pushes a raw brightness register value.
    fn set_brightness(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError>;

    /// Pushes a raw contrast register value.
    fn set_contrast(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError>;

    /// Pushes a raw saturation register value.
    fn set_saturation(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError>;

    /// Pushes a raw hue register value.
    fn set_hue(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError>;

    /// Configures the screen-wide transparency color key.
    fn set_color_key(&mut self, key: &ColorKey) -> Result<(), DispError>;
}

/// Opens a display controller for a presentation target.
///
/// The engine calls this once per target; each open controller owns its own
/// descriptor and is dropped together with the target.
pub trait DispOpen: fmt::Debug {
    /// Opens a fresh controller connection.
    fn open(&self) -> Result<Box<dyn DispControl>, DispError>;
}
