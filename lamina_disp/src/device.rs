// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux display-controller device.
//!
//! [`DispDevice`] owns the opened device node and is the only place raw
//! control calls are issued; everything above it speaks the typed
//! [`DispControl`] surface.

#![allow(
    unsafe_code,
    reason = "raw ioctls against the display controller need libc"
)]

use std::ffi::CString;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use crate::config::{LayerConfig, WorkMode};
use crate::raw::{self, ArgBlock, request};
use crate::{DispControl, DispError, DispOpen, LayerHandle};

/// Default device node of the display controller.
pub const DEFAULT_NODE: &str = "/dev/disp";

fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// An opened display-controller device node.
#[derive(Debug)]
pub struct DispDevice {
    fd: OwnedFd,
}

impl DispDevice {
    /// Opens the controller at `path` read-write.
    pub fn open(path: &Path) -> Result<Self, DispError> {
        let Some(bytes) = path.to_str().map(str::as_bytes) else {
            return Err(DispError::Open(libc::EINVAL));
        };
        let Ok(cpath) = CString::new(bytes) else {
            return Err(DispError::Open(libc::EINVAL));
        };
        // SAFETY: `cpath` is a valid NUL-terminated string for the duration
        // of the call.
        let fd = unsafe { libc::open(cpath.as_ptr(), libc::O_RDWR) };
        if fd < 0 {
            return Err(DispError::Open(last_errno()));
        }
        // SAFETY: `fd` was just returned by a successful `open` and is not
        // owned elsewhere.
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };
        log::debug!("opened display controller at {}", path.display());
        Ok(Self { fd })
    }

    /// Issues one control request, returning the driver's status word.
    fn control(&mut self, code: u32, args: &mut ArgBlock) -> Result<i32, DispError> {
        // SAFETY: the argument block outlives the call and matches the
        // layout the driver expects for `code` (see `raw`).
        let ret = unsafe {
            libc::ioctl(
                self.fd.as_raw_fd(),
                libc::c_ulong::from(code),
                args.as_mut_ptr(),
            )
        };
        if ret < 0 {
            return Err(DispError::Io(last_errno()));
        }
        Ok(ret)
    }

    fn layer_args(layer: LayerHandle) -> ArgBlock {
        [0, layer.0 as usize, 0, 0]
    }

    fn simple_layer_request(&mut self, code: u32, layer: LayerHandle) -> Result<(), DispError> {
        self.control(code, &mut Self::layer_args(layer)).map(|_| ())
    }

    fn scalar_layer_request(
        &mut self,
        code: u32,
        layer: LayerHandle,
        value: u32,
    ) -> Result<(), DispError> {
        let mut args = [0, layer.0 as usize, value as usize, 0];
        self.control(code, &mut args).map(|_| ())
    }
}

impl DispControl for DispDevice {
    fn version(&mut self, requested: u32) -> Result<u32, DispError> {
        let mut version = requested;
        // SAFETY: the version request reads and writes a single word.
        let ret = unsafe {
            libc::ioctl(
                self.fd.as_raw_fd(),
                libc::c_ulong::from(request::VERSION),
                &raw mut version,
            )
        };
        if ret < 0 {
            return Err(DispError::Io(last_errno()));
        }
        Ok(version)
    }

    fn layer_request(&mut self, mode: WorkMode) -> Result<Option<LayerHandle>, DispError> {
        let mut args = [0, raw::work_mode_code(mode) as usize, 0, 0];
        let id = self.control(request::LAYER_REQUEST, &mut args)?;
        if id == 0 {
            return Ok(None);
        }
        Ok(Some(LayerHandle(id as u32)))
    }

    fn layer_release(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_RELEASE, layer)
    }

    fn layer_open(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_OPEN, layer)
    }

    fn layer_close(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_CLOSE, layer)
    }

    fn layer_set_config(
        &mut self,
        layer: LayerHandle,
        config: &LayerConfig,
    ) -> Result<(), DispError> {
        let mut info = raw::encode_layer_info(config);
        let mut args = [
            0,
            layer.0 as usize,
            core::ptr::from_mut(&mut info) as usize,
            0,
        ];
        self.control(request::LAYER_SET_PARA, &mut args).map(|_| ())
    }

    fn layer_to_bottom(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_BOTTOM, layer)
    }

    fn enhance_on(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_ENHANCE_ON, layer)
    }

    fn enhance_off(&mut self, layer: LayerHandle) -> Result<(), DispError> {
        self.simple_layer_request(request::LAYER_ENHANCE_OFF, layer)
    }

    fn set_brightness(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.scalar_layer_request(request::LAYER_SET_BRIGHT, layer, value)
    }

    fn set_contrast(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.scalar_layer_request(request::LAYER_SET_CONTRAST, layer, value)
    }

    fn set_saturation(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.scalar_layer_request(request::LAYER_SET_SATURATION, layer, value)
    }

    fn set_hue(&mut self, layer: LayerHandle, value: u32) -> Result<(), DispError> {
        self.scalar_layer_request(request::LAYER_SET_HUE, layer, value)
    }

    fn set_color_key(&mut self, key: &crate::config::ColorKey) -> Result<(), DispError> {
        let mut raw_key = raw::encode_color_key(key);
        let mut args = [0, core::ptr::from_mut(&mut raw_key) as usize, 0, 0];
        self.control(request::SET_COLOR_KEY, &mut args).map(|_| ())
    }
}

/// [`DispOpen`] implementation over a device-node path.
#[derive(Clone, Debug)]
pub struct DispNodeOpener {
    path: PathBuf,
}

impl DispNodeOpener {
    /// Opener for an explicit device node.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for DispNodeOpener {
    fn default() -> Self {
        Self::new(DEFAULT_NODE)
    }
}

impl DispOpen for DispNodeOpener {
    fn open(&self) -> Result<Box<dyn DispControl>, DispError> {
        Ok(Box::new(DispDevice::open(&self.path)?))
    }
}
