// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The device: the bundle of host integrations everything else borrows.
//!
//! A device owns the three seams the engine needs from its host: a window
//! system for punch-through drawing, an opener for display-controller
//! connections, and the video-memory translator that turns decoder virtual
//! addresses into DMA-visible physical ones.

use core::fmt;

use lamina_disp::DispOpen;

use crate::window::WindowSystem;

/// Translates decoder virtual addresses to DMA-visible physical addresses.
///
/// Decoded frames live in a contiguous reserved memory region mapped into
/// the process; the overlay hardware wants the physical side of that
/// mapping.
pub trait VideoMemory: fmt::Debug {
    /// Physical address of `virt`, without any DMA bias applied.
    fn virt_to_phys(&self, virt: usize) -> u32;
}

/// Host integrations a device is built from.
#[derive(Debug)]
pub struct DeviceConfig {
    /// Window system used for punch-through drawing.
    pub window_system: Box<dyn WindowSystem>,
    /// Opener for display-controller connections.
    pub disp_opener: Box<dyn DispOpen>,
    /// Decoder memory translator.
    pub video_memory: Box<dyn VideoMemory>,
}

/// One created device.
#[derive(Debug)]
pub struct Device {
    window_system: Box<dyn WindowSystem>,
    disp_opener: Box<dyn DispOpen>,
    video_memory: Box<dyn VideoMemory>,
}

impl Device {
    pub(crate) fn new(config: DeviceConfig) -> Self {
        Self {
            window_system: config.window_system,
            disp_opener: config.disp_opener,
            video_memory: config.video_memory,
        }
    }

    pub(crate) fn window_system(&mut self) -> &mut dyn WindowSystem {
        &mut *self.window_system
    }

    pub(crate) fn disp_opener(&self) -> &dyn DispOpen {
        &*self.disp_opener
    }

    pub(crate) fn video_memory(&self) -> &dyn VideoMemory {
        &*self.video_memory
    }
}
