// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hardware-overlay presentation engine.
//!
//! `lamina_present` drives a color-keyed hardware overlay layer from the
//! device-independent model in [`lamina_core`]. It owns every object class
//! behind generational handles and exposes one facade, [`Engine`]:
//!
//! - **Devices** bundle the host seams: a [`WindowSystem`] for
//!   punch-through drawing, a [`lamina_disp::DispOpen`] for
//!   display-controller connections, and a [`VideoMemory`] translator for
//!   decoder addresses.
//! - **Output surfaces** hold CPU-composited graphics and, optionally, an
//!   attached decoded video frame.
//! - **Presentation targets** bind one window to one claimed overlay
//!   layer, with the window background set to the reserved punch-through
//!   key ([`RESERVED_BACKGROUND`]).
//! - **Presentation queues** bind a device to a target and present
//!   surfaces through it.
//!
//! # The frame path
//!
//! [`Engine::display`] runs inline, with no queue depth: it clears the
//! window, punches sufficiently opaque composited pixels through onto it,
//! programs the overlay layer with the frame's plane addresses and
//! geometry at the bottom of the z-order, and pushes color-enhancement
//! values when they changed since the last frame. The color key makes the
//! unpainted window transparent to the video beneath; the punched pixels
//! cover it.
//!
//! # Concurrency
//!
//! Every operation is synchronous and the engine holds no locks. Callers
//! serialize all calls against a given engine; in particular, `display`
//! must not race a mutation of the same surface.

pub mod device;
pub mod engine;
pub mod queue;
pub mod registry;
pub mod target;
pub mod time;
pub mod window;

pub use device::{DeviceConfig, VideoMemory};
pub use engine::{BitmapHandle, Engine, SurfaceCapabilities};
pub use queue::SurfaceStatus;
pub use registry::{DeviceHandle, QueueHandle, SurfaceHandle, TargetHandle};
pub use target::RESERVED_BACKGROUND;
pub use window::{WindowId, WindowSystem};
