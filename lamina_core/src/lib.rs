// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model for hardware-overlay video presentation.
//!
//! `lamina_core` provides the pure, device-independent parts of a
//! presentation engine that shows decoded video frames through a hardware
//! overlay layer while CPU-composited graphics are punched through above it.
//! It is `no_std` compatible (with `alloc`); everything that touches a
//! display controller or a window system lives in `lamina_present` and
//! `lamina_disp`.
//!
//! # Architecture
//!
//! ```text
//!   put_bits / render ──► OutputSurface (packed RGBA backing)
//!                             │
//!   decoder (external) ──► VideoFrame + crop/placement rects
//!                             │
//!                             ▼
//!   lamina_present: Display ──► hardware layer config + punch-through
//! ```
//!
//! **[`surface`]** — The output-surface pixel store: lazily allocated
//! packed-RGBA backing, indexed-to-RGBA expansion, surface-to-surface
//! composition, clearing.
//!
//! **[`video`]** — The decoded-frame descriptor attached to a surface by an
//! external submission path, plus color-enhancement settings with a cached
//! "last applied" value gating expensive hardware updates.
//!
//! **[`format`]** — Pixel-format tags and color types for the supported
//! format algebra.
//!
//! **[`geometry`]** — Integer rectangles and their validity rules.
//!
//! **[`status`]** — The status-code taxonomy every operation reports.
//!
//! **[`time`]** — Monotonic nanosecond timestamps for presentation-time and
//! status queries.
//!
//! # Crate features
//!
//! - `std` (disabled by default): reserved for future host-only helpers;
//!   the crate itself is fully functional without it.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[doc(hidden)]
pub use log;

mod diag;
pub mod format;
pub mod geometry;
pub mod status;
pub mod surface;
pub mod time;
pub mod video;

pub use format::{
    BlendFactor, BlendState, Color, ColorTableFormat, IndexedFormat, RgbaFormat, YcbcrFormat,
};
pub use geometry::Rect;
pub use status::{Result, Status};
pub use surface::OutputSurface;
pub use time::HostTime;
pub use video::{ColorSettings, VideoFrame};
