// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window-system seam.
//!
//! The engine never talks to a windowing protocol directly; everything it
//! needs from one is the small [`WindowSystem`] trait. The display path uses
//! it to place the overlay under the right root coordinates and to punch
//! composited pixels through the reserved background color.

use core::fmt;

/// Opaque identifier of a window owned by the window system.
///
/// Zero is reserved as the "no window" value and is rejected when creating
/// a presentation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

impl WindowId {
    /// The reserved "no window" identifier.
    pub const NONE: Self = Self(0);
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// The operations the display path needs from a window system.
///
/// Implementations are expected to be cheap to call per frame; `draw_point`
/// in particular runs once per punched-through pixel and should batch until
/// [`flush`](Self::flush).
pub trait WindowSystem: fmt::Debug {
    /// Root-relative origin of the window's top-left corner.
    ///
    /// The overlay layer is positioned in root coordinates, so window
    /// placement translates through this before every frame.
    fn translate_to_root(&mut self, window: WindowId) -> (i32, i32);

    /// Clears the window to its background color.
    fn clear_window(&mut self, window: WindowId);

    /// Sets the window's background to a packed `0x00RRGGBB` color.
    fn set_window_background(&mut self, window: WindowId, rgb: u32);

    /// Draws one pixel of punched-through graphics at window-relative
    /// coordinates.
    fn draw_point(&mut self, window: WindowId, x: u32, y: u32, rgb: u32);

    /// Flushes any batched drawing to the display server.
    fn flush(&mut self);
}
