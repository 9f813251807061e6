// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangles and their validity rules.

use core::fmt;

/// An axis-aligned rectangle in surface coordinates.
///
/// `(x0, y0)` is the top-left corner and `(x1, y1)` the bottom-right one.
/// Width and height are the coordinate differences, so a rect with
/// `x0 == x1` is empty. Validity against a surface requires `x0 <= x1`,
/// `y0 <= y1`, `x1 < width` and `y1 < height`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x0: u32,
    /// Top edge.
    pub y0: u32,
    /// Right edge.
    pub x1: u32,
    /// Bottom edge.
    pub y1: u32,
}

impl Rect {
    /// Creates a rect from its corners.
    #[must_use]
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rect covering `width × height` cells anchored at the origin.
    #[must_use]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    /// Horizontal extent (`x1 - x0`), zero when the corners are inverted.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Vertical extent (`y1 - y0`), zero when the corners are inverted.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Whether this rect is well-ordered and lies inside a `width × height`
    /// surface.
    ///
    /// The bound is exclusive on `x1`/`y1`, mirroring the constraint the
    /// engine inherits from its public API contract.
    #[must_use]
    pub const fn valid_within(self, width: u32, height: u32) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1 && self.x1 < width && self.y1 < height
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({},{} - {},{})",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn extents_saturate_on_inverted_corners() {
        let r = Rect::new(5, 5, 2, 2);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
    }

    #[test]
    fn validity_is_exclusive_on_the_far_edge() {
        assert!(Rect::new(0, 0, 9, 9).valid_within(10, 10));
        assert!(!Rect::new(0, 0, 10, 9).valid_within(10, 10));
        assert!(!Rect::new(0, 0, 9, 10).valid_within(10, 10));
        assert!(!Rect::new(3, 0, 2, 9).valid_within(10, 10), "inverted x");
    }

    #[test]
    fn from_size_covers_the_origin_anchored_area() {
        let r = Rect::from_size(4, 3);
        assert_eq!((r.width(), r.height()), (4, 3));
        assert_eq!((r.x0, r.y0), (0, 0));
    }
}
