// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic presentation timestamps.
//!
//! [`HostTime`] is an opaque 64-bit nanosecond count since an unspecified
//! monotonic epoch. The zero value is reserved to signal "clock
//! unavailable"; operations that stamp "now" never fail, they report
//! [`HostTime::UNAVAILABLE`] instead.

use core::fmt;

/// A point in time in nanoseconds since an unspecified monotonic epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Reserved value signalling that the clock could not be read.
    pub const UNAVAILABLE: Self = Self(0);

    /// Returns the raw nanosecond count.
    #[inline]
    #[must_use]
    pub const fn nanos(self) -> u64 {
        self.0
    }

    /// Whether this is the reserved "clock unavailable" value.
    #[inline]
    #[must_use]
    pub const fn is_unavailable(self) -> bool {
        self.0 == 0
    }

    /// Nanoseconds between `self` and an earlier time, or zero if `earlier`
    /// is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_nanos_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}ns)", self.0)
    }
}
