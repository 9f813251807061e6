// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Status-code taxonomy returned by every engine operation.
//!
//! Propagation is entirely local and synchronous: operations either fully
//! apply their effect or leave prior state unchanged, and report one of the
//! codes below. Recognized-but-unimplemented format combinations are *not*
//! errors; they succeed as no-ops and log once per call site (see
//! [`warn_once!`](crate::warn_once)).

use core::fmt;

/// Why an engine operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// A required input was missing or null (e.g. a zero window id).
    InvalidPointer,
    /// The handle does not resolve to a live object of the expected kind.
    InvalidHandle,
    /// A dimension or rectangle violates bounds or ordering constraints.
    InvalidSize,
    /// Allocation or hardware-resource exhaustion (e.g. no free overlay
    /// layer).
    Resources,
    /// Unrecoverable device failure (open or protocol negotiation).
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidPointer => "required input missing",
            Self::InvalidHandle => "unknown or stale handle",
            Self::InvalidSize => "dimension or rectangle out of bounds",
            Self::Resources => "resource exhaustion",
            Self::Error => "unrecoverable device failure",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Status {}

/// Result alias used throughout the engine.
pub type Result<T> = core::result::Result<T, Status>;
