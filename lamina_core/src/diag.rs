// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Once-per-call-site diagnostics.
//!
//! Permissive API conformance means several recognized format combinations
//! are accepted and silently ignored. Those paths log exactly once per call
//! site so a misbehaving caller is visible without flooding the log.

/// Logs a warning the first time this call site is reached.
#[macro_export]
macro_rules! warn_once {
    ($($arg:tt)*) => {{
        static ONCE: ::core::sync::atomic::AtomicBool =
            ::core::sync::atomic::AtomicBool::new(false);
        if !ONCE.swap(true, ::core::sync::atomic::Ordering::Relaxed) {
            $crate::log::warn!($($arg)*);
        }
    }};
}

/// Logs a debug message the first time this call site is reached.
#[macro_export]
macro_rules! debug_once {
    ($($arg:tt)*) => {{
        static ONCE: ::core::sync::atomic::AtomicBool =
            ::core::sync::atomic::AtomicBool::new(false);
        if !ONCE.swap(true, ::core::sync::atomic::Ordering::Relaxed) {
            $crate::log::debug!($($arg)*);
        }
    }};
}
