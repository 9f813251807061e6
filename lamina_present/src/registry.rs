// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational handle registries.
//!
//! Every object the engine hands out to callers lives in an [`Arena`] and is
//! addressed by a handle carrying a slot index plus a generation counter.
//! Destroying an object bumps the slot's generation, so stale handles from a
//! destroyed object miss instead of aliasing whatever reuses the slot.
//!
//! Each object class gets its own arena and its own handle newtype, which
//! makes passing a surface handle where a queue handle is expected a compile
//! error rather than a runtime one.

use core::fmt;

/// Index-plus-generation pair addressing one arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawHandle {
    idx: u32,
    generation: u32,
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.idx, self.generation)
    }
}

macro_rules! typed_handle {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub struct $name(pub(crate) RawHandle);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

typed_handle! {
    /// Handle to a device created by [`Engine::create_device`].
    ///
    /// [`Engine::create_device`]: crate::Engine::create_device
    DeviceHandle;
    /// Handle to an output surface.
    SurfaceHandle;
    /// Handle to a presentation target.
    TargetHandle;
    /// Handle to a presentation queue.
    QueueHandle;
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with generation tracking and free-slot reuse.
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> RawHandle {
        if let Some(idx) = self.free.pop() {
            let entry = &mut self.entries[idx as usize];
            entry.value = Some(value);
            return RawHandle {
                idx,
                generation: entry.generation,
            };
        }
        let idx = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        RawHandle { idx, generation: 0 }
    }

    pub(crate) fn get(&self, handle: RawHandle) -> Option<&T> {
        let entry = self.entries.get(handle.idx as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        entry.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, handle: RawHandle) -> Option<&mut T> {
        let entry = self.entries.get_mut(handle.idx as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        entry.value.as_mut()
    }

    /// Mutable access to one slot together with shared access to another.
    ///
    /// Returns `None` when either handle is stale or when both name the
    /// same slot; same-slot cases need a caller-side snapshot instead.
    pub(crate) fn get_pair_mut(&mut self, a: RawHandle, b: RawHandle) -> Option<(&mut T, &T)> {
        if a.idx == b.idx {
            return None;
        }
        // Validate generations up front so the split below only deals with
        // live slots.
        self.get(a)?;
        self.get(b)?;
        let (a_idx, b_idx) = (a.idx as usize, b.idx as usize);
        if a_idx < b_idx {
            let (head, tail) = self.entries.split_at_mut(b_idx);
            Some((head[a_idx].value.as_mut()?, tail[0].value.as_ref()?))
        } else {
            let (head, tail) = self.entries.split_at_mut(a_idx);
            Some((tail[0].value.as_mut()?, head[b_idx].value.as_ref()?))
        }
    }

    /// Removes the object, bumping the slot generation so the handle and
    /// any copies of it go stale.
    pub(crate) fn remove(&mut self, handle: RawHandle) -> Option<T> {
        let entry = self.entries.get_mut(handle.idx as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.idx);
        Some(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.entries.iter().filter_map(|e| e.value.as_ref());
        f.debug_list().entries(live).finish()
    }
}
