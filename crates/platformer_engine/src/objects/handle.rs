//! Object handles
//!
//! An [`ObjectHandle`] names one lifetime of one slot in the
//! [`ObjectManager`](super::ObjectManager) table. When the slot is recycled its
//! generation changes, so every handle to the previous occupant stops
//! resolving instead of silently pointing at the new one.

use std::fmt;

/// Handle to a managed object with generation counter for safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    /// Slot index reserved for [`ObjectHandle::invalid`]; never allocated
    pub const INVALID_INDEX: u32 = u32::MAX;

    /// Create a handle from raw parts
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The distinguished "nothing" handle
    pub const fn invalid() -> Self {
        Self { index: Self::INVALID_INDEX, generation: 0 }
    }

    /// True for [`ObjectHandle::invalid`]
    ///
    /// This only checks the sentinel. Whether a handle still refers to a live
    /// object is answered by [`ObjectManager::is_valid`](super::ObjectManager::is_valid).
    pub const fn is_invalid(&self) -> bool {
        self.index == Self::INVALID_INDEX
    }

    /// Slot index in the object table
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time the handle was issued
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Compact `(index, generation)` key used for dedup sets
    pub(crate) const fn key(&self) -> u64 {
        ((self.index as u64) << 32) | self.generation as u64
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "#invalid")
        } else {
            write!(f, "#{}@{}", self.index, self.generation)
        }
    }
}
