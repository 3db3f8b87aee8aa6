//! The game object capability
//!
//! Every object owned by the [`ObjectManager`] implements [`GameObject`]. All
//! hooks have no-op defaults, so an object only overrides what it reacts to.
//!
//! Hooks receive the object's own handle and the manager itself. While a hook
//! runs, the object is *detached*: it is owned by the call rather than by its
//! slot, so [`ObjectManager::get`] on its own handle returns `None` even though
//! [`ObjectManager::is_valid`] still reports it alive.

use std::any::Any;
use std::fmt;

use super::{ObjectHandle, ObjectManager};
use crate::physics::{Body, Manifold};

/// Downcasting support, implemented for every `'static` type
pub trait AsAny {
    /// Borrow as [`Any`] for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as [`Any`] for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Concrete type name, for diagnostics
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Lifecycle and collision hooks of a managed object
#[allow(unused_variables)]
pub trait GameObject: AsAny {
    /// Called once after the object is alive in its slot, before physics registration
    fn start(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {}

    /// Called once per frame during [`ObjectManager::update_all`]
    fn framely_update(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {}

    /// Called once, after physics unregistration and before the object is dropped
    fn on_destroy(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {}

    /// First step in which this object touches `other`
    ///
    /// `manifold.normal` points from this object toward `other`.
    fn on_collision_enter(
        &mut self,
        me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
    }

    /// Every later step in which the contact persists
    fn on_collision_stay(
        &mut self,
        me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
    }

    /// First step in which the contact is gone; the manifold is empty
    fn on_collision_exit(
        &mut self,
        me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
    }

    /// Physics body, if this object takes part in collision detection
    fn body(&self) -> Option<&Body> {
        None
    }

    /// Mutable physics body
    fn body_mut(&mut self) -> Option<&mut Body> {
        None
    }

    /// Gameplay tag query ("player", "solid", ...)
    fn has_tag(&self, tag: &str) -> bool {
        false
    }
}

impl fmt::Debug for dyn GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}

/// Identity of one installed instance
///
/// Issued by the manager every time an instance is placed in a slot and never
/// reused, so it stays meaningful after the slot is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u64);

impl InstanceId {
    /// Raw identifier value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance {}", self.0)
    }
}

/// Target of a destroy request: a handle or an instance identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyTarget {
    /// Resolve through the handle's slot and generation
    Handle(ObjectHandle),
    /// Resolve through the reverse instance index
    Instance(InstanceId),
}

impl From<ObjectHandle> for DestroyTarget {
    fn from(handle: ObjectHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<InstanceId> for DestroyTarget {
    fn from(id: InstanceId) -> Self {
        Self::Instance(id)
    }
}
