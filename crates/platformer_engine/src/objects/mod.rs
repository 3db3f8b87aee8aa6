//! Object lifecycle and handle management
//!
//! The [`ObjectManager`] owns every game object in a generational slot table.
//! Everything else refers to objects through [`ObjectHandle`]s, which are
//! checked on every access and stop resolving once their slot is recycled.

pub mod entity;
pub mod handle;
pub mod manager;

#[cfg(test)]
mod tests;

pub use entity::{AsAny, DestroyTarget, GameObject, InstanceId};
pub use handle::ObjectHandle;
pub use manager::{FactoryError, ObjectFactory, ObjectManager, ObjectManagerStats};
