//! The contract between the object manager and a physics implementation

use crate::objects::{GameObject, ObjectHandle};
use super::{Body, Manifold};

/// Phase of a contact between two registered objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionPhase {
    /// The pair touches this step and did not touch in the previous one
    Enter,
    /// The pair touched in the previous step and still does
    Stay,
    /// The pair touched in the previous step and no longer does
    Exit,
}

/// One collision notification produced by a physics step
///
/// `manifold.normal` points from `a` toward `b`. The manager hands `b` the
/// flipped manifold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Contact phase
    pub phase: CollisionPhase,
    /// First party
    pub a: ObjectHandle,
    /// Second party
    pub b: ObjectHandle,
    /// Contact data seen from `a`; empty for [`CollisionPhase::Exit`]
    pub manifold: Manifold,
}

/// Body lookup by handle, supplied by the object manager during a step
///
/// Objects currently running a hook are not reachable and report `None`.
pub trait BodyAccess {
    /// Body of the object behind `handle`
    fn body(&self, handle: ObjectHandle) -> Option<&Body>;

    /// Mutable body of the object behind `handle`
    fn body_mut(&mut self, handle: ObjectHandle) -> Option<&mut Body>;
}

/// Physics registration bridge
///
/// The manager calls [`register`](PhysicsService::register) after an object's
/// `start` hook and [`unregister`](PhysicsService::unregister) before its
/// `on_destroy` hook. Both must tolerate repeated calls.
pub trait PhysicsService {
    /// Start tracking the object behind `handle`
    fn register(&mut self, handle: ObjectHandle, object: &dyn GameObject);

    /// Stop tracking `handle`; unknown handles are ignored
    fn unregister(&mut self, handle: ObjectHandle);

    /// Advance one step and report contacts between registered objects
    fn step(&mut self, bodies: &mut dyn BodyAccess) -> Vec<CollisionEvent>;

    /// Whether `handle` is currently registered
    fn is_registered(&self, handle: ObjectHandle) -> bool;

    /// Number of registered objects
    fn registered_count(&self) -> usize;

    /// Drop every registration and all contact state
    fn clear(&mut self);
}
