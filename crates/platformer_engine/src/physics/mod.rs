//! Physics module for collision detection and the object registration bridge
//!
//! The object manager only talks to the [`PhysicsService`] trait: it registers
//! objects once they are alive and started, unregisters them before their
//! destroy hook runs, and asks for one step per frame. The step returns
//! collision events that the manager dispatches to the objects involved.
//!
//! [`PhysicsWorld`] is the bundled implementation: velocity integration,
//! sort-and-sweep broadphase, and AABB/circle narrowphase.

pub mod body;
pub mod collision_layers;
pub mod manifold;
pub mod narrowphase;
pub mod service;
pub mod world;

pub use body::{Body, BodyKind, Collider, Shape, WorldShape};
pub use collision_layers::CollisionLayers;
pub use manifold::Manifold;
pub use service::{BodyAccess, CollisionEvent, CollisionPhase, PhysicsService};
pub use world::{PhysicsStats, PhysicsWorld};
