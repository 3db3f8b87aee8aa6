//! Reference physics service
//!
//! Two-phase collision detection over the bodies of registered objects:
//! a sort-and-sweep broadphase on the x axis followed by shape tests from
//! [`narrowphase`](super::narrowphase). Contacts are tracked between steps so
//! every pair produces exactly one enter, any number of stays, and one exit.

use std::collections::{HashMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::core::config::PhysicsConfig;
use crate::objects::{GameObject, ObjectHandle};
use super::{
    narrowphase, BodyAccess, CollisionEvent, CollisionLayers, CollisionPhase, Manifold,
    PhysicsService, WorldShape,
};

new_key_type! {
    /// Key of one registered proxy
    struct ProxyKey;
}

/// Per-object data cached by the world between steps
#[derive(Debug, Clone)]
struct Proxy {
    handle: ObjectHandle,
    shape: Option<WorldShape>,
    layers: CollisionLayers,
    mask: CollisionLayers,
    dynamic: bool,
}

/// Two registered objects in contact, smaller handle first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ContactPair {
    a: ObjectHandle,
    b: ObjectHandle,
}

impl ContactPair {
    fn new(first: ObjectHandle, second: ObjectHandle) -> Self {
        if first < second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }

    fn involves(&self, handle: ObjectHandle) -> bool {
        self.a == handle || self.b == handle
    }
}

/// Statistics about the physics world
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicsStats {
    /// Steps taken
    pub steps: u64,
    /// Objects currently registered
    pub registered: usize,
    /// Pairs that survived the broadphase in the last step
    pub candidate_pairs: usize,
    /// Pairs in contact after the last step
    pub contacts: usize,
    /// Events produced by the last step
    pub events: usize,
}

/// Bundled [`PhysicsService`] implementation
pub struct PhysicsWorld {
    config: PhysicsConfig,
    proxies: SlotMap<ProxyKey, Proxy>,
    by_handle: HashMap<ObjectHandle, ProxyKey>,
    contacts: HashMap<ContactPair, Manifold>,
    stats: PhysicsStats,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            proxies: SlotMap::with_key(),
            by_handle: HashMap::new(),
            contacts: HashMap::new(),
            stats: PhysicsStats::default(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Statistics about the last step
    pub fn stats(&self) -> PhysicsStats {
        PhysicsStats {
            registered: self.proxies.len(),
            ..self.stats.clone()
        }
    }

    /// Whether two registered objects were in contact after the last step
    pub fn in_contact(&self, first: ObjectHandle, second: ObjectHandle) -> bool {
        self.contacts.contains_key(&ContactPair::new(first, second))
    }

    /// Pull bodies, integrate dynamic ones, and refresh cached shapes
    fn sync_bodies(&mut self, bodies: &mut dyn BodyAccess) {
        for proxy in self.proxies.values_mut() {
            let Some(body) = bodies.body_mut(proxy.handle) else {
                proxy.shape = None;
                continue;
            };

            if body.is_dynamic() && self.config.integrate_velocity {
                body.integrate(self.config.max_speed);
            }

            proxy.dynamic = body.is_dynamic();
            proxy.shape = body.world_shape();
            if let Some(collider) = body.collider {
                proxy.layers = collider.layers;
                proxy.mask = collider.mask;
            }
        }
    }

    /// Broadphase: sort proxies by min x and sweep for overlapping bounds
    fn broad_phase(&self) -> Vec<(ProxyKey, ProxyKey)> {
        let mut intervals: Vec<(ProxyKey, WorldShape)> = self
            .proxies
            .iter()
            .filter_map(|(key, proxy)| proxy.shape.map(|shape| (key, shape)))
            .collect();
        intervals.sort_by(|(_, a), (_, b)| a.min().x.total_cmp(&b.min().x));

        let mut candidates = Vec::new();
        for (i, (key_a, shape_a)) in intervals.iter().enumerate() {
            let max_a = shape_a.max();
            let min_a = shape_a.min();

            for (key_b, shape_b) in &intervals[i + 1..] {
                let min_b = shape_b.min();
                if min_b.x > max_a.x {
                    break;
                }
                let max_b = shape_b.max();
                if min_b.y > max_a.y || max_b.y < min_a.y {
                    continue;
                }

                let a = &self.proxies[*key_a];
                let b = &self.proxies[*key_b];
                if !a.dynamic && !b.dynamic {
                    continue;
                }
                if !CollisionLayers::should_collide(a.layers, a.mask, b.layers, b.mask) {
                    continue;
                }
                candidates.push((*key_a, *key_b));
            }
        }
        candidates
    }

    /// Narrowphase: exact shape tests, manifold normal from pair.a toward pair.b
    fn narrow_phase(&self, candidates: &[(ProxyKey, ProxyKey)]) -> HashMap<ContactPair, Manifold> {
        let mut current = HashMap::with_capacity(candidates.len());

        for &(key_a, key_b) in candidates {
            let (first, second) = (&self.proxies[key_a], &self.proxies[key_b]);
            let (Some(shape_first), Some(shape_second)) = (first.shape, second.shape) else {
                continue;
            };

            let pair = ContactPair::new(first.handle, second.handle);
            let manifold = if pair.a == first.handle {
                narrowphase::collide(&shape_first, &shape_second)
            } else {
                narrowphase::collide(&shape_second, &shape_first)
            };

            if let Some(manifold) = manifold {
                if manifold.max_depth() >= self.config.min_penetration {
                    current.insert(pair, manifold);
                }
            }
        }
        current
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsService for PhysicsWorld {
    fn register(&mut self, handle: ObjectHandle, object: &dyn GameObject) {
        let body = object.body();
        let collider = body.and_then(|body| body.collider);
        let proxy = Proxy {
            handle,
            shape: body.and_then(|body| body.world_shape()),
            layers: collider.map_or(CollisionLayers::EVERYTHING, |c| c.layers),
            mask: collider.map_or(CollisionLayers::EVERYTHING, |c| c.mask),
            dynamic: body.is_some_and(|body| body.is_dynamic()),
        };

        if let Some(&key) = self.by_handle.get(&handle) {
            log::trace!("Physics proxy for {} re-registered", handle);
            self.proxies[key] = proxy;
            return;
        }

        let key = self.proxies.insert(proxy);
        self.by_handle.insert(handle, key);
        log::trace!("Registered {} ({}) with physics", handle, object.type_name());
    }

    fn unregister(&mut self, handle: ObjectHandle) {
        let Some(key) = self.by_handle.remove(&handle) else {
            return;
        };
        self.proxies.remove(key);
        self.contacts.retain(|pair, _| !pair.involves(handle));
        log::trace!("Unregistered {} from physics", handle);
    }

    fn step(&mut self, bodies: &mut dyn BodyAccess) -> Vec<CollisionEvent> {
        self.stats.steps += 1;
        self.sync_bodies(bodies);

        let candidates = self.broad_phase();
        let current = self.narrow_phase(&candidates);

        let mut events = Vec::with_capacity(current.len() + self.contacts.len());
        for (pair, manifold) in &current {
            let phase = if self.contacts.contains_key(pair) {
                CollisionPhase::Stay
            } else {
                CollisionPhase::Enter
            };
            events.push(CollisionEvent { phase, a: pair.a, b: pair.b, manifold: *manifold });
        }

        let current_pairs: HashSet<ContactPair> = current.keys().copied().collect();
        for pair in self.contacts.keys().filter(|pair| !current_pairs.contains(pair)) {
            events.push(CollisionEvent {
                phase: CollisionPhase::Exit,
                a: pair.a,
                b: pair.b,
                manifold: Manifold::empty(),
            });
        }

        events.sort_by_key(|event| (event.a, event.b, event.phase));

        self.stats.candidate_pairs = candidates.len();
        self.stats.contacts = current.len();
        self.stats.events = events.len();
        self.contacts = current;
        events
    }

    fn is_registered(&self, handle: ObjectHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    fn registered_count(&self) -> usize {
        self.proxies.len()
    }

    fn clear(&mut self) {
        self.proxies.clear();
        self.by_handle.clear();
        self.contacts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::physics::{Body, Collider};

    /// Bodies keyed by handle, standing in for the object table
    #[derive(Default)]
    struct Bodies(HashMap<ObjectHandle, Body>);

    impl BodyAccess for Bodies {
        fn body(&self, handle: ObjectHandle) -> Option<&Body> {
            self.0.get(&handle)
        }

        fn body_mut(&mut self, handle: ObjectHandle) -> Option<&mut Body> {
            self.0.get_mut(&handle)
        }
    }

    struct Holder(Body);

    impl GameObject for Holder {
        fn body(&self) -> Option<&Body> {
            Some(&self.0)
        }
    }

    fn add(world: &mut PhysicsWorld, bodies: &mut Bodies, index: u32, body: Body) -> ObjectHandle {
        let handle = ObjectHandle::new(index, 1);
        world.register(handle, &Holder(body.clone()));
        bodies.0.insert(handle, body);
        handle
    }

    fn phases(events: &[CollisionEvent]) -> Vec<CollisionPhase> {
        events.iter().map(|event| event.phase).collect()
    }

    #[test]
    fn test_register_and_unregister() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        let handle = add(&mut world, &mut bodies, 0, Body::fixed(Vec2::zeros()));

        assert!(world.is_registered(handle));
        assert_eq!(world.registered_count(), 1);

        world.unregister(handle);
        world.unregister(handle);
        assert!(!world.is_registered(handle));
        assert_eq!(world.registered_count(), 0);
    }

    #[test]
    fn test_enter_stay_exit_lifecycle() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        let floor = add(&mut world, &mut bodies, 0,
            Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(50.0, 5.0)));
        let ball = add(&mut world, &mut bodies, 1,
            Body::dynamic(Vec2::new(0.0, 6.0)).with_collider(Collider::circle(2.0)));

        let events = world.step(&mut bodies);
        assert_eq!(phases(&events), vec![CollisionPhase::Enter]);
        assert_eq!((events[0].a, events[0].b), (floor, ball));
        // Normal points from the floor toward the ball
        assert!(events[0].manifold.normal.y > 0.0);

        let events = world.step(&mut bodies);
        assert_eq!(phases(&events), vec![CollisionPhase::Stay]);
        assert!(world.in_contact(floor, ball));

        bodies.0.get_mut(&ball).expect("Should exist").velocity = Vec2::new(0.0, 20.0);
        let events = world.step(&mut bodies);
        assert_eq!(phases(&events), vec![CollisionPhase::Exit]);
        assert!(events[0].manifold.is_empty());

        assert!(world.step(&mut bodies).is_empty());
    }

    #[test]
    fn test_dynamic_bodies_are_integrated() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        let handle = add(&mut world, &mut bodies, 0,
            Body::dynamic(Vec2::zeros()).with_velocity(Vec2::new(1.0, 2.0)));

        world.step(&mut bodies);
        world.step(&mut bodies);

        let body = bodies.body(handle).expect("Should exist");
        assert_eq!(body.position, Vec2::new(2.0, 4.0));
        assert_eq!(body.previous_position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_integration_can_be_disabled() {
        let config = PhysicsConfig { integrate_velocity: false, ..PhysicsConfig::default() };
        let mut world = PhysicsWorld::new(config);
        let mut bodies = Bodies::default();
        let handle = add(&mut world, &mut bodies, 0,
            Body::dynamic(Vec2::zeros()).with_velocity(Vec2::new(1.0, 0.0)));

        world.step(&mut bodies);
        assert_eq!(bodies.body(handle).expect("Should exist").position, Vec2::zeros());
    }

    #[test]
    fn test_layer_filtering() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        add(&mut world, &mut bodies, 0, Body::dynamic(Vec2::zeros()).with_collider(
            Collider::circle(2.0).with_layers(CollisionLayers::PARTICLE, CollisionLayers::SOLID)));
        add(&mut world, &mut bodies, 1, Body::dynamic(Vec2::zeros()).with_collider(
            Collider::circle(2.0).with_layers(CollisionLayers::PARTICLE, CollisionLayers::SOLID)));

        assert!(world.step(&mut bodies).is_empty());
        assert_eq!(world.stats().candidate_pairs, 0);
    }

    #[test]
    fn test_static_pairs_are_skipped() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        add(&mut world, &mut bodies, 0, Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(5.0, 5.0)));
        add(&mut world, &mut bodies, 1, Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(5.0, 5.0)));

        assert!(world.step(&mut bodies).is_empty());
    }

    #[test]
    fn test_unregister_drops_contacts_without_exit() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        let floor = add(&mut world, &mut bodies, 0,
            Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(50.0, 5.0)));
        let ball = add(&mut world, &mut bodies, 1,
            Body::dynamic(Vec2::new(0.0, 6.0)).with_collider(Collider::circle(2.0)));

        assert_eq!(world.step(&mut bodies).len(), 1);
        world.unregister(ball);
        bodies.0.remove(&ball);

        assert!(world.step(&mut bodies).is_empty());
        assert!(!world.in_contact(floor, ball));
    }

    #[test]
    fn test_missing_body_ends_contact() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        add(&mut world, &mut bodies, 0,
            Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(50.0, 5.0)));
        let ball = add(&mut world, &mut bodies, 1,
            Body::dynamic(Vec2::new(0.0, 6.0)).with_collider(Collider::circle(2.0)));

        world.step(&mut bodies);
        bodies.0.remove(&ball);
        assert_eq!(phases(&world.step(&mut bodies)), vec![CollisionPhase::Exit]);
    }

    #[test]
    fn test_events_sorted_by_pair() {
        let mut world = PhysicsWorld::default();
        let mut bodies = Bodies::default();
        for index in (0..4).rev() {
            add(&mut world, &mut bodies, index,
                Body::dynamic(Vec2::new(index as f32, 0.0)).with_collider(Collider::circle(3.0)));
        }

        let events = world.step(&mut bodies);
        assert_eq!(events.len(), 6);
        let pairs: Vec<_> = events.iter().map(|e| (e.a.index(), e.b.index())).collect();
        let mut sorted = pairs.clone();
        sorted.sort_unstable();
        assert_eq!(pairs, sorted);
        assert!(events.iter().all(|e| e.a < e.b));
    }

    #[test]
    fn test_min_penetration_filter() {
        let config = PhysicsConfig { min_penetration: 1.0, ..PhysicsConfig::default() };
        let mut world = PhysicsWorld::new(config);
        let mut bodies = Bodies::default();
        add(&mut world, &mut bodies, 0,
            Body::fixed(Vec2::zeros()).with_collider(Collider::aabb(50.0, 5.0)));
        add(&mut world, &mut bodies, 1,
            Body::dynamic(Vec2::new(0.0, 6.5)).with_collider(Collider::circle(2.0)));

        assert!(world.step(&mut bodies).is_empty());
        assert_eq!(world.stats().candidate_pairs, 1);
    }
}
