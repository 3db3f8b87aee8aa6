//! Generational object table and per-frame driver
//!
//! The manager owns every game object. Slots are reused through a free list
//! and stamped with a fresh generation on every transition, so a handle to a
//! previous occupant never resolves to the new one.
//!
//! Mutations requested while the table is being walked go through two
//! queues that are drained at fixed points of [`ObjectManager::update_all`]:
//! destroys first, then creates.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::core::config::{EngineConfig, ObjectManagerConfig};
use crate::physics::{Body, BodyAccess, CollisionPhase, Manifold, PhysicsService, PhysicsWorld};
use super::{DestroyTarget, GameObject, InstanceId, ObjectHandle};

/// Upper bound on destroy-drain rounds in one frame; leftovers wait a frame
const MAX_DESTROY_ROUNDS: usize = 32;

/// Deferred constructor queued by the `create_delayed*` family
pub type ObjectFactory = Box<dyn FnOnce() -> Result<Box<dyn GameObject>, FactoryError>>;

/// Why a deferred construction produced no object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// The factory returned nothing
    #[error("factory produced no object")]
    Empty,

    /// The factory reported an error
    #[error("factory failed: {0}")]
    Failed(String),

    /// The factory panicked
    #[error("factory panicked: {0}")]
    Panicked(String),
}

/// Statistics for object management
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectManagerStats {
    /// Completed `update_all` calls
    pub frames: u64,
    /// Objects installed in a slot, immediate and deferred
    pub total_created: u64,
    /// Objects finalized
    pub total_destroyed: u64,
    /// Deferred creations whose factory failed
    pub failed_deferred_creates: u64,
    /// Requests refused (reentrant update, creation during teardown)
    pub rejected_requests: u64,
    /// Peak alive count
    pub peak_alive: usize,
}

/// One row of the object table
struct Entry {
    instance: Option<Box<dyn GameObject>>,
    instance_id: Option<InstanceId>,
    generation: u32,
    alive: bool,
    /// The instance is checked out by one of its own hooks
    detached: bool,
}

impl Entry {
    fn vacant() -> Self {
        Self {
            instance: None,
            instance_id: None,
            generation: 0,
            alive: false,
            detached: false,
        }
    }

    fn resolves(&self, handle: ObjectHandle) -> bool {
        self.alive && self.generation == handle.generation()
    }

    fn is_reserved_for(&self, handle: ObjectHandle) -> bool {
        !self.alive && !self.detached && self.instance.is_none()
            && self.generation == handle.generation()
    }
}

struct PendingCreate {
    handle: ObjectHandle,
    factory: ObjectFactory,
}

/// Body lookup over the table, handed to the physics step
struct EntryBodies<'a>(&'a mut [Entry]);

impl BodyAccess for EntryBodies<'_> {
    fn body(&self, handle: ObjectHandle) -> Option<&Body> {
        self.0
            .get(handle.index() as usize)
            .filter(|entry| entry.resolves(handle))
            .and_then(|entry| entry.instance.as_deref())
            .and_then(|object| object.body())
    }

    fn body_mut(&mut self, handle: ObjectHandle) -> Option<&mut Body> {
        self.0
            .get_mut(handle.index() as usize)
            .filter(|entry| entry.resolves(handle))
            .and_then(|entry| entry.instance.as_deref_mut())
            .and_then(|object| object.body_mut())
    }
}

/// Advance a generation counter, skipping zero
fn advance(counter: &mut u32) -> u32 {
    *counter = counter.wrapping_add(1);
    if *counter == 0 {
        *counter = 1;
    }
    *counter
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Owner of every game object
///
/// Single-threaded and frame-stepped. Hooks receive `&mut ObjectManager` and
/// may use the whole public API, including destroying themselves.
pub struct ObjectManager {
    entries: Vec<Entry>,
    free_list: Vec<u32>,
    instance_index: HashMap<InstanceId, u32>,
    generation_counter: u32,
    next_instance_id: u64,
    alive_count: usize,
    pending_creates: Vec<PendingCreate>,
    pending_destroys: Vec<ObjectHandle>,
    pending_destroy_keys: HashSet<u64>,
    physics: Box<dyn PhysicsService>,
    updating: bool,
    tearing_down: bool,
    stats: ObjectManagerStats,
}

impl fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectManager")
            .field("slots", &self.entries.len())
            .field("alive", &self.alive_count)
            .field("pending_creates", &self.pending_creates.len())
            .field("pending_destroys", &self.pending_destroys.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for ObjectManager {
    fn default() -> Self {
        Self::new(Box::new(PhysicsWorld::default()))
    }
}

impl ObjectManager {
    /// Create an empty manager driving the given physics service
    pub fn new(physics: Box<dyn PhysicsService>) -> Self {
        Self::with_config(&ObjectManagerConfig::default(), physics)
    }

    /// Create an empty manager with explicit table settings
    pub fn with_config(config: &ObjectManagerConfig, physics: Box<dyn PhysicsService>) -> Self {
        log::debug!("Creating ObjectManager with {} initial slots", config.initial_capacity);

        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            free_list: Vec::new(),
            instance_index: HashMap::with_capacity(config.initial_capacity),
            generation_counter: 0,
            next_instance_id: 1,
            alive_count: 0,
            pending_creates: Vec::new(),
            pending_destroys: Vec::new(),
            pending_destroy_keys: HashSet::new(),
            physics,
            updating: false,
            tearing_down: false,
            stats: ObjectManagerStats::default(),
        }
    }

    /// Manager backed by the bundled [`PhysicsWorld`]
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        Self::with_config(
            &config.objects,
            Box::new(PhysicsWorld::new(config.physics.clone())),
        )
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Construct and start an object now
    pub fn create_immediate<T: GameObject + 'static>(&mut self, object: T) -> ObjectHandle {
        self.create_boxed(Some(Box::new(object)))
    }

    /// Construct an object, run `init` on it, then start it
    pub fn create_init<T, F>(&mut self, mut object: T, init: F) -> ObjectHandle
    where
        T: GameObject + 'static,
        F: FnOnce(&mut T),
    {
        init(&mut object);
        self.create_immediate(object)
    }

    /// Install an already boxed object; `None` yields [`ObjectHandle::invalid`]
    pub fn create_boxed(&mut self, object: Option<Box<dyn GameObject>>) -> ObjectHandle {
        let Some(object) = object else {
            log::warn!("Immediate creation received no object");
            return ObjectHandle::invalid();
        };
        if self.refuse_during_teardown(object.type_name()) {
            return ObjectHandle::invalid();
        }
        let Some(index) = self.allocate_slot() else {
            return ObjectHandle::invalid();
        };

        let handle = ObjectHandle::new(index, advance(&mut self.generation_counter));
        self.install(handle, object);
        self.start_and_register(handle);
        handle
    }

    /// Queue construction for the next [`update_all`](Self::update_all)
    ///
    /// The returned handle is provisional: it is invalid until the queue is
    /// drained, and stays invalid forever if construction fails.
    pub fn create_delayed<T, F>(&mut self, factory: F) -> ObjectHandle
    where
        T: GameObject + 'static,
        F: FnOnce() -> T + 'static,
    {
        self.enqueue_create(Box::new(move || Ok(Box::new(factory()) as Box<dyn GameObject>)))
    }

    /// Queue a construction that may fail
    pub fn create_delayed_fallible<T, E, F>(&mut self, factory: F) -> ObjectHandle
    where
        T: GameObject + 'static,
        E: fmt::Display,
        F: FnOnce() -> Result<T, E> + 'static,
    {
        self.enqueue_create(Box::new(move || {
            factory()
                .map(|object| Box::new(object) as Box<dyn GameObject>)
                .map_err(|err| FactoryError::Failed(err.to_string()))
        }))
    }

    /// Queue a construction that may produce nothing
    pub fn create_delayed_boxed<F>(&mut self, factory: F) -> ObjectHandle
    where
        F: FnOnce() -> Option<Box<dyn GameObject>> + 'static,
    {
        self.enqueue_create(Box::new(move || factory().ok_or(FactoryError::Empty)))
    }

    fn enqueue_create(&mut self, factory: ObjectFactory) -> ObjectHandle {
        if self.refuse_during_teardown("deferred object") {
            return ObjectHandle::invalid();
        }
        let Some(index) = self.allocate_slot() else {
            return ObjectHandle::invalid();
        };

        let generation = advance(&mut self.generation_counter);
        self.entries[index as usize].generation = generation;

        let handle = ObjectHandle::new(index, generation);
        self.pending_creates.push(PendingCreate { handle, factory });
        log::trace!("Reserved {} for deferred creation", handle);
        handle
    }

    fn refuse_during_teardown(&mut self, what: &str) -> bool {
        if self.tearing_down {
            log::error!("Refusing to create {} while destroying all objects", what);
            self.stats.rejected_requests += 1;
        }
        self.tearing_down
    }

    fn allocate_slot(&mut self) -> Option<u32> {
        if let Some(index) = self.free_list.pop() {
            return Some(index);
        }

        match u32::try_from(self.entries.len()) {
            Ok(index) if index != ObjectHandle::INVALID_INDEX => {
                self.entries.push(Entry::vacant());
                Some(index)
            }
            _ => {
                log::error!("Object table is full ({} slots)", self.entries.len());
                None
            }
        }
    }

    /// Place `object` in the slot named by `handle` and mark it alive
    fn install(&mut self, handle: ObjectHandle, object: Box<dyn GameObject>) {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id += 1;
        let type_name = object.type_name();

        let entry = &mut self.entries[handle.index() as usize];
        entry.instance = Some(object);
        entry.instance_id = Some(id);
        entry.generation = handle.generation();
        entry.alive = true;
        entry.detached = false;

        self.instance_index.insert(id, handle.index());
        self.alive_count += 1;
        self.stats.total_created += 1;
        self.stats.peak_alive = self.stats.peak_alive.max(self.alive_count);

        log::debug!("Created {} as {} ({})", type_name, handle, id);
    }

    /// Run `start`, then register with physics if the object survived it
    fn start_and_register(&mut self, handle: ObjectHandle) {
        self.with_detached(handle, |object, objects| object.start(handle, objects));

        let object = self
            .entries
            .get(handle.index() as usize)
            .filter(|entry| entry.resolves(handle))
            .and_then(|entry| entry.instance.as_deref());
        match object {
            Some(object) => self.physics.register(handle, object),
            None => log::debug!("{} did not survive its start hook; not registered", handle),
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Whether `handle` refers to a live object
    pub fn is_valid(&self, handle: ObjectHandle) -> bool {
        self.entries
            .get(handle.index() as usize)
            .is_some_and(|entry| {
                entry.resolves(handle) && (entry.instance.is_some() || entry.detached)
            })
    }

    /// Borrow the object behind `handle`
    ///
    /// `None` for stale handles and for an object whose own hook is running.
    pub fn get(&self, handle: ObjectHandle) -> Option<&dyn GameObject> {
        self.entries
            .get(handle.index() as usize)
            .filter(|entry| entry.resolves(handle))
            .and_then(|entry| entry.instance.as_deref())
    }

    /// Mutably borrow the object behind `handle`
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut dyn GameObject> {
        let entry = self.entries.get_mut(handle.index() as usize)?;
        if !entry.resolves(handle) {
            return None;
        }
        let object: &mut dyn GameObject = entry.instance.as_deref_mut()?;
        Some(object)
    }

    /// Borrow the object behind `handle` as its concrete type
    pub fn get_as<T: GameObject + 'static>(&self, handle: ObjectHandle) -> Option<&T> {
        self.get(handle)?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the object behind `handle` as its concrete type
    pub fn get_as_mut<T: GameObject + 'static>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.get_mut(handle)?.as_any_mut().downcast_mut::<T>()
    }

    /// Instance identity of the live object behind `handle`
    pub fn instance_id(&self, handle: ObjectHandle) -> Option<InstanceId> {
        if !self.is_valid(handle) {
            return None;
        }
        self.entries[handle.index() as usize].instance_id
    }

    /// Number of alive objects
    pub fn count(&self) -> usize {
        self.alive_count
    }

    /// Handles of every alive object, in slot order
    pub fn alive_handles(&self) -> Vec<ObjectHandle> {
        self.entries
            .iter()
            .zip(0_u32..)
            .filter(|(entry, _)| entry.alive)
            .map(|(entry, index)| ObjectHandle::new(index, entry.generation))
            .collect()
    }

    /// First reachable object carrying `tag`
    pub fn find_with_tag(&self, tag: &str) -> Option<ObjectHandle> {
        self.entries
            .iter()
            .zip(0_u32..)
            .filter(|(entry, _)| entry.alive)
            .find(|(entry, _)| entry.instance.as_deref().is_some_and(|object| object.has_tag(tag)))
            .map(|(entry, index)| ObjectHandle::new(index, entry.generation))
    }

    /// Creations waiting for the next drain
    pub fn pending_create_count(&self) -> usize {
        self.pending_creates.len()
    }

    /// Destroys waiting for the next drain
    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroys.len()
    }

    /// Lifetime statistics
    pub fn stats(&self) -> &ObjectManagerStats {
        &self.stats
    }

    /// The physics service objects are registered with
    pub fn physics(&self) -> &dyn PhysicsService {
        self.physics.as_ref()
    }

    // ------------------------------------------------------------------
    // Destruction
    // ------------------------------------------------------------------

    /// Destroy the target now
    ///
    /// An object cannot be torn down while one of its own hooks is running;
    /// in that case the request is deferred to the next drain instead.
    pub fn destroy_immediate(&mut self, target: impl Into<DestroyTarget>) {
        if let Some(handle) = self.resolve(target.into()) {
            self.destroy_or_defer(handle);
        }
    }

    /// Queue the target for destruction at the end of the frame
    ///
    /// Queuing the same object twice has no further effect.
    pub fn destroy_delayed(&mut self, target: impl Into<DestroyTarget>) {
        if let Some(handle) = self.resolve(target.into()) {
            self.enqueue_destroy(handle);
        }
    }

    fn enqueue_destroy(&mut self, handle: ObjectHandle) {
        if self.pending_destroy_keys.insert(handle.key()) {
            self.pending_destroys.push(handle);
            log::trace!("Queued {} for destruction", handle);
        } else {
            log::trace!("{} is already queued for destruction", handle);
        }
    }

    fn resolve(&mut self, target: DestroyTarget) -> Option<ObjectHandle> {
        match target {
            DestroyTarget::Handle(handle) => {
                let live = self
                    .entries
                    .get(handle.index() as usize)
                    .is_some_and(|entry| entry.resolves(handle));
                if !live {
                    log::debug!("Ignoring destroy request for stale handle {}", handle);
                }
                live.then_some(handle)
            }
            DestroyTarget::Instance(id) => self.resolve_instance(id),
        }
    }

    /// Reverse index lookup with a linear-scan fallback that repairs the index
    fn resolve_instance(&mut self, id: InstanceId) -> Option<ObjectHandle> {
        if let Some(&index) = self.instance_index.get(&id) {
            if let Some(entry) = self.entries.get(index as usize) {
                if entry.alive && entry.instance_id == Some(id) {
                    return Some(ObjectHandle::new(index, entry.generation));
                }
            }
        }

        let found = self
            .entries
            .iter()
            .zip(0_u32..)
            .find(|(entry, _)| entry.alive && entry.instance_id == Some(id))
            .map(|(entry, index)| ObjectHandle::new(index, entry.generation));

        match found {
            Some(handle) => {
                log::warn!("Reverse index out of sync for {}; repaired to {}", id, handle);
                self.instance_index.insert(id, handle.index());
                Some(handle)
            }
            None => {
                if self.instance_index.remove(&id).is_some() {
                    log::warn!("Dropped dangling reverse index entry for {}", id);
                }
                log::debug!("Ignoring destroy request for {}: not alive", id);
                None
            }
        }
    }

    fn destroy_or_defer(&mut self, handle: ObjectHandle) {
        if self.entries[handle.index() as usize].detached {
            log::debug!("{} is inside one of its hooks; destroy deferred", handle);
            self.enqueue_destroy(handle);
        } else {
            self.destroy_entry(handle);
        }
    }

    /// Unregister, run `on_destroy`, drop, and retire the slot
    fn destroy_entry(&mut self, handle: ObjectHandle) {
        let index = handle.index() as usize;
        self.physics.unregister(handle);

        let Some(mut object) = self.entries.get_mut(index).and_then(|entry| {
            let object = entry.instance.take()?;
            entry.detached = true;
            Some(object)
        }) else {
            return;
        };

        object.on_destroy(handle, self);

        // The hook may have torn the whole table down
        let generation = advance(&mut self.generation_counter);
        match self.entries.get_mut(index) {
            Some(entry) if entry.detached && entry.generation == handle.generation() => {
                entry.detached = false;
                entry.alive = false;
                entry.generation = generation;
                if let Some(id) = entry.instance_id.take() {
                    self.instance_index.remove(&id);
                }
                self.free_list.push(handle.index());
                self.alive_count = self.alive_count.saturating_sub(1);
            }
            _ => log::debug!("Table was cleared while {} ran its destroy hook", handle),
        }

        self.stats.total_destroyed += 1;
        log::debug!("Destroyed {} ({})", handle, object.type_name());
    }

    /// Destroy every object and forget every pending request
    ///
    /// Creation requests made while this runs are refused, so the table is
    /// empty when it returns. An object whose own hook is running is finalized
    /// when that hook returns.
    pub fn destroy_all(&mut self) {
        if self.tearing_down {
            log::error!("destroy_all called while already destroying all objects; ignored");
            self.stats.rejected_requests += 1;
            return;
        }
        self.tearing_down = true;
        log::debug!("Destroying all {} objects", self.alive_count);

        self.clear_pending();

        let alive = self.alive_handles();
        for &handle in &alive {
            self.physics.unregister(handle);
        }

        for handle in alive {
            let index = handle.index() as usize;
            let Some(mut object) = self.entries.get_mut(index).and_then(|entry| {
                if !entry.resolves(handle) || entry.detached {
                    return None;
                }
                let object = entry.instance.take()?;
                entry.detached = true;
                Some(object)
            }) else {
                continue;
            };

            object.on_destroy(handle, self);
            self.stats.total_destroyed += 1;

            if let Some(entry) = self.entries.get_mut(index) {
                if entry.detached && entry.resolves(handle) {
                    entry.detached = false;
                    entry.alive = false;
                }
            }
        }

        self.entries.clear();
        self.free_list.clear();
        self.instance_index.clear();
        self.alive_count = 0;
        self.clear_pending();

        self.tearing_down = false;
    }

    /// Alias of [`destroy_all`](Self::destroy_all) for level transitions
    pub fn reset(&mut self) {
        self.destroy_all();
    }

    /// Alias of [`destroy_all`](Self::destroy_all) for process teardown
    pub fn shutdown(&mut self) {
        log::info!("Shutting down ObjectManager: {:?}", self.stats);
        self.destroy_all();
    }

    fn clear_pending(&mut self) {
        self.pending_creates.clear();
        self.pending_destroys.clear();
        self.pending_destroy_keys.clear();
    }

    // ------------------------------------------------------------------
    // Frame driver
    // ------------------------------------------------------------------

    /// Run one frame: updates, physics step, destroy drain, create drain
    pub fn update_all(&mut self) {
        if self.updating {
            log::error!("update_all called from inside update_all; ignored");
            self.stats.rejected_requests += 1;
            return;
        }
        self.updating = true;

        self.run_updates();
        self.run_physics();
        // Destroys drain before creates: a slot that is both retired and
        // re-reserved this frame ends up holding the new object
        self.drain_destroys();
        self.drain_creates();

        self.stats.frames += 1;
        self.updating = false;
    }

    fn run_updates(&mut self) {
        // Objects created during the pass are first updated next frame
        for handle in self.alive_handles() {
            self.with_detached(handle, |object, objects| object.framely_update(handle, objects));
        }
    }

    fn run_physics(&mut self) {
        let events = self.physics.step(&mut EntryBodies(&mut self.entries));

        for event in events {
            let flipped = event.manifold.flipped();
            self.dispatch_collision(event.phase, event.a, event.b, &event.manifold);
            self.dispatch_collision(event.phase, event.b, event.a, &flipped);
        }
    }

    fn dispatch_collision(
        &mut self,
        phase: CollisionPhase,
        me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
    ) {
        let delivered = self.with_detached(me, |object, objects| match phase {
            CollisionPhase::Enter => object.on_collision_enter(me, other, manifold, objects),
            CollisionPhase::Stay => object.on_collision_stay(me, other, manifold, objects),
            CollisionPhase::Exit => object.on_collision_exit(me, other, manifold, objects),
        });
        if delivered.is_none() {
            log::trace!("Skipped {:?} for {}: no longer reachable", phase, me);
        }
    }

    fn drain_destroys(&mut self) {
        for _ in 0..MAX_DESTROY_ROUNDS {
            let queue = mem::take(&mut self.pending_destroys);
            if queue.is_empty() {
                return;
            }
            self.pending_destroy_keys.clear();

            for handle in queue {
                let live = self
                    .entries
                    .get(handle.index() as usize)
                    .is_some_and(|entry| entry.resolves(handle));
                if live {
                    self.destroy_or_defer(handle);
                } else {
                    log::debug!("Skipping stale queued destroy {}", handle);
                }
            }
        }

        if !self.pending_destroys.is_empty() {
            log::warn!(
                "{} destroys still queued after {} rounds; deferring to next frame",
                self.pending_destroys.len(),
                MAX_DESTROY_ROUNDS
            );
        }
    }

    fn drain_creates(&mut self) {
        // Creations requested from start hooks wait for the next frame
        let queue = mem::take(&mut self.pending_creates);

        for PendingCreate { handle, factory } in queue {
            let reserved = self
                .entries
                .get(handle.index() as usize)
                .is_some_and(|entry| entry.is_reserved_for(handle));
            if !reserved {
                log::debug!("Reservation {} vanished before construction", handle);
                continue;
            }

            let built = panic::catch_unwind(AssertUnwindSafe(factory))
                .unwrap_or_else(|payload| Err(FactoryError::Panicked(panic_message(payload.as_ref()))));

            match built {
                Ok(object) => {
                    self.install(handle, object);
                    self.start_and_register(handle);
                }
                Err(err) => {
                    log::warn!("Deferred creation of {} failed: {}", handle, err);
                    self.retire_reservation(handle);
                    self.stats.failed_deferred_creates += 1;
                }
            }
        }
    }

    fn retire_reservation(&mut self, handle: ObjectHandle) {
        let generation = advance(&mut self.generation_counter);
        if let Some(entry) = self.entries.get_mut(handle.index() as usize) {
            entry.generation = generation;
            self.free_list.push(handle.index());
        }
    }

    // ------------------------------------------------------------------
    // Hook dispatch
    // ------------------------------------------------------------------

    /// Check the object out of its slot, run `f`, and put it back
    ///
    /// Returns `None` without calling `f` if the handle is stale or the object
    /// is already checked out.
    fn with_detached<R>(
        &mut self,
        handle: ObjectHandle,
        f: impl FnOnce(&mut dyn GameObject, &mut Self) -> R,
    ) -> Option<R> {
        let entry = self.entries.get_mut(handle.index() as usize)?;
        if !entry.resolves(handle) || entry.detached {
            return None;
        }
        let mut object = entry.instance.take()?;
        entry.detached = true;

        let target: &mut dyn GameObject = object.as_mut();
        let result = f(target, self);
        self.reattach(handle, object);
        Some(result)
    }

    fn reattach(&mut self, handle: ObjectHandle, mut object: Box<dyn GameObject>) {
        if let Some(entry) = self.entries.get_mut(handle.index() as usize) {
            if entry.detached && entry.resolves(handle) {
                entry.detached = false;
                entry.instance = Some(object);
                return;
            }
        }

        log::debug!("{} was torn down while running a hook; finalizing", handle);
        object.on_destroy(handle, self);
        self.stats.total_destroyed += 1;
    }
}
