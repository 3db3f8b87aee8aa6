//! Scenario tests for the object manager
//!
//! Objects here are [`Probe`]s: they log every hook into a shared event log
//! and run optional closures, so a test can script what an object does from
//! inside its own callbacks.

mod deferred;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::physics::{Body, BodyAccess, CollisionEvent, Manifold, PhysicsService};
use super::{GameObject, ObjectHandle, ObjectManager};

/// Shared, ordered record of everything that happened
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Number of log lines equal to `line`
pub fn occurrences(log: &EventLog, line: &str) -> usize {
    log.borrow().iter().filter(|entry| entry.as_str() == line).count()
}

/// Position of the first log line equal to `line`
pub fn position(log: &EventLog, line: &str) -> Option<usize> {
    log.borrow().iter().position(|entry| entry.as_str() == line)
}

type Hook = Box<dyn FnMut(ObjectHandle, &mut ObjectManager)>;
type CollisionHook = Box<dyn FnMut(ObjectHandle, ObjectHandle, &Manifold, &mut ObjectManager)>;

/// Scriptable test object
pub struct Probe {
    pub name: &'static str,
    pub value: i32,
    log: EventLog,
    body: Option<Body>,
    tag: Option<&'static str>,
    on_start: Option<Hook>,
    on_update: Option<Hook>,
    on_destroy: Option<Hook>,
    on_enter: Option<CollisionHook>,
}

impl Probe {
    pub fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            value: 0,
            log: Rc::clone(log),
            body: None,
            tag: None,
            on_start: None,
            on_update: None,
            on_destroy: None,
            on_enter: None,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn on_start(mut self, hook: impl FnMut(ObjectHandle, &mut ObjectManager) + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn on_update(mut self, hook: impl FnMut(ObjectHandle, &mut ObjectManager) + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn on_destroy(mut self, hook: impl FnMut(ObjectHandle, &mut ObjectManager) + 'static) -> Self {
        self.on_destroy = Some(Box::new(hook));
        self
    }

    pub fn on_enter(
        mut self,
        hook: impl FnMut(ObjectHandle, ObjectHandle, &Manifold, &mut ObjectManager) + 'static,
    ) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    fn record(&self, line: String) {
        self.log.borrow_mut().push(line);
    }
}

impl GameObject for Probe {
    fn start(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {
        self.record(format!("start {} {}", self.name, self.value));
        if let Some(hook) = self.on_start.as_mut() {
            hook(me, objects);
        }
    }

    fn framely_update(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {
        self.record(format!("update {}", self.name));
        if let Some(hook) = self.on_update.as_mut() {
            hook(me, objects);
        }
    }

    fn on_destroy(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {
        self.record(format!("destroy {}", self.name));
        if let Some(hook) = self.on_destroy.as_mut() {
            hook(me, objects);
        }
    }

    fn on_collision_enter(
        &mut self,
        me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
        self.record(format!("enter {}", self.name));
        if let Some(hook) = self.on_enter.as_mut() {
            hook(me, other, manifold, objects);
        }
    }

    fn on_collision_stay(
        &mut self,
        _me: ObjectHandle,
        _other: ObjectHandle,
        _manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        self.record(format!("stay {}", self.name));
    }

    fn on_collision_exit(
        &mut self,
        _me: ObjectHandle,
        _other: ObjectHandle,
        _manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        self.record(format!("exit {}", self.name));
    }

    fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tag == Some(tag)
    }
}

/// Physics double: logs registration calls and replays scripted events
pub struct RecordingPhysics {
    log: EventLog,
    registered: HashSet<ObjectHandle>,
    scripted: Rc<RefCell<Vec<CollisionEvent>>>,
}

impl RecordingPhysics {
    /// Returns the service and a queue of events the next step will report
    pub fn new(log: &EventLog) -> (Self, Rc<RefCell<Vec<CollisionEvent>>>) {
        let scripted = Rc::new(RefCell::new(Vec::new()));
        let physics = Self {
            log: Rc::clone(log),
            registered: HashSet::new(),
            scripted: Rc::clone(&scripted),
        };
        (physics, scripted)
    }
}

impl PhysicsService for RecordingPhysics {
    fn register(&mut self, handle: ObjectHandle, _object: &dyn GameObject) {
        self.registered.insert(handle);
        self.log.borrow_mut().push(format!("register {}", handle));
    }

    fn unregister(&mut self, handle: ObjectHandle) {
        if self.registered.remove(&handle) {
            self.log.borrow_mut().push(format!("unregister {}", handle));
        }
    }

    fn step(&mut self, _bodies: &mut dyn BodyAccess) -> Vec<CollisionEvent> {
        self.log.borrow_mut().push("step".to_string());
        self.scripted.borrow_mut().drain(..).collect()
    }

    fn is_registered(&self, handle: ObjectHandle) -> bool {
        self.registered.contains(&handle)
    }

    fn registered_count(&self) -> usize {
        self.registered.len()
    }

    fn clear(&mut self) {
        self.registered.clear();
    }
}

/// Manager wired to a [`RecordingPhysics`]
pub fn recording_manager(log: &EventLog) -> (ObjectManager, Rc<RefCell<Vec<CollisionEvent>>>) {
    let (physics, scripted) = RecordingPhysics::new(log);
    (ObjectManager::new(Box::new(physics)), scripted)
}
