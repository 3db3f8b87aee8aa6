//! Deferred creation and the ordering of `update_all`

use std::rc::Rc;

use super::{event_log, occurrences, position, recording_manager, Probe};
use crate::objects::{GameObject, ObjectManager};

#[test]
fn test_delayed_create_is_invalid_until_drained() {
    let log = event_log();
    let mut objects = ObjectManager::default();

    let handle = objects.create_delayed({
        let log = Rc::clone(&log);
        move || Probe::new("b", &log)
    });
    assert!(!handle.is_invalid());
    assert!(!objects.is_valid(handle));
    assert!(objects.get(handle).is_none());
    assert_eq!(objects.count(), 0);
    assert_eq!(objects.pending_create_count(), 1);

    objects.update_all();

    assert!(objects.is_valid(handle));
    assert_eq!(objects.get_as::<Probe>(handle).map(|probe| probe.name), Some("b"));
    assert_eq!(objects.count(), 1);
    assert_eq!(objects.pending_create_count(), 0);
    assert_eq!(occurrences(&log, "start b 0"), 1);
    // Installed after the update pass, so not updated in its first frame
    assert_eq!(occurrences(&log, "update b"), 0);

    objects.update_all();
    assert_eq!(occurrences(&log, "update b"), 1);
}

#[test]
fn test_failing_factory_retires_reservation() {
    let mut objects = ObjectManager::default();
    let handle = objects.create_delayed_fallible(|| Err::<Probe, _>("no sprite"));

    objects.update_all();
    assert!(!objects.is_valid(handle));
    assert_eq!(objects.stats().failed_deferred_creates, 1);

    // The slot is reusable, under a different generation
    let log = event_log();
    let next = objects.create_immediate(Probe::new("next", &log));
    assert_eq!(next.index(), handle.index());
    assert_ne!(next.generation(), handle.generation());
    assert!(!objects.is_valid(handle));
}

#[test]
fn test_empty_factory_retires_reservation() {
    let mut objects = ObjectManager::default();
    let handle = objects.create_delayed_boxed(|| None);

    objects.update_all();
    assert!(!objects.is_valid(handle));
    assert_eq!(objects.count(), 0);
    assert_eq!(objects.stats().failed_deferred_creates, 1);
}

#[test]
fn test_panicking_factory_retires_reservation() {
    let log = event_log();
    let mut objects = ObjectManager::default();
    let survivor = objects.create_immediate(Probe::new("a", &log));

    let handle = objects.create_delayed(|| -> Probe { panic!("constructor exploded") });
    let after = objects.create_delayed_boxed({
        let log = Rc::clone(&log);
        move || Some(Box::new(Probe::new("c", &log)) as Box<dyn GameObject>)
    });

    objects.update_all();

    assert!(!objects.is_valid(handle));
    assert!(objects.is_valid(after), "Later entries should still be built");
    assert!(objects.is_valid(survivor));
    assert_eq!(objects.count(), 2);
    assert_eq!(objects.stats().failed_deferred_creates, 1);
}

#[test]
fn test_immediate_create_during_update_waits_a_frame() {
    let log = event_log();
    let mut objects = ObjectManager::default();

    let spawner_log = Rc::clone(&log);
    let mut spawned = false;
    objects.create_immediate(Probe::new("spawner", &log).on_update(move |_, objects| {
        if !spawned {
            spawned = true;
            objects.create_immediate(Probe::new("child", &spawner_log));
        }
    }));

    objects.update_all();
    assert_eq!(objects.count(), 2);
    assert_eq!(occurrences(&log, "start child 0"), 1);
    assert_eq!(occurrences(&log, "update child"), 0);

    objects.update_all();
    assert_eq!(occurrences(&log, "update child"), 1);
}

#[test]
fn test_create_requested_by_start_waits_for_next_drain() {
    let log = event_log();
    let mut objects = ObjectManager::default();

    let parent_log = Rc::clone(&log);
    objects.create_delayed({
        let log = Rc::clone(&log);
        move || {
            Probe::new("parent", &log).on_start(move |_, objects| {
                let log = Rc::clone(&parent_log);
                objects.create_delayed(move || Probe::new("child", &log));
            })
        }
    });

    objects.update_all();
    assert_eq!(occurrences(&log, "start parent 0"), 1);
    assert_eq!(occurrences(&log, "start child 0"), 0);
    assert_eq!(objects.pending_create_count(), 1);

    objects.update_all();
    assert_eq!(occurrences(&log, "start child 0"), 1);
    assert_eq!(objects.count(), 2);
}

#[test]
fn test_destroy_cascade_drains_same_frame() {
    let log = event_log();
    let mut objects = ObjectManager::default();

    let b = objects.create_immediate(Probe::new("b", &log));
    let a = objects.create_immediate(
        Probe::new("a", &log).on_destroy(move |_, objects| objects.destroy_delayed(b)),
    );

    objects.destroy_delayed(a);
    objects.update_all();

    assert!(!objects.is_valid(a));
    assert!(!objects.is_valid(b));
    assert_eq!(objects.count(), 0);
    assert_eq!(objects.pending_destroy_count(), 0);
}

#[test]
fn test_destroys_drain_before_creates() {
    let log = event_log();
    let (mut objects, _) = recording_manager(&log);

    let doomed = objects.create_immediate(Probe::new("doomed", &log));
    objects.destroy_delayed(doomed);
    let fresh = objects.create_delayed({
        let log = Rc::clone(&log);
        move || Probe::new("fresh", &log)
    });

    objects.update_all();

    let step = position(&log, "step").expect("Should step");
    let destroyed = position(&log, "destroy doomed").expect("Should destroy");
    let started = position(&log, "start fresh 0").expect("Should start");
    assert!(step < destroyed);
    assert!(destroyed < started);
    assert!(objects.is_valid(fresh));
}

#[test]
fn test_update_order_within_a_frame() {
    let log = event_log();
    let (mut objects, _) = recording_manager(&log);
    objects.create_immediate(Probe::new("a", &log));

    log.borrow_mut().clear();
    objects.update_all();

    assert_eq!(*log.borrow(), vec!["update a".to_string(), "step".to_string()]);
}

#[test]
fn test_reentrant_update_is_ignored() {
    let log = event_log();
    let mut objects = ObjectManager::default();
    objects.create_immediate(
        Probe::new("a", &log).on_update(|_, objects| objects.update_all()),
    );

    objects.update_all();

    assert_eq!(occurrences(&log, "update a"), 1);
    assert_eq!(objects.stats().frames, 1);
    assert_eq!(objects.stats().rejected_requests, 1);
}

#[test]
fn test_self_destroy_from_start_hook() {
    let log = event_log();
    let (mut objects, _) = recording_manager(&log);

    let handle = objects.create_immediate(
        Probe::new("a", &log).on_start(|me, objects| objects.destroy_delayed(me)),
    );
    assert!(objects.is_valid(handle));
    assert!(objects.physics().is_registered(handle));

    objects.update_all();
    assert!(!objects.is_valid(handle));
    assert!(!objects.physics().is_registered(handle));
}
