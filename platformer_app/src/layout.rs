//! Room layouts
//!
//! Rooms are built in code. The origin is the middle of the screen and `y`
//! points up.

use std::rc::Rc;

use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::ObjectManager;
use platformer_engine::AppError;

use crate::objects::{Block, Checkpoint, Door, Spike};
use crate::session::SharedSession;

/// Half the visible room width
pub const HALF_WIDTH: f32 = 320.0;

/// Half the visible room height
pub const HALF_HEIGHT: f32 = 180.0;

/// Height of the floor's top surface
pub const FLOOR_TOP: f32 = -HALF_HEIGHT + Block::TILE / 2.0;

/// Where the player appears when entering `TestRoom` through a door
pub const TEST_ROOM_ENTRY: Vec2 = Vec2::new(-HALF_WIDTH + Block::TILE * 4.0, -HALF_HEIGHT + Block::TILE * 2.0);

/// Where the player appears when entering `EmptyRoom` through a door
pub const EMPTY_ROOM_ENTRY: Vec2 = Vec2::new(-HALF_WIDTH + Block::TILE * 1.5, -HALF_HEIGHT + Block::TILE * 2.0);

/// Populate `objects` with the named room and bring the player in
///
/// Sets the respawn point to `spawn_point` when none is recorded yet.
pub fn build_room(
    name: &str,
    objects: &mut ObjectManager,
    session: &SharedSession,
    spawn_point: Vec2,
) -> Result<(), AppError> {
    match name {
        "TestRoom" => build_test_room(name, objects, session),
        "EmptyRoom" => build_empty_room(objects, session),
        other => return Err(AppError::GameLogic(format!("Unknown room: {}", other))),
    }

    {
        let mut session = session.borrow_mut();
        if !session.has_respawn_record() {
            session.set_respawn_point(spawn_point, name);
        }
        session.emerge(objects, name);
    }

    log::info!("Built room {} with {} objects", name, objects.count());
    Ok(())
}

/// Floor and side walls
fn build_walls(objects: &mut ObjectManager) {
    let half_tile = Block::TILE / 2.0;

    objects.create_immediate(Block::new(
        Vec2::new(0.0, -HALF_HEIGHT),
        Vec2::new(HALF_WIDTH, half_tile),
    ));
    for x in [-HALF_WIDTH + half_tile, HALF_WIDTH - half_tile] {
        objects.create_immediate(Block::new(Vec2::new(x, 0.0), Vec2::new(half_tile, HALF_HEIGHT)));
    }
}

fn build_test_room(name: &str, objects: &mut ObjectManager, session: &SharedSession) {
    build_walls(objects);

    objects.create_immediate(Spike::new(
        Vec2::new(154.0, FLOOR_TOP + Spike::HALF_SIZE),
        Rc::clone(session),
    ));
    objects.create_immediate(Checkpoint::new(
        Vec2::new(-120.0, FLOOR_TOP + Checkpoint::HALF_HEIGHT),
        name,
        Rc::clone(session),
    ));
    objects.create_immediate(Door::new(
        Vec2::new(-250.0, FLOOR_TOP + Door::HALF_HEIGHT),
        "EmptyRoom",
        EMPTY_ROOM_ENTRY,
        Rc::clone(session),
    ));
}

fn build_empty_room(objects: &mut ObjectManager, session: &SharedSession) {
    build_walls(objects);

    for x in [-90.0, 90.0] {
        objects.create_immediate(Block::tile(Vec2::new(x, 20.0)));
    }
    objects.create_immediate(Spike::moving(
        Vec2::new(-60.0, 100.0),
        Vec2::new(60.0, 100.0),
        2.0,
        Rc::clone(session),
    ));
    objects.create_immediate(Door::new(
        Vec2::new(250.0, FLOOR_TOP + Door::HALF_HEIGHT),
        "TestRoom",
        TEST_ROOM_ENTRY,
        Rc::clone(session),
    ));
}
