//! Game objects of the platformer demo

pub mod block;
pub mod blood;
pub mod checkpoint;
pub mod door;
pub mod player;
pub mod spike;

pub use block::Block;
pub use blood::Blood;
pub use checkpoint::Checkpoint;
pub use door::Door;
pub use player::Player;
pub use spike::Spike;

/// Tag carried by the player
pub const PLAYER_TAG: &str = "player";

/// Tag carried by level geometry
pub const SOLID_TAG: &str = "solid";
