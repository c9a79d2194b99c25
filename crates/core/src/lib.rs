//! Deterministic room generation and progression for the clanker arena.
//!
//! The crate is engine-agnostic: [`RoomGenerator`] turns a seed into a tiled
//! room layout, and [`Director`] sequences rooms into levels, relocating the
//! player and emitting [`ProgressionEvent`]s for the hosting game loop.

pub mod config;
pub mod director;
pub mod events;
pub mod roomgen;
pub mod seed;
pub mod types;

pub use config::{DirectorConfig, GenConfig, PropDensity, WatchdogPolicy};
pub use director::{Director, Phase};
pub use events::ProgressionEvent;
pub use roomgen::{generate_room, PropPlacement, Room, RoomGenerator};
pub use seed::{derive_room_seed, generate_runtime_seed};
pub use types::{
    Cell, Direction, DirectorError, FloorTile, PropKind, RoomId, WallTile, WorldVec,
};
