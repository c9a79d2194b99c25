//! Typed progression events.
//!
//! External collaborators (UI, camera, the enemy spawner, game-state) react
//! by draining the director's event log each frame instead of wiring ambient
//! signals, so subscription and ordering stay statically checkable.

use crate::types::{RoomId, WorldVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressionEvent {
    /// Current room changed; the player was relocated to `player_pos`.
    RoomChanged { room: RoomId, player_pos: WorldVec },
    /// The spawner collaborator reported the room empty of enemies.
    RoomCleared { room: RoomId },
    /// The cleared-room quota was met and the level counter moved.
    LevelAdvanced { level: u32 },
    /// A fresh room needs an enemy spawner attached by the combat host.
    SpawnerRequested { room: RoomId },
    /// No transition or clear happened within the watchdog window.
    StallDetected { idle_seconds: f32 },
    /// A tick arrived without a player reference; the update was skipped.
    PlayerMissing,
}
