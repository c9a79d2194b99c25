//! Room and level progression: sequencing generated rooms, transitioning the
//! player between them, and advancing level state as rooms are cleared.

use slotmap::SlotMap;

use crate::config::{DirectorConfig, WatchdogPolicy};
use crate::events::ProgressionEvent;
use crate::roomgen::{Room, RoomGenerator};
use crate::seed::{derive_room_seed, generate_runtime_seed};
use crate::types::{Direction, DirectorError, RoomId, WorldVec};

/// How far a relocated player is pulled toward the new room's center when no
/// designated spawn cell exists, to avoid landing inside wall geometry.
const NUDGE_DISTANCE: f32 = 24.0;
/// Current room plus the one behind it; older rooms are unreachable and die.
const KEPT_ROOMS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
    Transitioning,
}

/// The progression controller. Owns the room sequence, the per-level cleared
/// counter, and the stall watchdog; collaborators read the typed event log.
pub struct Director {
    config: DirectorConfig,
    generator: RoomGenerator,
    run_seed: u64,
    next_room_index: u64,
    rooms: SlotMap<RoomId, Room>,
    order: Vec<RoomId>,
    current: Option<RoomId>,
    phase: Phase,
    player_pos: Option<WorldVec>,
    level: u32,
    cleared_in_level: u32,
    advance_direction: Direction,
    watchdog_elapsed: f32,
    reported_missing_player: bool,
    events: Vec<ProgressionEvent>,
}

impl Director {
    pub fn new(config: DirectorConfig) -> Self {
        let run_seed = generate_runtime_seed();
        Self::with_seed(config, run_seed)
    }

    /// Fixed run seed, for tests and tooling. The same seed replays the same
    /// sequence of rooms.
    pub fn with_seed(config: DirectorConfig, run_seed: u64) -> Self {
        let generator = RoomGenerator::new(config.generation.clone());
        Self {
            config,
            generator,
            run_seed,
            next_room_index: 0,
            rooms: SlotMap::with_key(),
            order: Vec::new(),
            current: None,
            phase: Phase::Uninitialized,
            player_pos: None,
            level: 1,
            cleared_in_level: 0,
            advance_direction: Direction::North,
            watchdog_elapsed: 0.0,
            reported_missing_player: false,
            events: Vec::new(),
        }
    }

    /// Second construction phase. A missing player reference is a fatal
    /// configuration error here; everywhere else it degrades to a no-op.
    pub fn initialize(&mut self, player: Option<WorldVec>) -> Result<(), DirectorError> {
        let Some(player_pos) = player else {
            return Err(DirectorError::MissingPlayer);
        };
        self.player_pos = Some(player_pos);
        self.spawn_room_at(WorldVec::ZERO);
        Ok(())
    }

    /// Per-frame update: watchdog first, then the transition-distance check.
    pub fn tick(&mut self, elapsed: f32, player: Option<WorldVec>) {
        if self.phase == Phase::Uninitialized {
            return;
        }

        let Some(player_pos) = player else {
            if !self.reported_missing_player {
                self.events.push(ProgressionEvent::PlayerMissing);
                self.reported_missing_player = true;
            }
            return;
        };
        self.reported_missing_player = false;
        self.player_pos = Some(player_pos);

        if self.run_watchdog(elapsed) {
            // A forced transition already moved the player this frame.
            return;
        }

        let Some(origin) = self.current_room().map(|room| room.origin) else {
            return;
        };
        if player_pos.distance_to(origin) > self.config.transition_distance {
            self.generate_new_room(player_pos - origin);
        }
    }

    /// Spawns the next room one transition hop away in the classified
    /// direction and moves the player into it. Skipped silently when no
    /// current room exists yet.
    pub fn generate_new_room(&mut self, direction: WorldVec) {
        let Some(origin) = self.current_room().map(|room| room.origin) else {
            return;
        };

        let heading = Direction::classify(direction);
        self.advance_direction = heading;
        let target = origin + heading.unit() * (self.config.transition_distance * 2.0);
        self.spawn_room_at(target);
    }

    /// Reported by the external spawner collaborator once the current room
    /// has zero enemies left.
    pub fn on_room_cleared(&mut self) {
        let Some(current_id) = self.current else {
            return;
        };

        self.watchdog_elapsed = 0.0;
        self.cleared_in_level += 1;
        self.events.push(ProgressionEvent::RoomCleared { room: current_id });

        if self.cleared_in_level >= self.config.rooms_per_level {
            self.cleared_in_level = 0;
            self.level += 1;
            self.events.push(ProgressionEvent::LevelAdvanced { level: self.level });
        }
        self.generate_new_room(self.advance_direction.unit());
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.and_then(|id| self.rooms.get(id))
    }

    pub fn player_position(&self) -> Option<WorldVec> {
        self.player_pos
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn cleared_in_level(&self) -> u32 {
        self.cleared_in_level
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    /// Total rooms generated over the run, including destroyed ones.
    pub fn rooms_generated(&self) -> u64 {
        self.next_room_index
    }

    /// Rooms currently alive (current plus at most one predecessor).
    pub fn live_room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn events(&self) -> &[ProgressionEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ProgressionEvent> {
        std::mem::take(&mut self.events)
    }

    fn spawn_room_at(&mut self, origin: WorldVec) -> RoomId {
        let seed = derive_room_seed(self.run_seed, self.next_room_index);
        self.next_room_index += 1;

        let mut room = self.generator.generate(seed);
        room.origin = origin;

        let id = self.rooms.insert(room);
        self.order.push(id);
        self.events.push(ProgressionEvent::SpawnerRequested { room: id });
        self.transition_to_room(id);
        id
    }

    fn transition_to_room(&mut self, id: RoomId) {
        self.phase = Phase::Transitioning;

        let previous_origin = self.current_room().map(|room| room.origin);
        let player_pos = relocate_player(&self.rooms[id], previous_origin, self.player_pos);
        self.player_pos = Some(player_pos);
        self.current = Some(id);

        while self.order.len() > KEPT_ROOMS {
            let stale = self.order.remove(0);
            self.rooms.remove(stale);
        }

        self.watchdog_elapsed = 0.0;
        self.events.push(ProgressionEvent::RoomChanged { room: id, player_pos });
        self.phase = Phase::Active;
    }

    /// Returns true when the watchdog forced a transition this frame.
    fn run_watchdog(&mut self, elapsed: f32) -> bool {
        self.watchdog_elapsed += elapsed;
        if self.watchdog_elapsed <= self.config.watchdog_seconds {
            return false;
        }

        self.events
            .push(ProgressionEvent::StallDetected { idle_seconds: self.watchdog_elapsed });

        match self.config.watchdog_policy {
            WatchdogPolicy::LogOnly => {
                // Re-arm so a persistent stall reports once per window, not
                // once per frame.
                self.watchdog_elapsed = 0.0;
                false
            }
            WatchdogPolicy::ForceAdvance => {
                let Some(origin) = self.current_room().map(|room| room.origin) else {
                    self.watchdog_elapsed = 0.0;
                    return false;
                };
                let delta = self.player_pos.map_or(WorldVec::ZERO, |pos| pos - origin);
                let direction = if delta.length() <= f32::EPSILON {
                    Direction::North.unit()
                } else {
                    delta
                };
                self.generate_new_room(direction);
                true
            }
        }
    }
}

/// Player relocation policy for a room transition: a designated spawn cell
/// wins; otherwise the player keeps their world offset from the previous
/// room's origin and is nudged a fixed distance toward the new room's center.
fn relocate_player(
    room: &Room,
    previous_origin: Option<WorldVec>,
    player_pos: Option<WorldVec>,
) -> WorldVec {
    if let Some(spawn) = room.spawn_world() {
        return spawn;
    }

    let offset = match (previous_origin, player_pos) {
        (Some(origin), Some(pos)) => pos - origin,
        _ => WorldVec::ZERO,
    };
    let carried = room.origin + offset;
    let toward_center = (room.origin - carried).normalized_or(WorldVec::ZERO);
    carried + toward_center * NUDGE_DISTANCE
}
