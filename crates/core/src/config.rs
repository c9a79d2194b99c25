//! Recognized configuration surface for room generation and progression.

use serde::{Deserialize, Serialize};

/// Tile-grid extent and prop density knobs for the layout engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub room_width: u32,
    pub room_height: u32,
    pub tile_size: f32,
    pub props: PropDensity,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self { room_width: 16, room_height: 10, tile_size: 32.0, props: PropDensity::default() }
    }
}

/// Spacing and count parameters per prop type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropDensity {
    pub torch_spacing: u32,
    pub pots_min: u32,
    pub pots_max: u32,
    pub skulls_min: u32,
    pub skulls_max: u32,
    /// Rejection-sampling budget per decorative prop. Exhaustion omits the
    /// prop instead of erroring.
    pub placement_attempts: u32,
}

impl Default for PropDensity {
    fn default() -> Self {
        Self {
            torch_spacing: 3,
            pots_min: 3,
            pots_max: 6,
            skulls_min: 2,
            skulls_max: 4,
            placement_attempts: 20,
        }
    }
}

/// What the stall watchdog does once the idle threshold is crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchdogPolicy {
    /// Record a `StallDetected` event and keep waiting.
    LogOnly,
    /// Record the event and force a transition to a fresh room.
    ForceAdvance,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// World distance from the current room's origin that triggers a new
    /// room. The boundary is exclusive: exactly this far does not trigger.
    pub transition_distance: f32,
    pub rooms_per_level: u32,
    pub watchdog_seconds: f32,
    pub watchdog_policy: WatchdogPolicy,
    pub generation: GenConfig,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            transition_distance: 400.0,
            rooms_per_level: 3,
            watchdog_seconds: 3.0,
            watchdog_policy: WatchdogPolicy::LogOnly,
            generation: GenConfig::default(),
        }
    }
}
