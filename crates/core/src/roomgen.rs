//! Procedural room generation domain split into coherent submodules.

pub mod model;

mod generator;
mod grid;
mod layout;
mod props;
mod rng;

pub use generator::RoomGenerator;
pub use grid::{OccupancyMap, TileGrid};
pub use model::{PropPlacement, Room};

use crate::config::GenConfig;

pub fn generate_room(config: &GenConfig, seed: u64) -> Room {
    RoomGenerator::new(config.clone()).generate(seed)
}

#[cfg(test)]
mod tests {
    use super::{RoomGenerator, generate_room};
    use crate::config::GenConfig;

    #[test]
    fn generate_room_matches_room_generator_output() {
        let config = GenConfig::default();
        let seed = 123_u64;

        let from_helper = generate_room(&config, seed);
        let from_generator = RoomGenerator::new(config).generate(seed);

        assert_eq!(from_helper.canonical_bytes(), from_generator.canonical_bytes());
    }
}
