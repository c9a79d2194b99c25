//! High-level room generation orchestration that composes the layout and
//! prop placement stages.

use crate::config::GenConfig;
use crate::types::WorldVec;

use super::grid::{OccupancyMap, TileGrid};
use super::layout::{fill_floor, place_interior, place_perimeter_walls};
use super::model::Room;
use super::props::{place_chests, place_decorations, place_door, place_stairs, place_torches};
use super::rng::LayoutRng;

// Anything narrower cannot hold a door offset plus stairs row.
const MIN_ROOM_EXTENT: u32 = 4;

/// Turns a seed into a populated [`Room`]. Holds no state between calls;
/// the occupancy set lives only for one generation pass.
pub struct RoomGenerator {
    config: GenConfig,
}

impl RoomGenerator {
    pub fn new(config: GenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Room {
        let width = self.config.room_width.max(MIN_ROOM_EXTENT);
        let height = self.config.room_height.max(MIN_ROOM_EXTENT);

        let mut rng = LayoutRng::from_seed(seed);
        let mut grid = TileGrid::new(width, height);
        let mut occupied = OccupancyMap::new();
        let mut props = Vec::new();

        fill_floor(&mut grid, &mut rng);
        place_perimeter_walls(&mut grid);
        place_interior(&mut grid, &mut occupied, &mut rng);

        let entry_cell = place_door(&grid, &mut occupied, &mut rng, &mut props);
        place_torches(&grid, &mut occupied, &mut props, self.config.props.torch_spacing as i32);
        place_chests(&grid, &mut occupied, &mut rng, &mut props);
        place_decorations(&grid, &mut occupied, &mut rng, &mut props, &self.config.props);
        place_stairs(&grid, &mut occupied, &mut rng, &mut props, self.config.props.placement_attempts);

        Room {
            seed,
            grid,
            props,
            origin: WorldVec::ZERO,
            entry_cell,
            tile_size: self.config.tile_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::types::{Cell, PropKind, WallTile};

    fn default_room(seed: u64) -> Room {
        RoomGenerator::new(GenConfig::default()).generate(seed)
    }

    fn assert_perimeter_intact(room: &Room) {
        let grid = &room.grid;
        for x in (grid.x_min() - 1)..=(grid.x_max() + 1) {
            for y in [grid.y_min() - 1, grid.y_max() + 1] {
                assert_eq!(
                    grid.wall_at(Cell { y, x }),
                    Some(WallTile::Riveted),
                    "perimeter missing or overwritten at y={y} x={x} (seed={})",
                    room.seed
                );
            }
        }
        for y in (grid.y_min() - 1)..=(grid.y_max() + 1) {
            for x in [grid.x_min() - 1, grid.x_max() + 1] {
                assert_eq!(grid.wall_at(Cell { y, x }), Some(WallTile::Riveted));
            }
        }
    }

    fn assert_no_overlaps(room: &Room) {
        let mut prop_cells = BTreeSet::new();
        for placement in &room.props {
            assert!(
                prop_cells.insert(placement.cell),
                "two props share {:?} (seed={})",
                placement.cell,
                room.seed
            );
            let interior_wall = room.grid.has_wall(placement.cell)
                && !room.grid.is_perimeter(placement.cell);
            assert!(
                !interior_wall,
                "{:?} prop on interior wall at {:?} (seed={})",
                placement.kind, placement.cell, room.seed
            );
        }
    }

    #[test]
    fn same_seed_produces_byte_identical_rooms() {
        let a = default_room(123_456);
        let b = default_room(123_456);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a.layout_fingerprint(), b.layout_fingerprint());
    }

    #[test]
    fn different_seeds_change_the_layout() {
        let a = default_room(123);
        let b = default_room(456);
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn every_floor_cell_is_assigned_exactly_once() {
        let room = default_room(9);
        let expected = (room.width() * room.height()) as usize;
        assert_eq!(room.grid.floor_tiles().count(), expected);
    }

    #[test]
    fn perimeter_survives_every_generation_stage() {
        for seed in [1_u64, 7, 42, 999, 31_337, 909_090] {
            assert_perimeter_intact(&default_room(seed));
        }
    }

    #[test]
    fn props_never_overlap_each_other_or_interior_walls() {
        for seed in [1_u64, 7, 42, 999, 31_337, 909_090] {
            assert_no_overlaps(&default_room(seed));
        }
    }

    #[test]
    fn rooms_carry_the_expected_prop_mix() {
        for seed in [3_u64, 14, 159, 2_653] {
            let room = default_room(seed);
            let count =
                |kind: PropKind| room.props.iter().filter(|p| p.kind == kind).count();

            assert_eq!(count(PropKind::Door), 1);
            assert!((1..=2).contains(&count(PropKind::Chest)));
            assert!(count(PropKind::Pot) <= 6);
            assert!(count(PropKind::Skull) <= 4);
            assert_eq!(count(PropKind::Stairs), 1, "default-size rooms always fit stairs");
            assert!(count(PropKind::Torch) >= 4);
        }
    }

    #[test]
    fn entry_cell_sits_directly_under_the_door() {
        for seed in [3_u64, 14, 159, 2_653] {
            let room = default_room(seed);
            let door =
                room.props.iter().find(|p| p.kind == PropKind::Door).expect("door placement");
            if let Some(entry) = room.entry_cell {
                assert_eq!(entry, Cell { y: door.cell.y + 1, x: door.cell.x });
            }
        }
    }

    #[test]
    fn config_dimensions_drive_the_grid_extent() {
        let config =
            GenConfig { room_width: 24, room_height: 18, ..GenConfig::default() };
        let room = RoomGenerator::new(config).generate(5);
        assert_eq!(room.width(), 24);
        assert_eq!(room.height(), 18);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generation_is_deterministic_and_overlap_free(
            seed in any::<u64>(),
            width in 4_u32..=40,
            height in 4_u32..=40
        ) {
            let config = GenConfig { room_width: width, room_height: height, ..GenConfig::default() };
            let generator = RoomGenerator::new(config);

            let a = generator.generate(seed);
            let b = generator.generate(seed);
            prop_assert_eq!(a.canonical_bytes(), b.canonical_bytes());

            assert_perimeter_intact(&a);
            assert_no_overlaps(&a);
        }
    }
}
