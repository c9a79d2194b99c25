//! Prop placement stages, applied in fixed order after walls are settled.

use crate::config::PropDensity;
use crate::types::{Cell, PropKind};

use super::grid::{OccupancyMap, TileGrid};
use super::model::PropPlacement;
use super::rng::LayoutRng;

const DOOR_OFFSETS: [i32; 3] = [-2, 0, 2];

/// One door near top-center, at one of three discrete x offsets. Returns the
/// floor cell directly under the door as the designated entry cell, or None
/// when an interior feature already holds it.
pub(super) fn place_door(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
    props: &mut Vec<PropPlacement>,
) -> Option<Cell> {
    let pick = rng.range_u32(0, 2) as usize;
    let x = DOOR_OFFSETS[pick].clamp(grid.x_min() + 1, grid.x_max() - 1);

    let door_cell = Cell { y: grid.y_min() - 1, x };
    if !occupied.claim(door_cell) {
        return None;
    }
    props.push(PropPlacement { kind: PropKind::Door, cell: door_cell });

    let entry = Cell { y: grid.y_min(), x };
    occupied.claim(entry).then_some(entry)
}

/// Torches at fixed intervals along all four perimeter walls, skipping cells
/// already claimed (the door, most commonly).
pub(super) fn place_torches(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    props: &mut Vec<PropPlacement>,
    spacing: i32,
) {
    let spacing = spacing.max(1);
    let top = grid.y_min() - 1;
    let bottom = grid.y_max() + 1;
    let left = grid.x_min() - 1;
    let right = grid.x_max() + 1;

    let mut x = grid.x_min();
    while x <= grid.x_max() {
        try_place(occupied, props, PropKind::Torch, Cell { y: top, x });
        try_place(occupied, props, PropKind::Torch, Cell { y: bottom, x });
        x += spacing;
    }
    let mut y = grid.y_min();
    while y <= grid.y_max() {
        try_place(occupied, props, PropKind::Torch, Cell { y, x: left });
        try_place(occupied, props, PropKind::Torch, Cell { y, x: right });
        y += spacing;
    }
}

/// One or two chests in shuffled corner slots.
pub(super) fn place_chests(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
    props: &mut Vec<PropPlacement>,
) {
    let mut corners = [
        Cell { y: grid.y_min(), x: grid.x_min() },
        Cell { y: grid.y_min(), x: grid.x_max() },
        Cell { y: grid.y_max(), x: grid.x_min() },
        Cell { y: grid.y_max(), x: grid.x_max() },
    ];
    rng.shuffle(&mut corners);

    let chest_count = rng.range_u32(1, 2);
    let mut placed = 0;
    for corner in corners {
        if placed >= chest_count {
            break;
        }
        if try_place(occupied, props, PropKind::Chest, corner) {
            placed += 1;
        }
    }
}

/// Pots then skulls, by rejection sampling against the occupancy set. Each
/// prop gets a bounded attempt budget; exhaustion silently omits it.
pub(super) fn place_decorations(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
    props: &mut Vec<PropPlacement>,
    density: &PropDensity,
) {
    let pot_count = rng.range_u32(density.pots_min, density.pots_max);
    let skull_count = rng.range_u32(density.skulls_min, density.skulls_max);

    for _ in 0..pot_count {
        sample_decoration(grid, occupied, rng, props, PropKind::Pot, density.placement_attempts);
    }
    for _ in 0..skull_count {
        sample_decoration(grid, occupied, rng, props, PropKind::Skull, density.placement_attempts);
    }
}

/// One staircase on the bottom-most interior row at a randomized x offset.
/// Falls back to a deterministic row scan; omitted only when the row is full.
pub(super) fn place_stairs(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
    props: &mut Vec<PropPlacement>,
    attempts: u32,
) {
    let row = grid.y_max();
    for _ in 0..attempts {
        let x = rng.range_i32(grid.x_min() + 1, grid.x_max() - 1);
        if try_place(occupied, props, PropKind::Stairs, Cell { y: row, x }) {
            return;
        }
    }
    for x in grid.x_min()..=grid.x_max() {
        if try_place(occupied, props, PropKind::Stairs, Cell { y: row, x }) {
            return;
        }
    }
}

fn sample_decoration(
    grid: &TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
    props: &mut Vec<PropPlacement>,
    kind: PropKind,
    attempts: u32,
) {
    for _ in 0..attempts {
        let cell = Cell {
            y: rng.range_i32(grid.y_min(), grid.y_max()),
            x: rng.range_i32(grid.x_min(), grid.x_max()),
        };
        if try_place(occupied, props, kind, cell) {
            return;
        }
    }
}

fn try_place(
    occupied: &mut OccupancyMap,
    props: &mut Vec<PropPlacement>,
    kind: PropKind,
    cell: Cell,
) -> bool {
    if !occupied.claim(cell) {
        return false;
    }
    props.push(PropPlacement { kind, cell });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(width: u32, height: u32, seed: u64) -> (TileGrid, OccupancyMap, LayoutRng) {
        (TileGrid::new(width, height), OccupancyMap::new(), LayoutRng::from_seed(seed))
    }

    #[test]
    fn door_sits_on_the_top_wall_with_entry_below() {
        let (grid, mut occupied, mut rng) = fixture(16, 10, 3);
        let mut props = Vec::new();

        let entry = place_door(&grid, &mut occupied, &mut rng, &mut props).expect("entry cell");
        let door = props.first().expect("door placement");
        assert_eq!(door.kind, PropKind::Door);
        assert_eq!(door.cell.y, grid.y_min() - 1);
        assert!(DOOR_OFFSETS.contains(&door.cell.x));
        assert_eq!(entry, Cell { y: grid.y_min(), x: door.cell.x });
    }

    #[test]
    fn door_reports_no_entry_when_the_cell_below_is_taken() {
        let (grid, mut occupied, mut rng) = fixture(16, 10, 3);
        for x in grid.x_min()..=grid.x_max() {
            occupied.claim(Cell { y: grid.y_min(), x });
        }
        let mut props = Vec::new();

        let entry = place_door(&grid, &mut occupied, &mut rng, &mut props);
        assert_eq!(entry, None);
        assert_eq!(props.len(), 1, "door itself still goes up");
    }

    #[test]
    fn torches_skip_claimed_wall_cells() {
        let (grid, mut occupied, mut rng) = fixture(16, 10, 3);
        let mut props = Vec::new();
        place_door(&grid, &mut occupied, &mut rng, &mut props);
        let door_cell = props[0].cell;

        place_torches(&grid, &mut occupied, &mut props, 3);
        assert!(
            !props.iter().any(|p| p.kind == PropKind::Torch && p.cell == door_cell),
            "torch placed over the door"
        );
        assert!(props.iter().filter(|p| p.kind == PropKind::Torch).count() >= 8);
    }

    #[test]
    fn chest_count_stays_between_one_and_two_on_corner_cells() {
        for seed in 0..32_u64 {
            let (grid, mut occupied, mut rng) = fixture(16, 10, seed);
            let mut props = Vec::new();
            place_chests(&grid, &mut occupied, &mut rng, &mut props);

            let chests: Vec<_> = props.iter().filter(|p| p.kind == PropKind::Chest).collect();
            assert!((1..=2).contains(&chests.len()));
            for chest in chests {
                assert!(chest.cell.y == grid.y_min() || chest.cell.y == grid.y_max());
                assert!(chest.cell.x == grid.x_min() || chest.cell.x == grid.x_max());
            }
        }
    }

    #[test]
    fn decoration_counts_respect_configured_ranges() {
        for seed in 0..32_u64 {
            let (grid, mut occupied, mut rng) = fixture(16, 10, seed);
            let mut props = Vec::new();
            place_decorations(&grid, &mut occupied, &mut rng, &mut props, &PropDensity::default());

            let pots = props.iter().filter(|p| p.kind == PropKind::Pot).count();
            let skulls = props.iter().filter(|p| p.kind == PropKind::Skull).count();
            assert!(pots <= 6);
            assert!(skulls <= 4);
        }
    }

    #[test]
    fn exhausted_sampling_omits_decorations_without_error() {
        let (grid, mut occupied, mut rng) = fixture(8, 6, 3);
        for cell in grid.rect_cells() {
            occupied.claim(cell);
        }
        let mut props = Vec::new();
        place_decorations(&grid, &mut occupied, &mut rng, &mut props, &PropDensity::default());
        assert!(props.is_empty(), "fully claimed room should yield no decorations");
    }

    #[test]
    fn stairs_fall_back_to_a_row_scan_when_sampling_fails() {
        let (grid, mut occupied, mut rng) = fixture(16, 10, 3);
        // Claim everything on the bottom row except one cell the random
        // offsets can never reach (the row's left edge).
        for x in (grid.x_min() + 1)..=grid.x_max() {
            occupied.claim(Cell { y: grid.y_max(), x });
        }
        let mut props = Vec::new();
        place_stairs(&grid, &mut occupied, &mut rng, &mut props, 20);

        let stairs = props.iter().find(|p| p.kind == PropKind::Stairs).expect("stairs");
        assert_eq!(stairs.cell, Cell { y: grid.y_max(), x: grid.x_min() });
    }

    #[test]
    fn stairs_are_omitted_when_the_bottom_row_is_full() {
        let (grid, mut occupied, mut rng) = fixture(8, 6, 3);
        for x in grid.x_min()..=grid.x_max() {
            occupied.claim(Cell { y: grid.y_max(), x });
        }
        let mut props = Vec::new();
        place_stairs(&grid, &mut occupied, &mut rng, &mut props, 20);
        assert!(props.is_empty());
    }
}
