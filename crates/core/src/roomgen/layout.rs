//! Floor fill, perimeter walls, and the interior structure variants.

use crate::types::{Cell, FloorTile, WallTile};

use super::grid::{OccupancyMap, TileGrid};
use super::rng::LayoutRng;

const FLOOR_PALETTE: [FloorTile; 4] =
    [FloorTile::Plate, FloorTile::CrackedPlate, FloorTile::RustPlate, FloorTile::VentPlate];
// Weight tables align with FLOOR_PALETTE order.
const BASE_FLOOR_WEIGHTS: [u32; 4] = [70, 12, 12, 6];
const ACCENT_FLOOR_WEIGHTS: [u32; 4] = [40, 10, 10, 40];
// Cells whose coordinates are both multiples of this get the accent weights.
const ACCENT_INTERVAL: i32 = 4;

/// Assigns a floor tile to every cell of the rectangle, row-major. Accent
/// tiles get elevated weight at regular grid intervals.
pub(super) fn fill_floor(grid: &mut TileGrid, rng: &mut LayoutRng) {
    let cells: Vec<Cell> = grid.rect_cells().collect();
    for cell in cells {
        let accent_cell =
            cell.x.rem_euclid(ACCENT_INTERVAL) == 0 && cell.y.rem_euclid(ACCENT_INTERVAL) == 0;
        let weights =
            if accent_cell { &ACCENT_FLOOR_WEIGHTS } else { &BASE_FLOOR_WEIGHTS };
        let tile = FLOOR_PALETTE[rng.weighted_index(weights)];
        grid.set_floor(cell, tile);
    }
}

/// Unconditional wall ring one cell outside the floor rectangle. This ring
/// always wins; every later stage skips perimeter cells.
pub(super) fn place_perimeter_walls(grid: &mut TileGrid) {
    let (x_min, x_max) = (grid.x_min() - 1, grid.x_max() + 1);
    let (y_min, y_max) = (grid.y_min() - 1, grid.y_max() + 1);

    for x in x_min..=x_max {
        grid.set_wall(Cell { y: y_min, x }, WallTile::Riveted);
        grid.set_wall(Cell { y: y_max, x }, WallTile::Riveted);
    }
    for y in y_min..=y_max {
        grid.set_wall(Cell { y, x: x_min }, WallTile::Riveted);
        grid.set_wall(Cell { y, x: x_max }, WallTile::Riveted);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum InteriorVariant {
    Pillars,
    Alcoves,
    CenterRoom,
}

/// Places exactly one interior structure variant, chosen uniformly.
pub(super) fn place_interior(
    grid: &mut TileGrid,
    occupied: &mut OccupancyMap,
    rng: &mut LayoutRng,
) -> InteriorVariant {
    let variant = match rng.range_u32(0, 2) {
        0 => InteriorVariant::Pillars,
        1 => InteriorVariant::Alcoves,
        _ => InteriorVariant::CenterRoom,
    };

    match variant {
        InteriorVariant::Pillars => place_pillars(grid, occupied),
        InteriorVariant::Alcoves => place_alcoves(grid, occupied, rng),
        InteriorVariant::CenterRoom => place_center_room(grid, occupied),
    }

    variant
}

/// Plus-shaped wall clusters centered in each quadrant.
fn place_pillars(grid: &mut TileGrid, occupied: &mut OccupancyMap) {
    let quadrant_x = grid.width() as i32 / 4;
    let quadrant_y = grid.height() as i32 / 4;
    if quadrant_x == 0 || quadrant_y == 0 {
        return;
    }

    for sign_y in [-1, 1] {
        for sign_x in [-1, 1] {
            let center = Cell { y: sign_y * quadrant_y, x: sign_x * quadrant_x };
            for (dy, dx) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
                let cell = Cell { y: center.y + dy, x: center.x + dx };
                place_interior_wall(grid, occupied, cell, WallTile::Reinforced);
            }
        }
    }
}

/// 2-4 recessed notches against one randomly chosen wall. The recess cell
/// stays floor but is claimed; the flanking cells get alcove side walls.
fn place_alcoves(grid: &mut TileGrid, occupied: &mut OccupancyMap, rng: &mut LayoutRng) {
    let side = rng.range_u32(0, 3);
    let alcove_count = rng.range_u32(2, 4);

    for _ in 0..alcove_count {
        let (recess, flank_a, flank_b) = match side {
            0 | 1 => {
                // Top or bottom wall: notch spans three cells of the inner row.
                let row = if side == 0 { grid.y_min() } else { grid.y_max() };
                let x = rng.range_i32(grid.x_min() + 1, grid.x_max() - 1);
                (
                    Cell { y: row, x },
                    Cell { y: row, x: x - 1 },
                    Cell { y: row, x: x + 1 },
                )
            }
            _ => {
                let column = if side == 2 { grid.x_min() } else { grid.x_max() };
                let y = rng.range_i32(grid.y_min() + 1, grid.y_max() - 1);
                (
                    Cell { y, x: column },
                    Cell { y: y - 1, x: column },
                    Cell { y: y + 1, x: column },
                )
            }
        };

        let free = !occupied.is_claimed(recess)
            && !occupied.is_claimed(flank_a)
            && !occupied.is_claimed(flank_b);
        if !free {
            continue;
        }

        occupied.claim(recess);
        place_interior_wall(grid, occupied, flank_a, WallTile::AlcoveSide);
        place_interior_wall(grid, occupied, flank_b, WallTile::AlcoveSide);
    }
}

/// Hollow square wall ring centered at the origin, with a one-cell opening
/// at the bottom so the interior stays reachable.
fn place_center_room(grid: &mut TileGrid, occupied: &mut OccupancyMap) {
    let mut half = (grid.width().min(grid.height()) as i32 / 4).max(2);
    let max_fit = grid.x_max().min(grid.y_max()) - 1;
    if half > max_fit {
        half = max_fit;
    }
    if half < 2 {
        return;
    }

    for y in -half..=half {
        for x in -half..=half {
            let on_ring = y.abs() == half || x.abs() == half;
            let opening = y == half && x == 0;
            if on_ring && !opening {
                place_interior_wall(grid, occupied, Cell { y, x }, WallTile::Reinforced);
            }
        }
    }
}

/// Writes an interior wall tile unless the cell is outside the rectangle,
/// on the perimeter ring, or already claimed.
fn place_interior_wall(
    grid: &mut TileGrid,
    occupied: &mut OccupancyMap,
    cell: Cell,
    tile: WallTile,
) -> bool {
    if !grid.in_rect(cell) || grid.is_perimeter(cell) || !occupied.claim(cell) {
        return false;
    }
    grid.set_wall(cell, tile);
    true
}
