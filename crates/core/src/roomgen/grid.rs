//! Tile-grid storage and the planning-time occupancy set.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Cell, FloorTile, WallTile};

/// Two-layer tile store for one room: a dense floor rectangle plus a sparse
/// wall layer. The rectangle is centered on the origin; the perimeter wall
/// ring sits one cell outside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    floor: BTreeMap<Cell, FloorTile>,
    walls: BTreeMap<Cell, WallTile>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, floor: BTreeMap::new(), walls: BTreeMap::new() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn x_min(&self) -> i32 {
        -(self.width as i32 / 2)
    }

    pub fn x_max(&self) -> i32 {
        self.x_min() + self.width as i32 - 1
    }

    pub fn y_min(&self) -> i32 {
        -(self.height as i32 / 2)
    }

    pub fn y_max(&self) -> i32 {
        self.y_min() + self.height as i32 - 1
    }

    pub fn in_rect(&self, cell: Cell) -> bool {
        cell.x >= self.x_min()
            && cell.x <= self.x_max()
            && cell.y >= self.y_min()
            && cell.y <= self.y_max()
    }

    /// True for cells on the wall ring one unit outside the floor rectangle.
    pub fn is_perimeter(&self, cell: Cell) -> bool {
        let x_on_ring = cell.x == self.x_min() - 1 || cell.x == self.x_max() + 1;
        let y_on_ring = cell.y == self.y_min() - 1 || cell.y == self.y_max() + 1;
        let x_in_band = cell.x >= self.x_min() - 1 && cell.x <= self.x_max() + 1;
        let y_in_band = cell.y >= self.y_min() - 1 && cell.y <= self.y_max() + 1;
        (x_on_ring && y_in_band) || (y_on_ring && x_in_band)
    }

    pub fn set_floor(&mut self, cell: Cell, tile: FloorTile) {
        debug_assert!(self.in_rect(cell), "floor tile outside rectangle: {cell:?}");
        self.floor.insert(cell, tile);
    }

    pub fn floor_at(&self, cell: Cell) -> Option<FloorTile> {
        self.floor.get(&cell).copied()
    }

    pub fn set_wall(&mut self, cell: Cell, tile: WallTile) {
        self.walls.insert(cell, tile);
    }

    pub fn wall_at(&self, cell: Cell) -> Option<WallTile> {
        self.walls.get(&cell).copied()
    }

    pub fn has_wall(&self, cell: Cell) -> bool {
        self.walls.contains_key(&cell)
    }

    /// Floor cells in row-major order (y outer, x inner). Generation visits
    /// cells in this order so the random stream stays reproducible.
    pub fn rect_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (x_min, x_max) = (self.x_min(), self.x_max());
        (self.y_min()..=self.y_max())
            .flat_map(move |y| (x_min..=x_max).map(move |x| Cell { y, x }))
    }

    pub fn walls(&self) -> impl Iterator<Item = (Cell, WallTile)> + '_ {
        self.walls.iter().map(|(&cell, &tile)| (cell, tile))
    }

    pub fn floor_tiles(&self) -> impl Iterator<Item = (Cell, FloorTile)> + '_ {
        self.floor.iter().map(|(&cell, &tile)| (cell, tile))
    }
}

/// Cells already claimed by a wall feature or prop footprint during one
/// generation pass. Planning aid only; rebuilt per room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    claimed: BTreeSet<Cell>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the cell, returning false when something already holds it.
    pub fn claim(&mut self, cell: Cell) -> bool {
        self.claimed.insert(cell)
    }

    pub fn is_claimed(&self, cell: Cell) -> bool {
        self.claimed.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
