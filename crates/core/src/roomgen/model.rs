//! Public data model for one generated room and its prop placements.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Cell, FloorTile, PropKind, WallTile, WorldVec};

use super::grid::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropPlacement {
    pub kind: PropKind,
    pub cell: Cell,
}

/// One rectangular play area: tile grid, prop placements, and a world-space
/// origin. The generator produces rooms at the world origin; the director
/// positions them and owns them afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub seed: u64,
    pub grid: TileGrid,
    pub props: Vec<PropPlacement>,
    pub origin: WorldVec,
    /// Designated player spawn cell, when the door placement produced one.
    pub entry_cell: Option<Cell>,
    pub tile_size: f32,
}

impl Room {
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// World position of a tile cell, relative to this room's origin.
    pub fn world_of(&self, cell: Cell) -> WorldVec {
        WorldVec::new(
            self.origin.x + cell.x as f32 * self.tile_size,
            self.origin.y + cell.y as f32 * self.tile_size,
        )
    }

    pub fn spawn_world(&self) -> Option<WorldVec> {
        self.entry_cell.map(|cell| self.world_of(cell))
    }

    /// Stable byte encoding of the full layout. Two rooms with equal bytes
    /// have identical tiles, props, and entry cell; world origin is excluded
    /// because placement belongs to the director, not the layout.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.grid.width().to_le_bytes());
        bytes.extend(self.grid.height().to_le_bytes());

        for cell in self.grid.rect_cells() {
            bytes.push(match self.grid.floor_at(cell) {
                None => 0,
                Some(FloorTile::Plate) => 1,
                Some(FloorTile::CrackedPlate) => 2,
                Some(FloorTile::RustPlate) => 3,
                Some(FloorTile::VentPlate) => 4,
            });
        }

        let walls: Vec<_> = self.grid.walls().collect();
        bytes.extend((walls.len() as u32).to_le_bytes());
        for (cell, tile) in walls {
            bytes.extend(cell.y.to_le_bytes());
            bytes.extend(cell.x.to_le_bytes());
            bytes.push(match tile {
                WallTile::Riveted => 0,
                WallTile::Reinforced => 1,
                WallTile::AlcoveSide => 2,
            });
        }

        bytes.extend((self.props.len() as u32).to_le_bytes());
        for placement in &self.props {
            bytes.push(match placement.kind {
                PropKind::Door => 0,
                PropKind::Torch => 1,
                PropKind::Chest => 2,
                PropKind::Pot => 3,
                PropKind::Skull => 4,
                PropKind::Stairs => 5,
            });
            bytes.extend(placement.cell.y.to_le_bytes());
            bytes.extend(placement.cell.x.to_le_bytes());
        }

        match self.entry_cell {
            None => bytes.push(0),
            Some(cell) => {
                bytes.push(1);
                bytes.extend(cell.y.to_le_bytes());
                bytes.extend(cell.x.to_le_bytes());
            }
        }

        bytes
    }

    /// Cheap layout identity for tests and tooling.
    pub fn layout_fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_room() -> Room {
        Room {
            seed: 1,
            grid: TileGrid::new(6, 4),
            props: Vec::new(),
            origin: WorldVec::ZERO,
            entry_cell: None,
            tile_size: 32.0,
        }
    }

    #[test]
    fn world_of_offsets_cells_by_tile_size_from_origin() {
        let mut room = bare_room();
        room.origin = WorldVec::new(100.0, -50.0);
        let world = room.world_of(Cell { y: -2, x: 3 });
        assert_eq!(world, WorldVec::new(196.0, -114.0));
    }

    #[test]
    fn origin_does_not_change_the_canonical_bytes() {
        let mut left = bare_room();
        let mut right = bare_room();
        left.origin = WorldVec::new(800.0, 0.0);
        right.origin = WorldVec::new(0.0, -800.0);
        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
        assert_eq!(left.layout_fingerprint(), right.layout_fingerprint());
    }

    #[test]
    fn entry_cell_changes_the_fingerprint() {
        let without = bare_room();
        let mut with = bare_room();
        with.entry_cell = Some(Cell { y: -2, x: 0 });
        assert_ne!(without.layout_fingerprint(), with.layout_fingerprint());
    }
}
