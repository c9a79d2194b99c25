use slotmap::new_key_type;

new_key_type! {
    pub struct RoomId;
}

/// Tile-grid coordinate. The floor rectangle is centered on the origin, so
/// both components may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

/// World-space position or displacement. `y` grows southward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldVec {
    pub x: f32,
    pub y: f32,
}

impl WorldVec {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit-length copy, or `fallback` when the vector is too short to
    /// normalize meaningfully.
    pub fn normalized_or(self, fallback: Self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON { fallback } else { Self { x: self.x / len, y: self.y / len } }
    }
}

impl std::ops::Add for WorldVec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for WorldVec {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for WorldVec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloorTile {
    Plate,
    CrackedPlate,
    RustPlate,
    VentPlate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallTile {
    Riveted,
    Reinforced,
    AlcoveSide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropKind {
    Door,
    Torch,
    Chest,
    Pot,
    Skull,
    Stairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Classify a world-space displacement into a cardinal direction.
    /// The horizontal axis wins ties because x is compared first.
    pub fn classify(displacement: WorldVec) -> Self {
        if displacement.x.abs() >= displacement.y.abs() {
            if displacement.x >= 0.0 { Self::East } else { Self::West }
        } else if displacement.y >= 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    pub fn unit(self) -> WorldVec {
        match self {
            Self::North => WorldVec::new(0.0, -1.0),
            Self::South => WorldVec::new(0.0, 1.0),
            Self::East => WorldVec::new(1.0, 0.0),
            Self::West => WorldVec::new(-1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectorError {
    MissingPlayer,
}

impl core::fmt::Display for DirectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingPlayer => write!(f, "missing player"),
        }
    }
}

impl std::error::Error for DirectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_west_classification_follows_dominant_x() {
        assert_eq!(Direction::classify(WorldVec::new(300.0, 50.0)), Direction::East);
        assert_eq!(Direction::classify(WorldVec::new(-300.0, 50.0)), Direction::West);
    }

    #[test]
    fn north_south_classification_follows_dominant_y() {
        assert_eq!(Direction::classify(WorldVec::new(50.0, 300.0)), Direction::South);
        assert_eq!(Direction::classify(WorldVec::new(50.0, -300.0)), Direction::North);
    }

    #[test]
    fn equal_magnitudes_resolve_to_the_horizontal_axis() {
        assert_eq!(Direction::classify(WorldVec::new(120.0, 120.0)), Direction::East);
        assert_eq!(Direction::classify(WorldVec::new(-120.0, 120.0)), Direction::West);
        assert_eq!(Direction::classify(WorldVec::new(-120.0, -120.0)), Direction::West);
    }

    #[test]
    fn normalized_or_falls_back_for_degenerate_vectors() {
        let fallback = Direction::North.unit();
        assert_eq!(WorldVec::ZERO.normalized_or(fallback), fallback);

        let unit = WorldVec::new(3.0, 4.0).normalized_or(fallback);
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }
}
