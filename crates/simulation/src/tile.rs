//! A single standable cell of a lane.

use bevy::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Grass,
    Road,
}

/// One cell of a lane's tile row.
///
/// `position` is lane-local and fixed when the lane is built; only the
/// `has_obstacle` flag and `kind` change as the lane is relabelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub walkable: bool,
    pub has_obstacle: bool,
    pub kind: TileKind,
    pub position: Vec3,
}

impl Tile {
    pub fn new(walkable: bool, position: Vec3) -> Self {
        Self {
            walkable,
            has_obstacle: false,
            kind: TileKind::Grass,
            position,
        }
    }

    /// The player may stand here.
    pub fn is_passable(&self) -> bool {
        self.walkable && !self.has_obstacle
    }
}

/// Lane-local x of tile `index` in a row of `count` tiles, centred on 0.
pub fn tile_local_x(index: usize, count: usize, spacing: f32) -> f32 {
    (index as f32 - (count as f32 - 1.0) * 0.5) * spacing
}

/// Build the tile row for a lane template. Tiles within `border` of either
/// edge are not walkable.
pub fn build_row(count: usize, border: usize, spacing: f32) -> Vec<Tile> {
    (0..count)
        .map(|i| {
            let walkable = i >= border && i + border < count;
            Tile::new(walkable, Vec3::new(tile_local_x(i, count, spacing), 0.0, 0.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_is_centred() {
        let row = build_row(15, 2, 2.0);
        assert_eq!(row.len(), 15);
        assert_eq!(row[7].position.x, 0.0);
        assert_eq!(row[0].position.x, -14.0);
        assert_eq!(row[14].position.x, 14.0);
    }

    #[test]
    fn test_border_tiles_not_walkable() {
        let row = build_row(15, 2, 2.0);
        assert!(!row[0].walkable);
        assert!(!row[1].walkable);
        assert!(row[2].walkable);
        assert!(row[12].walkable);
        assert!(!row[13].walkable);
        assert!(!row[14].walkable);
    }

    #[test]
    fn test_obstacle_blocks_passage() {
        let mut tile = Tile::new(true, Vec3::ZERO);
        assert!(tile.is_passable());
        tile.has_obstacle = true;
        assert!(!tile.is_passable());
    }
}
