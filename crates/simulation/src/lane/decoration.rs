//! Tree scattering on grass lanes.
//!
//! Decoration is a pure function of the tile row, the lane template and a
//! seed, so a lane regenerated for the same logical index looks the same.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{TREE_SCALE_MIN, TREE_SCALE_SPREAD};
use crate::game_params::LaneTemplate;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub tile_index: usize,
    pub scale: f32,
    pub yaw_degrees: f32,
}

/// Roll a tree for every tile and flag the tiles that got one.
pub fn scatter_trees(tiles: &mut [Tile], template: &LaneTemplate, seed: u64) -> Vec<Tree> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut trees = Vec::new();
    for (tile_index, tile) in tiles.iter_mut().enumerate() {
        let chance = if tile.walkable {
            template.tree_chance_walkable
        } else {
            template.tree_chance_border
        };
        if rng.gen::<f32>() >= chance {
            continue;
        }
        tile.has_obstacle = true;
        trees.push(Tree {
            tile_index,
            scale: TREE_SCALE_MIN + rng.gen::<f32>() * TREE_SCALE_SPREAD,
            yaw_degrees: rng.gen::<f32>() * 360.0,
        });
    }
    trees
}
