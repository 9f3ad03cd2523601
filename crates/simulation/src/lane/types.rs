use bevy::math::Vec3;
use rand::Rng;

use crate::config::{GRASS_COLOR, ROAD_COLOR};
use crate::game_params::{LaneTemplate, TrafficParams, VehicleTemplate};
use crate::tile::{build_row, Tile, TileKind};

use super::decoration::{scatter_trees, Tree};
use super::traffic::TrafficLane;

// =============================================================================
// LaneType
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LaneType {
    #[default]
    Grass,
    Road,
}

impl LaneType {
    /// Road lanes carry traffic.
    pub fn is_hazard(self) -> bool {
        matches!(self, LaneType::Road)
    }

    pub fn flipped(self) -> Self {
        match self {
            LaneType::Grass => LaneType::Road,
            LaneType::Road => LaneType::Grass,
        }
    }

    pub fn color(self) -> [u8; 4] {
        match self {
            LaneType::Grass => GRASS_COLOR,
            LaneType::Road => ROAD_COLOR,
        }
    }

    pub fn tile_kind(self) -> TileKind {
        match self {
            LaneType::Grass => TileKind::Grass,
            LaneType::Road => TileKind::Road,
        }
    }
}

// =============================================================================
// Lane
// =============================================================================

/// A pooled lane: a row of tiles, its decoration and its traffic.
///
/// Built once by the lane manager and then cycled through
/// `deactivate → set_lane_type → place → activate` as the window moves.
#[derive(Debug, Clone)]
pub struct Lane {
    pub slot: usize,
    lane_type: LaneType,
    tiles: Vec<Tile>,
    trees: Vec<Tree>,
    active: bool,
    logical_index: u32,
    world_z: f32,
    traffic: TrafficLane,
    template: LaneTemplate,
}

impl Lane {
    pub fn new(
        slot: usize,
        template: LaneTemplate,
        traffic: TrafficParams,
        vehicle: VehicleTemplate,
    ) -> Self {
        Self {
            slot,
            lane_type: LaneType::Grass,
            tiles: build_row(
                template.tiles_per_lane,
                template.border_tiles,
                template.tile_spacing,
            ),
            trees: Vec::new(),
            active: false,
            logical_index: 0,
            world_z: 0.0,
            traffic: TrafficLane::new(traffic, vehicle),
            template,
        }
    }

    /// Relabel the lane. Clears every obstacle and regenerates trees on grass.
    pub fn set_lane_type(&mut self, lane_type: LaneType, decor_seed: u64) {
        self.lane_type = lane_type;
        for tile in &mut self.tiles {
            tile.has_obstacle = false;
            tile.kind = lane_type.tile_kind();
        }
        self.trees.clear();
        if lane_type == LaneType::Grass {
            self.trees = scatter_trees(&mut self.tiles, &self.template, decor_seed);
        }
    }

    pub fn place(&mut self, logical_index: u32, world_z: f32) {
        self.logical_index = logical_index;
        self.world_z = world_z;
    }

    pub fn activate(&mut self, rng: &mut impl Rng) {
        self.active = true;
        if self.lane_type.is_hazard() {
            self.traffic.begin(rng);
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.traffic.halt();
    }

    pub fn tick_traffic(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.active {
            self.traffic.tick(dt, rng);
        }
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Tile at `index` if it exists and is walkable.
    pub fn walkable_tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index).filter(|t| t.walkable)
    }

    /// World position of the tile surface at `index`.
    pub fn tile_world_position(&self, index: usize) -> Option<Vec3> {
        self.tiles
            .get(index)
            .map(|t| t.position + Vec3::new(0.0, 0.0, self.world_z))
    }

    pub fn active_vehicle_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        let offset = Vec3::new(0.0, 0.0, self.world_z);
        self.traffic
            .active_vehicles()
            .map(move |v| v.local_position() + offset)
    }

    pub fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn logical_index(&self) -> u32 {
        self.logical_index
    }

    pub fn world_z(&self) -> f32 {
        self.world_z
    }

    pub fn traffic(&self) -> &TrafficLane {
        &self.traffic
    }

    pub fn traffic_mut(&mut self) -> &mut TrafficLane {
        &mut self.traffic
    }
}
