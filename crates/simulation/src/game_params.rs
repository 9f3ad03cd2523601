//! Data-driven game parameters.
//!
//! Every tunable of the lane generator, traffic, player motion and run timer
//! lives in a single [`GameParams`] resource. The host may insert its own copy
//! (for instance parsed from JSON with [`GameParams::from_json_str`]) before
//! adding [`SimulationPlugin`](crate::SimulationPlugin); otherwise the defaults
//! below are used.
//!
//! The lane and vehicle templates are optional in the document so that a host
//! can detect a config that forgot them: [`GameParams::validate`] reports them
//! as [`ConfigError::MissingTemplate`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Lane pool
// ---------------------------------------------------------------------------

/// Sizing and spacing of the lane pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Number of lanes allocated up front.
    pub pool_size: usize,
    /// Lanes kept active around the player. Clamped to `pool_size - 1`.
    pub visible_count: usize,
    /// Distance between consecutive lanes along the travel (z) axis.
    pub lane_spacing: f32,
    /// Travel-axis position of logical lane 0.
    pub origin_z: f32,
    /// Length of the recent lane-type ring buffer.
    pub pattern_memory: usize,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            pool_size: 7,
            visible_count: 5,
            lane_spacing: 10.0,
            origin_z: 0.0,
            pattern_memory: 5,
        }
    }
}

/// Shape of a single lane: its tile row and how trees are scattered on grass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTemplate {
    pub tiles_per_lane: usize,
    /// Distance between neighbouring tiles along the x axis.
    pub tile_spacing: f32,
    /// Tiles on each edge of the lane that the player cannot stand on.
    pub border_tiles: usize,
    /// Tree chance for walkable tiles of a grass lane.
    pub tree_chance_walkable: f32,
    /// Tree chance for border tiles of a grass lane.
    pub tree_chance_border: f32,
}

impl Default for LaneTemplate {
    fn default() -> Self {
        Self {
            tiles_per_lane: 15,
            tile_spacing: 2.0,
            border_tiles: 2,
            tree_chance_walkable: 0.25,
            tree_chance_border: 0.8,
        }
    }
}

// ---------------------------------------------------------------------------
// Lane type generator
// ---------------------------------------------------------------------------

/// Probabilities of the grass/road Markov chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// Lanes forced to grass at the start of a run.
    pub init_grass_block: u32,
    /// Longest allowed run of road lanes.
    pub max_consecutive_hazards: u32,
    /// Chance that a grass lane is followed by a road lane.
    pub grass_to_road: f32,
    /// Chance that a road lane is followed by grass regardless of stickiness.
    pub road_escape: f32,
    /// Chance of repeating the previous type when not escaping.
    pub stickiness: f32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            init_grass_block: 2,
            max_consecutive_hazards: 3,
            grass_to_road: 0.8,
            road_escape: 0.2,
            stickiness: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// Traffic
// ---------------------------------------------------------------------------

/// Per-lane traffic pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficParams {
    /// Fixed size of the vehicle pool of each road lane.
    pub max_cars: usize,
    /// Seconds between spawn attempts, drawn from `[min, max]`.
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
}

impl Default for TrafficParams {
    fn default() -> Self {
        Self {
            max_cars: 5,
            spawn_interval_min: 1.0,
            spawn_interval_max: 4.0,
        }
    }
}

/// How a vehicle moves across its lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTemplate {
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Height above the lane surface at which vehicles drive.
    pub clearance: f32,
    /// Endpoints sit at `x = -endpoint_x` and `x = +endpoint_x` in lane space.
    pub endpoint_x: f32,
}

impl Default for VehicleTemplate {
    fn default() -> Self {
        Self {
            speed: 5.0,
            clearance: 0.5,
            endpoint_x: 18.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Hop and bounce tunables for the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParams {
    pub hop_duration: f32,
    pub hop_height: f32,
    pub bounce_distance: f32,
    pub bounce_duration: f32,
    pub bounce_height: f32,
    /// Height of the player's origin above the tile it stands on.
    pub standing_height: f32,
    /// Start tile is drawn from `[start_tile_min, start_tile_max]`.
    pub start_tile_min: usize,
    pub start_tile_max: usize,
    pub jump_volume: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            hop_duration: 0.5,
            hop_height: 2.0,
            bounce_distance: 2.0,
            bounce_duration: 0.3,
            bounce_height: 1.0,
            standing_height: 0.5,
            start_tile_min: 3,
            start_tile_max: 11,
            jump_volume: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Countdown and game-over pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Seconds the player may stall before the run ends.
    pub max_time_left: f32,
    /// Seconds spent in the game-over screen before returning to the menu.
    pub game_over_delay: f32,
    pub music_volume: f32,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            max_time_left: 5.0,
            game_over_delay: 8.0,
            music_volume: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// GameParams resource
// ---------------------------------------------------------------------------

/// Top-level game parameters resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    pub lanes: LaneParams,
    pub generator: GeneratorParams,
    pub traffic: TrafficParams,
    pub player: PlayerParams,
    pub run: RunParams,
    pub lane_template: Option<LaneTemplate>,
    pub vehicle_template: Option<VehicleTemplate>,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            lanes: LaneParams::default(),
            generator: GeneratorParams::default(),
            traffic: TrafficParams::default(),
            player: PlayerParams::default(),
            run: RunParams::default(),
            lane_template: Some(LaneTemplate::default()),
            vehicle_template: Some(VehicleTemplate::default()),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not a probability")))
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

impl GameParams {
    /// Parse params from JSON. Missing fields fall back to their defaults;
    /// an explicit `null` template is kept as `None` so `validate` rejects it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: GameParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// The lane template, or [`ConfigError::MissingTemplate`].
    pub fn lane_template(&self) -> Result<LaneTemplate, ConfigError> {
        self.lane_template
            .ok_or(ConfigError::MissingTemplate("lane"))
    }

    /// The vehicle template, or [`ConfigError::MissingTemplate`].
    pub fn vehicle_template(&self) -> Result<VehicleTemplate, ConfigError> {
        self.vehicle_template
            .ok_or(ConfigError::MissingTemplate("vehicle"))
    }

    /// Visible lane count after clamping to `pool_size - 1`.
    pub fn effective_visible_count(&self) -> usize {
        self.lanes
            .visible_count
            .min(self.lanes.pool_size.saturating_sub(1))
    }

    /// Check every invariant the lane pool, traffic and player rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lane = self.lane_template()?;
        let vehicle = self.vehicle_template()?;

        if self.lanes.pool_size < 2 {
            return Err(invalid("lanes.pool_size", "must be at least 2"));
        }
        if self.lanes.visible_count == 0 {
            return Err(invalid("lanes.visible_count", "must be at least 1"));
        }
        check_positive("lanes.lane_spacing", self.lanes.lane_spacing)?;

        if lane.tiles_per_lane == 0 {
            return Err(invalid("lane_template.tiles_per_lane", "must be at least 1"));
        }
        if lane.border_tiles * 2 >= lane.tiles_per_lane {
            return Err(invalid(
                "lane_template.border_tiles",
                "leaves no walkable tile in the lane",
            ));
        }
        check_positive("lane_template.tile_spacing", lane.tile_spacing)?;
        check_probability("lane_template.tree_chance_walkable", lane.tree_chance_walkable)?;
        check_probability("lane_template.tree_chance_border", lane.tree_chance_border)?;

        if self.generator.max_consecutive_hazards == 0 {
            return Err(invalid(
                "generator.max_consecutive_hazards",
                "must be at least 1",
            ));
        }
        check_probability("generator.grass_to_road", self.generator.grass_to_road)?;
        check_probability("generator.road_escape", self.generator.road_escape)?;
        check_probability("generator.stickiness", self.generator.stickiness)?;

        check_positive("traffic.spawn_interval_min", self.traffic.spawn_interval_min)?;
        if self.traffic.spawn_interval_max < self.traffic.spawn_interval_min {
            return Err(invalid(
                "traffic.spawn_interval_max",
                "must not be below spawn_interval_min",
            ));
        }
        check_positive("vehicle_template.speed", vehicle.speed)?;
        check_positive("vehicle_template.endpoint_x", vehicle.endpoint_x)?;

        check_positive("player.hop_duration", self.player.hop_duration)?;
        check_positive("player.bounce_duration", self.player.bounce_duration)?;
        if self.player.start_tile_min > self.player.start_tile_max {
            return Err(invalid(
                "player.start_tile_min",
                "must not exceed start_tile_max",
            ));
        }

        check_positive("run.max_time_left", self.run.max_time_left)?;
        if self.run.game_over_delay < 0.0 {
            return Err(invalid("run.game_over_delay", "must not be negative"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
