//! Player/vehicle overlap test standing in for a physics engine.

use bevy::prelude::*;
use simulation::events::VehicleCollisionEvent;
use simulation::game_params::GameParams;
use simulation::lane_manager::LaneManager;
use simulation::player::{PlayerController, PlayerPhase};

#[derive(Resource, Debug, Clone, Copy)]
pub struct CollisionProbe {
    /// Largest distance along the lane that still counts as a hit.
    pub collision_radius: f32,
    /// Players above this height clear the traffic.
    pub max_height: f32,
}

impl Default for CollisionProbe {
    fn default() -> Self {
        Self {
            collision_radius: 1.0,
            max_height: 1.5,
        }
    }
}

impl CollisionProbe {
    /// True when `player` shares a lane with `vehicle` and is within reach.
    pub fn overlaps(&self, player: Vec3, vehicle: Vec3, half_lane: f32) -> bool {
        player.y <= self.max_height
            && (player.z - vehicle.z).abs() < half_lane
            && (player.x - vehicle.x).abs() <= self.collision_radius
    }

    pub fn player_hit(&self, lanes: &LaneManager, player: Vec3, lane_spacing: f32) -> bool {
        let half_lane = lane_spacing * 0.5;
        lanes
            .active_lanes()
            .flat_map(|lane| lane.active_vehicle_positions())
            .any(|v| self.overlaps(player, v, half_lane))
    }
}

pub fn probe_vehicle_collisions(
    probe: Res<CollisionProbe>,
    params: Res<GameParams>,
    lanes: Res<LaneManager>,
    player: Res<PlayerController>,
    mut collisions: EventWriter<VehicleCollisionEvent>,
) {
    if matches!(player.phase(), PlayerPhase::Bouncing | PlayerPhase::Down) {
        return;
    }
    if probe.player_hit(&lanes, player.position(), params.lanes.lane_spacing) {
        collisions.send(VehicleCollisionEvent::vehicle());
    }
}
