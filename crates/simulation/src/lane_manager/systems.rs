use bevy::prelude::*;

use crate::game_state::GameState;
use crate::sim_rng::SimRng;
use crate::simulation_sets::SimulationSet;

use super::manager::LaneManager;

/// Advance spawners and vehicles of every active lane by one fixed step.
pub fn tick_lane_traffic(
    time: Res<Time<Fixed>>,
    mut lanes: ResMut<LaneManager>,
    mut rng: ResMut<SimRng>,
) {
    let dt = time.timestep().as_secs_f32();
    lanes.tick_traffic(dt, &mut rng.0);
}

pub struct LaneManagerPlugin;

impl Plugin for LaneManagerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            tick_lane_traffic
                .in_set(SimulationSet::Simulation)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
