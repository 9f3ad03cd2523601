use bevy::prelude::*;

pub mod audio;
pub mod config;
pub mod error;
pub mod events;
pub mod game_params;
pub mod game_state;
pub mod lane;
pub mod lane_manager;
pub mod player;
pub mod run_timer;
pub mod scoreboard;
pub mod sim_rng;
pub mod simulation_sets;
pub mod tile;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use error::ConfigError;
use game_params::GameParams;
use game_state::{GameState, GameStatePlugin};
use lane_manager::{LaneManager, LaneManagerPlugin};
use player::{PlayerController, PlayerPlugin};
use run_timer::{RunTimer, RunTimerPlugin};
use scoreboard::ScoreboardPlugin;
use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Tick counter
// ---------------------------------------------------------------------------

/// Fixed steps executed since startup, in any state.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct TickCounter(pub u64);

fn tick_counter(mut counter: ResMut<TickCounter>) {
    counter.0 = counter.0.wrapping_add(1);
}

// ---------------------------------------------------------------------------
// Configuration fault
// ---------------------------------------------------------------------------

/// Inserted instead of the gameplay resources when [`GameParams`] are
/// unusable. Hosts check for it after building the app and refuse to run.
#[derive(Resource, Debug, Clone)]
pub struct ConfigFault(pub ConfigError);

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// The gameplay core.
///
/// Reads [`GameParams`] (inserting defaults if the host did not) and a
/// [`SimRng`](sim_rng::SimRng) the same way, so hosts and tests control both
/// by inserting them before adding this plugin. Requires `StatesPlugin` and a
/// `Time<Fixed>` source (`MinimalPlugins`).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<GameParams>()
            .init_resource::<TickCounter>()
            .add_plugins((sim_rng::SimRngPlugin, events::EventsPlugin))
            .add_systems(FixedUpdate, tick_counter.in_set(SimulationSet::Input));

        let params = app.world().resource::<GameParams>().clone();
        let lanes = match LaneManager::new(&params) {
            Ok(lanes) => lanes,
            Err(err) => {
                error!("Invalid game params: {}", err);
                app.init_state::<GameState>();
                app.insert_resource(ConfigFault(err));
                return;
            }
        };
        let tiles_per_lane = params
            .lane_template
            .map(|t| t.tiles_per_lane)
            .unwrap_or_default();

        app.insert_resource(lanes)
            .insert_resource(PlayerController::new(params.player, tiles_per_lane))
            .insert_resource(RunTimer::new(params.run.max_time_left));

        app.add_plugins((
            GameStatePlugin,
            ScoreboardPlugin,
            LaneManagerPlugin,
            PlayerPlugin,
            RunTimerPlugin,
        ));
    }
}
