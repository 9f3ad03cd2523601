use bevy::prelude::*;
use simulation::game_state::{GameState, RunCounter};
use simulation::player::handle_move_intents;
use simulation::simulation_sets::SimulationSet;

use crate::autopilot::{autopilot_choose_move, autopilot_start_runs, Autopilot};
use crate::collision_probe::{probe_vehicle_collisions, CollisionProbe};
use crate::presenter::{log_lane_layout, log_presentation_events, print_json_lines};
use crate::stdin::{apply_stdin_commands, StdinCommands};

/// Where move intents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Stdin,
    Autopilot,
}

/// Completed runs after which the host exits.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RunLimit(pub u32);

pub fn exit_after_runs(
    runs: Res<RunCounter>,
    limit: Res<RunLimit>,
    mut exit: EventWriter<AppExit>,
) {
    if runs.finished >= limit.0 {
        info!("Finished {} run(s), exiting", runs.finished);
        exit.send(AppExit::Success);
    }
}

/// Host-side systems: intent source, collision probe, presentation and the
/// run limit.
pub struct HostPlugin {
    pub mode: HostMode,
    pub runs: u32,
}

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RunLimit(self.runs))
            .init_resource::<CollisionProbe>()
            .add_systems(
                FixedUpdate,
                probe_vehicle_collisions
                    .in_set(SimulationSet::PostSim)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (log_presentation_events, log_lane_layout, exit_after_runs),
            );

        match self.mode {
            HostMode::Stdin => {
                app.insert_resource(StdinCommands::spawn_reader())
                    .add_systems(PreUpdate, apply_stdin_commands)
                    .add_systems(Update, print_json_lines);
            }
            HostMode::Autopilot => {
                app.init_resource::<Autopilot>().add_systems(
                    FixedUpdate,
                    (
                        autopilot_start_runs,
                        autopilot_choose_move.run_if(in_state(GameState::Playing)),
                    )
                        .in_set(SimulationSet::Input)
                        .before(handle_move_intents),
                );
            }
        }
    }
}
