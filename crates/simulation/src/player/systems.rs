use bevy::prelude::*;

use crate::audio::{AudioCommand, SoundId};
use crate::events::{
    GameOverCause, GameOverEvent, MoveIntentEvent, PersistHighScore, ScoreUpdated,
    VehicleCollisionEvent,
};
use crate::game_state::GameState;
use crate::lane_manager::LaneManager;
use crate::scoreboard::Scoreboard;
use crate::sim_rng::SimRng;
use crate::simulation_sets::SimulationSet;

use super::controller::{MotionFinished, PlayerController};

/// Apply queued move intents. Intents outside `Playing` are consumed and dropped.
#[allow(clippy::too_many_arguments)]
pub fn handle_move_intents(
    state: Res<State<GameState>>,
    mut intents: EventReader<MoveIntentEvent>,
    mut player: ResMut<PlayerController>,
    mut lanes: ResMut<LaneManager>,
    mut rng: ResMut<SimRng>,
    mut score: ResMut<Scoreboard>,
    mut audio: EventWriter<AudioCommand>,
    mut score_updates: EventWriter<ScoreUpdated>,
    mut persist: EventWriter<PersistHighScore>,
) {
    let playing = *state.get() == GameState::Playing;
    for MoveIntentEvent(intent) in intents.read() {
        if !playing {
            continue;
        }
        match player.request(*intent, &mut lanes, &mut rng.0) {
            Ok(hop) => {
                audio.send(AudioCommand::PlayOnce {
                    sound: SoundId::Jump,
                    volume: player.params().jump_volume,
                });
                let Some(advance) = hop.advance.filter(|a| a.new_best) else {
                    continue;
                };
                let change = score.record(advance.index);
                if change.new_high {
                    persist.send(PersistHighScore(change.high));
                }
                score_updates.send(change.as_event());
            }
            Err(reason) => {
                debug!("Move {:?} dropped: {:?}", intent, reason);
            }
        }
    }
}

pub fn handle_collisions(
    state: Res<State<GameState>>,
    mut collisions: EventReader<VehicleCollisionEvent>,
    mut player: ResMut<PlayerController>,
) {
    let playing = *state.get() == GameState::Playing;
    for collision in collisions.read() {
        if playing && player.on_collision(collision.tag) {
            info!("Player hit at {:?}, bouncing back", player.position());
        }
    }
}

pub fn advance_player_motion(
    time: Res<Time<Fixed>>,
    mut player: ResMut<PlayerController>,
    mut game_over: EventWriter<GameOverEvent>,
) {
    if let Some(MotionFinished::KnockedDown) = player.advance(time.timestep().as_secs_f32()) {
        game_over.send(GameOverEvent {
            cause: GameOverCause::Collision,
        });
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (handle_move_intents, handle_collisions)
                .chain()
                .in_set(SimulationSet::Input),
        )
        .add_systems(
            FixedUpdate,
            advance_player_motion
                .in_set(SimulationSet::Simulation)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
