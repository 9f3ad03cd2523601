//! `--autopilot` intent source: a bot that starts runs and hops forward
//! whenever the next lane looks clear.

use bevy::prelude::*;
use simulation::events::{MoveIntentEvent, StartRunEvent};
use simulation::game_state::{GameState, RunCounter};
use simulation::lane::Lane;
use simulation::lane_manager::LaneManager;
use simulation::player::{MoveIntent, PlayerController};

use crate::driver::RunLimit;

#[derive(Resource, Debug, Clone, Copy)]
pub struct Autopilot {
    /// Distance along the lane an approaching vehicle must keep from the
    /// player before the bot hops into its lane.
    pub safe_gap: f32,
    /// A vehicle this far past the player no longer counts.
    pub passed_margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            safe_gap: 6.0,
            passed_margin: 1.0,
        }
    }
}

impl Autopilot {
    /// True when no active vehicle in `lane` is about to cross `x`.
    pub fn lane_is_clear(&self, lane: &Lane, x: f32) -> bool {
        let sign = lane.traffic().direction().sign();
        lane.active_vehicle_positions().all(|v| {
            let approach = (x - v.x) * sign;
            approach < -self.passed_margin || approach > self.safe_gap
        })
    }

    pub fn choose_move(&self, lanes: &LaneManager, player: &PlayerController) -> MoveIntent {
        let tile = player.tile_index();
        let Some(next) = lanes.lane_at(lanes.current_index() + 1) else {
            return MoveIntent::None;
        };
        if next.walkable_tile(tile).is_none() {
            // Drift back toward the middle of the lane.
            return if tile < next.tiles().len() / 2 {
                MoveIntent::Left
            } else {
                MoveIntent::Right
            };
        }
        if self.lane_is_clear(next, player.position().x) {
            MoveIntent::Forward
        } else {
            MoveIntent::None
        }
    }
}

/// Keep requesting runs from the menu until the run limit is reached.
pub fn autopilot_start_runs(
    state: Res<State<GameState>>,
    runs: Res<RunCounter>,
    limit: Res<RunLimit>,
    mut start: EventWriter<StartRunEvent>,
) {
    if *state.get() == GameState::Menu && runs.finished < limit.0 {
        start.send(StartRunEvent);
    }
}

pub fn autopilot_choose_move(
    pilot: Res<Autopilot>,
    lanes: Res<LaneManager>,
    player: Res<PlayerController>,
    mut intents: EventWriter<MoveIntentEvent>,
) {
    if player.is_busy() {
        return;
    }
    let intent = pilot.choose_move(&lanes, &player);
    if intent != MoveIntent::None {
        intents.send(MoveIntentEvent(intent));
    }
}
