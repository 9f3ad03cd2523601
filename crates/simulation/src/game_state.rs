//! Run flow: menu, run setup, play, pause and game over.
//!
//! ```text
//! Menu ──StartRunEvent──▶ Init ──▶ Playing ◀──TogglePauseEvent──▶ Paused
//!   ▲                                 │
//!   └──── game_over_delay ── GameOver ◀┘ GameOverEvent
//! ```
//!
//! Gameplay systems are gated on [`GameState::Playing`], so lanes, traffic,
//! the player and the countdown are frozen in every other state.

use bevy::prelude::*;
use serde::Serialize;

use crate::audio::{AudioCommand, SoundId};
use crate::events::{
    GameOverEvent, GameStateChanged, ScoreUpdated, StartRunEvent, TogglePauseEvent,
};
use crate::game_params::GameParams;
use crate::lane_manager::LaneManager;
use crate::player::PlayerController;
use crate::run_timer::{publish_full_timer, RunTimer};
use crate::scoreboard::Scoreboard;
use crate::sim_rng::SimRng;
use crate::simulation_sets::SimulationSet;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GameState {
    #[default]
    Menu,
    /// Laying out a fresh run. Lasts a single transition.
    Init,
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    pub const ALL: [GameState; 5] = [
        GameState::Menu,
        GameState::Init,
        GameState::Playing,
        GameState::Paused,
        GameState::GameOver,
    ];
}

/// Seconds left on the game-over screen.
#[derive(Resource, Debug, Default)]
pub struct GameOverCountdown(pub f32);

/// Completed runs since startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunCounter {
    pub started: u32,
    pub finished: u32,
}

// =============================================================================
// Systems
// =============================================================================

pub fn request_run_start(
    state: Res<State<GameState>>,
    mut requests: EventReader<StartRunEvent>,
    mut next: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if *state.get() == GameState::Menu {
        next.set(GameState::Init);
    } else {
        debug!("Start request ignored in {:?}", state.get());
    }
}

pub fn toggle_pause(
    state: Res<State<GameState>>,
    mut requests: EventReader<TogglePauseEvent>,
    mut next: ResMut<NextState<GameState>>,
) {
    // Two toggles in one tick cancel out.
    if requests.read().count() % 2 == 0 {
        return;
    }
    match state.get() {
        GameState::Playing => next.set(GameState::Paused),
        GameState::Paused => next.set(GameState::Playing),
        other => debug!("Pause toggle ignored in {:?}", other),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn begin_run(
    mut lanes: ResMut<LaneManager>,
    mut player: ResMut<PlayerController>,
    mut timer: ResMut<RunTimer>,
    mut score: ResMut<Scoreboard>,
    mut rng: ResMut<SimRng>,
    mut runs: ResMut<RunCounter>,
    mut score_updates: EventWriter<ScoreUpdated>,
    mut next: ResMut<NextState<GameState>>,
) {
    lanes.restart(&mut rng.0);
    if !player.spawn(&lanes, &mut rng.0) {
        error!("Could not place the player, returning to menu");
        next.set(GameState::Menu);
        return;
    }
    timer.reset();
    score_updates.send(score.reset_current().as_event());
    runs.started += 1;
    info!(
        "Run {} started on tile {} (high score {})",
        runs.started,
        player.tile_index(),
        score.high()
    );
    next.set(GameState::Playing);
}

pub fn start_background_music(
    params: Res<GameParams>,
    mut rng: ResMut<SimRng>,
    mut audio: EventWriter<AudioCommand>,
) {
    // Only one loop plays at a time.
    for track in SoundId::BACKGROUND_TRACKS {
        audio.send(AudioCommand::Stop(track));
    }
    audio.send(AudioCommand::PlayLoop {
        sound: SoundId::random_background(&mut rng.0),
        volume: params.run.music_volume,
    });
}

/// First game-over cause wins; later ones in the same tick are dropped.
pub fn apply_game_over(
    state: Res<State<GameState>>,
    params: Res<GameParams>,
    lanes: Res<LaneManager>,
    mut events: EventReader<GameOverEvent>,
    mut countdown: ResMut<GameOverCountdown>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(first) = events.read().next().copied() else {
        return;
    };
    events.clear();
    if *state.get() != GameState::Playing {
        return;
    }
    info!(
        "Game over ({:?}) at lane {}",
        first.cause,
        lanes.furthest_index()
    );
    countdown.0 = params.run.game_over_delay;
    next.set(GameState::GameOver);
}

pub fn enter_game_over(
    mut audio: EventWriter<AudioCommand>,
    mut runs: ResMut<RunCounter>,
) {
    runs.finished += 1;
    audio.send(AudioCommand::StopAll);
    audio.send(AudioCommand::PlayOnce {
        sound: SoundId::GameOver,
        volume: 1.0,
    });
}

pub fn tick_game_over_countdown(
    time: Res<Time<Fixed>>,
    mut countdown: ResMut<GameOverCountdown>,
    mut next: ResMut<NextState<GameState>>,
) {
    countdown.0 -= time.timestep().as_secs_f32();
    if countdown.0 <= 0.0 {
        next.set(GameState::Menu);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameOverCountdown>()
            .init_resource::<RunCounter>();

        for state in GameState::ALL {
            app.add_systems(
                OnEnter(state),
                move |mut changed: EventWriter<GameStateChanged>| {
                    changed.send(GameStateChanged(state));
                },
            );
        }

        app.add_systems(
            FixedUpdate,
            (request_run_start, toggle_pause).in_set(SimulationSet::Input),
        )
        .add_systems(FixedUpdate, apply_game_over.in_set(SimulationSet::PostSim))
        .add_systems(
            FixedUpdate,
            tick_game_over_countdown
                .in_set(SimulationSet::PostSim)
                .run_if(in_state(GameState::GameOver)),
        )
        .add_systems(OnEnter(GameState::Init), (begin_run, publish_full_timer).chain())
        .add_systems(
            OnTransition {
                exited: GameState::Init,
                entered: GameState::Playing,
            },
            start_background_music,
        )
        .add_systems(OnEnter(GameState::GameOver), enter_game_over);
    }
}
