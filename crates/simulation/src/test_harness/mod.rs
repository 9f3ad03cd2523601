//! # TestGame: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so tests can drive the game
//! tick by tick without a window, renderer or audio device. Output events are
//! drained after every tick into an [`EventLog`] for assertions.

mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::audio::AudioCommand;
use crate::events::{GameOverEvent, GameStateChanged, PersistHighScore, ScoreUpdated, TimeUpdated};
use crate::game_params::GameParams;
use crate::game_state::GameState;
use crate::sim_rng::SimRng;
use crate::SimulationPlugin;

/// Fixed rate used by the harness. Powers of two keep step sums exact.
pub const TEST_HZ: f64 = 64.0;

/// Every output event seen since the log was last cleared.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub states: Vec<GameState>,
    pub scores: Vec<ScoreUpdated>,
    pub times: Vec<TimeUpdated>,
    pub game_overs: Vec<GameOverEvent>,
    pub audio: Vec<AudioCommand>,
    pub persisted: Vec<u32>,
}

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestGame {
    app: App,
    log: EventLog,
}

impl Default for TestGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGame {
    /// Default params, default seed, sitting in the menu.
    pub fn new() -> Self {
        Self::with_params(GameParams::default(), crate::sim_rng::DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_params(GameParams::default(), seed)
    }

    pub fn with_params(params: GameParams, seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.insert_resource(Time::<Fixed>::from_hz(TEST_HZ));
        app.insert_resource(params);
        app.insert_resource(SimRng::from_seed_u64(seed));
        app.add_plugins(SimulationPlugin);

        // Run Startup and the initial state transition.
        app.update();

        let mut game = Self {
            app,
            log: EventLog::default(),
        };
        game.collect_events();
        game
    }

    fn collect_events(&mut self) {
        let world = self.app.world_mut();
        self.log.states.extend(
            world
                .resource_mut::<Events<GameStateChanged>>()
                .drain()
                .map(|GameStateChanged(state)| state),
        );
        self.log
            .scores
            .extend(world.resource_mut::<Events<ScoreUpdated>>().drain());
        self.log
            .times
            .extend(world.resource_mut::<Events<TimeUpdated>>().drain());
        self.log
            .game_overs
            .extend(world.resource_mut::<Events<GameOverEvent>>().drain());
        self.log
            .audio
            .extend(world.resource_mut::<Events<AudioCommand>>().drain());
        self.log.persisted.extend(
            world
                .resource_mut::<Events<PersistHighScore>>()
                .drain()
                .map(|PersistHighScore(score)| score),
        );
    }
}
