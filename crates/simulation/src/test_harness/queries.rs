//! Tick and query methods for `TestGame`.

use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::game_state::{GameState, RunCounter};
use crate::lane_manager::LaneManager;
use crate::player::PlayerController;
use crate::run_timer::RunTimer;
use crate::scoreboard::Scoreboard;
use crate::TickCounter;

use super::{EventLog, TestGame};

impl TestGame {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed steps. Each step executes `FixedUpdate` directly, applies
    /// any queued state change, then drains output events into the log.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            let world = self.app.world_mut();
            world.run_schedule(FixedUpdate);
            world.run_schedule(StateTransition);
            self.collect_events();
        }
    }

    /// Tick until `done` holds, at most `max` steps. Returns steps taken, or
    /// `None` if the condition never held.
    pub fn tick_until(&mut self, max: u32, mut done: impl FnMut(&mut Self) -> bool) -> Option<u32> {
        for step in 0..max {
            if done(self) {
                return Some(step);
            }
            self.tick(1);
        }
        done(self).then_some(max)
    }

    /// Step size of one tick in seconds.
    pub fn dt(&self) -> f32 {
        self.app
            .world()
            .resource::<Time<Fixed>>()
            .timestep()
            .as_secs_f32()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        *self.app.world().resource::<State<GameState>>().get()
    }

    pub fn lanes(&self) -> &LaneManager {
        self.app.world().resource::<LaneManager>()
    }

    pub fn player(&self) -> &PlayerController {
        self.app.world().resource::<PlayerController>()
    }

    pub fn timer(&self) -> &RunTimer {
        self.app.world().resource::<RunTimer>()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.app.world().resource::<Scoreboard>()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    pub fn runs(&self) -> RunCounter {
        *self.app.world().resource::<RunCounter>()
    }

    pub fn ticks(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Return the log and start a fresh one.
    pub fn take_log(&mut self) -> EventLog {
        std::mem::take(&mut self.log)
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
