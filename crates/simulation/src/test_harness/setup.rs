//! Input helpers for driving a `TestGame`.

use crate::events::{
    ClearHighScoreEvent, CollisionTag, HighScoreLoaded, MoveIntentEvent, StartRunEvent,
    TogglePauseEvent, VehicleCollisionEvent,
};
use crate::game_state::GameState;
use crate::player::MoveIntent;

use super::TestGame;

/// Upper bound for waiting on a single hop or bounce to finish.
const MOTION_TICK_LIMIT: u32 = 128;

impl TestGame {
    // -----------------------------------------------------------------------
    // Run control
    // -----------------------------------------------------------------------

    /// Request a run and tick until it is `Playing`.
    pub fn start_run(&mut self) -> &mut Self {
        self.world_mut().send_event(StartRunEvent);
        let started = self.tick_until(8, |g| g.state() == GameState::Playing);
        assert!(started.is_some(), "run did not start, state {:?}", self.state());
        self
    }

    pub fn toggle_pause(&mut self) -> &mut Self {
        self.world_mut().send_event(TogglePauseEvent);
        self.tick(1);
        self
    }

    pub fn load_high_score(&mut self, high: u32) -> &mut Self {
        self.world_mut().send_event(HighScoreLoaded(high));
        self.tick(1);
        self
    }

    pub fn clear_high_score(&mut self) -> &mut Self {
        self.world_mut().send_event(ClearHighScoreEvent);
        self.tick(1);
        self
    }

    // -----------------------------------------------------------------------
    // Player input
    // -----------------------------------------------------------------------

    /// Queue an intent; it is applied on the next tick.
    pub fn send_intent(&mut self, intent: MoveIntent) -> &mut Self {
        self.world_mut().send_event(MoveIntentEvent(intent));
        self
    }

    pub fn send_collision(&mut self, tag: CollisionTag) -> &mut Self {
        self.world_mut().send_event(VehicleCollisionEvent { tag });
        self
    }

    /// Send an intent and tick until the player is idle again.
    pub fn hop(&mut self, intent: MoveIntent) -> &mut Self {
        self.send_intent(intent);
        self.tick(1);
        self.settle();
        self
    }

    /// Tick until no motion is in flight.
    pub fn settle(&mut self) -> &mut Self {
        let settled = self.tick_until(MOTION_TICK_LIMIT, |g| !g.player().is_busy());
        assert!(settled.is_some(), "player motion never finished");
        self
    }
}
