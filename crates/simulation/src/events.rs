//! Typed events exchanged between the gameplay core and its host.
//!
//! Inputs (intents, collisions, run control) are sent by the host and read in
//! [`SimulationSet::Input`](crate::simulation_sets::SimulationSet::Input).
//! Outputs are written by the core during the same tick and drained by the
//! presentation layer.

use bevy::prelude::*;
use serde::Serialize;

use crate::audio::AudioCommand;
use crate::game_state::GameState;
use crate::player::MoveIntent;

// =============================================================================
// Inputs
// =============================================================================

/// A discrete move request from the input layer.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntentEvent(pub MoveIntent);

/// What the player's body touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionTag {
    Vehicle,
    /// Ground planes and other static geometry; never knocks the player down.
    Terrain,
}

/// Reported by the host's collision detection.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCollisionEvent {
    pub tag: CollisionTag,
}

impl VehicleCollisionEvent {
    pub fn vehicle() -> Self {
        Self {
            tag: CollisionTag::Vehicle,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StartRunEvent;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TogglePauseEvent;

/// High score read from storage at startup.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScoreLoaded(pub u32);

/// Reset the stored high score to zero.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearHighScoreEvent;

// =============================================================================
// Outputs
// =============================================================================

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStateChanged(pub GameState);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreUpdated {
    pub current: u32,
    pub high: u32,
}

/// Remaining run time, rounded to 0.1 s and never negative.
#[derive(Event, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeUpdated {
    pub seconds_left: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOverCause {
    Timeout,
    Collision,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverEvent {
    pub cause: GameOverCause,
}

/// Ask storage to write a new high score.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersistHighScore(pub u32);

// =============================================================================
// Plugin
// =============================================================================

pub struct EventsPlugin;

impl Plugin for EventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveIntentEvent>()
            .add_event::<VehicleCollisionEvent>()
            .add_event::<StartRunEvent>()
            .add_event::<TogglePauseEvent>()
            .add_event::<HighScoreLoaded>()
            .add_event::<ClearHighScoreEvent>()
            .add_event::<GameStateChanged>()
            .add_event::<ScoreUpdated>()
            .add_event::<TimeUpdated>()
            .add_event::<GameOverEvent>()
            .add_event::<PersistHighScore>()
            .add_event::<AudioCommand>();
    }
}
