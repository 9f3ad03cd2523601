//! Current and best score of the player.

use bevy::prelude::*;

use crate::events::{ClearHighScoreEvent, HighScoreLoaded, PersistHighScore, ScoreUpdated};
use crate::simulation_sets::SimulationSet;

/// Score equals the furthest lane index reached in the current run.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    current: u32,
    high: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub current: u32,
    pub high: u32,
    pub new_high: bool,
}

impl ScoreChange {
    pub fn as_event(&self) -> ScoreUpdated {
        ScoreUpdated {
            current: self.current,
            high: self.high,
        }
    }
}

impl Scoreboard {
    pub fn record(&mut self, score: u32) -> ScoreChange {
        self.current = score;
        let new_high = score > self.high;
        if new_high {
            self.high = score;
        }
        ScoreChange {
            current: self.current,
            high: self.high,
            new_high,
        }
    }

    pub fn reset_current(&mut self) -> ScoreChange {
        self.current = 0;
        self.snapshot()
    }

    /// Seed the best score from storage. Never lowers a score beaten already.
    pub fn set_loaded_high(&mut self, high: u32) -> ScoreChange {
        self.high = self.high.max(high);
        self.snapshot()
    }

    pub fn clear_high(&mut self) -> ScoreChange {
        self.high = 0;
        self.snapshot()
    }

    fn snapshot(&self) -> ScoreChange {
        ScoreChange {
            current: self.current,
            high: self.high,
            new_high: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

pub fn apply_loaded_high_score(
    mut loaded: EventReader<HighScoreLoaded>,
    mut score: ResMut<Scoreboard>,
    mut updates: EventWriter<ScoreUpdated>,
) {
    for HighScoreLoaded(high) in loaded.read() {
        let change = score.set_loaded_high(*high);
        info!("Loaded high score {}", change.high);
        updates.send(change.as_event());
    }
}

pub fn clear_high_score(
    mut requests: EventReader<ClearHighScoreEvent>,
    mut score: ResMut<Scoreboard>,
    mut updates: EventWriter<ScoreUpdated>,
    mut persist: EventWriter<PersistHighScore>,
) {
    for _ in requests.read() {
        let change = score.clear_high();
        persist.send(PersistHighScore(change.high));
        updates.send(change.as_event());
    }
}

pub struct ScoreboardPlugin;

impl Plugin for ScoreboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scoreboard>().add_systems(
            FixedUpdate,
            (apply_loaded_high_score, clear_high_score).in_set(SimulationSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_raises_high() {
        let mut score = Scoreboard::default();
        let change = score.record(3);
        assert!(change.new_high);
        assert_eq!((change.current, change.high), (3, 3));
    }

    #[test]
    fn test_record_below_high() {
        let mut score = Scoreboard::default();
        score.set_loaded_high(10);
        let change = score.record(4);
        assert!(!change.new_high);
        assert_eq!((change.current, change.high), (4, 10));
    }

    #[test]
    fn test_reset_keeps_high() {
        let mut score = Scoreboard::default();
        score.record(7);
        let change = score.reset_current();
        assert_eq!((change.current, change.high), (0, 7));
    }

    #[test]
    fn test_loaded_high_never_lowers() {
        let mut score = Scoreboard::default();
        score.record(12);
        score.set_loaded_high(5);
        assert_eq!(score.high(), 12);
    }

    #[test]
    fn test_clear_high() {
        let mut score = Scoreboard::default();
        score.record(9);
        let change = score.clear_high();
        assert_eq!(change.high, 0);
        assert_eq!(change.current, 9);
    }
}
