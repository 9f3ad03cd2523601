//! Per-run countdown that pushes the player to keep moving forward.
//!
//! The timer counts down every fixed step and is refilled only when the
//! player reaches a lane index never reached before in this run. Running
//! out raises a single `GameOverEvent { cause: Timeout }`.

use bevy::prelude::*;

use crate::config::TIME_DISPLAY_STEP;
use crate::events::{GameOverCause, GameOverEvent, TimeUpdated};
use crate::game_state::GameState;
use crate::lane_manager::LaneManager;
use crate::simulation_sets::SimulationSet;

#[derive(Resource, Debug, Clone)]
pub struct RunTimer {
    time_left: f32,
    max_time_left: f32,
    max_index_reached: u32,
    expired: bool,
    shown: Option<f32>,
}

/// What happened during one [`RunTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerTick {
    pub reset: bool,
    /// True only on the step the timer ran out.
    pub expired: bool,
    pub display: f32,
}

impl RunTimer {
    pub fn new(max_time_left: f32) -> Self {
        Self {
            time_left: max_time_left,
            max_time_left,
            max_index_reached: 0,
            expired: false,
            shown: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_time_left);
    }

    pub fn tick(&mut self, dt: f32, current_index: u32) -> TimerTick {
        if self.expired {
            return TimerTick {
                reset: false,
                expired: false,
                display: self.display(),
            };
        }

        self.time_left -= dt;

        let reset = current_index > self.max_index_reached;
        if reset {
            self.max_index_reached = current_index;
            self.time_left = self.max_time_left;
        }

        let expired = self.time_left <= 0.0;
        if expired {
            self.expired = true;
        }

        TimerTick {
            reset,
            expired,
            display: self.display(),
        }
    }

    /// Seconds left rounded to the display step and clamped at zero.
    pub fn display(&self) -> f32 {
        ((self.time_left / TIME_DISPLAY_STEP).round() * TIME_DISPLAY_STEP).max(0.0)
    }

    /// Record `value` as shown. Returns false if it was already on screen.
    fn mark_shown(&mut self, value: f32) -> bool {
        if self.shown == Some(value) {
            return false;
        }
        self.shown = Some(value);
        true
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn max_time_left(&self) -> f32 {
        self.max_time_left
    }

    pub fn max_index_reached(&self) -> u32 {
        self.max_index_reached
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

pub fn tick_run_timer(
    time: Res<Time<Fixed>>,
    lanes: Res<LaneManager>,
    mut timer: ResMut<RunTimer>,
    mut time_updates: EventWriter<TimeUpdated>,
    mut game_over: EventWriter<GameOverEvent>,
) {
    let tick = timer.tick(time.timestep().as_secs_f32(), lanes.current_index());
    if timer.mark_shown(tick.display) {
        time_updates.send(TimeUpdated {
            seconds_left: tick.display,
        });
    }
    if tick.expired {
        info!("Time out at lane {}", lanes.current_index());
        game_over.send(GameOverEvent {
            cause: GameOverCause::Timeout,
        });
    }
}

/// Announce a full timer at run start.
pub fn publish_full_timer(mut timer: ResMut<RunTimer>, mut time_updates: EventWriter<TimeUpdated>) {
    let display = timer.display();
    if timer.mark_shown(display) {
        time_updates.send(TimeUpdated {
            seconds_left: display,
        });
    }
}

pub struct RunTimerPlugin;

impl Plugin for RunTimerPlugin {
    fn build(&self, app: &mut App) {
        // After player motion so a hop that lands this tick counts.
        app.add_systems(
            FixedUpdate,
            tick_run_timer
                .in_set(SimulationSet::Simulation)
                .after(crate::player::advance_player_motion)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 64.0;

    #[test]
    fn test_counts_down() {
        let mut timer = RunTimer::new(5.0);
        let tick = timer.tick(1.0, 0);
        assert!(!tick.reset);
        assert!(!tick.expired);
        assert_eq!(timer.time_left(), 4.0);
        assert_eq!(tick.display, 4.0);
    }

    #[test]
    fn test_resets_on_new_max() {
        let mut timer = RunTimer::new(5.0);
        timer.tick(2.0, 0);
        let tick = timer.tick(DT, 1);
        assert!(tick.reset);
        assert_eq!(timer.time_left(), 5.0);
        assert_eq!(timer.max_index_reached(), 1);
    }

    #[test]
    fn test_no_reset_when_revisiting_index() {
        let mut timer = RunTimer::new(5.0);
        timer.tick(DT, 1);
        timer.tick(DT, 2);
        // Back to 1, then forward to 2 again.
        timer.tick(1.0, 1);
        let tick = timer.tick(1.0, 2);
        assert!(!tick.reset);
        assert!((timer.time_left() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_lateral_progress_does_not_reset() {
        let mut timer = RunTimer::new(5.0);
        for _ in 0..64 {
            assert!(!timer.tick(DT, 0).reset);
        }
        assert!((timer.time_left() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_expires_once() {
        let mut timer = RunTimer::new(0.5);
        let mut expirations = 0;
        for _ in 0..200 {
            if timer.tick(DT, 0).expired {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert!(timer.is_expired());
    }

    #[test]
    fn test_display_rounded_and_clamped() {
        let mut timer = RunTimer::new(5.0);
        timer.tick(0.26, 0);
        assert!((timer.display() - 4.7).abs() < 1e-5);
        timer.tick(10.0, 0);
        assert_eq!(timer.display(), 0.0);
    }

    #[test]
    fn test_reset_clears_expiry_and_progress() {
        let mut timer = RunTimer::new(1.0);
        timer.tick(2.0, 3);
        timer.tick(2.0, 3);
        assert!(timer.is_expired());
        timer.reset();
        assert!(!timer.is_expired());
        assert_eq!(timer.max_index_reached(), 0);
        assert_eq!(timer.time_left(), 1.0);
    }

    #[test]
    fn test_mark_shown_dedupes() {
        let mut timer = RunTimer::new(5.0);
        assert!(timer.mark_shown(5.0));
        assert!(!timer.mark_shown(5.0));
        assert!(timer.mark_shown(4.9));
    }
}
