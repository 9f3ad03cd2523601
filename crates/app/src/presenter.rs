//! Stand-in for the view layer: logs what a renderer and mixer would show,
//! or prints it as JSON lines in `--stdin` mode.

use std::io::Write;

use bevy::prelude::*;
use serde::Serialize;
use simulation::audio::AudioCommand;
use simulation::events::{
    GameOverCause, GameOverEvent, GameStateChanged, ScoreUpdated, TimeUpdated,
};
use simulation::game_state::{GameState, RunCounter};
use simulation::lane::Lane;
use simulation::lane_manager::LaneManager;

pub fn log_presentation_events(
    mut states: EventReader<GameStateChanged>,
    mut scores: EventReader<ScoreUpdated>,
    mut times: EventReader<TimeUpdated>,
    mut audio: EventReader<AudioCommand>,
) {
    for GameStateChanged(state) in states.read() {
        info!("State: {state:?}");
    }
    for score in scores.read() {
        info!("Score {} (best {})", score.current, score.high);
    }
    for time in times.read() {
        debug!("Time left {:.1}", time.seconds_left);
    }
    for command in audio.read() {
        match command {
            AudioCommand::PlayOnce { sound, volume } => {
                debug!("Play {} at {volume:.2}", sound.name());
            }
            AudioCommand::PlayLoop { sound, volume } => {
                info!("Loop {} at {volume:.2}", sound.name());
            }
            AudioCommand::Stop(sound) => debug!("Stop {}", sound.name()),
            AudioCommand::StopAll => debug!("Stop all audio"),
        }
    }
}

/// `#rrggbb` form of an RGBA colour; alpha is dropped.
pub fn hex_color([r, g, b, _]: [u8; 4]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn describe_lane(lane: &Lane) -> String {
    format!(
        "Lane {} {:?} {} at z {:.1}",
        lane.logical_index(),
        lane.lane_type(),
        hex_color(lane.lane_type().color()),
        lane.world_z()
    )
}

/// Run and highest logical lane already shown.
#[derive(Default)]
pub struct ShownLanes {
    run: u32,
    next_index: u32,
}

/// Log each lane once as it enters the window, the way a renderer would
/// paint it.
pub fn log_lane_layout(
    lanes: Res<LaneManager>,
    runs: Res<RunCounter>,
    mut shown: Local<ShownLanes>,
) {
    if shown.run != runs.started {
        shown.run = runs.started;
        shown.next_index = 0;
    }
    for lane in lanes.active_lanes() {
        if lane.logical_index() >= shown.next_index {
            debug!("{}", describe_lane(lane));
            shown.next_index = lane.logical_index() + 1;
        }
    }
}

/// One line of `--stdin` output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutputLine<'a> {
    State { state: GameState },
    Score { current: u32, high: u32 },
    Time { seconds_left: f32 },
    GameOver { cause: GameOverCause },
    Audio { command: &'a AudioCommand },
}

pub fn print_json_lines(
    mut states: EventReader<GameStateChanged>,
    mut scores: EventReader<ScoreUpdated>,
    mut times: EventReader<TimeUpdated>,
    mut game_overs: EventReader<GameOverEvent>,
    mut audio: EventReader<AudioCommand>,
) {
    let lines = states
        .read()
        .map(|e| OutputLine::State { state: e.0 })
        .chain(scores.read().map(|e| OutputLine::Score {
            current: e.current,
            high: e.high,
        }))
        .chain(times.read().map(|e| OutputLine::Time {
            seconds_left: e.seconds_left,
        }))
        .chain(game_overs.read().map(|e| OutputLine::GameOver { cause: e.cause }))
        .chain(audio.read().map(|command| OutputLine::Audio { command }));

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    for line in lines {
        match serde_json::to_string(&line) {
            Ok(json) => {
                let _ = writeln!(stdout, "{json}");
            }
            Err(e) => warn!("Could not encode output event: {e}"),
        }
    }
    let _ = stdout.flush();
}
