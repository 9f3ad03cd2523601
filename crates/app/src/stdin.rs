//! `--stdin` intent source: one command per line.
//!
//! Accepted commands: `w`/`forward`, `a`/`left`, `s`/`backward`,
//! `d`/`right`, `start`, `pause`, `clear` and `quit`. Lines are read on a
//! background thread and applied at the start of each frame.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Mutex;

use bevy::prelude::*;
use simulation::events::{ClearHighScoreEvent, MoveIntentEvent, StartRunEvent, TogglePauseEvent};
use simulation::player::MoveIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinCommand {
    Move(MoveIntent),
    Start,
    Pause,
    ClearHighScore,
    Quit,
}

/// Parse one protocol line. Case and surrounding whitespace are ignored.
pub fn parse_command(line: &str) -> Option<StdinCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "forward" => StdinCommand::Move(MoveIntent::Forward),
        "a" | "left" => StdinCommand::Move(MoveIntent::Left),
        "s" | "backward" => StdinCommand::Move(MoveIntent::Backward),
        "d" | "right" => StdinCommand::Move(MoveIntent::Right),
        "start" => StdinCommand::Start,
        "pause" => StdinCommand::Pause,
        "clear" => StdinCommand::ClearHighScore,
        "quit" | "exit" => StdinCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Receiving end of the reader thread.
#[derive(Resource)]
pub struct StdinCommands(Mutex<Receiver<StdinCommand>>);

impl StdinCommands {
    /// Spawn the reader thread. It stops at end of input.
    pub fn spawn_reader() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!("stdin read error: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!("Unknown command: {line:?}"),
                }
            }
        });
        Self(Mutex::new(rx))
    }
}

/// Forward queued commands as core events. Quits on `quit` or end of input.
pub fn apply_stdin_commands(
    commands: Res<StdinCommands>,
    mut intents: EventWriter<MoveIntentEvent>,
    mut start: EventWriter<StartRunEvent>,
    mut pause: EventWriter<TogglePauseEvent>,
    mut clear: EventWriter<ClearHighScoreEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok(rx) = commands.0.lock() else {
        exit.send(AppExit::error());
        return;
    };
    loop {
        match rx.try_recv() {
            Ok(StdinCommand::Move(intent)) => {
                intents.send(MoveIntentEvent(intent));
            }
            Ok(StdinCommand::Start) => {
                start.send(StartRunEvent);
            }
            Ok(StdinCommand::Pause) => {
                pause.send(TogglePauseEvent);
            }
            Ok(StdinCommand::ClearHighScore) => {
                clear.send(ClearHighScoreEvent);
            }
            Ok(StdinCommand::Quit) | Err(TryRecvError::Disconnected) => {
                exit.send(AppExit::Success);
                return;
            }
            Err(TryRecvError::Empty) => return,
        }
    }
}
