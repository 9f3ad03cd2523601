mod controller;
mod motion;
mod systems;

pub use controller::{
    HopStarted, MotionFinished, MoveIntent, MoveRejected, PlayerController, PlayerPhase,
};
pub use motion::{quad_out, Motion, MotionKind};
pub use systems::{advance_player_motion, handle_collisions, handle_move_intents, PlayerPlugin};
