mod atomic_write;
pub mod file_header;
pub mod high_score;
pub mod save_error;
mod save_plugin;


pub use high_score::{HighScoreRecord, HighScoreStore, HIGH_SCORE_PATH_ENV};
pub use save_error::SaveError;
pub use save_plugin::{load_high_score, persist_high_score, SavePlugin};
