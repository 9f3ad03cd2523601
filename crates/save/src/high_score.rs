use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::atomic_write::atomic_write;
use crate::file_header::{unwrap_header, wrap_with_header};
use crate::save_error::SaveError;

/// Environment variable overriding the high-score file location.
pub const HIGH_SCORE_PATH_ENV: &str = "LANEHOP_HIGHSCORE";

pub const DEFAULT_HIGH_SCORE_FILE: &str = "lanehop_highscore.bin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

impl HighScoreRecord {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }
}

/// Location of the high-score file.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::from_env()
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `LANEHOP_HIGHSCORE` if set, otherwise the default file name in the
    /// working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(HIGH_SCORE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<u32>, SaveError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let (_, payload) = unwrap_header(&bytes)?;
        let record = HighScoreRecord::decode(payload)?;
        Ok(Some(record.high_score))
    }

    pub fn persist(&self, high_score: u32) -> Result<(), SaveError> {
        let payload = HighScoreRecord { high_score }.encode();
        atomic_write(&self.path, &wrap_with_header(&payload))?;
        Ok(())
    }
}
