//! Audio requests for the host's mixer.
//!
//! The core never plays sound itself. It emits [`AudioCommand`] events naming
//! a [`SoundId`] and a volume; the host maps ids to assets.

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundId {
    BackgroundA,
    BackgroundB,
    Jump,
    GameOver,
}

impl SoundId {
    pub const BACKGROUND_TRACKS: [SoundId; 2] = [SoundId::BackgroundA, SoundId::BackgroundB];

    /// Asset name the host uses to look the clip up.
    pub fn name(self) -> &'static str {
        match self {
            SoundId::BackgroundA => "BGM_1",
            SoundId::BackgroundB => "BGM_2",
            SoundId::Jump => "SFX_Jump",
            SoundId::GameOver => "SFX_GameOver",
        }
    }

    /// Pick one of the background loops.
    pub fn random_background(rng: &mut impl Rng) -> SoundId {
        Self::BACKGROUND_TRACKS[rng.gen_range(0..Self::BACKGROUND_TRACKS.len())]
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AudioCommand {
    PlayOnce { sound: SoundId, volume: f32 },
    PlayLoop { sound: SoundId, volume: f32 },
    Stop(SoundId),
    StopAll,
}

impl AudioCommand {
    pub fn sound(&self) -> Option<SoundId> {
        match *self {
            AudioCommand::PlayOnce { sound, .. } | AudioCommand::PlayLoop { sound, .. } => {
                Some(sound)
            }
            AudioCommand::Stop(sound) => Some(sound),
            AudioCommand::StopAll => None,
        }
    }
}
