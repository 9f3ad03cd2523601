use bevy::prelude::*;
use simulation::events::{HighScoreLoaded, PersistHighScore};
use simulation::simulation_sets::SimulationSet;

use crate::high_score::HighScoreStore;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Read the stored high score at startup. Failures fall back to 0.
pub fn load_high_score(store: Res<HighScoreStore>, mut loaded: EventWriter<HighScoreLoaded>) {
    let high = match store.load() {
        Ok(Some(high)) => {
            info!("Loaded high score {high} from {}", store.path().display());
            high
        }
        Ok(None) => 0,
        Err(e) => {
            warn!(
                "Could not read high score from {}: {e}",
                store.path().display()
            );
            0
        }
    };
    loaded.send(HighScoreLoaded(high));
}

/// Write the latest requested high score. Only the last request in a tick
/// reaches the disk.
pub fn persist_high_score(store: Res<HighScoreStore>, mut requests: EventReader<PersistHighScore>) {
    let Some(PersistHighScore(high)) = requests.read().last().copied() else {
        return;
    };
    match store.persist(high) {
        Ok(()) => debug!("Persisted high score {high}"),
        Err(e) => warn!(
            "Could not write high score to {}: {e}",
            store.path().display()
        ),
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Loads the high score at startup and writes it whenever it changes.
///
/// Insert a [`HighScoreStore`] before adding the plugin to pick the file;
/// otherwise it comes from `LANEHOP_HIGHSCORE`.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HighScoreLoaded>()
            .add_event::<PersistHighScore>()
            .init_resource::<HighScoreStore>()
            .add_systems(Startup, load_high_score)
            .add_systems(
                FixedUpdate,
                persist_high_score.in_set(SimulationSet::PostSim),
            );
    }
}
