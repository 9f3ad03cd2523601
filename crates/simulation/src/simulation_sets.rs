//! Deterministic per-tick ordering via `SystemSet` phases.
//!
//! ```text
//! Input  →  Simulation  →  PostSim
//! ```
//!
//! * **Input** – Move intents, collision events, run start and pause
//!   requests coming from the host.
//! * **Simulation** – Player motion, lane traffic, the run countdown.
//! * **PostSim** – Game-over handling and persistence requests. These react
//!   to what the simulation phase reported during the same tick.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by [`SimulationPlugin`](crate::SimulationPlugin).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Host-facing input handling.
    Input,
    /// Motion, traffic and timer updates.
    Simulation,
    /// Reactions to the tick's outcome.
    PostSim,
}
