mod generator;
mod manager;
mod systems;
mod tests;

pub use generator::LaneTypeGenerator;
pub use manager::{LaneAdvance, LaneDebugInfo, LaneManager, LaneRecord};
pub use systems::{tick_lane_traffic, LaneManagerPlugin};
