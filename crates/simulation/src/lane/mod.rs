mod decoration;
mod traffic;
mod types;

pub use decoration::{scatter_trees, Tree};
pub use traffic::{TrafficLane, TravelDirection, Vehicle};
pub use types::{Lane, LaneType};
