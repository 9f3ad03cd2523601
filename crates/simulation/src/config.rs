/// Fixed simulation rate used by the host. Tests drive `FixedUpdate` directly
/// and pick their own rate through `Time<Fixed>`.
pub const FIXED_HZ: f64 = 60.0;

/// Seconds shown to the view layer are rounded to this step.
pub const TIME_DISPLAY_STEP: f32 = 0.1;

/// Attempts made to find a tree-free start tile before falling back to a scan.
pub const START_TILE_ATTEMPTS: usize = 32;

/// Lane colours handed to the view layer (RGBA).
pub const GRASS_COLOR: [u8; 4] = [76, 175, 80, 255];
pub const ROAD_COLOR: [u8; 4] = [158, 158, 158, 255];

/// Trees are scaled uniformly in `[TREE_SCALE_MIN, TREE_SCALE_MIN + TREE_SCALE_SPREAD)`.
pub const TREE_SCALE_MIN: f32 = 1.2;
pub const TREE_SCALE_SPREAD: f32 = 0.4;

/// Lanes behind the active window whose type and decoration are remembered.
/// Retreating stops at the oldest remembered lane.
pub const LANE_RECORD_HORIZON: u32 = 256;
