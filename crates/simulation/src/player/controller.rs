use bevy::prelude::*;
use rand::Rng;

use crate::config::START_TILE_ATTEMPTS;
use crate::events::CollisionTag;
use crate::game_params::PlayerParams;
use crate::lane_manager::{LaneAdvance, LaneManager};

use super::motion::{Motion, MotionKind};

/// Discrete move request from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveIntent {
    Forward,
    Backward,
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPhase {
    #[default]
    Idle,
    Hopping,
    Bouncing,
    /// Knocked down by a vehicle; ignores input until the next run.
    Down,
}

/// Why a move did not start. All of these are silent no-ops for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    Busy,
    AtStart,
    NoTile,
    Blocked,
    NotSpawned,
    NoIntent,
}

/// An accepted move. `advance` is set for forward moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopStarted {
    pub target: Vec3,
    pub advance: Option<LaneAdvance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionFinished {
    Landed,
    KnockedDown,
}

/// Player movement and collision state machine.
///
/// At most one [`Motion`] is in flight. Moves that arrive while it runs are
/// dropped, and a vehicle hit replaces a hop with a bounce.
#[derive(Resource, Debug, Clone)]
pub struct PlayerController {
    tile_index: usize,
    position: Vec3,
    last_stable_position: Vec3,
    motion: Option<Motion>,
    phase: PlayerPhase,
    spawned: bool,
    params: PlayerParams,
    tiles_per_lane: usize,
}

impl PlayerController {
    pub fn new(params: PlayerParams, tiles_per_lane: usize) -> Self {
        Self {
            tile_index: 0,
            position: Vec3::ZERO,
            last_stable_position: Vec3::ZERO,
            motion: None,
            phase: PlayerPhase::Idle,
            spawned: false,
            params,
            tiles_per_lane,
        }
    }

    /// Place the player on a random tree-free walkable tile of the current
    /// lane, drawn from `[start_tile_min, start_tile_max]`.
    pub fn spawn(&mut self, lanes: &LaneManager, rng: &mut impl Rng) -> bool {
        let Some(lane) = lanes.current_lane() else {
            return false;
        };
        let last = self.tiles_per_lane.saturating_sub(1);
        let min = self.params.start_tile_min.min(last);
        let max = self.params.start_tile_max.min(last);

        let passable = |i: usize| lane.tile(i).is_some_and(|t| t.is_passable());
        let picked = (0..START_TILE_ATTEMPTS)
            .map(|_| rng.gen_range(min..=max))
            .find(|&i| passable(i))
            .or_else(|| (min..=max).find(|&i| passable(i)))
            .or_else(|| (0..self.tiles_per_lane).find(|&i| passable(i)));

        let Some(index) = picked else {
            warn!("No free start tile in lane {}", lane.logical_index());
            return false;
        };
        let Some(surface) = lane.tile_world_position(index) else {
            return false;
        };

        self.tile_index = index;
        self.position = surface + Vec3::Y * self.params.standing_height;
        self.last_stable_position = self.position;
        self.motion = None;
        self.phase = PlayerPhase::Idle;
        self.spawned = true;
        true
    }

    pub fn request(
        &mut self,
        intent: MoveIntent,
        lanes: &mut LaneManager,
        rng: &mut impl Rng,
    ) -> Result<HopStarted, MoveRejected> {
        match intent {
            MoveIntent::Forward => self.move_forward(lanes, rng),
            MoveIntent::Backward => self.move_backward(lanes, rng),
            MoveIntent::Left => self.move_left(lanes),
            MoveIntent::Right => self.move_right(lanes),
            MoveIntent::None => Err(MoveRejected::NoIntent),
        }
    }

    fn ensure_ready(&self) -> Result<(), MoveRejected> {
        if !self.spawned {
            return Err(MoveRejected::NotSpawned);
        }
        if self.phase != PlayerPhase::Idle {
            return Err(MoveRejected::Busy);
        }
        Ok(())
    }

    pub fn move_forward(
        &mut self,
        lanes: &mut LaneManager,
        rng: &mut impl Rng,
    ) -> Result<HopStarted, MoveRejected> {
        self.ensure_ready()?;
        if let Some(next) = lanes.lane_at(lanes.current_index() + 1) {
            if next.walkable_tile(self.tile_index).is_none() {
                return Err(MoveRejected::NoTile);
            }
        }
        let advance = lanes.move_to_next_lane(rng);
        let target = self.resolve_lane_tile(lanes)?;
        self.start_hop(target);
        Ok(HopStarted {
            target,
            advance: Some(advance),
        })
    }

    pub fn move_backward(
        &mut self,
        lanes: &mut LaneManager,
        rng: &mut impl Rng,
    ) -> Result<HopStarted, MoveRejected> {
        self.ensure_ready()?;
        let current = lanes.current_index();
        if current == 0 {
            return Err(MoveRejected::AtStart);
        }
        if let Some(prev) = lanes.lane_at(current - 1) {
            if prev.walkable_tile(self.tile_index).is_none() {
                return Err(MoveRejected::NoTile);
            }
        }
        if !lanes.move_to_previous_lane(rng) {
            return Err(MoveRejected::AtStart);
        }
        let target = self.resolve_lane_tile(lanes)?;
        self.start_hop(target);
        Ok(HopStarted {
            target,
            advance: None,
        })
    }

    /// Step to the next tile up the row (`tile_index + 1`).
    pub fn move_left(&mut self, lanes: &LaneManager) -> Result<HopStarted, MoveRejected> {
        self.ensure_ready()?;
        let index = self.tile_index + 1;
        if index >= self.tiles_per_lane {
            return Err(MoveRejected::NoTile);
        }
        self.sidestep(lanes, index)
    }

    /// Step to the previous tile down the row (`tile_index - 1`).
    pub fn move_right(&mut self, lanes: &LaneManager) -> Result<HopStarted, MoveRejected> {
        self.ensure_ready()?;
        let index = self.tile_index.checked_sub(1).ok_or(MoveRejected::NoTile)?;
        self.sidestep(lanes, index)
    }

    fn sidestep(&mut self, lanes: &LaneManager, index: usize) -> Result<HopStarted, MoveRejected> {
        let lane = lanes.current_lane().ok_or(MoveRejected::NoTile)?;
        let tile = lane.tile(index).ok_or(MoveRejected::NoTile)?;
        if !tile.is_passable() {
            return Err(MoveRejected::Blocked);
        }
        let surface = lane
            .tile_world_position(index)
            .ok_or(MoveRejected::NoTile)?;
        let target = surface + Vec3::Y * self.params.standing_height;
        self.tile_index = index;
        self.start_hop(target);
        Ok(HopStarted {
            target,
            advance: None,
        })
    }

    /// Standing position on the walkable tile at `tile_index` of the current lane.
    fn resolve_lane_tile(&self, lanes: &LaneManager) -> Result<Vec3, MoveRejected> {
        let lane = lanes.current_lane().ok_or(MoveRejected::NoTile)?;
        lane.walkable_tile(self.tile_index)
            .ok_or(MoveRejected::NoTile)?;
        let surface = lane
            .tile_world_position(self.tile_index)
            .ok_or(MoveRejected::NoTile)?;
        Ok(surface + Vec3::Y * self.params.standing_height)
    }

    fn start_hop(&mut self, target: Vec3) {
        self.last_stable_position = self.position;
        self.motion = Some(Motion::new(
            MotionKind::Hop,
            self.position,
            target,
            self.params.hop_duration,
            self.params.hop_height,
        ));
        self.phase = PlayerPhase::Hopping;
    }

    /// React to a collision. Returns true if a bounce started.
    pub fn on_collision(&mut self, tag: CollisionTag) -> bool {
        if tag == CollisionTag::Terrain || !self.spawned {
            return false;
        }
        if matches!(self.phase, PlayerPhase::Bouncing | PlayerPhase::Down) {
            return false;
        }

        // Dropping the hop discards its landing.
        self.motion = None;

        let mut away = self.last_stable_position - self.position;
        away.y = 0.0;
        let direction = away.normalize_or_zero();

        let mut from = self.position;
        from.y = self.last_stable_position.y;
        let to = from + direction * self.params.bounce_distance;

        self.motion = Some(Motion::new(
            MotionKind::Bounce,
            from,
            to,
            self.params.bounce_duration,
            self.params.bounce_height,
        ));
        self.phase = PlayerPhase::Bouncing;
        true
    }

    /// Advance the in-flight motion by `dt`.
    pub fn advance(&mut self, dt: f32) -> Option<MotionFinished> {
        let motion = self.motion.as_mut()?;
        let done = motion.advance(dt);
        self.position = motion.sample();
        if !done {
            return None;
        }
        let kind = motion.kind;
        self.motion = None;
        match kind {
            MotionKind::Hop => {
                self.phase = PlayerPhase::Idle;
                Some(MotionFinished::Landed)
            }
            MotionKind::Bounce => {
                self.phase = PlayerPhase::Down;
                Some(MotionFinished::KnockedDown)
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.motion.is_some()
    }

    pub fn tile_index(&self) -> usize {
        self.tile_index
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn last_stable_position(&self) -> Vec3 {
        self.last_stable_position
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn params(&self) -> &PlayerParams {
        &self.params
    }
}
