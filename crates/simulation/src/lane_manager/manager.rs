use std::collections::VecDeque;

use bevy::prelude::*;
use rand::Rng;

use crate::config::LANE_RECORD_HORIZON;
use crate::error::ConfigError;
use crate::game_params::{GameParams, GeneratorParams};
use crate::lane::{Lane, LaneType};

use super::generator::LaneTypeGenerator;

/// Type and decoration seed assigned to a logical lane index the first time
/// it was generated. Kept so a lane rebuilt after a retreat looks the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRecord {
    pub lane_type: LaneType,
    pub decor_seed: u64,
}

/// Outcome of [`LaneManager::move_to_next_lane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAdvance {
    pub index: u32,
    /// The player reached an index never reached before in this run.
    pub new_best: bool,
    /// Pool slot that was recycled to the front of the window, if any.
    pub recycled_slot: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneDebugInfo {
    pub active_lanes: usize,
    pub current_index: u32,
    pub first_active_index: u32,
    pub pool_size: usize,
    pub visible_lanes: usize,
}

/// Pooled, endless sequence of lanes around the player.
///
/// `pool` is an arena of pre-built lanes. `window` lists the pool slots of
/// the active lanes in logical order, covering the contiguous range
/// `[first_active_index, first_active_index + window.len())`, which always
/// contains `current_index` once a run has started.
#[derive(Resource, Debug, Clone)]
pub struct LaneManager {
    pool: Vec<Lane>,
    window: VecDeque<usize>,
    first_active_index: u32,
    current_index: u32,
    furthest_index: u32,
    generator: LaneTypeGenerator,
    generator_params: GeneratorParams,
    records: VecDeque<LaneRecord>,
    /// Logical index of `records[0]`.
    records_base: u32,
    recent_types: VecDeque<LaneType>,
    pattern_memory: usize,
    visible: usize,
    spacing: f32,
    origin_z: f32,
}

impl LaneManager {
    /// Allocate `pool_size` deactivated lanes from the lane template.
    pub fn new(params: &GameParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let lane_template = params.lane_template()?;
        let vehicle_template = params.vehicle_template()?;

        let pool = (0..params.lanes.pool_size)
            .map(|slot| Lane::new(slot, lane_template, params.traffic, vehicle_template))
            .collect();

        Ok(Self {
            pool,
            window: VecDeque::with_capacity(params.lanes.pool_size),
            first_active_index: 0,
            current_index: 0,
            furthest_index: 0,
            generator: LaneTypeGenerator::new(params.generator),
            generator_params: params.generator,
            records: VecDeque::new(),
            records_base: 0,
            recent_types: VecDeque::with_capacity(params.lanes.pattern_memory),
            pattern_memory: params.lanes.pattern_memory,
            visible: params.effective_visible_count(),
            spacing: params.lanes.lane_spacing,
            origin_z: params.lanes.origin_z,
        })
    }

    /// Return every lane to the pool and lay out a fresh sequence.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        for lane in &mut self.pool {
            lane.deactivate();
        }
        self.window.clear();
        self.first_active_index = 0;
        self.current_index = 0;
        self.furthest_index = 0;
        self.generator = LaneTypeGenerator::new(self.generator_params);
        self.records.clear();
        self.records_base = 0;
        self.recent_types.clear();
        self.spawn_initial_lanes(self.visible, rng);
    }

    pub fn spawn_initial_lanes(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            if self.spawn_lane_piece(rng).is_none() {
                break;
            }
        }
    }

    /// Activate a random inactive pool lane at the front of the window.
    /// Returns `None` when the pool is exhausted.
    fn spawn_lane_piece(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let free: Vec<usize> = self
            .pool
            .iter()
            .filter(|lane| !lane.is_active())
            .map(|lane| lane.slot)
            .collect();
        if free.is_empty() {
            return None;
        }
        let slot = free[rng.gen_range(0..free.len())];
        let index = self.first_active_index + self.window.len() as u32;
        self.install(slot, index, rng);
        self.window.push_back(slot);
        Some(slot)
    }

    /// Relabel, reposition and activate the lane in `slot` as logical `index`.
    fn install(&mut self, slot: usize, index: u32, rng: &mut impl Rng) {
        let record = self.record_for(index, rng);
        let z = self.lane_z(index);
        let lane = &mut self.pool[slot];
        lane.deactivate();
        lane.set_lane_type(record.lane_type, record.decor_seed);
        lane.place(index, z);
        lane.activate(rng);
    }

    fn record_for(&mut self, index: u32, rng: &mut impl Rng) -> LaneRecord {
        let i = index.saturating_sub(self.records_base) as usize;
        if let Some(record) = self.records.get(i) {
            return *record;
        }
        debug_assert_eq!(i, self.records.len(), "lane records must grow in order");
        let record = LaneRecord {
            lane_type: self.next_lane_type(rng),
            decor_seed: rng.gen(),
        };
        self.records.push_back(record);
        record
    }

    /// Draw the next lane type and remember it in the recent-type ring.
    pub fn next_lane_type(&mut self, rng: &mut impl Rng) -> LaneType {
        let lane_type = self.generator.next(rng);
        if self.pattern_memory > 0 {
            if self.recent_types.len() == self.pattern_memory {
                self.recent_types.pop_front();
            }
            self.recent_types.push_back(lane_type);
        }
        lane_type
    }

    pub fn move_to_next_lane(&mut self, rng: &mut impl Rng) -> LaneAdvance {
        let midpoint = self.visible / 2;
        let offset = (self.current_index - self.first_active_index) as usize;
        let window_end = self.first_active_index as usize + self.window.len();

        let mut recycled_slot = None;
        if offset >= midpoint || self.current_index as usize + 1 >= window_end {
            if self.window.len() < self.visible {
                self.spawn_lane_piece(rng);
            } else {
                recycled_slot = self.recycle_back_lane(rng);
            }
        }

        self.current_index += 1;
        let new_best = self.current_index > self.furthest_index;
        if new_best {
            self.furthest_index = self.current_index;
        }
        LaneAdvance {
            index: self.current_index,
            new_best,
            recycled_slot,
        }
    }

    /// Move the lane furthest behind the player to the front of the window.
    fn recycle_back_lane(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let slot = self.window.pop_front()?;
        let index = self.first_active_index + self.window.len() as u32 + 1;
        self.first_active_index += 1;
        self.forget_old_records();
        self.install(slot, index, rng);
        self.window.push_back(slot);
        debug!(
            "Recycled lane slot {} to index {} ({:?})",
            slot,
            index,
            self.pool[slot].lane_type()
        );
        Some(slot)
    }

    /// Drop records more than [`LANE_RECORD_HORIZON`] lanes behind the window.
    fn forget_old_records(&mut self) {
        let keep_from = self.first_active_index.saturating_sub(LANE_RECORD_HORIZON);
        while self.records_base < keep_from && !self.records.is_empty() {
            self.records.pop_front();
            self.records_base += 1;
        }
    }

    /// Step back one lane. At index 0, or at the oldest remembered lane,
    /// nothing changes and `false` is returned.
    pub fn move_to_previous_lane(&mut self, rng: &mut impl Rng) -> bool {
        if self.current_index <= self.records_base {
            return false;
        }
        self.current_index -= 1;

        if self.current_index <= self.first_active_index
            && self.first_active_index > self.records_base
        {
            if let Some(slot) = self.window.pop_back() {
                self.first_active_index -= 1;
                let index = self.first_active_index;
                self.install(slot, index, rng);
                self.window.push_front(slot);
                debug!("Restored lane slot {} at index {}", slot, index);
            }
        }
        true
    }

    /// Lane the player is on.
    pub fn current_lane(&self) -> Option<&Lane> {
        if self.window.is_empty() {
            return None;
        }
        let mut offset = self.current_index.saturating_sub(self.first_active_index) as usize;
        if self.current_index < self.first_active_index || offset >= self.window.len() {
            error!(
                "Current lane {} outside window [{}, {})",
                self.current_index,
                self.first_active_index,
                self.first_active_index as usize + self.window.len()
            );
            debug_assert!(false, "current lane index outside the active window");
            offset = offset.min(self.window.len() - 1);
        }
        self.window.get(offset).map(|&slot| &self.pool[slot])
    }

    /// Active lane at logical `index`, if it is inside the window.
    pub fn lane_at(&self, index: u32) -> Option<&Lane> {
        let offset = index.checked_sub(self.first_active_index)? as usize;
        self.window.get(offset).map(|&slot| &self.pool[slot])
    }

    /// Active lanes in logical order.
    pub fn active_lanes(&self) -> impl Iterator<Item = &Lane> + '_ {
        self.window.iter().map(|&slot| &self.pool[slot])
    }

    pub fn tick_traffic(&mut self, dt: f32, rng: &mut impl Rng) {
        for &slot in &self.window {
            self.pool[slot].tick_traffic(dt, rng);
        }
    }

    pub fn lane_z(&self, index: u32) -> f32 {
        self.origin_z + index as f32 * self.spacing
    }

    /// Where the next lane beyond the window would be placed.
    pub fn last_spawn_z(&self) -> f32 {
        self.lane_z(self.first_active_index + self.window.len() as u32)
    }

    pub fn debug_info(&self) -> LaneDebugInfo {
        LaneDebugInfo {
            active_lanes: self.window.len(),
            current_index: self.current_index,
            first_active_index: self.first_active_index,
            pool_size: self.pool.len(),
            visible_lanes: self.visible,
        }
    }

    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn first_active_index(&self) -> u32 {
        self.first_active_index
    }

    pub fn furthest_index(&self) -> u32 {
        self.furthest_index
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn pool(&self) -> &[Lane] {
        &self.pool
    }

    pub fn recent_types(&self) -> impl Iterator<Item = LaneType> + '_ {
        self.recent_types.iter().copied()
    }

    pub fn record(&self, index: u32) -> Option<LaneRecord> {
        let offset = index.checked_sub(self.records_base)?;
        self.records.get(offset as usize).copied()
    }

    /// Oldest logical index the player can still retreat to.
    pub fn oldest_record_index(&self) -> u32 {
        self.records_base
    }

    pub fn consecutive_hazards(&self) -> u32 {
        self.generator.consecutive_hazards()
    }
}
