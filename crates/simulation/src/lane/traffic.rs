//! Per-lane vehicle pool.
//!
//! A road lane owns a fixed set of [`Vehicle`] slots. While the lane is
//! active, a spawn accumulator periodically wakes the first idle slot and
//! sends it from one endpoint to the other at constant speed.

use bevy::math::Vec3;
use rand::Rng;

use crate::game_params::{TrafficParams, VehicleTemplate};

/// Which way every vehicle of one lane activation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelDirection {
    /// From `-endpoint_x` towards `+endpoint_x`.
    #[default]
    Forward,
    Reverse,
}

impl TravelDirection {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen::<f32>() < 0.5 {
            TravelDirection::Forward
        } else {
            TravelDirection::Reverse
        }
    }

    /// Sign of the x velocity.
    pub fn sign(self) -> f32 {
        match self {
            TravelDirection::Forward => 1.0,
            TravelDirection::Reverse => -1.0,
        }
    }

    /// Yaw in degrees a vehicle should face while driving this way.
    pub fn yaw_degrees(self) -> f32 {
        match self {
            TravelDirection::Forward => 0.0,
            TravelDirection::Reverse => 180.0,
        }
    }
}

/// A pooled vehicle. Positions are lane-local.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vehicle {
    pub active: bool,
    pub start: Vec3,
    pub end: Vec3,
    pub elapsed: f32,
    pub duration: f32,
    pub direction: TravelDirection,
}

impl Vehicle {
    /// Fraction of the path covered, in `0..=1`.
    pub fn position_on_path(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn local_position(&self) -> Vec3 {
        self.start.lerp(self.end, self.position_on_path())
    }

    fn launch(&mut self, start: Vec3, end: Vec3, speed: f32, direction: TravelDirection) {
        self.active = true;
        self.start = start;
        self.end = end;
        self.elapsed = 0.0;
        self.duration = start.distance(end) / speed;
        self.direction = direction;
    }

    /// Advance by `dt`. Returns true when the vehicle arrived this step.
    fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
            self.elapsed = self.duration;
            return true;
        }
        false
    }

    fn park(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }
}

/// Spawner and vehicle pool for a single road lane.
#[derive(Debug, Clone)]
pub struct TrafficLane {
    vehicles: Vec<Vehicle>,
    params: TrafficParams,
    template: VehicleTemplate,
    direction: TravelDirection,
    spawn_interval: f32,
    accumulator: f32,
    spawning: bool,
}

impl TrafficLane {
    pub fn new(params: TrafficParams, template: VehicleTemplate) -> Self {
        Self {
            vehicles: vec![Vehicle::default(); params.max_cars],
            params,
            template,
            direction: TravelDirection::Forward,
            spawn_interval: params.spawn_interval_min,
            accumulator: 0.0,
            spawning: false,
        }
    }

    fn draw_interval(&self, rng: &mut impl Rng) -> f32 {
        let min = self.params.spawn_interval_min;
        let max = self.params.spawn_interval_max;
        min + rng.gen::<f32>() * (max - min)
    }

    /// Start spawning with a fresh interval and direction.
    pub fn begin(&mut self, rng: &mut impl Rng) {
        self.spawn_interval = self.draw_interval(rng);
        self.direction = TravelDirection::random(rng);
        self.accumulator = 0.0;
        self.spawning = true;
    }

    /// Stop spawning and park every vehicle.
    pub fn halt(&mut self) {
        self.spawning = false;
        self.accumulator = 0.0;
        for vehicle in &mut self.vehicles {
            vehicle.park();
        }
    }

    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        for vehicle in &mut self.vehicles {
            vehicle.advance(dt);
        }
        if !self.spawning {
            return;
        }
        self.accumulator += dt;
        if self.accumulator >= self.spawn_interval {
            self.try_spawn();
            self.accumulator = 0.0;
            self.spawn_interval = self.draw_interval(rng);
        }
    }

    /// Wake the first idle vehicle. Returns false when the pool is exhausted.
    pub fn try_spawn(&mut self) -> bool {
        let Some(vehicle) = self.vehicles.iter_mut().find(|v| !v.active) else {
            return false;
        };
        let x = self.template.endpoint_x * self.direction.sign();
        let y = self.template.clearance;
        let start = Vec3::new(-x, y, 0.0);
        let end = Vec3::new(x, y, 0.0);
        vehicle.launch(start, end, self.template.speed, self.direction);
        true
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn active_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_vehicles().count()
    }

    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }
}
