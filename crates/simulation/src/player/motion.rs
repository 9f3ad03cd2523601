use bevy::math::Vec3;

/// Decides what happens when a motion runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// A regular move between tiles; the player lands.
    Hop,
    /// Knock-back after a vehicle hit; the run ends.
    Bounce,
}

/// A timed arc from `from` to `to`, advanced once per fixed step.
///
/// Cancelling a motion is dropping it: its completion never runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub kind: MotionKind,
    pub from: Vec3,
    pub to: Vec3,
    pub duration: f32,
    pub elapsed: f32,
    pub arc_height: f32,
}

/// Quadratic ease-out.
pub fn quad_out(t: f32) -> f32 {
    t * (2.0 - t)
}

impl Motion {
    pub fn new(kind: MotionKind, from: Vec3, to: Vec3, duration: f32, arc_height: f32) -> Self {
        Self {
            kind,
            from,
            to,
            duration,
            elapsed: 0.0,
            arc_height,
        }
    }

    /// Linear progress in `0..=1`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Position at the current progress: eased lerp plus a `4·h·r·(1−r)` bump.
    pub fn sample(&self) -> Vec3 {
        let r = quad_out(self.progress());
        let mut pos = self.from.lerp(self.to, r);
        pos.y += 4.0 * self.arc_height * r * (1.0 - r);
        pos
    }

    /// Advance by `dt`. Returns true once the motion is complete.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        self.elapsed >= self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}
