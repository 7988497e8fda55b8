use std::time::Instant;

use cgmath::{Matrix4, Vector3};

use crate::transform::{identity, rotate, translate};

/// Bounces a value back and forth inside `[-limit, limit]`.
#[derive(Clone, Debug)]
pub struct Oscillator {
    pub position: f32,
    step: f32,
    limit: f32,
}

impl Oscillator {
    pub fn new(step: f32, limit: f32) -> Self {
        Self {
            position: 0.0,
            step,
            limit,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn tick(&mut self) -> f32 {
        self.position += self.step;

        if self.position > self.limit {
            self.step = -self.step.abs();
        }
        if self.position < -self.limit {
            self.step = self.step.abs();
        }

        self.position
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(0.01, 1.0)
    }
}

/// Angle in degrees, wrapped into `[0, 360)`.
#[derive(Clone, Debug)]
pub struct Spinner {
    pub angle: f32,
    step: f32,
}

impl Spinner {
    pub fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    pub fn tick(&mut self) -> f32 {
        self.angle = (self.angle + self.step).rem_euclid(360.0);
        self.angle
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Model matrix of cube `index` in the swarm at time `t` seconds.
pub fn swarm_model(t: f32, index: usize) -> Matrix4<f32> {
    let i = index as f32;

    let m = translate(
        identity(),
        (0.35 * t + i).sin() * 10.0,
        (0.52 * t + i).cos() * 10.0,
        (0.7 * t + i).sin() * 10.0,
    );

    let angle = 1.75 * t;
    let m = rotate(m, angle, Vector3::unit_y());
    let m = rotate(m, angle, Vector3::unit_x());
    rotate(m, angle, Vector3::unit_z())
}

/// Wall clock for the render loop.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Returns `(elapsed, delta)` in seconds and starts a new frame.
    pub fn tick(&mut self) -> (f32, f32) {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> (f32, f32) {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;

        (
            now.saturating_duration_since(self.start).as_secs_f32(),
            delta.as_secs_f32(),
        )
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;
    use std::time::Duration;

    #[test]
    fn oscillator_turns_at_limits() {
        let mut osc = Oscillator::new(0.5, 1.0);

        assert_eq!(osc.tick(), 0.5);
        assert_eq!(osc.tick(), 1.0);
        assert_eq!(osc.tick(), 1.5);
        assert!(osc.step() < 0.0);

        let mut min = f32::MAX;
        for _ in 0..20 {
            min = min.min(osc.tick());
        }

        assert_eq!(min, -1.5);
        assert!(osc.position <= 1.5 && osc.position >= -1.5);
    }

    #[test]
    fn spinner_wraps() {
        let mut spinner = Spinner::new(100.0);

        spinner.tick();
        spinner.tick();
        spinner.tick();
        assert_eq!(spinner.tick(), 40.0);

        let mut back = Spinner::new(-30.0);
        assert_eq!(back.tick(), 330.0);
    }

    #[test]
    fn swarm_at_time_zero() {
        let m = swarm_model(0.0, 0);
        let p = m * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert!((p.y - 10.0).abs() < 1e-5);
        assert!(p.x.abs() < 1e-5 && p.z.abs() < 1e-5);
    }

    #[test]
    fn swarm_members_differ() {
        let a = swarm_model(1.0, 0) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let b = swarm_model(1.0, 1) * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert_ne!(a, b);
    }

    #[test]
    fn clock_reports_delta() {
        let mut clock = FrameClock::new();
        let later = clock.start + Duration::from_millis(250);

        let (elapsed, delta) = clock.tick_at(later);
        assert!((elapsed - 0.25).abs() < 1e-6);
        assert!((delta - 0.25).abs() < 1e-6);

        let (elapsed, delta) = clock.tick_at(later + Duration::from_millis(100));
        assert!((elapsed - 0.35).abs() < 1e-6);
        assert!((delta - 0.1).abs() < 1e-6);
    }
}
