//! Patroller pose easing.
//!
//! Lean, crouch, and ski spread each ease linearly toward an input-driven
//! target every step. The values only feed the sprite renderer; nothing in
//! the simulation reads them back.

use super::input::Controls;

/// Radians of ski/body lean at full left or right input.
pub const LEAN_ANGLE: f64 = 0.35;
/// Ski spread multiplier while braking (up held): a half-snowplow stance.
pub const BRAKE_SPREAD: f64 = 1.35;
/// Per-step easing rate toward the target value.
pub const EASE_RATE: f64 = 0.18;

fn ease(value: f64, target: f64, rate: f64) -> f64 {
    value + (target - value) * rate
}

/// Decorative pose state. `lean` is signed radians, `crouch` runs 0..=1,
/// `ski_spread` is a multiplier on the resting ski separation.
#[derive(Clone, Copy, Debug)]
pub struct PatrolPose {
    pub lean: f64,
    pub crouch: f64,
    pub ski_spread: f64,
}

impl Default for PatrolPose {
    fn default() -> Self {
        Self {
            lean: 0.0,
            crouch: 0.0,
            ski_spread: 1.0,
        }
    }
}

impl PatrolPose {
    /// Ease every value one step toward the targets the held controls imply:
    /// lean follows horizontal input, crouch follows the downhill tuck, and
    /// the skis spread while braking.
    pub fn step(&mut self, controls: &Controls) {
        self.lean = ease(self.lean, controls.horizontal() * LEAN_ANGLE, EASE_RATE);
        self.crouch = ease(self.crouch, if controls.down { 1.0 } else { 0.0 }, EASE_RATE);
        let spread_target = if controls.up { BRAKE_SPREAD } else { 1.0 };
        self.ski_spread = ease(self.ski_spread, spread_target, EASE_RATE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slope::input::Control;

    #[test]
    fn lean_eases_toward_held_direction() {
        let mut pose = PatrolPose::default();
        let mut controls = Controls::default();
        controls.set(Control::Right, true);

        let mut prev = pose.lean;
        for _ in 0..50 {
            pose.step(&controls);
            assert!(pose.lean > prev, "lean should strictly approach target");
            assert!(pose.lean <= LEAN_ANGLE);
            prev = pose.lean;
        }
        assert!((pose.lean - LEAN_ANGLE).abs() < 1e-3, "converges near target");
    }

    #[test]
    fn lean_returns_to_neutral_on_release() {
        let mut pose = PatrolPose::default();
        let mut controls = Controls::default();
        controls.set(Control::Left, true);
        for _ in 0..50 {
            pose.step(&controls);
        }
        assert!(pose.lean < 0.0);

        controls.set(Control::Left, false);
        for _ in 0..80 {
            pose.step(&controls);
        }
        assert!(pose.lean.abs() < 1e-3);
    }

    #[test]
    fn crouch_follows_downhill_tuck() {
        let mut pose = PatrolPose::default();
        let mut controls = Controls::default();
        controls.set(Control::Down, true);
        for _ in 0..60 {
            pose.step(&controls);
        }
        assert!(pose.crouch > 0.99);
        assert!(pose.crouch <= 1.0);
    }

    #[test]
    fn skis_spread_while_braking() {
        let mut pose = PatrolPose::default();
        let mut controls = Controls::default();
        controls.set(Control::Up, true);
        for _ in 0..60 {
            pose.step(&controls);
        }
        assert!((pose.ski_spread - BRAKE_SPREAD).abs() < 1e-2);

        controls.set(Control::Up, false);
        for _ in 0..80 {
            pose.step(&controls);
        }
        assert!((pose.ski_spread - 1.0).abs() < 1e-2);
    }

    #[test]
    fn idle_pose_is_a_fixed_point() {
        let mut pose = PatrolPose::default();
        let controls = Controls::default();
        pose.step(&controls);
        assert_eq!(pose.lean, 0.0);
        assert_eq!(pose.crouch, 0.0);
        assert_eq!(pose.ski_spread, 1.0);
    }
}
