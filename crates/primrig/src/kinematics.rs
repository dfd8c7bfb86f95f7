//! Scalar vehicle motion and its per-frame integration.
//!
//! Pure functions over `f64`; no rendering or Bevy types.

use crate::config::Handling;

/// Clamp `n` into the interval spanned by `a` and `b`.
///
/// The bounds may be given in either order, so `clamp(a, n, b)` equals
/// `clamp(b, n, a)`. This lets steering limits be written left-then-right
/// even though left is the larger number.
pub fn clamp(a: f64, n: f64, b: f64) -> f64 {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    n.max(low).min(high)
}

/// Wrap a heading into `[0, 360)` by whole turns.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // A tiny negative value can round up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// How heading responds to steering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeadingRule {
    /// Turn rate is `steering * speed`: no turning on the spot.
    SpeedProportional,
    /// Turn rate is `steering * gain`, independent of speed.
    SteeringOnly {
        /// Degrees per second per degree of steering.
        gain: f64,
    },
}

impl HeadingRule {
    /// Heading change in degrees over `dt`.
    pub fn heading_delta(self, steering: f64, speed: f64, dt: f64) -> f64 {
        match self {
            HeadingRule::SpeedProportional => dt * steering * speed,
            HeadingRule::SteeringOnly { gain } => dt * steering * gain,
        }
    }
}

/// Position, heading, speed and steering of one vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    /// World X position (m).
    pub x: f64,
    /// World Z position (m).
    pub z: f64,
    /// Heading in degrees, kept in `[0, 360)` by [`KinematicState::integrate`].
    pub rotation: f64,
    /// Signed speed (m/s).
    pub speed: f64,
    /// Signed steering angle (degrees, positive is left).
    pub steering: f64,
}

impl KinematicState {
    /// A state at rest at the given position and heading.
    pub fn at(x: f64, z: f64, rotation: f64) -> Self {
        Self {
            x,
            z,
            rotation: normalize_heading(rotation),
            ..Self::default()
        }
    }

    /// Advance the state by `dt` seconds.
    ///
    /// Clamps speed and steering, moves along the current heading, turns by
    /// `rule`, wraps the heading and finally snaps values inside the
    /// deadzone to zero.
    pub fn integrate(&mut self, dt: f64, handling: &Handling, rule: HeadingRule) {
        self.speed = clamp(
            handling.max_backward_speed,
            self.speed,
            handling.max_forward_speed,
        );
        self.steering = clamp(
            handling.max_left_steering,
            self.steering,
            handling.max_right_steering,
        );

        let heading = self.rotation.to_radians();
        self.x += self.speed * dt * heading.cos();
        self.z += self.speed * dt * heading.sin();

        self.rotation += rule.heading_delta(self.steering, self.speed, dt);
        self.rotation = normalize_heading(self.rotation);

        if self.speed.abs() < handling.deadzone {
            self.speed = 0.0;
        }
        if self.steering.abs() < handling.deadzone {
            self.steering = 0.0;
        }
    }

    /// Low-pass speed and steering toward the driver's intent, then integrate.
    pub fn integrate_toward(
        &mut self,
        target_speed: f64,
        target_steering: f64,
        dt: f64,
        handling: &Handling,
        rule: HeadingRule,
    ) {
        self.speed += (target_speed - self.speed) * dt * handling.speed_response;
        self.steering += (target_steering - self.steering) * dt * handling.steering_response;

        self.integrate(dt, handling, rule);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EPS: f64 = 1e-9;

    fn ground() -> HeadingRule {
        HeadingRule::SpeedProportional
    }

    fn rotor() -> HeadingRule {
        HeadingRule::SteeringOnly { gain: 20.0 }
    }

    #[test]
    fn test_clamp_reversed_bounds() {
        assert_eq!(clamp(15.0, 40.0, -15.0), 15.0);
        assert_eq!(clamp(15.0, -40.0, -15.0), -15.0);
        assert_eq!(clamp(15.0, 3.0, -15.0), 3.0);
        assert_eq!(clamp(-4.0, 12.0, 10.0), 10.0);
    }

    #[test]
    fn test_normalize_heading_multiple_turns() {
        assert!((normalize_heading(725.0) - 5.0).abs() < EPS);
        assert!((normalize_heading(-725.0) - 355.0).abs() < EPS);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(-1e-20), 0.0);
    }

    #[test]
    fn test_normalize_heading_huge_values() {
        for degrees in [1e20, -1e20, 3.6e12, f64::MAX, -f64::MAX] {
            let wrapped = normalize_heading(degrees);
            assert!((0.0..360.0).contains(&wrapped), "{degrees} -> {wrapped}");
        }
        assert_eq!(KinematicState::at(0.0, 0.0, 1e20).rotation, 1e20_f64.rem_euclid(360.0));
    }

    #[test]
    fn test_integrate_with_extreme_handling() {
        let handling = Handling {
            max_forward_speed: 1e300,
            ..Handling::default()
        };
        assert!(handling.validate().is_ok());
        let mut state = KinematicState {
            speed: 1e300,
            steering: 15.0,
            ..KinematicState::default()
        };

        state.integrate(1.0, &handling, ground());

        assert!(state.rotation >= 0.0 && state.rotation < 360.0);
    }

    #[test]
    fn test_integrate_toward_from_rest_ground() {
        let handling = Handling::default();
        let mut state = KinematicState::default();

        state.integrate_toward(5.0, 10.0, 1.0, &handling, ground());

        // 0 + 5 * 4 = 20 clamps to 10; 0 + 10 * 6 = 60 clamps to 15.
        assert_eq!(state.speed, 10.0);
        assert_eq!(state.steering, 15.0);
        assert!((state.x - 10.0).abs() < EPS);
        assert!(state.z.abs() < EPS);
        assert!((state.rotation - 150.0).abs() < EPS);
    }

    #[test]
    fn test_integrate_toward_from_rest_rotor() {
        let handling = Handling::default();
        let mut state = KinematicState::default();

        state.integrate_toward(5.0, 10.0, 1.0, &handling, rotor());

        assert!((state.x - 10.0).abs() < EPS);
        assert!((state.rotation - 300.0).abs() < EPS);
    }

    #[test]
    fn test_position_follows_heading() {
        let handling = Handling::default();
        let mut state = KinematicState {
            rotation: 90.0,
            speed: 2.0,
            ..KinematicState::default()
        };

        state.integrate(0.5, &handling, ground());

        assert!(state.x.abs() < EPS);
        assert!((state.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reverse_speed_clamped() {
        let handling = Handling::default();
        let mut state = KinematicState {
            speed: -30.0,
            ..KinematicState::default()
        };

        state.integrate(0.0, &handling, ground());

        assert_eq!(state.speed, -4.0);
    }

    #[test]
    fn test_deadzone_snaps_to_zero() {
        let handling = Handling::default();
        let mut state = KinematicState {
            speed: 0.09,
            steering: -0.05,
            ..KinematicState::default()
        };

        state.integrate(0.01, &handling, ground());

        assert_eq!(state.speed, 0.0);
        assert_eq!(state.steering, 0.0);
    }

    #[test]
    fn test_ground_does_not_turn_in_place() {
        let handling = Handling::default();
        let mut state = KinematicState {
            rotation: 42.0,
            steering: 15.0,
            ..KinematicState::default()
        };

        state.integrate(1.0, &handling, ground());

        assert_eq!(state.rotation, 42.0);
    }

    #[test]
    fn test_rotor_turns_in_place() {
        let handling = Handling::default();
        let mut state = KinematicState {
            steering: -10.0,
            ..KinematicState::default()
        };

        state.integrate(0.5, &handling, rotor());

        // -10 * 20 * 0.5 = -100, wrapped.
        assert!((state.rotation - 260.0).abs() < EPS);
        assert_eq!(state.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_symmetric(a in -1e6..1e6f64, n in -1e6..1e6f64, b in -1e6..1e6f64) {
            prop_assert_eq!(clamp(a, n, b), clamp(b, n, a));
        }

        #[test]
        fn prop_heading_stays_normalized(
            rotation in -2000.0..2000.0f64,
            speed in -50.0..50.0f64,
            steering in -50.0..50.0f64,
            dt in 0.0..2.0f64,
            speed_scaled in any::<bool>(),
        ) {
            let handling = Handling::default();
            let rule = if speed_scaled { ground() } else { rotor() };
            let mut state = KinematicState { x: 0.0, z: 0.0, rotation, speed, steering };

            state.integrate(dt, &handling, rule);

            prop_assert!(state.rotation >= 0.0 && state.rotation < 360.0);
            prop_assert!(state.speed >= -4.0 && state.speed <= 10.0);
            prop_assert!(state.steering >= -15.0 && state.steering <= 15.0);
        }

        #[test]
        fn prop_deadzone_exact_zero(
            speed in -0.0999..0.0999f64,
            steering in -0.0999..0.0999f64,
            dt in 0.0..1.0f64,
        ) {
            let handling = Handling::default();
            let mut state = KinematicState { speed, steering, ..KinematicState::default() };

            state.integrate(dt, &handling, ground());

            prop_assert_eq!(state.speed, 0.0);
            prop_assert_eq!(state.steering, 0.0);
        }

        #[test]
        fn prop_integrate_toward_contracts(
            target_speed in prop_oneof![-4.0..-0.2f64, 0.2..10.0f64],
            target_steering in prop_oneof![-15.0..-0.2f64, 0.2..15.0f64],
            dt in 0.001..(1.0 / 6.0),
        ) {
            let handling = Handling::default();
            let mut state = KinematicState::default();

            for _ in 0..50 {
                let speed_gap = target_speed - state.speed;
                let steering_gap = target_steering - state.steering;

                state.integrate_toward(target_speed, target_steering, dt, &handling, ground());

                let new_speed_gap = target_speed - state.speed;
                let new_steering_gap = target_steering - state.steering;
                prop_assert!(new_speed_gap.abs() <= speed_gap.abs() + EPS);
                prop_assert!(new_steering_gap.abs() <= steering_gap.abs() + EPS);
                // No overshoot: the remaining gap never changes sign.
                prop_assert!(new_speed_gap * speed_gap >= -EPS);
                prop_assert!(new_steering_gap * steering_gap >= -EPS);
            }
        }
    }
}
