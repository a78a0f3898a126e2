//! Actuation mapping calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::clamp;
use vehicle_if::ActuationCmd;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The current drive direction of the vehicle.
///
/// The gear is recomputed every cycle from the sign of the reference speed,
/// so it always expresses the maneuver's intended direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gear {
    Forward,
    Reverse,
}

impl Gear {
    /// Derive the gear from a signed reference speed.
    pub fn from_ref_speed(ref_speed_ms: f64) -> Self {
        if ref_speed_ms < 0.0 {
            Gear::Reverse
        } else {
            Gear::Forward
        }
    }

    /// Sign of travel along the longitudinal axis, +1 forward, -1 reverse.
    pub fn sign(self) -> f64 {
        match self {
            Gear::Forward => 1.0,
            Gear::Reverse => -1.0,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Gear::Reverse
    }
}

impl Default for Gear {
    fn default() -> Self {
        Gear::Forward
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a normalised acceleration demand and steering demand into an
/// actuation command.
///
/// In the forward gear a positive acceleration demand opens the throttle
/// and a negative one applies the brake; in the reverse gear (negative
/// reference speed) the roles are mirrored, since the PID output is
/// expressed along the maneuver direction while throttle and brake act along
/// the gear direction. All pedal demands are clamped to [0, 1] and the
/// steering demand to [-1, +1].
pub fn map_actuation(acc_norm: f64, steer_norm: f64, ref_speed_ms: f64) -> ActuationCmd {
    let gear = Gear::from_ref_speed(ref_speed_ms);

    let (throttle, brake) = match gear {
        Gear::Reverse => ((-acc_norm).max(0.0), acc_norm.max(0.0)),
        Gear::Forward => (acc_norm.max(0.0), (-acc_norm).max(0.0)),
    };

    ActuationCmd {
        throttle: clamp(&throttle, &0.0, &1.0),
        brake: clamp(&brake, &0.0, &1.0),
        steer: clamp(&steer_norm, &-1.0, &1.0),
        reverse: gear.is_reverse(),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reverse_braking() {
        // Reversing with a positive (forward) acceleration demand means
        // braking.
        let cmd = map_actuation(0.5, 0.0, -2.0);
        assert_eq!(cmd.throttle, 0.0);
        assert_eq!(cmd.brake, 0.5);
        assert!(cmd.reverse);
        assert!(cmd.is_valid());
    }

    #[test]
    fn test_forward_braking() {
        let cmd = map_actuation(-0.3, 0.0, 3.0);
        assert_eq!(cmd.throttle, 0.0);
        assert!((cmd.brake - 0.3).abs() < 1e-12);
        assert!(!cmd.reverse);
        assert!(cmd.is_valid());
    }

    #[test]
    fn test_reverse_throttle() {
        // Reversing with a negative acceleration demand means accelerating
        // backwards.
        let cmd = map_actuation(-0.8, 0.0, -1.0);
        assert!((cmd.throttle - 0.8).abs() < 1e-12);
        assert_eq!(cmd.brake, 0.0);
        assert!(cmd.reverse);
    }

    #[test]
    fn test_demands_are_clamped() {
        let cmd = map_actuation(2.0, -1.5, 1.0);
        assert_eq!(cmd.throttle, 1.0);
        assert_eq!(cmd.brake, 0.0);
        assert_eq!(cmd.steer, -1.0);
        assert!(cmd.is_valid());
    }

    #[test]
    fn test_zero_reference_speed_is_forward() {
        let cmd = map_actuation(0.0, 0.0, 0.0);
        assert!(!cmd.reverse);
        assert_eq!(cmd.throttle, 0.0);
        assert_eq!(cmd.brake, 0.0);
    }
}
