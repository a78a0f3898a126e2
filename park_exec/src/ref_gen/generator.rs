//! Maneuver reference generation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use super::{RefGenError, ReferenceProfile};
use crate::planner::ParkingGeometry;
use crate::veh_geom::VehicleGeom;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Duration of the pauses during which the front wheels are turned to their
/// next reference angle while the vehicle is stationary.
///
/// Units: seconds
pub const DURATION_TO_TURN_WHEELS_S: f64 = 0.5;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Selectable reference generation formulation.
///
/// Parameter files select the policy by its lowercase name, e.g.
/// `ref_policy = "kinematic"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefPolicy {
    /// Piecewise-constant speed references (the default, driven by the
    /// cruise control loop).
    Kinematic,

    /// Piecewise-constant acceleration references with steering rates. An
    /// alternative formulation which the cruise control loop does not drive.
    Dynamic,
}

impl Default for RefPolicy {
    fn default() -> Self {
        RefPolicy::Kinematic
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic references for a whole maneuver: desired speed and steering
/// angle as functions of elapsed time. Both profiles share identical segment
/// boundaries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ManeuverRefs {
    /// Desired signed longitudinal speed.
    ///
    /// Units: meters/second, negative when reversing
    pub speeds_ms: ReferenceProfile,

    /// Desired steering angle.
    ///
    /// Units: degrees, positive towards the spot side
    pub steers_deg: ReferenceProfile,
}

/// Dynamic references for a whole maneuver: desired acceleration and
/// steering rate as functions of elapsed time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DynManeuverRefs {
    /// Desired longitudinal acceleration.
    ///
    /// Units: meters/second^2
    pub accs_ms2: ReferenceProfile,

    /// Desired steering rate.
    ///
    /// Units: degrees/second
    pub steer_rates_degs: ReferenceProfile,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate the kinematic speed and steering references for a planned
/// maneuver.
///
/// The maneuver is an ordered concatenation of legs, each appending one
/// segment to both profiles:
///
/// 1. an idle pause letting any initial wheel turn settle,
/// 2. the longitudinal approach from the start position to the start of the
///    first turn,
/// 3. the first arc in reverse at full steering towards the spot,
/// 4. the second arc in reverse at full opposite steering,
/// 5. a forward centering leg inside the spot,
///
/// with a stationary wheel-turn pause between each driving leg and a final
/// zero-duration idle sentinel.
pub fn generate_kinematic(
    geom: &ParkingGeometry,
    veh: &VehicleGeom,
    vmax_ms: f64,
    spot_length_m: f64,
) -> Result<ManeuverRefs, RefGenError> {
    if vmax_ms <= 0.0 {
        return Err(RefGenError::NonPositiveSpeed(vmax_ms));
    }
    let vmax_ms = vmax_ms.abs();

    let mut refs = ManeuverRefs::default();
    let speeds = &mut refs.speeds_ms;
    let steers = &mut refs.steers_deg;

    // Idle the car while the wheels settle to centre
    speeds.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    steers.add(0.0, DURATION_TO_TURN_WHEELS_S)?;

    // Approach: initial position -> position for starting the 1st turn. The
    // speed sign is chosen to reduce the gap along X.
    let t = (geom.xi_m - geom.xs_m).abs() / vmax_ms;
    let approach_speed_ms = if geom.xi_m > geom.xs_m {
        -vmax_ms
    } else {
        vmax_ms
    };
    speeds.add(approach_speed_ms, t)?;
    steers.add(0.0, t)?;

    // Pause the car to turn the wheels towards the spot
    speeds.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    steers.add(veh.max_steer_deg, DURATION_TO_TURN_WHEELS_S)?;

    // 1st turn: start position -> tangency point, in reverse
    let t_arc = geom.min_central_angle_rad * veh.rwmin_m / vmax_ms;
    speeds.add(-vmax_ms, t_arc)?;
    steers.add(veh.max_steer_deg, t_arc)?;

    // Pause the car to turn the wheels to the opposite side
    speeds.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    steers.add(-veh.max_steer_deg, DURATION_TO_TURN_WHEELS_S)?;

    // 2nd turn: tangency point -> final position, same arc by symmetry
    speeds.add(-vmax_ms, t_arc)?;
    steers.add(-veh.max_steer_deg, t_arc)?;

    // Pause the car to centre the wheels
    speeds.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    steers.add(0.0, DURATION_TO_TURN_WHEELS_S)?;

    // Centering in the parking spot
    let t = ((spot_length_m - veh.length_m) / 2.0).abs() / vmax_ms;
    speeds.add(vmax_ms, t)?;
    steers.add(0.0, t)?;

    // Terminal idle sentinel: no more references, hold idle
    speeds.add(0.0, 0.0)?;
    steers.add(0.0, 0.0)?;

    debug!(
        "Kinematic references generated: {} segments, {:.2} s total",
        refs.speeds_ms.len(),
        refs.speeds_ms.end_time_s()
    );

    Ok(refs)
}

/// Generate the dynamic acceleration and steering-rate references for a
/// planned maneuver.
///
/// Each driving leg becomes an accelerate/coast/decelerate triple derived
/// from the kinematic equations `v = a t`, `x = a t^2 / 2`, and each wheel
/// turn becomes a constant steering-rate segment. A leg too short to reach
/// the cruise speed produces a negative coast duration, which is rejected as
/// an invalid configuration.
pub fn generate_dynamic(
    geom: &ParkingGeometry,
    veh: &VehicleGeom,
    vmax_ms: f64,
    ades_ms2: f64,
    spot_length_m: f64,
) -> Result<DynManeuverRefs, RefGenError> {
    if vmax_ms <= 0.0 {
        return Err(RefGenError::NonPositiveSpeed(vmax_ms));
    }
    if ades_ms2 <= 0.0 {
        return Err(RefGenError::NonPositiveAccel(ades_ms2));
    }
    let vmax_ms = vmax_ms.abs();
    let ades_ms2 = ades_ms2.abs();

    // Time and distance to reach the cruise speed
    let t1 = vmax_ms / ades_ms2;
    let d1 = 0.5 * ades_ms2 * t1 * t1;

    // Coast durations for the approach and the two arcs
    let di = (geom.xi_m - geom.xs_m).abs();
    let ti = (di - 2.0 * d1) / vmax_ms;
    let d2 = geom.min_central_angle_rad * veh.rwmin_m;
    let t2 = (d2 - 2.0 * d1) / vmax_ms;

    // Centering leg, short enough to be a bang-bang accelerate/decelerate
    let d3 = ((spot_length_m - veh.length_m) / 2.0).abs();
    let t3 = d3 / vmax_ms;

    // Steering rate for the wheel-turn pauses
    let aw_degs = veh.max_steer_deg / DURATION_TO_TURN_WHEELS_S;

    let mut refs = DynManeuverRefs::default();
    let accs = &mut refs.accs_ms2;
    let rates = &mut refs.steer_rates_degs;

    // Initial idle
    accs.add(0.0, 1.0)?;
    rates.add(0.0, 1.0)?;

    // Approach: accelerate, coast, decelerate
    let acc = if geom.xi_m >= geom.xs_m {
        -ades_ms2
    } else {
        ades_ms2
    };
    accs.add(acc, t1)?;
    rates.add(0.0, t1)?;
    accs.add(0.0, ti)?;
    rates.add(0.0, ti)?;
    accs.add(-acc, t1)?;
    rates.add(0.0, t1)?;

    // Turn the wheels towards the spot
    accs.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    rates.add(aw_degs, DURATION_TO_TURN_WHEELS_S)?;

    // 1st turn, in reverse
    accs.add(-ades_ms2, t1)?;
    rates.add(0.0, t1)?;
    accs.add(0.0, t2)?;
    rates.add(0.0, t2)?;
    accs.add(ades_ms2, t1)?;
    rates.add(0.0, t1)?;

    // Turn the wheels to the opposite side
    accs.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    rates.add(-aw_degs, DURATION_TO_TURN_WHEELS_S)?;

    // 2nd turn, in reverse
    accs.add(-ades_ms2, t1)?;
    rates.add(0.0, t1)?;
    accs.add(0.0, t2)?;
    rates.add(0.0, t2)?;
    accs.add(ades_ms2, t1)?;
    rates.add(0.0, t1)?;

    // Centre the wheels
    accs.add(0.0, DURATION_TO_TURN_WHEELS_S)?;
    rates.add(-aw_degs, DURATION_TO_TURN_WHEELS_S)?;

    // Centering in the parking spot
    accs.add(ades_ms2, t3)?;
    rates.add(0.0, t3)?;
    accs.add(-ades_ms2, t3)?;
    rates.add(0.0, t3)?;

    // Terminal idle sentinel
    accs.add(0.0, 0.0)?;
    rates.add(0.0, 0.0)?;

    debug!(
        "Dynamic references generated: {} segments, {:.2} s total",
        refs.accs_ms2.len(),
        refs.accs_ms2.end_time_s()
    );

    Ok(refs)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::planner::plan_parallel;
    use crate::veh_geom::{VehicleDims, VehicleGeom};
    use nalgebra::Point2;

    fn c3_geom() -> VehicleGeom {
        VehicleGeom::derive(&VehicleDims {
            width_m: 1.728,
            length_m: 3.941,
            wheelbase_m: 2.466,
            front_overhang_m: 0.815,
            max_steer_deg: 30.0,
        })
    }

    fn planned() -> (VehicleGeom, ParkingGeometry) {
        let veh = c3_geom();
        let geom = plan_parallel(
            &veh,
            &Point2::new(2.0, 0.0),
            &Point2::new(6.0, -2.0),
            &Point2::new(0.0, -2.0),
        )
        .unwrap();
        (veh, geom)
    }

    #[test]
    fn test_kinematic_leg_structure() {
        let (veh, geom) = planned();
        let refs = generate_kinematic(&geom, &veh, 1.0, 6.0).unwrap();

        // Nine legs: idle, approach, pause, arc, pause, arc, pause,
        // centering, sentinel
        assert_eq!(refs.speeds_ms.len(), 9);
        assert_eq!(refs.steers_deg.len(), 9);

        // Profiles share segment boundaries
        assert!((refs.speeds_ms.end_time_s() - refs.steers_deg.end_time_s()).abs() < 1e-12);

        // Total duration is the sum of all leg durations
        let t_arc = geom.min_central_angle_rad * veh.rwmin_m / 1.0;
        let t_approach = (geom.xi_m - geom.xs_m).abs() / 1.0;
        let t_centre = ((6.0 - veh.length_m) / 2.0).abs() / 1.0;
        let expected = 4.0 * DURATION_TO_TURN_WHEELS_S + t_approach + 2.0 * t_arc + t_centre;
        assert!((refs.speeds_ms.end_time_s() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_kinematic_reference_values() {
        let (veh, geom) = planned();
        let vmax = 1.0;
        let refs = generate_kinematic(&geom, &veh, vmax, 6.0).unwrap();

        // During the initial pause both references are idle
        assert_eq!(refs.speeds_ms.get(0.1), 0.0);
        assert_eq!(refs.steers_deg.get(0.1), 0.0);

        // The approach drives forwards (start is behind the turn start here)
        assert!(geom.xs_m > geom.xi_m);
        assert_eq!(refs.speeds_ms.get(0.6), vmax);

        // During the first arc the car reverses at full steering
        let t_approach = (geom.xi_m - geom.xs_m).abs() / vmax;
        let t_in_arc = 2.0 * DURATION_TO_TURN_WHEELS_S + t_approach + 0.1;
        assert_eq!(refs.speeds_ms.get(t_in_arc), -vmax);
        assert_eq!(refs.steers_deg.get(t_in_arc), veh.max_steer_deg);

        // Past the end everything is idle
        let t_end = refs.speeds_ms.end_time_s();
        assert_eq!(refs.speeds_ms.get(t_end + 1.0), 0.0);
        assert_eq!(refs.steers_deg.get(t_end + 1.0), 0.0);
    }

    #[test]
    fn test_kinematic_rejects_non_positive_speed() {
        let (veh, geom) = planned();
        assert!(matches!(
            generate_kinematic(&geom, &veh, 0.0, 6.0),
            Err(RefGenError::NonPositiveSpeed(_))
        ));
        assert!(matches!(
            generate_kinematic(&geom, &veh, -1.0, 6.0),
            Err(RefGenError::NonPositiveSpeed(_))
        ));
    }

    #[test]
    fn test_dynamic_profiles_share_boundaries() {
        let (veh, geom) = planned();
        let refs = generate_dynamic(&geom, &veh, 1.0, 1.0, 6.0).unwrap();

        assert!((refs.accs_ms2.end_time_s() - refs.steer_rates_degs.end_time_s()).abs() < 1e-9);
        assert!(refs.accs_ms2.end_time_s() > 0.0);
    }

    #[test]
    fn test_dynamic_rejects_too_short_legs() {
        // A cruise speed too high for the arc length gives a negative coast
        // duration, which must fail fast rather than silently clamp.
        let (veh, geom) = planned();
        assert!(matches!(
            generate_dynamic(&geom, &veh, 10.0, 1.0, 6.0),
            Err(RefGenError::InvalidDuration(_))
        ));
    }
}
