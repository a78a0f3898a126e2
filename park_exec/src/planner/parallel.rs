//! One-trial parallel maneuver geometry

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use nalgebra::{distance, Point2};
use serde::Serialize;

// Internal
use super::PlannerError;
use crate::veh_geom::VehicleGeom;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The planned geometry of a one-trial parallel maneuver.
///
/// All positions are rear-axle positions in the parking frame, in which X is
/// the longitudinal axis along the row of parked vehicles and Y the lateral
/// axis. Point naming follows the maneuver description: `i` initial, `f`
/// final, `c1`/`c2` the centres of the two turning circles, `t` the tangency
/// point between them, and `s` the position at which the first turn starts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParkingGeometry {
    /// Initial rear-axle position.
    ///
    /// Units: meters
    pub xi_m: f64,
    pub yi_m: f64,

    /// Target position at the back of the spot: the rear bumper rests at
    /// this X when the turns complete, so the rear axle ends at
    /// `xf_m + back_overhang_m` (which is also `xc1_m`), at height `yf_m`.
    ///
    /// Units: meters
    pub xf_m: f64,
    pub yf_m: f64,

    /// Centre of the terminal (second) turning circle.
    ///
    /// Units: meters
    pub xc1_m: f64,
    pub yc1_m: f64,

    /// Centre of the initial (first) turning circle.
    ///
    /// Units: meters
    pub xc2_m: f64,
    pub yc2_m: f64,

    /// Tangency point between the two circles.
    ///
    /// Units: meters
    pub xt_m: f64,
    pub yt_m: f64,

    /// Position at which the first turn starts.
    ///
    /// Units: meters
    pub xs_m: f64,
    pub ys_m: f64,

    /// Central angle swept in each of the two turns.
    ///
    /// Units: radians
    pub min_central_angle_rad: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Plan a one-trial parallel maneuver.
///
/// # Inputs
/// - `veh`: the vehicle's derived turning geometry.
/// - `rear_axle`: the current rear-axle position.
/// - `front_gap`/`back_gap`: the boundaries of the parking gap, i.e. the
///   closest obstacle points ahead of and behind the spot. The back gap
///   boundary is the target rear-axle position.
///
/// # Outputs
/// - On success the filled [`ParkingGeometry`].
/// - [`PlannerError::SpotTooSmall`] when the gap cannot take a one-trial
///   maneuver, [`PlannerError::LateralOffsetTooLarge`] when the start lane
///   is out of lateral range. No geometry is produced on failure.
pub fn plan_parallel(
    veh: &VehicleGeom,
    rear_axle: &Point2<f64>,
    front_gap: &Point2<f64>,
    back_gap: &Point2<f64>,
) -> Result<ParkingGeometry, PlannerError> {
    // Feasibility gate: below Lmin the two-arc maneuver cannot complete
    // without back-and-forth corrections.
    let gap_m = distance(front_gap, back_gap);
    if gap_m < veh.lmin_m {
        return Err(PlannerError::SpotTooSmall {
            gap_m,
            lmin_m: veh.lmin_m,
        });
    }

    let (xi_m, yi_m) = (rear_axle.x, rear_axle.y);
    let (xf_m, yf_m) = (back_gap.x, back_gap.y);

    // C1: centre of the terminal turn, offset from the target by the back
    // overhang longitudinally and the planning turning radius laterally.
    let xc1_m = xf_m + veh.back_overhang_m;
    let yc1_m = yf_m + veh.rwmin_m;

    // C2: centre of the initial turn. Its X-coordinate cannot be computed
    // until the tangency point is known.
    let yc2_m = yi_m - veh.rwmin_m;

    // Tangency point of C1 and C2: midway in Y between the two centres since
    // the circles have equal radii.
    let yt_m = 0.5 * (yc1_m + yc2_m);
    let d = veh.rwmin_m.powi(2) - (yt_m - yc1_m).powi(2);
    if d < 0.0 {
        return Err(PlannerError::LateralOffsetTooLarge);
    }
    let xt_m = xc1_m + d.sqrt();

    // Position at which the first turn starts, mirror of C1 through T.
    let xs_m = 2.0 * xt_m - xc1_m;
    let ys_m = yi_m;
    let xc2_m = xs_m;

    // Central angle swept by each turn, identical for both by symmetry.
    let min_central_angle_rad = (xt_m - xc1_m).atan2(yc1_m - yt_m);

    let geom = ParkingGeometry {
        xi_m,
        yi_m,
        xf_m,
        yf_m,
        xc1_m,
        yc1_m,
        xc2_m,
        yc2_m,
        xt_m,
        yt_m,
        xs_m,
        ys_m,
        min_central_angle_rad,
    };

    info!(
        "Parallel maneuver planned: gap {:.3} m (min {:.3} m), central angle {:.1} deg",
        gap_m,
        veh.lmin_m,
        min_central_angle_rad.to_degrees()
    );
    debug!("Waypoints: {:#?}", geom);

    Ok(geom)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::veh_geom::{VehicleDims, VehicleGeom};

    fn c3_geom() -> VehicleGeom {
        VehicleGeom::derive(&VehicleDims {
            width_m: 1.728,
            length_m: 3.941,
            wheelbase_m: 2.466,
            front_overhang_m: 0.815,
            max_steer_deg: 30.0,
        })
    }

    #[test]
    fn test_feasibility_gate() {
        let veh = c3_geom();
        let start = Point2::new(2.0, 0.0);
        let back = Point2::new(0.0, -2.0);

        // Just below Lmin: rejected
        let front = Point2::new(veh.lmin_m - 1e-3, -2.0);
        match plan_parallel(&veh, &start, &front, &back) {
            Err(PlannerError::SpotTooSmall { .. }) => (),
            other => panic!("expected SpotTooSmall, got {:?}", other.map(|_| ())),
        }

        // Exactly Lmin: accepted
        let front = Point2::new(veh.lmin_m, -2.0);
        assert!(plan_parallel(&veh, &start, &front, &back).is_ok());
    }

    #[test]
    fn test_five_meter_spot_is_below_c3_minimum() {
        // The C3's one-trial minimum is ~5.71 m, a standard 5 m spot must be
        // rejected.
        let veh = c3_geom();
        let geom = plan_parallel(
            &veh,
            &Point2::new(2.0, 0.0),
            &Point2::new(5.0, -2.0),
            &Point2::new(0.0, -2.0),
        );
        assert!(matches!(geom, Err(PlannerError::SpotTooSmall { .. })));
    }

    #[test]
    fn test_tangency_invariant() {
        let veh = c3_geom();
        let geom = plan_parallel(
            &veh,
            &Point2::new(2.0, 0.0),
            &Point2::new(6.0, -2.0),
            &Point2::new(0.0, -2.0),
        )
        .unwrap();

        // The tangency point lies on circle 1
        let r2 = (geom.xt_m - geom.xc1_m).powi(2) + (geom.yt_m - geom.yc1_m).powi(2);
        assert!((r2 - veh.rwmin_m.powi(2)).abs() < 1e-9);

        // And on circle 2
        let r2 = (geom.xt_m - geom.xc2_m).powi(2) + (geom.yt_m - geom.yc2_m).powi(2);
        assert!((r2 - veh.rwmin_m.powi(2)).abs() < 1e-6);

        // The central angle is an actual turn, less than a quarter circle
        assert!(geom.min_central_angle_rad > 0.0);
        assert!(geom.min_central_angle_rad < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_lateral_offset_too_large() {
        let veh = c3_geom();

        // Start lane more than four turning radii above the spot: the
        // circles cannot touch.
        let geom = plan_parallel(
            &veh,
            &Point2::new(2.0, 4.0 * veh.rwmin_m + 1.0),
            &Point2::new(6.0, 0.0),
            &Point2::new(0.0, 0.0),
        );
        assert!(matches!(geom, Err(PlannerError::LateralOffsetTooLarge)));
    }
}
