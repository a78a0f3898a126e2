//! Closed loop test of the full parking maneuver.
//!
//! Plans the demo scenario, then drives the cruise control outputs into the
//! kinematic bicycle plant until the maneuver completes. Tolerances are
//! generous since the speed regulator lags the reference at each leg
//! boundary.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;

use park_lib::{
    cruise_ctrl::{CruiseCtrl, InputData, Params},
    planner::PlannerError,
    sim_vehicle::{SimParams, SimVehicle},
    veh_geom::{VehicleDims, VehicleGeom},
};
use util::module::State;
use vehicle_if::{ActuationSink, VehicleSensors};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const DT_S: f64 = 0.05;
const MAX_CYCLES: usize = 10_000;

// ---------------------------------------------------------------------------
// HELPERS
// ---------------------------------------------------------------------------

fn c3_dims() -> VehicleDims {
    VehicleDims {
        width_m: 1.728,
        length_m: 3.941,
        wheelbase_m: 2.466,
        front_overhang_m: 0.815,
        max_steer_deg: 30.0,
    }
}

fn ctrl_params() -> Params {
    Params {
        k_p: 2.0,
        k_i: 1.0,
        k_d: 1.0,
        integ_sat_lim: 0.7,
        pid_time_scaled: false,
        vmax_ms: 1.0,
        ades_ms2: 1.0,
        spot_length_m: 6.0,
        plat_max_acc_ms2: 3.0,
        plat_max_steer_deg: 70.0,
        ..Params::default()
    }
}

fn sim_params() -> SimParams {
    SimParams {
        wheelbase_m: 2.466,
        max_acc_ms2: 3.0,
        max_brake_ms2: 5.0,
        // Full lock matches the steering normalisation full scale
        max_steer_deg: 70.0,
        max_speed_ms: 10.0,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[test]
fn test_full_maneuver_parks_the_vehicle() {
    let veh = VehicleGeom::derive(&c3_dims());
    let mut ctrl = CruiseCtrl::with_params(ctrl_params(), veh).unwrap();
    let mut plant = SimVehicle::new(sim_params(), Point2::new(2.0, 0.0), 0.0);

    ctrl.plan(
        &plant.rear_axle_position(),
        &Point2::new(6.0, -2.0),
        &Point2::new(0.0, -2.0),
    )
    .unwrap();

    let geom = *ctrl.geometry().unwrap();

    let mut cycles = 0;
    loop {
        let input = InputData {
            dt_s: DT_S,
            speed_ms: plant.longitudinal_speed_ms(),
        };
        let (cmd, report) = ctrl.proc(&input).unwrap();
        assert!(cmd.is_valid(), "invalid actuation at t = {}", report.time_s);

        plant.apply_actuation(&cmd);
        plant.step(DT_S);

        if report.idle {
            break;
        }

        cycles += 1;
        assert!(cycles < MAX_CYCLES, "maneuver never reported completion");
    }

    // The plant should end up near the planned parked position: the second
    // arc ends with the rear axle below the terminal circle centre, then
    // the centering leg drives forwards by half the spare spot length
    let target = Point2::new(geom.xc1_m + (6.0 - veh.length_m) / 2.0, geom.yf_m);
    let final_pos = plant.rear_axle_position();
    let pos_err_m = nalgebra::distance(&final_pos, &target);
    assert!(
        pos_err_m < 1.5,
        "final rear axle ({:.3}, {:.3}) is {:.3} m from target ({:.3}, {:.3})",
        final_pos.x,
        final_pos.y,
        pos_err_m,
        target.x,
        target.y
    );
    assert!(
        plant.heading_rad().abs() < 0.4,
        "final heading {:.3} rad is not parallel to the lane",
        plant.heading_rad()
    );

    // The vehicle must have moved down into the parking lane
    assert!(final_pos.y < -0.5);
}

#[test]
fn test_maneuver_stays_within_reference_duration() {
    let veh = VehicleGeom::derive(&c3_dims());
    let mut ctrl = CruiseCtrl::with_params(ctrl_params(), veh).unwrap();

    ctrl.plan(
        &Point2::new(2.0, 0.0),
        &Point2::new(6.0, -2.0),
        &Point2::new(0.0, -2.0),
    )
    .unwrap();

    // With a fixed dt the module must go idle within one tick of the total
    // reference duration
    let mut last_active_s = 0.0;
    for _ in 0..MAX_CYCLES {
        let (_, report) = ctrl
            .proc(&InputData { dt_s: DT_S, speed_ms: 0.0 })
            .unwrap();
        if report.idle {
            break;
        }
        last_active_s = report.time_s;
    }

    assert!(ctrl.is_idle());
    assert!(last_active_s > 0.0);
}

#[test]
fn test_too_small_gap_is_rejected() {
    let veh = VehicleGeom::derive(&c3_dims());
    let mut ctrl = CruiseCtrl::with_params(ctrl_params(), veh).unwrap();

    // A 5 m gap is below this vehicle's minimum one-trial gap length
    let result = ctrl.plan(
        &Point2::new(2.0, 0.0),
        &Point2::new(5.0, -2.0),
        &Point2::new(0.0, -2.0),
    );

    assert!(matches!(
        result,
        Err(park_lib::cruise_ctrl::CruiseCtrlError::Planning(
            PlannerError::SpotTooSmall { .. }
        ))
    ));
}
