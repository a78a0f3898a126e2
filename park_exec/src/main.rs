//! Main parking executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logger and all modules
//!     - Plan the parallel maneuver for the demo scenario
//!     - Main loop:
//!         - Vehicle sensing
//!         - Cruise control processing
//!         - Actuation of the simulated vehicle
//!         - Archive writing
//!
//! The loop runs until cruise control reports the maneuver complete.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use nalgebra::Point2;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use park_lib::{
    cruise_ctrl::{CruiseCtrl, InitData, InputData},
    sim_vehicle::{SimParams, SimVehicle},
    veh_geom::{VehicleDims, VehicleGeom},
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};
use vehicle_if::{ActuationSink, VehicleSensors};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.05;

/// Starting position of the rear axle midpoint in the demo scenario.
const START_REAR_AXLE_M: [f64; 2] = [2.0, 0.0];

/// Front-left corner of the parking gap in the demo scenario.
const FRONT_GAP_M: [f64; 2] = [6.0, -2.0];

/// Back-left corner of the parking gap in the demo scenario.
const BACK_GAP_M: [f64; 2] = [0.0, -2.0];

/// Hard limit on the number of cycles, in case the maneuver never reports
/// completion.
const MAX_CYCLES: u64 = 10_000;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("park_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Parallel Parking Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let dims: VehicleDims = util::params::load("vehicle.toml")
        .wrap_err("Could not load vehicle params")?;
    let sim_params: SimParams = util::params::load("sim.toml")
        .wrap_err("Could not load sim params")?;

    info!("Exec parameters loaded");

    // ---- DERIVE VEHICLE GEOMETRY ----

    let veh = VehicleGeom::derive(&dims);

    info!(
        "Turning geometry: Rmin {:.3} m, Rimin {:.3} m, Remin {:.3} m, Rwmin {:.3} m",
        veh.rmin_m, veh.rimin_m, veh.remin_m, veh.rwmin_m
    );
    info!("Minimum parallel parking gap: {:.3} m\n", veh.lmin_m);

    session
        .save_json("vehicle_geom.json", &veh)
        .wrap_err("Could not save the vehicle geometry")?;

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut cruise_ctrl = CruiseCtrl::default();
    cruise_ctrl
        .init(
            InitData {
                params_path: "cruise_ctrl.toml",
                veh,
            },
            &session,
        )
        .wrap_err("Failed to initialise CruiseCtrl")?;
    info!("CruiseCtrl init complete");

    let start_m = Point2::new(START_REAR_AXLE_M[0], START_REAR_AXLE_M[1]);
    let mut sim_vehicle = SimVehicle::new(sim_params, start_m, 0.0);
    info!("SimVehicle initialised at rear axle {:?}", start_m);

    info!("Module initialisation complete\n");

    // ---- PLAN THE MANEUVER ----

    cruise_ctrl
        .plan(
            &sim_vehicle.rear_axle_position(),
            &Point2::new(FRONT_GAP_M[0], FRONT_GAP_M[1]),
            &Point2::new(BACK_GAP_M[0], BACK_GAP_M[1]),
        )
        .wrap_err("Maneuver planning failed")?;

    // Record the planned geometry in the session
    if let Some(geom) = cruise_ctrl.geometry() {
        session
            .save_json("parking_geometry.json", geom)
            .wrap_err("Could not save the parking geometry")?;
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut num_cycles: u64 = 0;

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- DATA INPUT ----

        let input = InputData {
            dt_s: CYCLE_PERIOD_S,
            speed_ms: sim_vehicle.longitudinal_speed_ms(),
        };

        // ---- CONTROL ALGORITHM PROCESSING ----

        let report = match cruise_ctrl.proc(&input) {
            Ok((cmd, report)) => {
                sim_vehicle.apply_actuation(&cmd);
                report
            }
            Err(e) => {
                warn!("Error during CruiseCtrl processing: {}", e);
                continue;
            }
        };

        // ---- PLANT PROPAGATION ----

        sim_vehicle.step(CYCLE_PERIOD_S);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = cruise_ctrl.write() {
            warn!("Could not write CruiseCtrl archives: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        if report.idle {
            info!("Maneuver complete after {} cycles", num_cycles);
            break;
        }

        num_cycles += 1;
        if num_cycles >= MAX_CYCLES {
            warn!("Maximum cycle count reached, stopping");
            break;
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
            ),
        }
    }

    // ---- SHUTDOWN ----

    let final_pos = sim_vehicle.rear_axle_position();
    info!(
        "Final rear axle position: ({:.3}, {:.3}) m, heading {:.3} rad",
        final_pos.x,
        final_pos.y,
        sim_vehicle.heading_rad()
    );
    info!("End of execution");

    Ok(())
}
