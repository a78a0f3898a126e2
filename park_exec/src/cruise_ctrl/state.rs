//! Implementations for the CruiseCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use nalgebra::Point2;
use serde::Serialize;

// Internal
use super::{map_actuation, CruiseCtrlError, Gear, Params, PidController};
use crate::planner::{plan_parallel, ParkingGeometry};
use crate::ref_gen::{generate_kinematic, ManeuverRefs, RefPolicy};
use crate::veh_geom::VehicleGeom;
use util::{
    archive::{Archived, Archiver},
    maths::constrain_norm,
    module::State,
    params,
    session::Session,
};
use vehicle_if::ActuationCmd;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cruise control module state.
///
/// The module is strictly single threaded and tick driven: one call to
/// [`State::proc`] per simulation cycle, no internal suspension. The
/// maneuver plan and reference profiles are computed once by [`plan`] and
/// are read-only afterwards.
///
/// [`plan`]: CruiseCtrl::plan
#[derive(Default)]
pub struct CruiseCtrl {
    params: Params,

    /// Turning geometry of the vehicle under control
    veh: VehicleGeom,

    /// Speed regulator
    pid: PidController,

    /// Current drive direction, recomputed every cycle
    gear: Gear,

    /// Elapsed maneuver time.
    ///
    /// Units: seconds since the last successful plan
    time_s: f64,

    /// The planned maneuver geometry, `None` until a successful plan
    geometry: Option<ParkingGeometry>,

    /// The maneuver reference profiles, `None` until a successful plan
    refs: Option<ManeuverRefs>,

    report: StatusReport,
    arch_report: Archiver,
}

/// Input data to cruise control for one cycle.
#[derive(Default, Clone, Copy)]
pub struct InputData {
    /// Wall time elapsed since the previous cycle.
    ///
    /// Units: seconds
    pub dt_s: f64,

    /// The observed longitudinal speed magnitude from the vehicle sensing.
    ///
    /// Units: meters/second, unsigned
    pub speed_ms: f64,
}

/// Data required to initialise cruise control.
pub struct InitData {
    /// Path to the parameter file, relative to the params directory.
    pub params_path: &'static str,

    /// Derived geometry of the vehicle under control.
    pub veh: VehicleGeom,
}

/// Status report for cruise control processing, archived once per cycle.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Maneuver time at the start of the cycle
    pub time_s: f64,

    /// Speed reference for this cycle
    pub ref_speed_ms: f64,

    /// Steering reference for this cycle
    pub ref_steer_deg: f64,

    /// Observed speed, signed along the maneuver direction
    pub obs_speed_ms: f64,

    /// PID speed error
    pub pid_error: f64,

    /// PID output (unnormalised acceleration demand)
    pub pid_output: f64,

    /// True when the current gear is reverse
    pub reverse: bool,

    /// True when both reference profiles are exhausted
    pub idle: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for CruiseCtrl {
    type InitData = InitData;
    type InitError = CruiseCtrlError;

    type InputData = InputData;
    type OutputData = ActuationCmd;
    type StatusReport = StatusReport;
    type ProcError = CruiseCtrlError;

    /// Initialise the CruiseCtrl module.
    ///
    /// Loads the module parameters and sets up the cycle archive.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        // Load the parameters
        let params = match params::load(init_data.params_path) {
            Ok(p) => p,
            Err(e) => return Err(CruiseCtrlError::ParamLoadError(e)),
        };

        *self = Self::with_params(params, init_data.veh)?;

        // Create the arch folder for cruise_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("cruise_ctrl");
        if let Err(e) = std::fs::create_dir_all(arch_path) {
            warn!("Could not create the cruise_ctrl archive directory: {}", e);
        }

        // Initialise the cycle archiver, falling back to a dropping archiver
        // if the file cannot be created
        self.arch_report = match Archiver::from_path(session, "cruise_ctrl/status_report.csv") {
            Ok(a) => a,
            Err(e) => {
                warn!("Could not create the cruise_ctrl cycle archive: {}", e);
                Archiver::default()
            }
        };

        Ok(())
    }

    /// Perform cyclic processing of cruise control.
    ///
    /// Safe to call before a successful [`CruiseCtrl::plan`]: with no
    /// references loaded all lookups return idle values and the command
    /// holds the vehicle stationary.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Reference lookups at the current maneuver time
        let (ref_speed_ms, ref_steer_deg) = match self.refs {
            Some(ref r) => (
                r.speeds_ms.get(self.time_s),
                r.steers_deg.get(self.time_s),
            ),
            None => (0.0, 0.0),
        };

        // The sensed speed is a magnitude; sign it by the current gear
        // (i.e. the previous cycle's drive direction) so that it is
        // expressed along the maneuver's intended direction
        let obs_speed_ms = input_data.speed_ms * self.gear.sign();

        // Speed regulation
        let acc_dem = self.pid.update(input_data.dt_s, ref_speed_ms, obs_speed_ms);

        // Normalise the demands against the platform's full scale values
        let acc_norm = constrain_norm(acc_dem, self.params.plat_max_acc_ms2);
        let steer_norm = constrain_norm(ref_steer_deg, self.params.plat_max_steer_deg);

        // Update the gear from the reference direction and map the demands
        // into pedal commands
        self.gear = Gear::from_ref_speed(ref_speed_ms);
        let cmd = map_actuation(acc_norm, steer_norm, ref_speed_ms);

        self.report = StatusReport {
            time_s: self.time_s,
            ref_speed_ms,
            ref_steer_deg,
            obs_speed_ms,
            pid_error: self.pid.error(),
            pid_output: acc_dem,
            reverse: self.gear.is_reverse(),
            idle: self.is_idle(),
        };

        trace!(
            "CruiseCtrl: t {:.2} s, ref ({:.2} m/s, {:.1} deg), cmd (thr {:.2}, brk {:.2})",
            self.time_s, ref_speed_ms, ref_steer_deg, cmd.throttle, cmd.brake
        );

        // Advance the internal maneuver time
        self.time_s += input_data.dt_s;

        Ok((cmd, self.report))
    }
}

impl Archived for CruiseCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_report.serialise(self.report)
    }
}

impl CruiseCtrl {
    /// Build the module directly from parameters, without a session.
    ///
    /// Used by `init` and by tests; telemetry records are dropped until an
    /// archiver is attached.
    pub fn with_params(params: Params, veh: VehicleGeom) -> Result<Self, CruiseCtrlError> {
        // Only the kinematic formulation can be driven: the loop regulates
        // speed references against the observed speed
        if params.ref_policy != RefPolicy::Kinematic {
            return Err(CruiseCtrlError::UnsupportedRefPolicy(params.ref_policy));
        }

        let pid = PidController::new(
            params.k_p,
            params.k_i,
            params.k_d,
            params.integ_sat_lim,
            params.pid_time_scaled,
        );

        Ok(Self {
            params,
            veh,
            pid,
            ..Self::default()
        })
    }

    /// Plan the one-trial parallel maneuver into the given gap.
    ///
    /// One-shot: must be called once, before cyclic processing, with the
    /// vehicle stationary in its start lane. On failure no references are
    /// generated and the module keeps producing idle commands.
    pub fn plan(
        &mut self,
        rear_axle: &Point2<f64>,
        front_gap: &Point2<f64>,
        back_gap: &Point2<f64>,
    ) -> Result<(), CruiseCtrlError> {
        let geometry = plan_parallel(&self.veh, rear_axle, front_gap, back_gap)
            .map_err(CruiseCtrlError::Planning)?;

        let refs = generate_kinematic(
            &geometry,
            &self.veh,
            self.params.vmax_ms,
            self.params.spot_length_m,
        )
        .map_err(CruiseCtrlError::RefGen)?;

        info!(
            "Maneuver references cover {:.2} s in {} segments",
            refs.speeds_ms.end_time_s(),
            refs.speeds_ms.len()
        );

        self.time_s = 0.0;
        self.geometry = Some(geometry);
        self.refs = Some(refs);

        Ok(())
    }

    /// True once both reference profiles are exhausted, i.e. the maneuver
    /// is complete and only idle references remain. Also true before any
    /// successful plan.
    pub fn is_idle(&self) -> bool {
        match self.refs {
            Some(ref r) => {
                r.speeds_ms.is_past_end(self.time_s) && r.steers_deg.is_past_end(self.time_s)
            }
            None => true,
        }
    }

    /// The planned maneuver geometry, if a plan succeeded.
    pub fn geometry(&self) -> Option<&ParkingGeometry> {
        self.geometry.as_ref()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
