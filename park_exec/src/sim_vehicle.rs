//! # Simulated vehicle
//!
//! A kinematic bicycle model used by the demo executable to close the loop
//! around cruise control. The model tracks the rear axle midpoint, with the
//! heading defined by the vehicle's longitudinal axis and the turn rate set
//! by the front wheel steering angle over the wheelbase.
//!
//! This is a plant model for exercising the controller, not a dynamics
//! simulation: tyre slip, load transfer and actuator lag are not modelled.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point2;
use serde::Deserialize;

// Internal
use vehicle_if::{ActuationCmd, ActuationSink, VehicleSensors};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulated vehicle plant.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimParams {
    /// Distance between the front and rear axles.
    ///
    /// Units: meters
    pub wheelbase_m: f64,

    /// Acceleration produced by a fully pressed throttle pedal.
    ///
    /// Units: meters/second/second
    pub max_acc_ms2: f64,

    /// Deceleration produced by a fully pressed brake pedal.
    ///
    /// Units: meters/second/second
    pub max_brake_ms2: f64,

    /// Steering angle at full lock.
    ///
    /// Units: degrees
    pub max_steer_deg: f64,

    /// Speed above which the drivetrain will not accelerate further.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,
}

/// Kinematic bicycle plant driven by [`ActuationCmd`]s.
pub struct SimVehicle {
    params: SimParams,

    /// Most recent actuation command, applied on the next `step`
    cmd: ActuationCmd,

    /// Rear axle midpoint position.
    ///
    /// Units: meters
    pos_m: Point2<f64>,

    /// Heading of the longitudinal axis, counterclockwise from +X.
    ///
    /// Units: radians
    heading_rad: f64,

    /// Signed speed along the longitudinal axis, negative when rolling
    /// backwards.
    ///
    /// Units: meters/second
    speed_ms: f64,

    /// Acceleration magnitude applied over the last step.
    ///
    /// Units: meters/second/second, always non-negative
    acc_ms2: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimVehicle {
    /// Create a stationary vehicle at the given rear axle position and
    /// heading.
    pub fn new(params: SimParams, pos_m: Point2<f64>, heading_rad: f64) -> Self {
        Self {
            params,
            cmd: ActuationCmd::stop(),
            pos_m,
            heading_rad,
            speed_ms: 0.0,
            acc_ms2: 0.0,
        }
    }

    /// Propagate the plant forward by `dt_s` seconds under the most recent
    /// actuation command.
    pub fn step(&mut self, dt_s: f64) {
        let speed_before_ms = self.speed_ms;

        // Pedal model: the engine pushes along the gear direction, the
        // brake always opposes the current motion and can stop the vehicle
        // but never reverse it. A throttle applied against the current
        // motion decelerates through zero.
        let dir = if self.cmd.reverse { -1.0 } else { 1.0 };
        self.speed_ms += dir * self.cmd.throttle * self.params.max_acc_ms2 * dt_s;

        let brake_dv_ms = self.cmd.brake * self.params.max_brake_ms2 * dt_s;
        self.speed_ms = if self.speed_ms > 0.0 {
            (self.speed_ms - brake_dv_ms).max(0.0)
        } else {
            (self.speed_ms + brake_dv_ms).min(0.0)
        };
        self.speed_ms = self
            .speed_ms
            .max(-self.params.max_speed_ms)
            .min(self.params.max_speed_ms);

        if dt_s > 0.0 {
            self.acc_ms2 = ((self.speed_ms - speed_before_ms) / dt_s).abs();
        }

        // Rear axle bicycle kinematics. Positive steer commands turn the
        // front wheels clockwise when viewed from above (towards -Y when
        // driving forwards), matching the actuation convention.
        let steer_rad = (self.cmd.steer * self.params.max_steer_deg).to_radians();
        self.pos_m.x += self.speed_ms * self.heading_rad.cos() * dt_s;
        self.pos_m.y += self.speed_ms * self.heading_rad.sin() * dt_s;
        self.heading_rad -=
            self.speed_ms * steer_rad.tan() / self.params.wheelbase_m * dt_s;
    }

    /// Heading of the longitudinal axis.
    ///
    /// Units: radians, counterclockwise from +X
    pub fn heading_rad(&self) -> f64 {
        self.heading_rad
    }
}

impl ActuationSink for SimVehicle {
    fn apply_actuation(&mut self, cmd: &ActuationCmd) {
        self.cmd = *cmd;
    }
}

impl VehicleSensors for SimVehicle {
    fn rear_axle_position(&self) -> Point2<f64> {
        self.pos_m
    }

    fn longitudinal_speed_ms(&self) -> f64 {
        self.speed_ms.abs()
    }

    fn longitudinal_acc_ms2(&self) -> f64 {
        self.acc_ms2
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
