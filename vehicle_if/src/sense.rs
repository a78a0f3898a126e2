//! # Vehicle sensing and actuation interfaces

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Point2;

use crate::act::ActuationCmd;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The sensing surface exposed by the vehicle platform.
///
/// All quantities are expressed in the parking frame, in which X is the
/// longitudinal axis along the row of parked vehicles and Y the lateral axis.
pub trait VehicleSensors {
    /// Get the position of the middle of the rear axle.
    ///
    /// Units: meters
    fn rear_axle_position(&self) -> Point2<f64>;

    /// Get the longitudinal speed magnitude.
    ///
    /// The speed is unsigned, the sign along the maneuver direction is
    /// derived by the consumer from the current gear.
    ///
    /// Units: meters/second
    fn longitudinal_speed_ms(&self) -> f64;

    /// Get the longitudinal acceleration magnitude.
    ///
    /// Units: meters/second^2
    fn longitudinal_acc_ms2(&self) -> f64;
}

/// The actuation surface exposed by the vehicle platform.
pub trait ActuationSink {
    /// Apply one actuation command.
    ///
    /// Fire-and-forget: there is no acknowledgement and the command is
    /// superseded by the next cycle's command.
    fn apply_actuation(&mut self, cmd: &ActuationCmd);
}
