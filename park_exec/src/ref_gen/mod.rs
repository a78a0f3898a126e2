//! # Reference trajectory generation
//!
//! Converts a planned [`crate::planner::ParkingGeometry`] into time-indexed
//! reference profiles for the cruise control loop. A profile is a step
//! function over elapsed maneuver time; the generator appends one leg at a
//! time to the speed and steering profiles simultaneously so that both
//! always share the same segment boundaries.
//!
//! Two formulations exist:
//!
//! - [`RefPolicy::Kinematic`] (the default): piecewise-constant speed
//!   references at the desired cruise speed, with wheel-turn pauses between
//!   the legs. This is the profile the cruise control loop drives.
//! - [`RefPolicy::Dynamic`]: piecewise-constant acceleration references
//!   built from the desired acceleration, with steering-rate references for
//!   the wheel turns. Kept as a selectable alternative formulation; the
//!   cruise control loop does not drive it as it regulates speed, not
//!   acceleration.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod generator;
mod profile;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use generator::*;
pub use profile::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during reference generation.
///
/// These signal configuration or programming errors in the generation
/// inputs and are raised before the maneuver starts, never mid-execution.
#[derive(Debug, thiserror::Error)]
pub enum RefGenError {
    /// A reference leg was appended with a negative or non-finite duration.
    #[error("Cannot append a reference with invalid duration ({0} s)")]
    InvalidDuration(f64),

    /// The desired cruise speed must be strictly positive, otherwise leg
    /// durations are unbounded.
    #[error("Desired cruise speed must be positive, got {0} m/s")]
    NonPositiveSpeed(f64),

    /// The desired acceleration must be strictly positive for the dynamic
    /// formulation.
    #[error("Desired acceleration must be positive, got {0} m/s^2")]
    NonPositiveAccel(f64),
}
