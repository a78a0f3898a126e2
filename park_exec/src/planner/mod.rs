//! # Parallel parking path planner
//!
//! Given the rear-axle start position and the boundaries of the parking gap,
//! the planner builds the geometry of a one-trial parallel maneuver: two
//! constant-radius arcs of opposite steering joined at a tangency point. The
//! plan is computed once when the maneuver is initiated and is read-only
//! afterwards, there is no replanning.
//!
//! Planning fails synchronously when the gap is shorter than the vehicle's
//! minimum one-trial spot length, or when the start lane is laterally too
//! far from the spot for the two equal-radius circles to be tangent. Both
//! failures are reported before any reference generation occurs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod parallel;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use parallel::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during maneuver planning.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The gap between the front and back obstacles is below the minimum
    /// one-trial spot length. An N-trial maneuver would be needed, which is
    /// not supported.
    #[error(
        "Parking spot too small for a one-trial maneuver: gap is {gap_m:.3} m, \
         minimum is {lmin_m:.3} m"
    )]
    SpotTooSmall {
        /// Measured gap length, meters.
        gap_m: f64,
        /// Minimum one-trial spot length for this vehicle, meters.
        lmin_m: f64
    },

    /// The vehicle's start lane is laterally further from the target than
    /// its turning radius allows, the two turning circles cannot be tangent.
    #[error("Vehicle is laterally too far from the spot (offset exceeds the turning radius)")]
    LateralOffsetTooLarge,
}
