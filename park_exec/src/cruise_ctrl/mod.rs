//! # Cruise control module
//!
//! The cruise control module drives the vehicle along a planned parallel
//! parking maneuver. Once per cycle it:
//!
//! 1. looks up the speed and steering references for the current maneuver
//!    time,
//! 2. signs the observed speed magnitude by the current gear so it is
//!    expressed along the maneuver's intended direction,
//! 3. regulates the speed error through an anti-windup PID producing an
//!    acceleration demand,
//! 4. normalises the acceleration and steering demands against the
//!    platform's full-scale limits and maps them to throttle, brake,
//!    steering and gear commands.
//!
//! Steering is reference-scheduled open loop, only the speed is under
//! feedback control.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod actuation;
mod params;
mod pid;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use actuation::*;
pub use params::Params;
pub use pid::*;
pub use state::*;

use crate::planner::PlannerError;
use crate::ref_gen::{RefGenError, RefPolicy};
use util::params as util_params;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during CruiseCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum CruiseCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util_params::LoadError),

    /// The configured reference policy cannot be driven by this module,
    /// which regulates speed references only.
    #[error("Reference policy {0:?} cannot be driven by the cruise control loop")]
    UnsupportedRefPolicy(RefPolicy),

    /// Maneuver planning failed, the vehicle stays idle.
    #[error("Maneuver planning failed: {0}")]
    Planning(PlannerError),

    /// Reference generation failed, the vehicle stays idle.
    #[error("Reference generation failed: {0}")]
    RefGen(RefGenError),
}
