//! # Vehicle interface library
//!
//! This crate defines the interface between the parking control core and the
//! vehicle platform it drives. The platform (a simulator or a real body
//! controller) is a black box which:
//!
//! - senses the rear-axle position and the longitudinal speed and
//!   acceleration magnitudes ([`VehicleSensors`]),
//! - accepts one normalised actuation command per control cycle
//!   ([`ActuationSink`]).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod act;
pub mod sense;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use act::ActuationCmd;
pub use sense::{ActuationSink, VehicleSensors};
