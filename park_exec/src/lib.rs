//! # Self-parking control library
//!
//! This library implements the planning and control core of a one-trial
//! parallel parking maneuver for a front-wheel-steered vehicle:
//!
//! - [`veh_geom`] - turning circle geometry derived from the vehicle's
//!   dimensions.
//! - [`planner`] - the two-arc tangent path construction and its feasibility
//!   gate.
//! - [`ref_gen`] - time-indexed speed and steering reference profiles
//!   covering the whole maneuver.
//! - [`cruise_ctrl`] - the per-cycle control module: reference lookup, PID
//!   speed regulation and normalised actuation mapping.
//! - [`sim_vehicle`] - a kinematic bicycle vehicle model used by the demo
//!   executable and the integration tests.
//!
//! The maneuver geometry follows "Easy Path Planning and Robust Control for
//! Automatic Parallel Parking" by Sungwoo Choi, Clement Boussard and
//! Brigitte d'Andrea-Novel.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod cruise_ctrl;
pub mod planner;
pub mod ref_gen;
pub mod sim_vehicle;
pub mod veh_geom;
