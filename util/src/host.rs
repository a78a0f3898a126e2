//! Host environment utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("The software root environment variable (PARK_SW_ROOT) is not set")]
    RootNotSet
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the park_sw installation.
///
/// The root is read from the `PARK_SW_ROOT` environment variable, and is the
/// directory containing the `params` and `sessions` directories.
pub fn get_park_sw_root() -> Result<PathBuf, HostError> {
    match std::env::var("PARK_SW_ROOT") {
        Ok(p) => Ok(PathBuf::from(p)),
        Err(_) => Err(HostError::RootNotSet)
    }
}
