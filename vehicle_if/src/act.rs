//! # Vehicle actuation commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A normalised actuation command delivered to the vehicle platform.
///
/// Commands are fire-and-forget: one command is issued per control cycle and
/// is superseded by the next cycle's command.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ActuationCmd {
    /// Throttle pedal demand.
    ///
    /// Units: normalised, between 0 and 1
    pub throttle: f64,

    /// Brake pedal demand.
    ///
    /// Units: normalised, between 0 and 1
    pub brake: f64,

    /// Steering wheel demand.
    ///
    /// Units: normalised, between -1 and +1, where +1 is the platform's
    ///        maximum steering angle clockwise when viewed from above
    pub steer: f64,

    /// Gear direction, `true` for the reverse gear.
    pub reverse: bool
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl ActuationCmd {

    /// A command holding the vehicle stationary with the wheels centred.
    pub fn stop() -> Self {
        Self {
            throttle: 0.0,
            brake: 1.0,
            steer: 0.0,
            reverse: false
        }
    }

    /// Determine if the command is valid (i.e. all demands are in range).
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.throttle)
            && (0.0..=1.0).contains(&self.brake)
            && (-1.0..=1.0).contains(&self.steer)
    }
}

impl Default for ActuationCmd {
    fn default() -> Self {
        Self::stop()
    }
}
