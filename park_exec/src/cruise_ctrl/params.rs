//! Cruise control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::ref_gen::RefPolicy;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for cruise control.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    // ---- PID ----

    /// Speed controller proportional gain
    pub k_p: f64,

    /// Speed controller integral gain
    pub k_i: f64,

    /// Speed controller derivative gain
    pub k_d: f64,

    /// Symmetric saturation limit on the accumulated integral error
    pub integ_sat_lim: f64,

    /// If true the PID folds the timestep into the integral and derivative
    /// terms. The baseline policy leaves the timestep out, see
    /// [`super::PidController::update`].
    pub pid_time_scaled: bool,

    // ---- MANEUVER ----

    /// Desired cruise speed magnitude during the maneuver.
    ///
    /// Units: meters/second
    pub vmax_ms: f64,

    /// Desired acceleration magnitude. Held for the dynamic reference
    /// formulation only; the kinematic loop does not read it.
    ///
    /// Units: meters/second^2
    pub ades_ms2: f64,

    /// The reference generation formulation to use.
    pub ref_policy: RefPolicy,

    /// Length of the parking spot, used for the final centering leg.
    ///
    /// Units: meters
    pub spot_length_m: f64,

    // ---- PLATFORM LIMITS ----

    /// The platform's full-scale acceleration: an acceleration demand of
    /// this magnitude maps to a normalised command of 1.
    ///
    /// Units: meters/second^2
    pub plat_max_acc_ms2: f64,

    /// The platform's full-scale steering angle: a steering demand of this
    /// magnitude maps to a normalised command of 1.
    ///
    /// Units: degrees
    pub plat_max_steer_deg: f64,
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params_file_parses() {
        // The params file shipped with the repo must deserialise, policy
        // names included.
        let toml_str = std::fs::read_to_string(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../params/cruise_ctrl.toml"
        ))
        .unwrap();

        let params: Params = toml::from_str(&toml_str).unwrap();

        assert_eq!(params.ref_policy, RefPolicy::Kinematic);
        assert!(params.vmax_ms > 0.0);
        assert!(params.plat_max_acc_ms2 > 0.0);
        assert!(params.plat_max_steer_deg > 0.0);
    }

    #[test]
    fn test_ref_policy_names_are_lowercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            ref_policy: RefPolicy,
        }

        let w: Wrapper = toml::from_str("ref_policy = \"dynamic\"").unwrap();
        assert_eq!(w.ref_policy, RefPolicy::Dynamic);

        // Capitalised variant names are not accepted
        assert!(toml::from_str::<Wrapper>("ref_policy = \"Kinematic\"").is_err());
    }
}
