//! # Vehicle geometry model
//!
//! Derives the turning circle radii and the minimum one-trial parking spot
//! length from the vehicle's fixed dimensions. All derived quantities refer
//! to the tightest turn the vehicle can make, i.e. with the steering angle
//! at its maximum.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Fixed dimensions of a vehicle, loaded from the vehicle parameter file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VehicleDims {
    /// Body width.
    ///
    /// Units: meters
    pub width_m: f64,

    /// Body length.
    ///
    /// Units: meters
    pub length_m: f64,

    /// Distance between the front and rear axles.
    ///
    /// Units: meters
    pub wheelbase_m: f64,

    /// Length of body in front of the front axle.
    ///
    /// Units: meters
    pub front_overhang_m: f64,

    /// Maximum steering angle of the front wheels.
    ///
    /// Units: degrees
    pub max_steer_deg: f64,
}

/// Vehicle geometry derived once at construction from [`VehicleDims`] and
/// never mutated.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VehicleGeom {
    /// Body width.
    ///
    /// Units: meters
    pub width_m: f64,

    /// Body length.
    ///
    /// Units: meters
    pub length_m: f64,

    /// Distance between the front and rear axles.
    ///
    /// Units: meters
    pub wheelbase_m: f64,

    /// Length of body in front of the front axle.
    ///
    /// Units: meters
    pub front_overhang_m: f64,

    /// Length of body behind the rear axle.
    ///
    /// Units: meters
    pub back_overhang_m: f64,

    /// Maximum steering angle of the front wheels.
    ///
    /// Units: degrees
    pub max_steer_deg: f64,

    /// Turning radius of the virtual wheel centred on the front axle at
    /// maximum steering angle.
    ///
    /// Units: meters
    pub rmin_m: f64,

    /// Turning radius of the internal rear wheel.
    ///
    /// Units: meters
    pub rimin_m: f64,

    /// Turning radius of the external front corner of the body.
    ///
    /// Units: meters
    pub remin_m: f64,

    /// Turning radius of the middle of the rear axle, used as the radius of
    /// both planned arcs.
    ///
    /// Units: meters
    pub rwmin_m: f64,

    /// Minimum parking spot length allowing a one-trial maneuver.
    ///
    /// Units: meters
    pub lmin_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VehicleGeom {
    /// Derive the turning geometry from the vehicle's dimensions.
    ///
    /// Valid for maximum steering angles in (0, 90] degrees, which is a
    /// caller configuration responsibility. All derived radii are finite
    /// over that range; `rimin_m` is additionally non-negative only while
    /// `tan(max_steer) <= 2 * wheelbase / width`, since beyond that lock
    /// angle the inner rear wheel's circle collapses inside the body. Road
    /// car steering locks sit well below that bound.
    pub fn derive(dims: &VehicleDims) -> Self {
        let back_overhang_m = dims.length_m - dims.wheelbase_m - dims.front_overhang_m;

        let rmin_m = dims.wheelbase_m / dims.max_steer_deg.to_radians().sin();
        let rimin_m = (rmin_m.powi(2) - dims.wheelbase_m.powi(2)).sqrt() - dims.width_m / 2.0;
        let remin_m = ((rimin_m + dims.width_m).powi(2)
            + (dims.wheelbase_m + dims.front_overhang_m).powi(2))
        .sqrt();
        let rwmin_m = rimin_m + dims.width_m / 2.0;
        let lmin_m = back_overhang_m + (remin_m.powi(2) - rimin_m.powi(2)).sqrt();

        Self {
            width_m: dims.width_m,
            length_m: dims.length_m,
            wheelbase_m: dims.wheelbase_m,
            front_overhang_m: dims.front_overhang_m,
            back_overhang_m,
            max_steer_deg: dims.max_steer_deg,
            rmin_m,
            rimin_m,
            remin_m,
            rwmin_m,
            lmin_m,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Citroen C3 dimensions used throughout the tests.
    pub(crate) fn c3_dims() -> VehicleDims {
        VehicleDims {
            width_m: 1.728,
            length_m: 3.941,
            wheelbase_m: 2.466,
            front_overhang_m: 0.815,
            max_steer_deg: 30.0,
        }
    }

    #[test]
    fn test_c3_geometry() {
        let geom = VehicleGeom::derive(&c3_dims());

        // Rmin = wheelbase / sin(30 deg) = 2 * wheelbase
        assert!((geom.rmin_m - 4.932).abs() < 1e-3);
        assert!((geom.back_overhang_m - 0.66).abs() < 1e-9);
        assert!((geom.rimin_m - 3.4072).abs() < 1e-3);
        assert!((geom.rwmin_m - 4.2712).abs() < 1e-3);
        assert!((geom.remin_m - 6.0939).abs() < 1e-3);

        // The C3 cannot make a one-trial maneuver into a 5 m spot
        assert!((geom.lmin_m - 5.7123).abs() < 1e-3);
    }

    #[test]
    fn test_radii_finite_over_steering_range() {
        for steer_deg in 1..=89 {
            let mut dims = c3_dims();
            dims.max_steer_deg = steer_deg as f64;
            let geom = VehicleGeom::derive(&dims);

            for r in &[geom.rmin_m, geom.rimin_m, geom.remin_m, geom.rwmin_m, geom.lmin_m] {
                assert!(r.is_finite(), "steer {} deg: non finite radius", steer_deg);
            }

            // The inner rear wheel's radius only stays non-negative while
            // the lock angle satisfies tan(steer) <= 2 * wheelbase / width;
            // for the C3 that bound is ~70.7 deg
            let tan_bound = 2.0 * dims.wheelbase_m / dims.width_m;
            if (steer_deg as f64).to_radians().tan() <= tan_bound {
                for r in &[geom.rmin_m, geom.rimin_m, geom.remin_m, geom.rwmin_m, geom.lmin_m] {
                    assert!(*r >= 0.0, "steer {} deg: negative radius", steer_deg);
                }
            }
        }
    }

    #[test]
    fn test_shipped_vehicle_params_parse() {
        let toml_str = std::fs::read_to_string(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../params/vehicle.toml"
        ))
        .unwrap();

        let dims: VehicleDims = toml::from_str(&toml_str).unwrap();
        let geom = VehicleGeom::derive(&dims);

        assert!(geom.rimin_m > 0.0);
        assert!(geom.lmin_m > dims.length_m);
    }

    #[test]
    fn test_lmin_monotonic_in_width() {
        let mut last_lmin = 0.0;
        for i in 0..20 {
            let mut dims = c3_dims();
            dims.width_m = 1.0 + 0.1 * i as f64;
            let geom = VehicleGeom::derive(&dims);
            assert!(geom.lmin_m >= last_lmin);
            last_lmin = geom.lmin_m;
        }
    }
}
