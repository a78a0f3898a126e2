//! Speed regulation PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Threshold on the tick-to-tick output change below which the output is
/// considered settling and integration is enabled.
const OUTPUT_SETTLE_THRESHOLD: f64 = 0.01;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A discrete PID controller with saturating anti-windup.
///
/// The integral term only accumulates while the controller output is
/// settling (small tick-to-tick change), and the accumulated error is
/// clamped to a symmetric saturation band. Note the anti-windup gate acts
/// on output stability, not on an error threshold.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// Symmetric saturation limit on the accumulated error
    integ_sat_lim: f64,

    /// If true the timestep is folded into the I and D terms
    time_scaled: bool,

    /// Error of the current tick
    error: f64,

    /// Error of the previous tick
    last_error: f64,

    /// The accumulated (integral) error, clamped to the saturation band
    sum_error: f64,

    /// Output of the previous tick, used by the anti-windup gate
    prev_out: f64,

    /// True while integration is enabled
    integrating: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains and integral saturation
    /// limit.
    pub fn new(k_p: f64, k_i: f64, k_d: f64, integ_sat_lim: f64, time_scaled: bool) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            integ_sat_lim,
            time_scaled,
            ..Self::default()
        }
    }

    /// Update the controller with a new reference and observation pair,
    /// returning the new output.
    ///
    /// In the baseline configuration `dt_s` is accepted every tick but not
    /// folded into the integral or derivative terms, so the output depends
    /// on the error sequence alone. Constructing the controller with
    /// `time_scaled` enables the classical per-second scaling instead.
    pub fn update(&mut self, dt_s: f64, reference: f64, observation: f64) -> f64 {
        self.error = reference - observation;

        // P term
        let p_term = self.k_p * self.error;

        // I term, accumulating only while the anti-windup gate is open
        if self.integrating {
            let increment = if self.time_scaled {
                self.error * dt_s
            } else {
                self.error
            };
            let min = -self.integ_sat_lim;
            self.sum_error = clamp(&(self.sum_error + increment), &min, &self.integ_sat_lim);
        }
        let i_term = self.k_i * self.sum_error;

        // D term, no filtering on the derived error
        let d_term = if self.time_scaled && dt_s > 0.0 {
            self.k_d * (self.error - self.last_error) / dt_s
        } else {
            self.k_d * (self.error - self.last_error)
        };
        self.last_error = self.error;

        let out = p_term + i_term + d_term;

        // Anti-windup gate: enable integration only when the output is
        // settling
        self.integrating = (out - self.prev_out).abs() < OUTPUT_SETTLE_THRESHOLD;
        self.prev_out = out;

        out
    }

    /// Error of the most recent update.
    pub fn error(&self) -> f64 {
        self.error
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_error_gives_zero_output() {
        let mut pid = PidController::new(2.0, 1.0, 1.0, 0.7, false);

        // With reference always equal to observation the error is zero and
        // the output holds at zero with no steady-state offset.
        for _ in 0..100 {
            let out = pid.update(0.1, 1.0, 1.0);
            assert_eq!(out, 0.0);
            assert_eq!(pid.error(), 0.0);
        }
    }

    #[test]
    fn test_baseline_ignores_timestep() {
        // In the baseline policy the output must only depend on the error
        // sequence, not on dt.
        let mut pid_a = PidController::new(2.0, 1.0, 1.0, 0.7, false);
        let mut pid_b = PidController::new(2.0, 1.0, 1.0, 0.7, false);

        for i in 0..50 {
            let obs = (i as f64 * 0.1).sin();
            let out_a = pid_a.update(0.1, 1.0, obs);
            let out_b = pid_b.update(0.001, 1.0, obs);
            assert_eq!(out_a, out_b);
        }
    }

    #[test]
    fn test_antiwindup_gate_closes_on_large_output_change() {
        let mut pid = PidController::new(2.0, 1.0, 0.0, 0.7, false);

        // First tick: output jumps from 0 to 2, gate must close
        pid.update(0.1, 1.0, 0.0);

        // Second tick with the same error: the integral must not have
        // accumulated, so the output is unchanged (pure P)
        let out = pid.update(0.1, 1.0, 0.0);
        assert_eq!(out, 2.0);
    }

    #[test]
    fn test_integral_saturation() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 0.7, false);

        // With zero P and D the output is constant between ticks, so the
        // gate stays open and the integral accumulates until it saturates.
        let mut out = 0.0;
        for _ in 0..300 {
            out = pid.update(0.1, 0.005, 0.0);
        }
        assert!((out - 0.7).abs() < 1e-9);
    }
}
