//! Time-indexed reference profiles

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::RefGenError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One reference segment: a value held until a cumulative end time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimedValue {
    /// The reference value held during this segment.
    pub value: f64,

    /// Cumulative time at which this segment ends.
    ///
    /// Units: seconds since maneuver start
    pub end_time_s: f64,
}

/// A time-indexed step function giving the desired value of a control
/// quantity at any elapsed time since maneuver start.
///
/// Segments are stored as `(value, cumulative_end_time)` pairs, strictly
/// increasing in end time except for a possible zero-duration sentinel as
/// the final segment. Queries past the last segment, or on an empty
/// profile, return the idle value 0.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceProfile {
    segments: Vec<TimedValue>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ReferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference leg held for the given duration.
    ///
    /// The leg's end time is the previous leg's end time plus the duration.
    /// Negative or non-finite durations signal a bug in the generation
    /// inputs and are rejected rather than clamped.
    pub fn add(&mut self, value: f64, duration_s: f64) -> Result<(), RefGenError> {
        if !duration_s.is_finite() || duration_s < 0.0 {
            return Err(RefGenError::InvalidDuration(duration_s));
        }

        let end_time_s = match self.segments.last() {
            Some(tv) => tv.end_time_s + duration_s,
            None => duration_s,
        };

        self.segments.push(TimedValue { value, end_time_s });

        Ok(())
    }

    /// Get the reference value at the given elapsed time.
    ///
    /// Returns the value of the first segment whose end time exceeds the
    /// query time, or the idle value 0 when the time is past the end of the
    /// profile or the profile is empty.
    pub fn get(&self, time_s: f64) -> f64 {
        for tv in &self.segments {
            if time_s < tv.end_time_s {
                return tv.value;
            }
        }

        0.0
    }

    /// True when the given elapsed time is past the end of the profile, i.e.
    /// only idle references remain. An empty profile is always past its end.
    pub fn is_past_end(&self, time_s: f64) -> bool {
        match self.segments.last() {
            Some(tv) => time_s >= tv.end_time_s,
            None => true,
        }
    }

    /// Cumulative end time of the final segment, or 0 for an empty profile.
    pub fn end_time_s(&self) -> f64 {
        self.segments.last().map(|tv| tv.end_time_s).unwrap_or(0.0)
    }

    /// Number of segments in the profile.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
