//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value between a minimum and maximum.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Saturate a value at plus/minus the given full scale value, then normalise
/// it into the [-1, +1] range.
///
/// The full scale value must be positive.
pub fn constrain_norm<T>(value: T, full_scale: T) -> T
where
    T: Float
{
    let min = -full_scale;
    clamp(&value, &min, &full_scale) / full_scale
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&0.5f64, &0.0, &1.0), 0.5);
        assert_eq!(clamp(&1.5f64, &0.0, &1.0), 1.0);
        assert_eq!(clamp(&-0.5f64, &0.0, &1.0), 0.0);
    }

    #[test]
    fn test_constrain_norm() {
        // In range values are scaled into [-1, 1]
        assert_eq!(constrain_norm(1.5f64, 3.0), 0.5);
        assert_eq!(constrain_norm(-1.5f64, 3.0), -0.5);

        // Out of range values saturate at the full scale
        assert_eq!(constrain_norm(4.0f64, 3.0), 1.0);
        assert_eq!(constrain_norm(-4.0f64, 3.0), -1.0);
    }
}
