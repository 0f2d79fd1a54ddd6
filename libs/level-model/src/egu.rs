//! Engineering-unit (EGU) conversion
//!
//! Raw register values map to engineering units through a linear
//! scale-and-offset transform configured per point. Conversions back into the
//! integral level domain saturate instead of wrapping.

/// Convert a raw register value to engineering units
///
/// Pure linear transform: `raw * scale_factor + deviation`.
///
/// # Examples
/// ```
/// # use level_model::egu::to_egu;
/// assert_eq!(to_egu(2.0, 1.0, 100), 201.0);
/// assert_eq!(to_egu(1.0, 0.0, 10), 10.0);
/// ```
pub fn to_egu(scale_factor: f64, deviation: f64, raw_value: u16) -> f64 {
    f64::from(raw_value) * scale_factor + deviation
}

/// Convert an engineering-unit value into the integral level domain
///
/// Saturating: NaN maps to 0, out-of-range values clamp to the `i64` bounds.
/// The regulation arithmetic runs entirely in this domain, so a misconfigured
/// scale factor can never wrap or panic downstream.
pub fn egu_to_level(egu: f64) -> i64 {
    if egu.is_nan() {
        return 0;
    }
    // f64 -> i64 `as` casts already saturate, but the bounds are stated here
    // so the contract does not rest on cast semantics alone.
    if egu >= i64::MAX as f64 {
        i64::MAX
    } else if egu <= i64::MIN as f64 {
        i64::MIN
    } else {
        egu as i64
    }
}

/// Clamp a level value to the `[0, egu_max]` range of a point
///
/// Saturating at both ends; an `egu_max` that itself exceeds the level domain
/// clamps to `i64::MAX`.
pub fn clamp_level(level: i64, egu_max: f64) -> i64 {
    let max = egu_to_level(egu_max);
    level.max(0).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_conversion() {
        assert_eq!(to_egu(1.0, 0.0, 0), 0.0);
        assert_eq!(to_egu(1.0, 0.0, 42), 42.0);
        assert_eq!(to_egu(0.5, -1.0, 10), 4.0);
        assert_eq!(to_egu(10.0, 3.0, 7), 73.0);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        for raw in [0u16, 1, 100, u16::MAX] {
            assert_eq!(to_egu(2.5, 0.25, raw), to_egu(2.5, 0.25, raw));
        }
    }

    #[test]
    fn test_egu_to_level_saturates() {
        assert_eq!(egu_to_level(f64::INFINITY), i64::MAX);
        assert_eq!(egu_to_level(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(egu_to_level(1e300), i64::MAX);
        assert_eq!(egu_to_level(-1e300), i64::MIN);
        assert_eq!(egu_to_level(f64::NAN), 0);
        assert_eq!(egu_to_level(10.9), 10);
        assert_eq!(egu_to_level(-3.2), -3);
    }

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(-4, 15.0), 0);
        assert_eq!(clamp_level(0, 15.0), 0);
        assert_eq!(clamp_level(9, 15.0), 9);
        assert_eq!(clamp_level(15, 15.0), 15);
        assert_eq!(clamp_level(20, 15.0), 15);
        assert_eq!(clamp_level(i64::MAX, f64::INFINITY), i64::MAX);
    }
}
