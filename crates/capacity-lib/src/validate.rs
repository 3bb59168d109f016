//! Numeric guards shared by the normalizer and extrapolator

/// Excess over a whole number, in ulps of the value, treated as division
/// noise (11.000000000000002) rather than a real fraction.
const CEIL_NOISE_ULPS: f64 = 4.0;

/// Finite and strictly greater than zero
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Finite and not below zero
pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// `numerator / denominator`, or `None` when the divisor is not positive
pub(crate) fn per_unit(numerator: f64, denominator: f64) -> Option<f64> {
    if !is_positive(denominator) || !numerator.is_finite() {
        return None;
    }
    Some(numerator / denominator)
}

/// Smallest whole count >= `value`, floored at 1
///
/// Returns `None` for non-finite or negative input and for counts that do
/// not fit in a `u32`.
pub(crate) fn ceil_count(value: f64) -> Option<u32> {
    if !is_non_negative(value) {
        return None;
    }
    let floor = value.floor();
    let snapped = if value - floor <= f64::EPSILON * value * CEIL_NOISE_ULPS {
        floor
    } else {
        value.ceil()
    };
    if snapped > u32::MAX as f64 {
        return None;
    }
    Some((snapped as u32).max(1))
}

/// Percentages outside 0-100 or non-finite are reported as absent
pub(crate) fn clean_percent(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}
