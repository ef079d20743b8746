use crate::common::error::{XsBenchError, XsResult};

/// Search function
/// values must be ordered from min to max
///
/// # Arguments
/// * `value` value to be located
/// * `values` sorted slice in which we wish to find the index
///
/// # Returns
/// * `index` largest index whose value is lower or equal to `value`,
///   clamped to 0 below the first value and to the last index above the last one
pub fn get_index(value: f64, values: &[f64]) -> usize {
    values
        .partition_point(|v| *v <= value)
        .saturating_sub(1)
}

/// Position of `value` between `low` and `high` on a logarithmic axis
///
/// `value` is clamped to the bracket, so the returned fraction is in [0, 1].
/// Returns `None` when the bracket cannot be log-transformed
/// (non-positive bound or zero-width span).
pub fn get_log_fraction(value: f64, low: f64, high: f64) -> Option<f64> {
    if !(low > 0. && high > low) || value.is_nan() {
        return None;
    }
    let value = value.clamp(low, high);
    Some((value / low).ln() / (high / low).ln())
}

/// Log-log interpolation between `low` and `high` at a log fraction
///
/// # Arguments
/// * `fraction` position on the logarithmic energy axis, see `get_log_fraction`
/// * `low` value at the lower bound
/// * `high` value at the upper bound
pub fn get_log_interpolated_value(fraction: f64, low: f64, high: f64) -> f64 {
    if fraction <= 0. {
        return low;
    }
    if fraction >= 1. {
        return high;
    }
    if !(low > 0. && high > 0.) {
        // no logarithm of a zero cross section, take the nearest bound
        return if fraction < 0.5 { low } else { high };
    }
    low * (high / low).powf(fraction)
}

/// Reserves a vector able to hold `len` elements without reallocating
///
/// # Arguments
/// * `len` number of elements
/// * `what` name of the data set, reported on failure
pub fn try_allocate<T>(len: usize, what: &'static str) -> XsResult<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| XsBenchError::Allocation { what, bytes })?;
    Ok(values)
}

/// Formats an integer with thousands separators, e.g. `15,000,000`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
