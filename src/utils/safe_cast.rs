//! Safe float-to-integer conversions for reported scores

/// Clamp and convert f64 to u32 for display scores
///
/// Non-finite input maps to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
#[allow(clippy::cast_sign_loss)] // Clamped to a non-negative range first
pub fn f64_to_u32_clamp(value: f64, min: u32, max: u32) -> u32 {
    // Ensure min <= max
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));

    // Ensure result is within bounds after conversion
    (clamped as u32).clamp(min, max)
}
