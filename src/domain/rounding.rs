//! Decimal rounding for reported minutes and hours.

/// Round `value` to `places` decimal places.
///
/// Rounds the exact binary value, ties to even: 5 × 0.7 × 1.3 is stored as
/// 4.5499… and becomes 4.5, where scaling by 10 first would give 4.6.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
