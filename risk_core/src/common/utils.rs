/// Round to `decimals` places, ties to even (numpy's rounding rule)
pub fn round_half_even(v: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return v.round_ties_even();
    }
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round_ties_even() / scale
}

/// Usable price: finite and strictly positive
pub fn is_positive_price(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
