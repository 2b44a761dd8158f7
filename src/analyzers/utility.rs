/// Rounds to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `part / total` as a percentage rounded to two decimals. Returns 0.0 when `total` is zero.
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        round2(part / total * 100.0)
    }
}

/// `total / count` rounded to two decimals. Returns 0.0 when `count` is zero.
pub fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(total / count as f64)
    }
}
