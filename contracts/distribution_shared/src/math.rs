/// 100% expressed in basis points.
pub const BASIS_POINTS: u32 = 10_000;

/// Fixed-point scale of the dividends-per-share accumulator.
pub const ACC_SCALE: i128 = 1_000_000_000_000_000_000;

/// `a * b / d`, `None` on overflow or a zero divisor.
pub fn mul_div(a: i128, b: i128, d: i128) -> Option<i128> {
    a.checked_mul(b)?.checked_div(d)
}
