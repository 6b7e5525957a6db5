//! Scalar helpers that `glam` does not cover.

/// Logistic function, mapping any input into `(0, 1)`.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Remainder of `x / y` with the quotient truncated toward zero.
///
/// The result carries the sign of `x`, so `floor_mod(-7.5, 2.0) == -1.5`.
/// The quotient saturates to the `i32` range, so `floor_mod(x, 0.0) == x`.
pub fn floor_mod(x: f32, y: f32) -> f32 {
    let quotient = (x / y) as i32 as f32;
    x - quotient * y
}

/// Largest of two or more values.
pub fn max_of(first: f32, second: f32, rest: &[f32]) -> f32 {
    rest.iter().fold(first.max(second), |acc, &v| acc.max(v))
}
