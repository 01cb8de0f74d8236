/// Scalar type used throughout the exercise crates.
pub type Float = f32;

/// Dynamically sized dense matrix of [`Float`].
pub type Matrix = nalgebra::DMatrix<Float>;

/// Dynamically sized dense column vector of [`Float`].
///
/// Labels are carried as a `Vector` of `0.0` / `1.0` values, matching the
/// cross-entropy formulation used by the logistic cost.
pub type Vector = nalgebra::DVector<Float>;
