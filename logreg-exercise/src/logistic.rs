use logreg_core::{Float, LogRegError, Matrix, Result, Vector};

/// Logistic (sigmoid) function of a single scalar.
///
/// ```text
/// σ(z) = 1 / (1 + e^(-z))
/// ```
pub fn sigmoid_scalar(z: Float) -> Float {
    1.0 / (1.0 + (-z).exp())
}

/// Element-wise sigmoid over a matrix.
///
/// Applies [`sigmoid_scalar`] to every entry. The output has the same shape
/// as the input.
pub fn sigmoid(z: &Matrix) -> Matrix {
    z.map(sigmoid_scalar)
}

/// Cross-entropy **cost and gradient** for logistic regression.
///
/// For parameters `θ`, design matrix `X` (first column expected to be the
/// intercept column of ones) and labels `y ∈ {0, 1}ᵐ`, with
/// `h = σ(X θ)`:
///
/// ```text
/// J(θ)  = -(1/m) Σ_i [ y_i ln h_i + (1 - y_i) ln(1 - h_i) ]
/// ∇J(θ) =  (1/m) Xᵀ (h - y)
/// ```
///
/// # Parameters
///
/// - `theta`: Parameter vector of length `n`.
/// - `x`: Design matrix of shape `(m × n)`.
/// - `y`: Label vector of length `m` with `0.0` / `1.0` entries.
///
/// # Returns
///
/// The pair `(J, ∇J)` where the gradient has the same length as `theta`.
///
/// # Errors
///
/// - [`LogRegError::EmptyInput`] if `x` has zero rows.
/// - [`LogRegError::ShapeMismatch`] if `theta.len() != x.ncols()` or
///   `y.len() != x.nrows()`.
pub fn cost_function(theta: &Vector, x: &Matrix, y: &Vector) -> Result<(Float, Vector)> {
    let m = x.nrows();

    if m == 0 {
        return Err(LogRegError::EmptyInput);
    }
    if theta.len() != x.ncols() {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} parameters", x.ncols()),
            got: format!("Got {}", theta.len()),
        });
    }
    if y.len() != m {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} labels", m),
            got: format!("Got {}", y.len()),
        });
    }

    let h = (x * theta).map(sigmoid_scalar);

    let mut total = 0.0;
    for i in 0..m {
        total += y[i] * h[i].ln() + (1.0 - y[i]) * (1.0 - h[i]).ln();
    }
    let cost = -total / m as Float;

    let diff = &h - y;
    let grad = (x.transpose() * diff) / m as Float;

    Ok((cost, grad))
}

/// L2-**regularized** cost and gradient for logistic regression.
///
/// Extends [`cost_function`] with a ridge penalty that never touches the
/// intercept parameter `θ₀`:
///
/// ```text
/// J_reg(θ)   = J(θ) + (λ / 2m) Σ_{k≥1} θ_k²
/// ∇J_reg(θ)₀ = ∇J(θ)₀
/// ∇J_reg(θ)ₖ = ∇J(θ)ₖ + (λ/m) θ_k      for k ≥ 1
/// ```
///
/// # Errors
///
/// Same as [`cost_function`], plus [`LogRegError::InvalidParameter`] if
/// `lambda` is negative or non-finite.
pub fn cost_function_reg(
    theta: &Vector,
    x: &Matrix,
    y: &Vector,
    lambda: Float,
) -> Result<(Float, Vector)> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(LogRegError::InvalidParameter(format!(
            "lambda must be a non-negative finite value, got {}",
            lambda
        )));
    }

    let (mut cost, mut grad) = cost_function(theta, x, y)?;
    let m = x.nrows() as Float;

    // θ₀ is the intercept and stays unpenalized.
    let mut penalty = 0.0;
    for k in 1..theta.len() {
        penalty += theta[k] * theta[k];
        grad[k] += (lambda / m) * theta[k];
    }
    cost += lambda / (2.0 * m) * penalty;

    Ok((cost, grad))
}

/// Predicts `0.0` / `1.0` labels by thresholding `σ(X θ)` at `0.5`.
///
/// # Errors
///
/// - [`LogRegError::ShapeMismatch`] if `theta.len() != x.ncols()`.
pub fn predict(theta: &Vector, x: &Matrix) -> Result<Vector> {
    if theta.len() != x.ncols() {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} parameters", x.ncols()),
            got: format!("Got {}", theta.len()),
        });
    }

    let p = (x * theta).map(|z| if sigmoid_scalar(z) >= 0.5 { 1.0 } else { 0.0 });
    Ok(p)
}
