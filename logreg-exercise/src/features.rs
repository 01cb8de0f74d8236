use logreg_core::{Float, LogRegError, Matrix, Result, Vector};

/// Number of monomial terms produced by [`map_feature`] for a given degree.
///
/// All monomials of two variables up to total degree `d` (constant term
/// included) count to the triangular number:
///
/// ```text
/// n(d) = (d + 1)(d + 2) / 2
/// ```
///
/// For the exercise default `d = 6` this is `28`.
pub const fn num_terms(degree: usize) -> usize {
    (degree + 1) * (degree + 2) / 2
}

/// Maps a single `(x1, x2)` point to its polynomial feature row.
///
/// The returned vector has length [`num_terms`]`(degree)` and enumerates the
/// monomials in the same order as the columns of [`map_feature`]:
///
/// ```text
/// [1, x1, x2, x1², x1·x2, x2², x1³, ...]
/// ```
///
/// Degree by degree, and within each degree by decreasing power of `x1`.
/// This is the per-point kernel used by the decision-boundary renderer when
/// evaluating the classifier over a grid.
pub fn map_feature_point(x1: Float, x2: Float, degree: usize) -> Vector {
    let mut row = Vector::zeros(num_terms(degree));
    let mut c = 0;
    for i in 0..=degree {
        for j in 0..=i {
            row[c] = x1.powi((i - j) as i32) * x2.powi(j as i32);
            c += 1;
        }
    }
    row
}

/// Expands two input features into a **polynomial feature matrix**.
///
/// Given equal-length vectors `x1`, `x2` of `m` samples, returns an
/// `(m × n)` matrix whose columns enumerate every monomial
///
/// ```text
/// x1^(i-j) · x2^j    for i = 0..=degree, j = 0..=i
/// ```
///
/// ordered degree by degree and, within each degree, by decreasing power of
/// `x1`. The first column is the constant (intercept) term, so for
/// `degree = 2` each row reads:
///
/// ```text
/// [1, x1, x2, x1², x1·x2, x2²]
/// ```
///
/// This lets a linear-in-parameters classifier fit a nonlinear decision
/// boundary in the original two-feature space.
///
/// # Parameters
///
/// - `x1`: First feature, length `m`.
/// - `x2`: Second feature, length `m`.
/// - `degree`: Maximum total degree of the generated monomials.
///   `degree = 0` yields a single ones column.
///
/// # Returns
///
/// An `(m × n)` matrix with `n = `[`num_terms`]`(degree)`.
///
/// # Errors
///
/// - [`LogRegError::EmptyInput`] if `x1` has zero length.
/// - [`LogRegError::ShapeMismatch`] if `x2.len() != x1.len()`.
///
/// # Complexity
///
/// - Time: `O(m · n)` with `n = (degree+1)(degree+2)/2`.
/// - Space: `O(m · n)` for the output matrix.
pub fn map_feature(x1: &Vector, x2: &Vector, degree: usize) -> Result<Matrix> {
    let m = x1.len();

    if m == 0 {
        return Err(LogRegError::EmptyInput);
    }
    if x2.len() != m {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} samples in x2", m),
            got: format!("Got {}", x2.len()),
        });
    }

    let n = num_terms(degree);
    let mut out = Matrix::zeros(m, n);

    for r in 0..m {
        let row = map_feature_point(x1[r], x2[r], degree);
        out.row_mut(r).copy_from(&row.transpose());
    }

    Ok(out)
}
