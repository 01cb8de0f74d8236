use logreg_core::{Float, LogRegError, Matrix, Result, Vector};
use plotters::coord::types::RangedCoordf32;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::features::{map_feature_point, num_terms};

/// Polynomial degree used when rendering a nonlinear decision boundary.
pub const BOUNDARY_DEGREE: usize = 6;

/// Side length of the evaluation grid for the nonlinear boundary.
const GRID_STEPS: usize = 50;

/// Grid window for the nonlinear boundary, per axis.
const GRID_MIN: Float = -1.0;
const GRID_MAX: Float = 1.5;

/// Axis window used when the boundary is a straight line.
const LINE_AXIS_MIN: Float = 30.0;
const LINE_AXIS_MAX: Float = 100.0;

/// Chart context handed to the data-plotting callback.
pub type BoundaryChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<RangedCoordf32, RangedCoordf32>>;

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> LogRegError {
    LogRegError::Render(e.to_string())
}

/// Draws the dataset and the decision boundary implied by `theta` onto `root`.
///
/// The caller supplies `plot_data`, which receives a configured chart, the two
/// free feature columns `x[:, 1..3]`, and the labels `y`, and scatters the
/// data however it likes. The boundary overlay depends on the width of `x`:
///
/// - `x.ncols() == 3` (intercept plus two features): the boundary is the
///   straight line `x2 = -(θ₁·x1 + θ₀) / θ₂`, drawn between
///   `min(x[:,1]) - 2` and `max(x[:,1]) + 2` on a fixed `[30, 100]²` window.
/// - wider `x`: the boundary is the zero level set of
///   `z(u, v) = mapFeature(u, v) · θ` with degree [`BOUNDARY_DEGREE`],
///   evaluated on a 50×50 grid over `[-1, 1.5]²`. The negative region is
///   shaded and the level set itself is traced with marching squares.
///
/// # Errors
///
/// - [`LogRegError::ShapeMismatch`] if `x` has fewer than 3 columns, if
///   `y.len() != x.nrows()`, or if `theta` does not match the expected
///   parameter count for the chosen overlay.
/// - [`LogRegError::Render`] if the plotting backend fails.
pub fn plot_decision_boundary<DB, F>(
    root: &DrawingArea<DB, Shift>,
    plot_data: F,
    theta: &Vector,
    x: &Matrix,
    y: &Vector,
) -> Result<()>
where
    DB: DrawingBackend,
    F: for<'a> FnOnce(&mut BoundaryChart<'a, DB>, &Matrix, &Vector) -> Result<()>,
{
    if x.ncols() < 3 {
        return Err(LogRegError::ShapeMismatch {
            expected: "Expected a design matrix with at least 3 columns".to_string(),
            got: format!("Got {}", x.ncols()),
        });
    }
    if y.len() != x.nrows() {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} labels", x.nrows()),
            got: format!("Got {}", y.len()),
        });
    }

    let linear = x.ncols() <= 3;
    let expected_params = if linear {
        x.ncols()
    } else {
        num_terms(BOUNDARY_DEGREE)
    };
    if theta.len() != expected_params {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} parameters", expected_params),
            got: format!("Got {}", theta.len()),
        });
    }

    let (lo, hi) = if linear {
        (LINE_AXIS_MIN, LINE_AXIS_MAX)
    } else {
        (GRID_MIN, GRID_MAX)
    };

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(lo..hi, lo..hi)
        .map_err(render_err)?;

    chart.configure_mesh().draw().map_err(render_err)?;

    // First column of x is the intercept; the data lives in columns 1..3.
    let data = x.columns(1, 2).into_owned();
    plot_data(&mut chart, &data, y)?;

    if linear {
        draw_line_boundary(&mut chart, theta, x)
    } else {
        draw_contour_boundary(&mut chart, theta)
    }
}

/// Straight-line boundary for the two-feature case.
///
/// Two points are enough: the segment runs from just left of the smallest
/// `x1` to just right of the largest.
fn draw_line_boundary<'a, DB: DrawingBackend + 'a>(
    chart: &mut BoundaryChart<'a, DB>,
    theta: &Vector,
    x: &Matrix,
) -> Result<()> {
    let x1 = x.column(1);
    let endpoints = [x1.min() - 2.0, x1.max() + 2.0];

    let line: Vec<(Float, Float)> = endpoints
        .iter()
        .map(|&px| (px, (-1.0 / theta[2]) * (theta[1] * px + theta[0])))
        .collect();

    chart
        .draw_series(LineSeries::new(line, GREEN.stroke_width(2)))
        .map_err(render_err)?
        .label("Decision boundary")
        .legend(|(lx, ly)| PathElement::new(vec![(lx, ly), (lx + 20, ly)], GREEN));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// Zero level set of the polynomial decision function, plus a translucent
/// shade over the negative region.
fn draw_contour_boundary<DB: DrawingBackend>(
    chart: &mut BoundaryChart<'_, DB>,
    theta: &Vector,
) -> Result<()> {
    let u = linspace(GRID_MIN, GRID_MAX, GRID_STEPS);
    let v = linspace(GRID_MIN, GRID_MAX, GRID_STEPS);
    let z = decision_grid(theta, &u, &v);

    // Shade cells on the negative side of the boundary.
    let shaded = (0..GRID_STEPS - 1).flat_map(|i| {
        let z = &z;
        let u = &u;
        let v = &v;
        (0..GRID_STEPS - 1).filter_map(move |j| {
            let mean = (z[i][j] + z[i + 1][j] + z[i][j + 1] + z[i + 1][j + 1]) / 4.0;
            if mean < 0.0 {
                Some(Rectangle::new(
                    [(u[i], v[j]), (u[i + 1], v[j + 1])],
                    GREEN.mix(0.2).filled(),
                ))
            } else {
                None
            }
        })
    });
    chart.draw_series(shaded).map_err(render_err)?;

    let segments = zero_level_segments(&u, &v, &z);
    chart
        .draw_series(segments.into_iter().map(|(a, b)| {
            PathElement::new(vec![a, b], GREEN.stroke_width(2))
        }))
        .map_err(render_err)?;

    Ok(())
}

fn linspace(a: Float, b: Float, n: usize) -> Vec<Float> {
    let step = (b - a) / (n - 1) as Float;
    (0..n).map(|k| a + step * k as Float).collect()
}

/// Evaluates `z[i][j] = mapFeature(u[i], v[j]) · θ` over the grid.
fn decision_grid(theta: &Vector, u: &[Float], v: &[Float]) -> Vec<Vec<Float>> {
    let eval_row = |&ui: &Float| -> Vec<Float> {
        v.iter()
            .map(|&vj| map_feature_point(ui, vj, BOUNDARY_DEGREE).dot(theta))
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        u.par_iter().map(eval_row).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        u.iter().map(eval_row).collect()
    }
}

/// Point where the linear interpolation of `a` (at `pa`) and `b` (at `pb`)
/// crosses zero, if the two values sit on opposite sides of it.
fn crossing(
    a: Float,
    b: Float,
    pa: (Float, Float),
    pb: (Float, Float),
) -> Option<(Float, Float)> {
    if (a < 0.0) == (b < 0.0) {
        return None;
    }
    let t = a / (a - b);
    Some((pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1)))
}

/// Marching-squares extraction of the `z = 0` level set.
///
/// Each grid cell contributes at most two line segments, built from the
/// zero crossings found on its four edges.
fn zero_level_segments(
    u: &[Float],
    v: &[Float],
    z: &[Vec<Float>],
) -> Vec<((Float, Float), (Float, Float))> {
    let mut segments = Vec::new();

    for i in 0..u.len() - 1 {
        for j in 0..v.len() - 1 {
            let p00 = (u[i], v[j]);
            let p10 = (u[i + 1], v[j]);
            let p01 = (u[i], v[j + 1]);
            let p11 = (u[i + 1], v[j + 1]);

            let z00 = z[i][j];
            let z10 = z[i + 1][j];
            let z01 = z[i][j + 1];
            let z11 = z[i + 1][j + 1];

            let mut hits: Vec<(Float, Float)> = Vec::with_capacity(4);
            hits.extend(crossing(z00, z10, p00, p10)); // bottom edge
            hits.extend(crossing(z10, z11, p10, p11)); // right edge
            hits.extend(crossing(z01, z11, p01, p11)); // top edge
            hits.extend(crossing(z00, z01, p00, p01)); // left edge

            // Two crossings form one segment; the saddle case yields four
            // crossings and two segments.
            for pair in hits.chunks_exact(2) {
                segments.push((pair[0], pair[1]));
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::map_feature;

    fn scatter<DB: DrawingBackend>(
        chart: &mut BoundaryChart<'_, DB>,
        data: &Matrix,
        y: &Vector,
    ) -> Result<()> {
        chart
            .draw_series((0..data.nrows()).map(|i| {
                let color = if y[i] > 0.5 { BLUE } else { RED };
                Circle::new((data[(i, 0)], data[(i, 1)]), 3, color.filled())
            }))
            .map_err(render_err)?;
        Ok(())
    }

    #[test]
    fn test_linear_boundary_renders() {
        let x = Matrix::from_fn(6, 3, |i, j| match j {
            0 => 1.0,
            1 => 40.0 + 8.0 * i as Float,
            _ => 90.0 - 7.0 * i as Float,
        });
        let y = Vector::from_row_slice(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let theta = Vector::from_row_slice(&[-10.0, 0.1, 0.05]);

        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        plot_decision_boundary(&root, scatter, &theta, &x, &y).unwrap();
        root.present().unwrap();
    }

    #[test]
    fn test_polynomial_boundary_renders() {
        let x1 = Vector::from_fn(8, |i, _| -0.8 + 0.2 * i as Float);
        let x2 = Vector::from_fn(8, |i, _| 0.9 - 0.2 * i as Float);
        let x = map_feature(&x1, &x2, BOUNDARY_DEGREE).unwrap();
        let y = Vector::from_fn(8, |i, _| (i % 2) as Float);
        // Circle of radius ~0.7: θ = [-0.5, 0, 0, 1, 0, 1, 0, ...]
        let mut theta = Vector::zeros(num_terms(BOUNDARY_DEGREE));
        theta[0] = -0.5;
        theta[3] = 1.0;
        theta[5] = 1.0;

        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        plot_decision_boundary(&root, scatter, &theta, &x, &y).unwrap();
        root.present().unwrap();
    }

    #[test]
    fn test_rejects_narrow_design_matrix() {
        let x = Matrix::zeros(4, 2);
        let y = Vector::zeros(4);
        let theta = Vector::zeros(2);

        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        let result = plot_decision_boundary(&root, scatter, &theta, &x, &y);
        assert!(matches!(result, Err(LogRegError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rejects_theta_of_wrong_arity() {
        let x = Matrix::from_fn(4, 3, |_, j| if j == 0 { 1.0 } else { 50.0 });
        let y = Vector::zeros(4);
        let theta = Vector::zeros(5);

        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        let result = plot_decision_boundary(&root, scatter, &theta, &x, &y);
        assert!(matches!(result, Err(LogRegError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_zero_level_segments_finds_circle() {
        // z = u² + v² - 0.25: the zero set is a circle of radius 0.5 and
        // every extracted point should sit close to it.
        let u = linspace(-1.0, 1.0, 21);
        let v = linspace(-1.0, 1.0, 21);
        let z: Vec<Vec<Float>> = u
            .iter()
            .map(|&ui| v.iter().map(|&vj| ui * ui + vj * vj - 0.25).collect())
            .collect();

        let segments = zero_level_segments(&u, &v, &z);
        assert!(!segments.is_empty());
        for (a, b) in segments {
            for p in [a, b] {
                let r = (p.0 * p.0 + p.1 * p.1).sqrt();
                assert!((r - 0.5).abs() < 0.1, "point ({}, {}) off circle", p.0, p.1);
            }
        }
    }

    #[test]
    fn test_zero_level_segments_empty_for_positive_field() {
        let u = linspace(-1.0, 1.0, 11);
        let v = linspace(-1.0, 1.0, 11);
        let z: Vec<Vec<Float>> = u
            .iter()
            .map(|_| v.iter().map(|_| 1.0).collect())
            .collect();
        assert!(zero_level_segments(&u, &v, &z).is_empty());
    }

    #[test]
    fn test_linspace_endpoints() {
        let pts = linspace(-1.0, 1.5, 50);
        assert_eq!(pts.len(), 50);
        assert!((pts[0] - -1.0).abs() < 1e-6);
        assert!((pts[49] - 1.5).abs() < 1e-6);
    }
}
