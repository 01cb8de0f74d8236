use logreg_exercise::grader::{Grader, PartOutput};
use logreg_exercise::plot::plot_decision_boundary;
use logreg_exercise::{Float, LogRegError, Matrix, Result, Vector};
use plotters::prelude::*;

fn main() -> Result<()> {
    let grader = Grader::with_reference_solutions();
    println!("submission: {}", grader.submission().name());

    for item in &grader {
        let (id, out) = item?;
        let name = &grader.submission().part_names()[(id - 1) as usize];
        match out {
            PartOutput::Scalar(v) => println!("  part {} ({}): {}", id, name, v),
            PartOutput::Vector(v) => {
                println!("  part {} ({}): {:?}", id, name, v.as_slice())
            }
            PartOutput::Matrix(m) => {
                println!("  part {} ({}): {}x{} matrix", id, name, m.nrows(), m.ncols())
            }
        }
    }

    // Exam-score style toy data: two features in [30, 100], linearly separable.
    let x = Matrix::from_fn(10, 3, |i, j| match j {
        0 => 1.0,
        1 => 35.0 + 6.0 * i as Float,
        _ => 95.0 - 5.5 * i as Float,
    });
    let y = Vector::from_fn(10, |i, _| if i >= 5 { 1.0 } else { 0.0 });
    let theta = Vector::from_row_slice(&[-8.0, 0.09, 0.05]);

    let root = SVGBackend::new("decision_boundary.svg", (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| LogRegError::Render(e.to_string()))?;

    plot_decision_boundary(
        &root,
        |chart, data, labels| {
            chart
                .draw_series((0..data.nrows()).map(|i| {
                    let color = if labels[i] > 0.5 { BLUE } else { RED };
                    Circle::new((data[(i, 0)], data[(i, 1)]), 4, color.filled())
                }))
                .map_err(|e| LogRegError::Render(e.to_string()))?;
            Ok(())
        },
        &theta,
        &x,
        &y,
    )?;

    root.present()
        .map_err(|e| LogRegError::Render(e.to_string()))?;
    println!("wrote decision_boundary.svg");

    Ok(())
}
