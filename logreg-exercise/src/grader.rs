use std::collections::HashMap;
use std::f32::consts::E;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use logreg_core::{Float, LogRegError, Matrix, Result, Vector};

use crate::logistic::{cost_function, cost_function_reg, predict, sigmoid};

/// Number of graded parts in the logistic-regression exercise.
pub const PART_COUNT: u8 = 6;

/// Regularization strength handed to parts 5 and 6.
const LAMBDA: Float = 0.1;

/// A submission shell: holds a name and the part names, nothing more.
///
/// There is no validation, storage, or scoring behind this type; it exists
/// so the harness has the call shape a real grader would expect.
#[derive(Debug, Clone)]
pub struct Submission {
    name: String,
    part_names: Vec<String>,
}

impl Submission {
    pub fn new(name: &str, part_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            part_names: part_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }
}

/// A user-supplied function for one graded part.
///
/// The six parts fall into four call shapes, so the registry stores one
/// boxed closure per shape rather than a single uniform signature.
pub enum PartFunc {
    /// Part 1: element-wise map over the fixture matrix (sigmoid).
    MatrixMap(Box<dyn Fn(&Matrix) -> Matrix>),
    /// Parts 2 and 3: cost and gradient `(θ, X, y) -> (J, ∇J)`.
    Cost(Box<dyn Fn(&Vector, &Matrix, &Vector) -> Result<(Float, Vector)>>),
    /// Part 4: label prediction `(θ, X) -> p`.
    Predict(Box<dyn Fn(&Vector, &Matrix) -> Result<Vector>>),
    /// Parts 5 and 6: regularized cost and gradient `(θ, X, y, λ) -> (J, ∇J)`.
    RegCost(Box<dyn Fn(&Vector, &Matrix, &Vector, Float) -> Result<(Float, Vector)>>),
}

/// Output of a single graded part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum PartOutput {
    Scalar(Float),
    Vector(Vector),
    Matrix(Matrix),
}

/// Harness that runs registered part functions against a fixed synthetic
/// dataset and reports their outputs.
///
/// The fixture is the 20×3 matrix
///
/// ```text
/// X[i] = [1, e·sin(i+1), e^0.5·cos(i+1)]      for i = 0..20
/// ```
///
/// with labels `y_i = 1` iff `sin(X[i,0] + X[i,1]) > 0`, and the fixed
/// parameter vector `θ = [0.25, 0.5, -0.5]`. Iterating a grader yields
/// `(part_id, output)` for parts 1..=6 in order; an unregistered part
/// yields the scalar placeholder `0` instead of failing.
pub struct Grader {
    submission: Submission,
    x: Matrix,
    y: Vector,
    functions: HashMap<u8, PartFunc>,
}

impl Default for Grader {
    fn default() -> Self {
        Self::new()
    }
}

impl Grader {
    /// Creates a grader with the fixture dataset and no registered parts.
    pub fn new() -> Self {
        let x = fixture_x();
        let y = fixture_y(&x);
        let submission = Submission::new(
            "logistic-regression",
            &[
                "Sigmoid Function",
                "Logistic Regression Cost",
                "Logistic Regression Gradient",
                "Predict",
                "Regularized Logistic Regression Cost",
                "Regularized Logistic Regression Gradient",
            ],
        );
        Self {
            submission,
            x,
            y,
            functions: HashMap::new(),
        }
    }

    /// Creates a grader with this crate's reference solutions registered
    /// for all six parts.
    pub fn with_reference_solutions() -> Self {
        let mut grader = Self::new();
        grader.register(1, PartFunc::MatrixMap(Box::new(|x| sigmoid(x))));
        grader.register(2, PartFunc::Cost(Box::new(|t, x, y| cost_function(t, x, y))));
        grader.register(3, PartFunc::Cost(Box::new(|t, x, y| cost_function(t, x, y))));
        grader.register(4, PartFunc::Predict(Box::new(|t, x| predict(t, x))));
        grader.register(
            5,
            PartFunc::RegCost(Box::new(|t, x, y, l| cost_function_reg(t, x, y, l))),
        );
        grader.register(
            6,
            PartFunc::RegCost(Box::new(|t, x, y, l| cost_function_reg(t, x, y, l))),
        );
        grader
    }

    /// Registers (or replaces) the function for one part.
    pub fn register(&mut self, part_id: u8, func: PartFunc) {
        self.functions.insert(part_id, func);
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn x(&self) -> &Matrix {
        &self.x
    }

    pub fn y(&self) -> &Vector {
        &self.y
    }

    /// Runs a single part against the fixture.
    ///
    /// An unregistered `part_id` yields `Ok(PartOutput::Scalar(0.0))`; a
    /// part registered with a [`PartFunc`] variant that does not fit its
    /// call shape is an [`LogRegError::InvalidParameter`] error.
    pub fn run_part(&self, part_id: u8) -> Result<PartOutput> {
        let func = match self.functions.get(&part_id) {
            Some(func) => func,
            // Missing parts score a zero placeholder, not an error.
            None => return Ok(PartOutput::Scalar(0.0)),
        };

        let theta = fixed_theta();
        match (part_id, func) {
            (1, PartFunc::MatrixMap(f)) => Ok(PartOutput::Matrix(f(&self.x))),
            (2, PartFunc::Cost(f)) => {
                f(&theta, &self.x, &self.y).map(|(j, _)| PartOutput::Scalar(j))
            }
            (3, PartFunc::Cost(f)) => {
                f(&theta, &self.x, &self.y).map(|(_, g)| PartOutput::Vector(g))
            }
            (4, PartFunc::Predict(f)) => f(&theta, &self.x).map(PartOutput::Vector),
            (5, PartFunc::RegCost(f)) => {
                f(&theta, &self.x, &self.y, LAMBDA).map(|(j, _)| PartOutput::Scalar(j))
            }
            (6, PartFunc::RegCost(f)) => {
                f(&theta, &self.x, &self.y, LAMBDA).map(|(_, g)| PartOutput::Vector(g))
            }
            _ => Err(LogRegError::InvalidParameter(format!(
                "part {} registered with an incompatible signature",
                part_id
            ))),
        }
    }

    /// Iterates over all parts in order, yielding `(part_id, output)`.
    pub fn results(&self) -> Parts<'_> {
        Parts {
            grader: self,
            next: 1,
        }
    }
}

impl<'a> IntoIterator for &'a Grader {
    type Item = Result<(u8, PartOutput)>;
    type IntoIter = Parts<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.results()
    }
}

/// Iterator over the six part results of a [`Grader`].
pub struct Parts<'a> {
    grader: &'a Grader,
    next: u8,
}

impl Iterator for Parts<'_> {
    type Item = Result<(u8, PartOutput)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > PART_COUNT {
            return None;
        }
        let id = self.next;
        self.next += 1;
        Some(self.grader.run_part(id).map(|out| (id, out)))
    }
}

fn fixed_theta() -> Vector {
    Vector::from_row_slice(&[0.25, 0.5, -0.5])
}

fn fixture_x() -> Matrix {
    Matrix::from_fn(20, 3, |i, j| {
        let t = (i + 1) as Float;
        match j {
            0 => 1.0,
            1 => E * t.sin(),
            _ => E.sqrt() * t.cos(),
        }
    })
}

fn fixture_y(x: &Matrix) -> Vector {
    Vector::from_fn(x.nrows(), |i, _| {
        if (x[(i, 0)] + x[(i, 1)]).sin() > 0.0 {
            1.0
        } else {
            0.0
        }
    })
}
