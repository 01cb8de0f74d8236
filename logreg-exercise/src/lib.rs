pub mod features;
pub mod grader;
pub mod logistic;
pub mod plot;

pub use logreg_core::{Float, LogRegError, Matrix, Result, Vector};
