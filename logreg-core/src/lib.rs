pub mod error;
pub mod types;

pub use types::{Float, Matrix, Vector};

pub use error::{LogRegError, Result};
