//
// error.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use thiserror::Error;

/// Errors raised while expanding an asymmetric unit into a sample
///
/// Every failure is a property of the input data, so there is nothing to retry; these propagate
/// straight back to the caller.
#[derive(Error, Debug)]
pub enum SampleError {
    /// A symmetry operation string which doesn't follow the `x,y,z` term grammar
    #[error("Malformed symmetry operation '{operation}': {reason}")]
    MalformedOperation { operation: String, reason: String },

    /// Cell parameters which don't describe a physical cell
    #[error("Degenerate lattice: {0}")]
    DegenerateLattice(String),

    /// The lattice vectors are linearly dependent
    #[error("Singular lattice matrix (determinant {determinant:e})")]
    SingularLattice { determinant: f64 },

    #[error("Invalid site '{element}': {reason}")]
    InvalidSite { element: String, reason: String },

    #[error("Invalid lattice parameter {name} = '{value}'")]
    InvalidParameter { name: String, value: String },

    #[error("Sample size must be at least 1, found {0}")]
    InvalidSampleSize(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SampleError {
    pub(crate) fn malformed(operation: &str, reason: impl Into<String>) -> Self {
        SampleError::MalformedOperation {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}
