//
// symmetry.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::iter::Peekable;
use std::str::FromStr;

#[cfg(test)]
use approx::AbsDiffEq;
use log::warn;
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::SampleError;

/// A crystallographic symmetry operation acting on fractional coordinates
///
/// The operation is split into the 'rotation' component and the translation component. The
/// 'rotation' is in quotes since the matrix holds mirror and inversion operations in addition to
/// proper rotations. The translation is applied after the rotation, giving the affine map
///
/// $$ p' = M p + t $$
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryOperation {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

#[cfg(test)]
impl AbsDiffEq for SymmetryOperation {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl FromStr for SymmetryOperation {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_operations(s)
    }
}

/// A single signed term of one row of a symmetry operation, i.e. `-x`, `+1/3` or `2y`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    coefficient: f64,
    /// The column of the variable, `None` when this is a constant term
    variable: Option<usize>,
}

/// Read the optional numeric coefficient at the front of a term
///
/// This accepts integers, decimals and simple fractions `p/q`. When there are no digits present
/// this returns `Ok(None)` leaving the iterator untouched.
fn parse_number<I>(chars: &mut Peekable<I>) -> Result<Option<f64>, String>
where
    I: Iterator<Item = char>,
{
    let mut numerator = String::new();
    while let Some(c) = chars.peek().copied() {
        match c {
            '0'..='9' | '.' => {
                numerator.push(c);
                chars.next();
            }
            _ => break,
        }
    }

    if chars.peek() != Some(&'/') {
        if numerator.is_empty() {
            return Ok(None);
        }
        return numerator
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("Invalid number '{}'", numerator));
    }
    // Consume the '/'
    chars.next();

    let mut denominator = String::new();
    while let Some(c @ '0'..='9') = chars.peek().copied() {
        denominator.push(c);
        chars.next();
    }

    let numerator: f64 = numerator
        .parse()
        .map_err(|_| format!("Invalid fraction numerator '{}'", numerator))?;
    let denominator: f64 = denominator
        .parse()
        .map_err(|_| format!("Invalid fraction denominator '{}'", denominator))?;
    if denominator == 0. {
        return Err(String::from("Fraction with a zero denominator"));
    }
    Ok(Some(numerator / denominator))
}

/// Split a single row of an operation into its signed terms
///
/// All whitespace is ignored. The first term may omit the sign, every following term has to
/// start with either a '+' or a '-'. An empty row is valid and has no terms.
fn parse_row(row: &str) -> Result<Vec<Term>, String> {
    let mut chars = row.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut terms = Vec::new();

    while let Some(next) = chars.peek().copied() {
        let sign = match next {
            '+' => {
                chars.next();
                1.
            }
            '-' => {
                chars.next();
                -1.
            }
            _ if terms.is_empty() => 1.,
            x => return Err(format!("Expected '+' or '-' before '{}'", x)),
        };

        let magnitude = parse_number(&mut chars)?;

        let variable = match chars.peek().copied() {
            Some('x') => Some(0),
            Some('y') => Some(1),
            Some('z') => Some(2),
            _ => None,
        };
        if variable.is_some() {
            chars.next();
        }

        if magnitude.is_none() && variable.is_none() {
            return Err(match chars.peek() {
                Some(x) => format!("Found invalid value: '{}'", x),
                None => String::from("Sign without a following term"),
            });
        }

        terms.push(Term {
            coefficient: sign * magnitude.unwrap_or(1.),
            variable,
        });
    }
    Ok(terms)
}

impl SymmetryOperation {
    /// Create the identity operation
    ///
    /// ```
    /// use crystal_sample::SymmetryOperation;
    /// use nalgebra::Point3;
    /// let t = SymmetryOperation::identity();
    /// let p = Point3::new(0.1, 0.2, 0.3);
    /// assert_eq!(t.transform(&p), p);
    /// ```
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Convert the string representation of a symmetry operation to a SymmetryOperation.
    ///
    /// The operation consists of three comma separated rows, one for each of the output
    /// coordinates. Each row is a sum of signed terms, with each term being an optional number
    /// (integer, decimal or fraction) optionally followed by one of `x`, `y` or `z`. Repeated
    /// variables within a row accumulate.
    ///
    /// ```
    /// use crystal_sample::SymmetryOperation;
    /// let op = SymmetryOperation::from_operations("-y+1/3, x-y+2/3, z+2/3").unwrap();
    /// assert_eq!(op.rotation[(1, 0)], 1.);
    /// assert_eq!(op.rotation[(1, 1)], -1.);
    /// ```
    ///
    pub fn from_operations(sym_ops: &str) -> Result<SymmetryOperation, SampleError> {
        let braces: &[_] = &['(', ')'];
        let operations: Vec<&str> = sym_ops
            .trim()
            // Remove braces from front and back
            .trim_matches(braces)
            // Split at the comma
            .split(',')
            .collect();

        match operations.len() {
            x if x < 3 => return Err(SampleError::malformed(sym_ops, "Not enough dimensions")),
            x if x > 3 => return Err(SampleError::malformed(sym_ops, "Too many dimensions")),
            _ => (),
        }

        let mut rotation: Matrix3<f64> = Matrix3::zeros();
        let mut translation: Vector3<f64> = Vector3::zeros();

        for (index, op) in operations.iter().enumerate() {
            let terms = parse_row(op).map_err(|reason| SampleError::malformed(sym_ops, reason))?;
            for term in terms {
                match term.variable {
                    Some(column) => rotation[(index, column)] += term.coefficient,
                    None => translation[index] += term.coefficient,
                }
            }
        }

        // Crystallographic operations preserve volume, anything else is most likely a typo in
        // the input, although still a valid affine map.
        let determinant = rotation.determinant();
        if (determinant.abs() - 1.).abs() > 1e-6 {
            warn!(
                "Symmetry operation '{}' has a determinant of {}",
                sym_ops, determinant
            );
        }

        Ok(SymmetryOperation {
            rotation,
            translation,
        })
    }

    /// Apply the operation to a point in fractional coordinates
    pub fn transform(&self, position: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * position.coords + self.translation)
    }
}
