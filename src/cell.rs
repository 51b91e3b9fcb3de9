//
// cell.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::fmt;
use std::ops::Mul;

use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::SampleError;

/// Smallest value of $\sin \gamma$ for which the cell isn't considered flat.
const MIN_SIN_GAMMA: f64 = 1e-10;

/// Allowance for rounding error in the height of the $c$ vector.
const HEIGHT_TOLERANCE: f64 = 1e-12;

/// Smallest absolute determinant of an invertible lattice matrix.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// The unit in which the cell angles are supplied
///
/// There is no default, the unit always has to be given explicitly. Passing degrees to a function
/// expecting radians produces a cell which is still valid, just completely wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert a value in this unit to radians
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }
}

/// Representing the parameters of a unit cell
///
/// The unit cell is described by the length of each of the three sides $a$, $b$, $c$ and the
/// angles between them $\alpha$, $\beta$, $\gamma$. The angles are always stored in radians,
/// the constructors make the conversion explicit.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl LatticeParameters {
    /// Create the cell parameters with the angles given in radians
    pub fn from_radians(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Create the cell parameters with the angles given in degrees
    ///
    /// ```
    /// use crystal_sample::LatticeParameters;
    /// let params = LatticeParameters::from_degrees(1., 1., 1., 90., 90., 120.);
    /// assert!((params.gamma() - 2. * std::f64::consts::PI / 3.).abs() < 1e-12);
    /// ```
    pub fn from_degrees(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::from_radians(
            a,
            b,
            c,
            alpha.to_radians(),
            beta.to_radians(),
            gamma.to_radians(),
        )
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// The angle between $b$ and $c$ in radians
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The angle between $a$ and $c$ in radians
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// The angle between $a$ and $b$ in radians
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// The three cell angles in degrees, the form used for output
    pub fn angles_degrees(&self) -> (f64, f64, f64) {
        (
            self.alpha.to_degrees(),
            self.beta.to_degrees(),
            self.gamma.to_degrees(),
        )
    }
}

/// The three lattice vectors of a cell in cartesian space
///
/// The vectors are built using the standard crystallographic convention, with $a$ along the $x$
/// axis and $b$ within the $xy$ plane.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeVectors {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
    pub c: Vector3<f64>,
}

impl fmt::Display for LatticeVectors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LatticeVectors {{ a: [{:.4}, {:.4}, {:.4}], b: [{:.4}, {:.4}, {:.4}], c: [{:.4}, {:.4}, {:.4}] }}",
            self.a.x, self.a.y, self.a.z, self.b.x, self.b.y, self.b.z, self.c.x, self.c.y, self.c.z,
        )
    }
}

impl Mul<f64> for &LatticeVectors {
    type Output = LatticeVectors;

    fn mul(self, scale: f64) -> LatticeVectors {
        LatticeVectors {
            a: self.a * scale,
            b: self.b * scale,
            c: self.c * scale,
        }
    }
}

impl LatticeVectors {
    /// Construct the lattice vectors from the cell parameters
    ///
    /// $$ \vec{a} = (a, 0, 0) $$
    /// $$ \vec{b} = (b \cos\gamma, b \sin\gamma, 0) $$
    /// $$ \vec{c} = (c \cos\beta, c\, \text{aux}, c \sqrt{1 - \cos^2\beta - \text{aux}^2}) $$
    ///
    /// where $\text{aux} = (\cos\alpha - \cos\beta \cos\gamma) / \sin\gamma$.
    ///
    pub fn from_parameters(params: &LatticeParameters) -> Result<LatticeVectors, SampleError> {
        for (name, length) in &[("a", params.a), ("b", params.b), ("c", params.c)] {
            if !(length.is_finite() && *length > 0.) {
                return Err(SampleError::DegenerateLattice(format!(
                    "cell length {} must be positive, found {}",
                    name, length
                )));
            }
        }

        for (name, angle) in &[
            ("alpha", params.alpha),
            ("beta", params.beta),
            ("gamma", params.gamma),
        ] {
            if !angle.is_finite() {
                return Err(SampleError::DegenerateLattice(format!(
                    "cell angle {} must be finite, found {}",
                    name, angle
                )));
            }
        }

        let sin_gamma = params.gamma.sin();
        if sin_gamma.abs() < MIN_SIN_GAMMA {
            return Err(SampleError::DegenerateLattice(format!(
                "sin(gamma) is zero for gamma = {} rad",
                params.gamma
            )));
        }
        let cos_beta = params.beta.cos();
        let aux = (params.alpha.cos() - cos_beta * params.gamma.cos()) / sin_gamma;

        let height = 1. - cos_beta.powi(2) - aux.powi(2);
        if height < -HEIGHT_TOLERANCE {
            return Err(SampleError::DegenerateLattice(format!(
                "the angles ({}, {}, {}) rad can't form a cell",
                params.alpha, params.beta, params.gamma
            )));
        }

        Ok(LatticeVectors {
            a: Vector3::new(params.a, 0., 0.),
            b: Vector3::new(params.b * params.gamma.cos(), params.b * sin_gamma, 0.),
            c: Vector3::new(
                params.c * cos_beta,
                params.c * aux,
                params.c * height.max(0.).sqrt(),
            ),
        })
    }

    /// The lattice matrix with the vectors $a$, $b$ and $c$ as columns
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.a, self.b, self.c])
    }

    /// The inverse of the lattice matrix, mapping cartesian to fractional coordinates
    pub fn inverse(&self) -> Result<Matrix3<f64>, SampleError> {
        let matrix = self.matrix();
        let determinant = matrix.determinant();
        // NaN is singular
        if !(determinant.abs() >= SINGULAR_TOLERANCE) {
            return Err(SampleError::SingularLattice { determinant });
        }
        matrix
            .try_inverse()
            .ok_or(SampleError::SingularLattice { determinant })
    }

    /// The length of each of the lattice vectors
    pub fn lengths(&self) -> (f64, f64, f64) {
        (self.a.norm(), self.b.norm(), self.c.norm())
    }

    /// Convert a point in fractional coordinates to cartesian coordinates
    ///
    /// No wrapping is performed, a point outside the unit cell stays outside the unit cell.
    pub fn to_cartesian(&self, frac: &Point3<f64>) -> Point3<f64> {
        Point3::from(frac.x * self.a + frac.y * self.b + frac.z * self.c)
    }
}

/// Reduce a fractional component into the interval $[0, 1)$
fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.);
    // A tiny negative value rounds up to exactly 1, which belongs to the next cell over. Adding
    // zero also turns a negative zero into a positive one.
    if wrapped >= 1. {
        0.
    } else {
        wrapped + 0.
    }
}

/// Convert a cartesian point into fractional coordinates within the cell
///
/// The `inverse` is the inverse of the lattice matrix as returned by [`LatticeVectors::inverse`].
/// Each component of the result is wrapped into the interval $[0, 1)$.
pub fn to_fractional(cart: &Point3<f64>, inverse: &Matrix3<f64>) -> Point3<f64> {
    (inverse * cart.coords).map(wrap_unit).into()
}
