//
// site.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::SampleError;

/// Parse a measured value, discarding any uncertainty annotation
///
/// Crystallographic values are typically reported with the uncertainty of the last digits in
/// parentheses, e.g. `6.027318(29)`. Everything from the first '(' onwards is ignored. Returns
/// `None` when what remains isn't a finite number.
///
/// ```
/// use crystal_sample::parse_measurement;
/// assert_eq!(parse_measurement("6.027318(29)"), Some(6.027318));
/// assert_eq!(parse_measurement(".5"), Some(0.5));
/// assert_eq!(parse_measurement("abc"), None);
/// ```
pub fn parse_measurement(value: &str) -> Option<f64> {
    value
        .split('(')
        .next()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// A value from the input which may be either a number or text
///
/// Values copied out of a CIF file are strings with uncertainty annotations, while values
/// written by hand are often plain numbers, both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Number(x) if x.is_finite() => Some(*x),
            Measurement::Number(_) => None,
            Measurement::Text(s) => parse_measurement(s),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::Number(x) => write!(f, "{}", x),
            Measurement::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Measurement::Number(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Measurement::Text(value.to_string())
    }
}

/// A site of the asymmetric unit as it appears in the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSite {
    pub element: String,
    pub x: Measurement,
    pub y: Measurement,
    pub z: Measurement,
    pub occupancy: Measurement,
}

/// A validated site of the asymmetric unit
///
/// The position is in fractional coordinates and the occupancy is within $(0, 1]$. The element
/// label doesn't need to be unique, split positions share a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub element: String,
    pub position: Point3<f64>,
    pub occupancy: f64,
}

impl Site {
    pub fn new(
        element: impl Into<String>,
        position: Point3<f64>,
        occupancy: f64,
    ) -> Result<Site, SampleError> {
        let element = element.into();
        if !(occupancy > 0. && occupancy <= 1.) {
            return Err(SampleError::InvalidSite {
                element,
                reason: format!("occupancy {} is outside (0, 1]", occupancy),
            });
        }
        if position.iter().any(|x| !x.is_finite()) {
            return Err(SampleError::InvalidSite {
                element,
                reason: String::from("coordinates must be finite"),
            });
        }
        Ok(Site {
            element,
            position,
            occupancy,
        })
    }
}

impl std::convert::TryFrom<&RawSite> for Site {
    type Error = SampleError;

    fn try_from(raw: &RawSite) -> Result<Self, Self::Error> {
        let field = |name: &str, value: &Measurement| {
            value.value().ok_or_else(|| SampleError::InvalidSite {
                element: raw.element.clone(),
                reason: format!("{} = '{}' is not a number", name, value),
            })
        };
        let position = Point3::new(
            field("x", &raw.x)?,
            field("y", &raw.y)?,
            field("z", &raw.z)?,
        );
        Site::new(
            raw.element.clone(),
            position,
            field("occupancy", &raw.occupancy)?,
        )
    }
}

/// A single position of an atom along with its occupancy
///
/// Whether the position is in fractional or cartesian coordinates depends on the stage of the
/// pipeline the image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomImage {
    pub position: Point3<f64>,
    pub occupancy: f64,
}

impl AtomImage {
    pub fn new(position: Point3<f64>, occupancy: f64) -> Self {
        AtomImage {
            position,
            occupancy,
        }
    }

    /// Whether every component of the position and the occupancy are within `tol`
    ///
    /// The comparison is deliberately non-periodic, 0.0 and 1.0 are different positions.
    pub fn coincides(&self, other: &AtomImage, tol: f64) -> bool {
        self.position
            .iter()
            .zip(other.position.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
            && (self.occupancy - other.occupancy).abs() <= tol
    }
}
