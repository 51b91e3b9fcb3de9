//
// lib.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! Build samples of a crystal structure from its asymmetric unit
//!
//! The asymmetric unit, being the unit cell parameters, the sites and the symmetry operations, is
//! expanded into every position within the unit cell. This unit cell can then be replicated into
//! a supercell, which is written out as a CIF file.
//!
//! ```
//! use crystal_sample::{generate, LatticeParameters, LatticeVectors, Site, SymmetryOperation};
//! use nalgebra::Point3;
//!
//! let params = LatticeParameters::from_degrees(4., 4., 4., 90., 90., 90.);
//! let vectors = LatticeVectors::from_parameters(&params).unwrap();
//! let sites = [Site::new("Cu1", Point3::new(0.25, 0., 0.), 1.).unwrap()];
//! let ops = [SymmetryOperation::from_operations("-x,-y,z").unwrap()];
//! let atoms = generate(&sites, &ops);
//! let cart = vectors.to_cartesian(&atoms.get("Cu1").unwrap()[0].position);
//! assert!((cart.x + 1.).abs() < 1e-12);
//! ```

pub mod cell;
pub mod cif;
pub mod error;
pub mod orbit;
pub mod sample;
pub mod site;
pub mod supercell;
pub mod symmetry;

pub use crate::cell::{to_fractional, AngleUnit, LatticeParameters, LatticeVectors};
pub use crate::cif::{save_cif, write_cif};
pub use crate::error::SampleError;
pub use crate::orbit::{dedupe, generate, AtomSet, DEFAULT_TOLERANCE};
pub use crate::sample::{
    build_sample, expand_sample, RawLatticeParameters, Sample, SampleInput, DEFAULT_OUTFILE,
};
pub use crate::site::{parse_measurement, AtomImage, Measurement, RawSite, Site};
pub use crate::supercell::Supercell;
pub use crate::symmetry::SymmetryOperation;
