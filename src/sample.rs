//
// sample.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::convert::TryFrom;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cell::{AngleUnit, LatticeParameters, LatticeVectors};
use crate::cif::save_cif;
use crate::error::SampleError;
use crate::orbit::{generate, AtomSet, DEFAULT_TOLERANCE};
use crate::site::{AtomImage, Measurement, RawSite, Site};
use crate::supercell::Supercell;
use crate::symmetry::SymmetryOperation;

/// The file the supercell is written to when no other path is given
pub const DEFAULT_OUTFILE: &str = "supercell_structure.cif";

/// The unit cell parameters as they appear in the input
///
/// Each of the values can be either a number or a string with an uncertainty annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLatticeParameters {
    pub a: Measurement,
    pub b: Measurement,
    pub c: Measurement,
    pub alpha: Measurement,
    pub beta: Measurement,
    pub gamma: Measurement,
}

impl RawLatticeParameters {
    /// Parse the values, interpreting the angles in the given unit
    pub fn parse(&self, unit: AngleUnit) -> Result<LatticeParameters, SampleError> {
        let value = |name: &str, m: &Measurement| {
            m.value().ok_or_else(|| SampleError::InvalidParameter {
                name: name.to_string(),
                value: m.to_string(),
            })
        };
        Ok(LatticeParameters::from_radians(
            value("a", &self.a)?,
            value("b", &self.b)?,
            value("c", &self.c)?,
            unit.to_radians(value("alpha", &self.alpha)?),
            unit.to_radians(value("beta", &self.beta)?),
            unit.to_radians(value("gamma", &self.gamma)?),
        ))
    }
}

/// Everything required to build a sample of a crystal structure
///
/// The angle unit has no default, it always has to be specified.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleInput {
    pub lattice: RawLatticeParameters,
    pub angle_unit: AngleUnit,
    pub sites: Vec<RawSite>,
    pub operations: Vec<String>,
    pub sample_size: usize,
}

/// The result of expanding the asymmetric unit
///
/// A sample size of one gives the unit cell, anything larger a supercell. In both cases the
/// positions are in cartesian coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    UnitCell(AtomSet),
    Supercell(Supercell),
}

impl Sample {
    pub fn atoms(&self) -> &AtomSet {
        match self {
            Sample::UnitCell(atoms) => atoms,
            Sample::Supercell(supercell) => &supercell.atoms,
        }
    }
}

/// The unit cell of a structure along with the parameters used to create it
#[derive(Debug, Clone)]
struct UnitCell {
    params: LatticeParameters,
    vectors: LatticeVectors,
    atoms: AtomSet,
}

fn unit_cell(input: &SampleInput) -> Result<UnitCell, SampleError> {
    if input.sample_size == 0 {
        return Err(SampleError::InvalidSampleSize(input.sample_size));
    }
    let params = input.lattice.parse(input.angle_unit)?;
    let sites = input
        .sites
        .iter()
        .map(Site::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let operations = input
        .operations
        .iter()
        .map(|op| SymmetryOperation::from_operations(op))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "Parsed {} sites and {} symmetry operations",
        sites.len(),
        operations.len()
    );

    let vectors = LatticeVectors::from_parameters(&params)?;
    debug!("Lattice vectors: {}", vectors);

    let fractional = generate(&sites, &operations).dedupe(DEFAULT_TOLERANCE);
    let atoms = fractional.map_images(|image| {
        AtomImage::new(vectors.to_cartesian(&image.position), image.occupancy)
    });

    Ok(UnitCell {
        params,
        vectors,
        atoms,
    })
}

fn expand(input: &SampleInput) -> Result<(LatticeParameters, Sample), SampleError> {
    let cell = unit_cell(input)?;
    info!(
        "Unit cell contains {} atoms over {} labels",
        cell.atoms.len_images(),
        cell.atoms.len()
    );
    if input.sample_size == 1 {
        return Ok((cell.params, Sample::UnitCell(cell.atoms)));
    }
    let supercell = Supercell::build(&cell.atoms, input.sample_size, &cell.vectors)?;
    Ok((cell.params, Sample::Supercell(supercell)))
}

/// Expand the asymmetric unit into a unit cell or supercell
///
/// This performs the entire calculation without touching the filesystem.
pub fn expand_sample(input: &SampleInput) -> Result<Sample, SampleError> {
    expand(input).map(|(_, sample)| sample)
}

/// Expand the asymmetric unit, writing any supercell to `outfile`
///
/// When the sample size is one the unit cell is returned and no file is written.
///
pub fn build_sample<P: AsRef<Path>>(
    input: &SampleInput,
    outfile: P,
) -> Result<Sample, SampleError> {
    let (params, sample) = expand(input)?;
    match &sample {
        Sample::Supercell(supercell) => save_cif(outfile, supercell, &params)?,
        Sample::UnitCell(_) => info!("Single unit cell requested, no file written"),
    }
    Ok(sample)
}
