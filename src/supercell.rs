//
// supercell.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use itertools::iproduct;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::LatticeVectors;
use crate::error::SampleError;
use crate::orbit::AtomSet;
use crate::site::AtomImage;

/// A replication of the unit cell along each of the lattice vectors
///
/// The positions of the atoms are in cartesian coordinates, and the lattice vectors are those of
/// the whole supercell, being `sample_size` times the vectors of the unit cell.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supercell {
    pub atoms: AtomSet,
    pub vectors: LatticeVectors,
    pub sample_size: usize,
}

impl Supercell {
    /// Replicate a set of cartesian positions `sample_size` times along each lattice vector
    ///
    /// Each image is copied to every translation $i \vec{a} + j \vec{b} + k \vec{c}$ with
    /// $0 \le i, j, k <$ `sample_size`, so every element ends up with `sample_size`³ times the
    /// number of images. The copies of each image are kept together.
    ///
    pub fn build(
        atoms: &AtomSet,
        sample_size: usize,
        vectors: &LatticeVectors,
    ) -> Result<Supercell, SampleError> {
        if sample_size == 0 {
            return Err(SampleError::InvalidSampleSize(sample_size));
        }

        let mut supercell = AtomSet::new();
        for (element, images) in atoms.iter() {
            for image in images {
                for (i, j, k) in iproduct!(0..sample_size, 0..sample_size, 0..sample_size) {
                    let offset =
                        i as f64 * vectors.a + j as f64 * vectors.b + k as f64 * vectors.c;
                    supercell.push(
                        element,
                        AtomImage::new(image.position + offset, image.occupancy),
                    );
                }
            }
        }
        debug!(
            "Replicated {} images into {} for a {}x{}x{} supercell",
            atoms.len_images(),
            supercell.len_images(),
            sample_size,
            sample_size,
            sample_size
        );

        Ok(Supercell {
            atoms: supercell,
            vectors: vectors * sample_size as f64,
            sample_size,
        })
    }

    /// The lengths of the supercell lattice vectors
    pub fn lengths(&self) -> (f64, f64, f64) {
        self.vectors.lengths()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::cell::LatticeParameters;

    fn vectors() -> LatticeVectors {
        LatticeVectors::from_parameters(&LatticeParameters::from_degrees(
            2., 3., 4., 90., 90., 90.,
        ))
        .unwrap()
    }

    fn atoms() -> AtomSet {
        let mut atoms = AtomSet::new();
        atoms.push("Cu1", AtomImage::new(Point3::new(0.5, 0.5, 0.5), 1.));
        atoms.push("C2", AtomImage::new(Point3::new(0., 0., 1.), 0.5));
        atoms.push("C2", AtomImage::new(Point3::new(0., 0., 3.), 0.5));
        atoms
    }

    #[test]
    fn cardinality() {
        for n in 1..5 {
            let supercell = Supercell::build(&atoms(), n, &vectors()).unwrap();
            assert_eq!(supercell.atoms.get("Cu1").unwrap().len(), n.pow(3));
            assert_eq!(supercell.atoms.get("C2").unwrap().len(), 2 * n.pow(3));
        }
    }

    #[test]
    fn single_cell_unchanged() {
        let supercell = Supercell::build(&atoms(), 1, &vectors()).unwrap();
        assert_eq!(supercell.atoms, atoms());
        assert_eq!(supercell.vectors, vectors());
    }

    #[test]
    fn zero_size() {
        assert!(matches!(
            Supercell::build(&atoms(), 0, &vectors()),
            Err(SampleError::InvalidSampleSize(0))
        ));
    }

    #[test]
    fn offsets() {
        let supercell = Supercell::build(&atoms(), 2, &vectors()).unwrap();
        let images = supercell.atoms.get("Cu1").unwrap();
        assert_abs_diff_eq!(images[0].position, Point3::new(0.5, 0.5, 0.5), epsilon = 1e-12);
        // k varies fastest
        assert_abs_diff_eq!(images[1].position, Point3::new(0.5, 0.5, 4.5), epsilon = 1e-12);
        assert_abs_diff_eq!(images[2].position, Point3::new(0.5, 3.5, 0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(images[7].position, Point3::new(2.5, 3.5, 4.5), epsilon = 1e-12);
    }

    #[test]
    fn occupancy_preserved() {
        let supercell = Supercell::build(&atoms(), 3, &vectors()).unwrap();
        assert!(supercell
            .atoms
            .get("C2")
            .unwrap()
            .iter()
            .all(|i| (i.occupancy - 0.5).abs() < 1e-12));
    }

    #[test]
    fn scaled_vectors() {
        let supercell = Supercell::build(&atoms(), 3, &vectors()).unwrap();
        assert_abs_diff_eq!(supercell.vectors.b, Vector3::new(0., 9., 0.), epsilon = 1e-12);
        let (a, b, c) = supercell.lengths();
        assert_abs_diff_eq!(a, 6., epsilon = 1e-12);
        assert_abs_diff_eq!(b, 9., epsilon = 1e-12);
        assert_abs_diff_eq!(c, 12., epsilon = 1e-12);
    }
}
