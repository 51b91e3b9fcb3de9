//
// orbit.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use log::debug;
use serde::{Deserialize, Serialize};

use crate::site::{AtomImage, Site};
use crate::symmetry::SymmetryOperation;

/// The tolerance used for comparing positions when removing duplicate images
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// The images of every element within a structure
///
/// This is an ordered mapping from the element label to the images with that label. Labels are
/// kept in the order they were first seen, and the images of each label are kept in the order
/// they were added.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtomSet {
    elements: Vec<(String, Vec<AtomImage>)>,
}

impl AtomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image to the end of the images for `element`
    pub fn push(&mut self, element: &str, image: AtomImage) {
        match self.elements.iter_mut().find(|(label, _)| label == element) {
            Some((_, images)) => images.push(image),
            None => self.elements.push((element.to_string(), vec![image])),
        }
    }

    /// All the images of a single element
    pub fn get(&self, element: &str) -> Option<&[AtomImage]> {
        self.elements
            .iter()
            .find(|(label, _)| label == element)
            .map(|(_, images)| images.as_slice())
    }

    /// Iterate over the elements in insertion order along with their images
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AtomImage])> {
        self.elements
            .iter()
            .map(|(label, images)| (label.as_str(), images.as_slice()))
    }

    /// The labels of all the elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(label, _)| label.as_str())
    }

    /// The number of distinct element labels
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The total number of images over every element
    pub fn len_images(&self) -> usize {
        self.elements.iter().map(|(_, images)| images.len()).sum()
    }

    /// Apply a function to the position of every image, keeping labels and occupancy
    pub fn map_images<F>(&self, mut f: F) -> AtomSet
    where
        F: FnMut(&AtomImage) -> AtomImage,
    {
        AtomSet {
            elements: self
                .elements
                .iter()
                .map(|(label, images)| (label.clone(), images.iter().map(&mut f).collect()))
                .collect(),
        }
    }

    /// Remove the duplicate images of each element
    ///
    /// Images of different elements are never compared with each other.
    pub fn dedupe(&self, tol: f64) -> AtomSet {
        AtomSet {
            elements: self
                .elements
                .iter()
                .map(|(label, images)| {
                    let unique = dedupe(images, tol);
                    debug!(
                        "{}: {} unique of {} images",
                        label,
                        unique.len(),
                        images.len()
                    );
                    (label.clone(), unique)
                })
                .collect(),
        }
    }
}

/// Apply every symmetry operation to every site
///
/// The images are generated with the operations in the outer loop and the sites in the inner
/// loop, so the images of each element are ordered by operation first. The occupancy of the site
/// is carried through unchanged and the positions are not wrapped back into the unit cell.
///
/// ```
/// use crystal_sample::{generate, Site, SymmetryOperation};
/// use nalgebra::Point3;
///
/// let sites = [Site::new("Cu1", Point3::new(0.3, 0., 0.), 1.).unwrap()];
/// let ops = [SymmetryOperation::identity(), "-x,-y,z".parse().unwrap()];
/// let atoms = generate(&sites, &ops);
/// assert_eq!(atoms.get("Cu1").unwrap()[1].position, Point3::new(-0.3, 0., 0.));
/// ```
pub fn generate(sites: &[Site], operations: &[SymmetryOperation]) -> AtomSet {
    let mut atoms = AtomSet::new();
    for op in operations {
        for site in sites {
            atoms.push(
                &site.element,
                AtomImage::new(op.transform(&site.position), site.occupancy),
            );
        }
    }
    atoms
}

/// Remove images which coincide with an earlier image
///
/// Two images are duplicates when all three components of the position and the occupancy are
/// within `tol` of each other. The first image is kept. The comparison is not periodic, so
/// images related by a lattice translation are both kept.
pub fn dedupe(images: &[AtomImage], tol: f64) -> Vec<AtomImage> {
    let mut unique: Vec<AtomImage> = Vec::with_capacity(images.len());
    for image in images {
        if !unique.iter().any(|u| u.coincides(image, tol)) {
            unique.push(*image);
        }
    }
    unique
}
