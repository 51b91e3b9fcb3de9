//
// cif.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::cell::{to_fractional, LatticeParameters};
use crate::error::SampleError;
use crate::supercell::Supercell;

/// Write a supercell in the Crystallographic Information File format
///
/// The cell lengths are those of the supercell, while the angles are the input angles in degrees
/// since replicating the cell the same number of times along each vector doesn't change them.
/// The cartesian position of each atom is converted back to fractional coordinates of the
/// supercell, wrapped into $[0, 1)$.
///
pub fn write_cif<W: Write>(
    writer: &mut W,
    supercell: &Supercell,
    params: &LatticeParameters,
) -> Result<(), SampleError> {
    let inverse = supercell.vectors.inverse()?;
    let (a, b, c) = supercell.lengths();
    let (alpha, beta, gamma) = params.angles_degrees();

    writeln!(writer, "data_supercell_structure")?;
    writeln!(writer, "_cell_length_a    {:.4}", a)?;
    writeln!(writer, "_cell_length_b    {:.4}", b)?;
    writeln!(writer, "_cell_length_c    {:.4}", c)?;
    writeln!(writer, "_cell_angle_alpha {:.2}", alpha)?;
    writeln!(writer, "_cell_angle_beta  {:.2}", beta)?;
    writeln!(writer, "_cell_angle_gamma {:.2}", gamma)?;
    writeln!(writer, "loop_")?;
    writeln!(writer, "  _atom_site_label")?;
    writeln!(writer, "  _atom_site_fract_x")?;
    writeln!(writer, "  _atom_site_fract_y")?;
    writeln!(writer, "  _atom_site_fract_z")?;
    writeln!(writer, "  _atom_site_occupancy")?;

    for (element, images) in supercell.atoms.iter() {
        for image in images {
            let frac = to_fractional(&image.position, &inverse);
            writeln!(
                writer,
                "  {}  {:.5}  {:.5}  {:.5}  {:.3}",
                element, frac.x, frac.y, frac.z, image.occupancy
            )?;
        }
    }
    Ok(())
}

/// Save a supercell to a CIF file, replacing any existing file
pub fn save_cif<P: AsRef<Path>>(
    path: P,
    supercell: &Supercell,
    params: &LatticeParameters,
) -> Result<(), SampleError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_cif(&mut writer, supercell, params)?;
    writer.flush()?;
    info!(
        "Written {} atoms to {}",
        supercell.atoms.len_images(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use nalgebra::Point3;

    use super::*;
    use crate::cell::LatticeVectors;
    use crate::orbit::AtomSet;
    use crate::site::AtomImage;

    fn write_to_string(supercell: &Supercell, params: &LatticeParameters) -> String {
        let mut buffer = Vec::new();
        write_cif(&mut buffer, supercell, params).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn cubic_supercell(sample_size: usize) -> (Supercell, LatticeParameters) {
        let params = LatticeParameters::from_degrees(2., 2., 2., 90., 90., 90.);
        let vectors = LatticeVectors::from_parameters(&params).unwrap();
        let mut atoms = AtomSet::new();
        atoms.push("Cu1", AtomImage::new(Point3::new(1., 1., 1.), 1.));
        atoms.push("C2", AtomImage::new(Point3::new(-0.5, 0., 0.), 0.5));
        (
            Supercell::build(&atoms, sample_size, &vectors).unwrap(),
            params,
        )
    }

    #[test]
    fn header() {
        let (supercell, params) = cubic_supercell(2);
        let output = write_to_string(&supercell, &params);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "data_supercell_structure");
        assert_eq!(lines[1], "_cell_length_a    4.0000");
        assert_eq!(lines[4], "_cell_angle_alpha 90.00");
        assert_eq!(lines[6], "_cell_angle_gamma 90.00");
        assert_eq!(lines[7], "loop_");
        assert_eq!(lines[12], "  _atom_site_occupancy");
    }

    #[test]
    fn atom_rows() {
        let (supercell, params) = cubic_supercell(2);
        let output = write_to_string(&supercell, &params);
        let rows: Vec<&str> = output.lines().skip(13).collect();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0], "  Cu1  0.25000  0.25000  0.25000  1.000");
        assert_eq!(rows[1], "  Cu1  0.25000  0.25000  0.75000  1.000");
        // Positions outside the supercell are wrapped back in
        assert_eq!(rows[8], "  C2  0.87500  0.00000  0.00000  0.500");
    }

    #[test]
    fn hexagonal_angles() {
        let params = LatticeParameters::from_degrees(6.027318, 6.027318, 4.82861, 90., 90., 120.);
        let vectors = LatticeVectors::from_parameters(&params).unwrap();
        let supercell = Supercell::build(&AtomSet::new(), 3, &vectors).unwrap();
        let output = write_to_string(&supercell, &params);
        assert!(output.contains("_cell_length_a    18.0820"));
        assert!(output.contains("_cell_length_c    14.4858"));
        assert!(output.contains("_cell_angle_gamma 120.00"));
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supercell.cif");
        std::fs::write(&path, "previous contents which are much longer than the header").unwrap();

        let (supercell, params) = cubic_supercell(1);
        save_cif(&path, &supercell, &params).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("data_supercell_structure\n"));
        assert_eq!(contents.lines().count(), 13 + 2);
    }

    #[test]
    fn save_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("supercell.cif");
        let (supercell, params) = cubic_supercell(1);
        assert!(matches!(
            save_cif(&path, &supercell, &params),
            Err(SampleError::Io(_))
        ));
    }
}
