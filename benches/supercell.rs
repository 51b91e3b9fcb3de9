//
// supercell.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use anyhow::Error;
use criterion::BenchmarkId;
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;

use crystal_sample::{
    generate, AtomImage, AtomSet, LatticeParameters, LatticeVectors, Site, Supercell,
    SymmetryOperation, DEFAULT_TOLERANCE,
};

static BENCH_SIZES: &[usize] = &[1, 2, 4, 8];

static OPERATIONS: &[&str] = &[
    "+x,+y,+z",
    "-y,x-y,+z",
    "y-x,-x,+z",
    "-x,-y,-z",
    "+y,y-x,-z",
    "x-y,+x,-z",
    "+x+1/3,+y+2/3,+z+2/3",
    "-y+1/3,x-y+2/3,+z+2/3",
    "y-x+1/3,-x+2/3,+z+2/3",
    "-x+2/3,-y+1/3,-z+1/3",
    "+y+2/3,y-x+1/3,-z+1/3",
    "x-y+2/3,+x+1/3,-z+1/3",
];

/// Utility function to create the cartesian unit cell of a structure with general positions
fn create_unit_cell() -> Result<(AtomSet, LatticeVectors), Error> {
    let params = LatticeParameters::from_degrees(6.027318, 6.027318, 4.82861, 90., 90., 120.);
    let vectors = LatticeVectors::from_parameters(&params)?;
    let operations = OPERATIONS
        .iter()
        .map(|op| SymmetryOperation::from_operations(op))
        .collect::<Result<Vec<_>, _>>()?;
    let sites = vec![
        Site::new("Cu1", Point3::new(0.11, 0.23, 0.37), 1.)?,
        Site::new("C2", Point3::new(0.41, 0.07, 0.59), 0.5)?,
    ];
    let atoms = generate(&sites, &operations)
        .dedupe(DEFAULT_TOLERANCE)
        .map_images(|i| AtomImage::new(vectors.to_cartesian(&i.position), i.occupancy));
    Ok((atoms, vectors))
}

fn orbit_generation(c: &mut Criterion) {
    let operations: Vec<SymmetryOperation> = OPERATIONS
        .iter()
        .map(|op| SymmetryOperation::from_operations(op).expect("Invalid operation"))
        .collect();
    let sites = vec![Site::new("Cu1", Point3::new(0.11, 0.23, 0.37), 1.).expect("Invalid site")];

    c.bench_function("Orbit Generation", |b| {
        b.iter(|| generate(&sites, &operations).dedupe(DEFAULT_TOLERANCE))
    });
}

fn supercell_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Supercell Build");
    let (atoms, vectors) = create_unit_cell().expect("Creation of unit cell failed");

    for &size in BENCH_SIZES.iter() {
        group.bench_with_input(BenchmarkId::new("Sample Size", size), &size, |b, &size| {
            b.iter(|| Supercell::build(&atoms, size, &vectors))
        });
    }
    group.finish();
}

criterion_group!(benches, orbit_generation, supercell_build);
criterion_main!(benches);
