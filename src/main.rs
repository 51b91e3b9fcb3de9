//
// main.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Error};
use log::{debug, info, LevelFilter};
use structopt::StructOpt;

use crystal_sample::{build_sample, Sample, SampleInput, DEFAULT_OUTFILE};

#[derive(Debug, StructOpt)]
#[structopt(name = "crystal-sample")]
struct Args {
    /// Pass many times for more log output
    ///
    /// By default, it'll report info messages. Passing `-v` one time also prints
    /// debug messages, and `-vv` enables trace logging.
    #[structopt(long, short, parse(from_occurrences))]
    verbosity: u8,

    /// JSON file describing the lattice parameters, sites and symmetry operations
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Where to save the supercell structure [default: supercell_structure.cif]
    #[structopt(long, parse(from_os_str))]
    outfile: Option<PathBuf>,

    /// The number of unit cells along each lattice vector, overriding the input file
    #[structopt(short, long)]
    sample_size: Option<usize>,

    /// Also write the cartesian positions of every atom as JSON
    #[structopt(long, parse(from_os_str))]
    json: Option<PathBuf>,
}

fn read_input(args: &Args) -> Result<SampleInput, Error> {
    let file = File::open(&args.input)
        .with_context(|| format!("Unable to open {}", args.input.display()))?;
    let mut input: SampleInput = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid input file {}", args.input.display()))?;

    if let Some(size) = args.sample_size {
        debug!("Overriding sample size {} with {}", input.sample_size, size);
        input.sample_size = size;
    }
    if input.sample_size == 0 {
        bail!("The sample size has to be at least 1");
    }
    Ok(input)
}

#[paw::main]
fn main(args: Args) -> Result<(), Error> {
    let log_level = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(log_level).init();

    debug!("Logging Level: {}", log_level);

    let input = read_input(&args)?;
    let outfile = args
        .outfile
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTFILE));
    let sample = build_sample(&input, &outfile)?;

    match &sample {
        Sample::UnitCell(atoms) => info!("Unit cell with {} atoms", atoms.len_images()),
        Sample::Supercell(supercell) => info!(
            "{0}x{0}x{0} supercell with {1} atoms written to {2}",
            supercell.sample_size,
            supercell.atoms.len_images(),
            outfile.display()
        ),
    }

    if let Some(path) = &args.json {
        let serialised = serde_json::to_string(sample.atoms())?;
        File::create(path)?.write_all(serialised.as_bytes())?;
        info!("Positions written to {}", path.display());
    }

    Ok(())
}
