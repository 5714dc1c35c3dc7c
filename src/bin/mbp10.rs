//! CLI entry point for MBO → MBP-10 reconstruction.
//!
//! Reads a Market-By-Order CSV, replays it through the reconstruction
//! engine, and writes the MBP-10 snapshot stream to `output.csv` in the
//! working directory.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use decibook::{write_header, write_row, Error, MboReader, Reconstructor};

const OUTPUT_PATH: &str = "output.csv";

#[derive(Parser)]
#[command(name = "mbp10")]
#[command(about = "Reconstruct an MBP-10 snapshot stream from MBO events")]
#[command(version)]
struct Cli {
    /// Path to the MBO input CSV
    input: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli.input) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(input: &Path) -> decibook::Result<()> {
    let file = File::open(input).map_err(|source| Error::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let mut reader = MboReader::new(BufReader::new(file));

    let out = File::create(OUTPUT_PATH).map_err(|source| Error::Open {
        path: PathBuf::from(OUTPUT_PATH),
        source,
    })?;
    let mut writer = BufWriter::new(out);

    write_header(&mut writer)?;
    reader.skip_first_line()?;

    let mut recon = Reconstructor::new();
    loop {
        match reader.next_event() {
            Ok(Some(ev)) => {
                let row = recon.process(ev)?;
                write_row(&mut writer, &row)?;
            }
            Ok(None) => break,
            // A malformed record cannot be applied; later records can.
            Err(e @ Error::Parse { .. }) => log::error!("skipping unparseable record: {e}"),
            Err(e) => return Err(e),
        }
    }
    writer.flush()?;

    println!("MBP-10 reconstruction complete. Output saved to {OUTPUT_PATH}");
    Ok(())
}
