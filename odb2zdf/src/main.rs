//! A command-line application to convert a result-database snapshot to
//! a ZDF interchange document.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use log::*;
use odb::prelude::*;
use zdf::prelude::*;

/// The arguments passed to the converter.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// Output extra/debug info while converting.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// The input result-database snapshot (JSON).
  input: PathBuf,
  /// The path to write the ZDF document to.
  output: PathBuf
}

fn main() -> io::Result<()> {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  // load the snapshot
  if !args.input.is_file() {
    error!("Provided path either does not exist or is not a file!");
    std::process::exit(1);
  }
  info!("Reading {}...", args.input.display());
  let db = match Odb::from_file(&args.input) {
    Ok(db) => db,
    Err(e) => {
      error!("Could not load the result database: {}", e);
      std::process::exit(1);
    }
  };
  // run the conversion
  let model = model_base_name(&args.input);
  let date = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
  info!("Converting model \"{}\"...", model);
  let doc = match to_document(&db, &model, date) {
    Ok(doc) => doc,
    Err(e) => {
      error!("Conversion failed: {}", e);
      std::process::exit(1);
    }
  };
  // write the document
  let output = BufWriter::new(File::create(&args.output)?);
  if let Err(e) = serde_json::to_writer_pretty(output, &doc) {
    error!("Could not write the document: {}", e);
    std::process::exit(1);
  }
  info!("Wrote {}.", args.output.display());
  return Ok(());
}
