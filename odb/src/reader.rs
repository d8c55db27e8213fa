//! This module implements loading a result-database snapshot from disk,
//! and the error type for everything the collaborator can do wrong.

use std::error::Error;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::model::Odb;

/// A failure surfaced by the read-only result-database collaborator.
#[derive(Debug)]
#[non_exhaustive]
pub enum SourceError {
  /// The snapshot file could not be read.
  Io(io::Error),
  /// The snapshot contents were not a valid database dump.
  Malformed(serde_json::Error),
  /// The database contains no structural parts at all.
  NoParts,
  /// An integration-point field is missing its centroid-resampled
  /// subset.
  MissingCentroidSubset {
    /// The name of the offending field.
    field: String
  }
}

impl Display for SourceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(e) => write!(f, "could not read snapshot: {}", e),
      Self::Malformed(e) => write!(f, "malformed snapshot: {}", e),
      Self::NoParts => write!(f, "database contains no parts"),
      Self::MissingCentroidSubset { field } => write!(
        f,
        "integration-point field \"{}\" has no centroid subset",
        field
      )
    };
  }
}

impl Error for SourceError {}

impl From<io::Error> for SourceError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}

impl From<serde_json::Error> for SourceError {
  fn from(value: serde_json::Error) -> Self {
    return Self::Malformed(value);
  }
}

impl Odb {
  /// Loads a database snapshot from a reader.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
    let odb: Self = serde_json::from_reader(reader)?;
    debug!(
      "Loaded snapshot: {} step(s), {} part(s).",
      odb.steps.len(),
      odb.parts.len()
    );
    return Ok(odb);
  }

  /// Utility method -- opens and loads a snapshot file.
  pub fn from_file<P: AsRef<Path>>(p: P) -> Result<Self, SourceError> {
    let file = File::open(p.as_ref())?;
    return Self::from_reader(BufReader::new(file));
  }
}
