//! This module defines the conversion error taxonomy. Every error here
//! is fatal: a model outside the documented scope aborts the whole
//! conversion rather than silently dropping data.

use std::error::Error;
use std::fmt::Display;

use odb::prelude::{InvariantKind, SourceError};

/// Everything that can go wrong while translating a result database into
/// a ZDF document.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConversionError {
  /// The leading character of a native element-type code names no
  /// supported element family.
  UnknownElementFamily {
    /// The offending native type code.
    code: String
  },
  /// The element family is supported, but the code resolves to no known
  /// shape within it.
  UnknownElementType {
    /// The offending native type code.
    code: String
  },
  /// A connectivity sequence does not match the length of the node-order
  /// permutation for its shape. Caller contract violation.
  ConnectivityLengthMismatch {
    /// The canonical name the permutation belongs to.
    shape: String,
    /// The permutation length.
    expected: usize,
    /// The connectivity length actually passed.
    got: usize
  },
  /// A field declares an invariant that one of its values does not
  /// carry a precomputed scalar for.
  UnsupportedInvariant {
    /// The output key of the offending field.
    field: String,
    /// The declared invariant kind.
    kind: InvariantKind
  },
  /// A 2-D record was built from rows of differing lengths. This is a
  /// programmer-contract check, not an expected runtime condition.
  IrregularRowLength {
    /// The index of the offending row.
    row: usize,
    /// The length of the first row.
    expected: usize,
    /// The length of the offending row.
    got: usize
  },
  /// A failure surfaced by the read-only source collaborator.
  Source(SourceError)
}

impl Display for ConversionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::UnknownElementFamily { code } => {
        write!(f, "unknown element family for type code \"{}\"", code)
      },
      Self::UnknownElementType { code } => {
        write!(f, "unknown element type code \"{}\"", code)
      },
      Self::ConnectivityLengthMismatch { shape, expected, got } => write!(
        f,
        "connectivity for \"{}\" has {} node(s), expected {}",
        shape,
        got,
        expected
      ),
      Self::UnsupportedInvariant { field, kind } => write!(
        f,
        "field \"{}\" declares invariant {} but a value lacks it",
        field,
        kind
      ),
      Self::IrregularRowLength { row, expected, got } => write!(
        f,
        "row {} has length {}, expected {}",
        row,
        got,
        expected
      ),
      Self::Source(e) => write!(f, "source access failed: {}", e)
    };
  }
}

impl Error for ConversionError {}

impl From<SourceError> for ConversionError {
  fn from(value: SourceError) -> Self {
    return Self::Source(value);
  }
}
