//! This module implements the dimensioned array container every ZDF
//! data block is made of, and the builder that accumulates (id, row)
//! pairs into one.

use serde::Serialize;

use crate::errors::ConversionError;

/// The universal ZDF array container: shape metadata plus nested data.
/// The dims/data invariant is enforced at construction time and the
/// record is never mutated afterwards, so an inconsistent record cannot
/// exist.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DimensionedArray<T> {
  /// Marks the object as a record on the wire. Always true.
  #[serde(rename = "__isRecord__")]
  is_record: bool,
  /// The dimensions: `[len]` for 1-D arrays, `[rows, cols]` for 2-D.
  #[serde(rename = "__dims__")]
  dims: Vec<usize>,
  /// The nested data, outer length always equal to `dims[0]`.
  #[serde(rename = "__data__")]
  data: Vec<T>
}

impl<T> DimensionedArray<T> {
  /// Builds a 1-D record, stamping `dims` as `[len]`.
  pub fn one_dim(data: Vec<T>) -> Self {
    return Self { is_record: true, dims: vec![data.len()], data };
  }

  /// Returns the dimensions of the record.
  pub fn dims(&self) -> &[usize] {
    return &self.dims;
  }

  /// Returns the data of the record.
  pub fn data(&self) -> &[T] {
    return &self.data;
  }

  /// Returns the outer length of the record.
  pub fn len(&self) -> usize {
    return self.data.len();
  }

  /// Returns true if the record holds no data.
  pub fn is_empty(&self) -> bool {
    return self.data.is_empty();
  }
}

impl<S> DimensionedArray<Vec<S>> {
  /// Builds a 2-D record, stamping `dims` as `[rows, cols]` where `cols`
  /// is the length of the first row. Every row must match it. An empty
  /// input yields `[0, 0]` and is never an error.
  pub fn two_dim(rows: Vec<Vec<S>>) -> Result<Self, ConversionError> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
      if row.len() != width {
        return Err(ConversionError::IrregularRowLength {
          row: i,
          expected: width,
          got: row.len()
        });
      }
    }
    return Ok(Self {
      is_record: true,
      dims: vec![rows.len(), width],
      data: rows
    });
  }
}

/// An id array: labels are optional because some source records omit
/// them, and absent ones serialize as nulls.
pub type IdArray = DimensionedArray<Option<i64>>;

/// Accumulates parallel (id, row) pairs in iteration order and seals
/// them into an id record and a value record.
#[derive(Clone, Debug)]
pub struct RecordBuilder<S> {
  /// The ids appended so far.
  ids: Vec<Option<i64>>,
  /// The data rows appended so far, parallel to the ids.
  rows: Vec<Vec<S>>
}

impl<S> Default for RecordBuilder<S> {
  fn default() -> Self {
    return Self::new();
  }
}

impl<S> RecordBuilder<S> {
  /// Instantiates an empty builder.
  pub fn new() -> Self {
    return Self { ids: Vec::new(), rows: Vec::new() };
  }

  /// Appends one (id, row) pair.
  pub fn push(&mut self, id: Option<i64>, row: Vec<S>) {
    self.ids.push(id);
    self.rows.push(row);
  }

  /// Returns the number of pairs appended so far.
  pub fn len(&self) -> usize {
    return self.rows.len();
  }

  /// Returns true if nothing has been appended yet.
  pub fn is_empty(&self) -> bool {
    return self.rows.is_empty();
  }

  /// Seals the builder into an id record and a value record, stamping
  /// the dims exactly once.
  ///
  /// If the first id is absent, the whole id column is replaced by the
  /// dense 1-based sequence `[1, 2, ..., count]` -- source records that
  /// omit labels omit them uniformly, so only the first entry is
  /// consulted. A mixed column whose first id is present is left
  /// untouched.
  pub fn finish(
    self
  ) -> Result<(IdArray, DimensionedArray<Vec<S>>), ConversionError> {
    let ids = if self.ids.first().is_some_and(Option::is_none) {
      (1..=self.ids.len() as i64).map(Some).collect()
    } else {
      self.ids
    };
    let id = DimensionedArray::one_dim(ids);
    let value = DimensionedArray::two_dim(self.rows)?;
    return Ok((id, value));
  }
}
