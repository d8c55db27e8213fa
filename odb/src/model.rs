//! This module defines the data model of a result-database snapshot: the
//! narrow, read-only surface the translation engine queries. Steps own
//! frames, frames own field outputs, field outputs own values; parts own
//! nodes and elements. It is a pure tree with no back-references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::invariants::{InvariantData, InvariantKind};

/// A fully-materialized result database: named analysis steps plus the
/// structural parts of the model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Odb {
  /// The named analysis steps, each with its ordered frames.
  #[serde(default)]
  pub steps: BTreeMap<String, Step>,
  /// The structural parts, in database order.
  #[serde(default)]
  pub parts: Vec<Part>
}

impl Odb {
  /// Returns the first structural part, if any. Only the first part is
  /// ever consulted during conversion; additional parts are ignored.
  pub fn first_part(&self) -> Option<&Part> {
    return self.parts.first();
  }
}

/// A single analysis step.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Step {
  /// The ordinal number of the step within the analysis.
  pub number: usize,
  /// The frames of the step, in increment order. May be empty.
  #[serde(default)]
  pub frames: Vec<Frame>
}

/// A single time/load increment's snapshot of field results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Frame {
  /// The field outputs of this frame, keyed by field name.
  #[serde(default)]
  pub field_outputs: BTreeMap<String, FieldOutput>
}

/// The kinds of locations a field output's values can live at.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
  /// Values at mesh nodes.
  Nodal,
  /// One value per whole element.
  WholeElement,
  /// Values at element integration points.
  IntegrationPoint,
  /// Values resampled to element centroids.
  Centroid
}

/// One named field output within a frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldOutput {
  /// The declared raw component labels, e.g. `U1`, `S11`.
  #[serde(default)]
  pub component_labels: Vec<String>,
  /// The invariants the database declares valid for this field, in
  /// declaration order.
  #[serde(default)]
  pub valid_invariants: Vec<InvariantKind>,
  /// Where the values of this field live.
  pub location: Location,
  /// The field values, in database iteration order.
  #[serde(default)]
  pub values: Vec<FieldValue>,
  /// The centroid-resampled subset the database precomputes for
  /// integration-point fields. Absent otherwise.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub centroid_values: Option<Vec<FieldValue>>
}

impl FieldOutput {
  /// Returns the centroid-resampled subset of this field, if the
  /// database provides one.
  pub fn centroid_subset(&self) -> Option<&[FieldValue]> {
    return self.centroid_values.as_deref();
  }
}

/// A single field value: one node's or element's worth of data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldValue {
  /// The node or element label this value belongs to. Some records in
  /// the database omit explicit labels.
  #[serde(default)]
  pub label: Option<i64>,
  /// The raw component data, in component-label order.
  #[serde(default)]
  pub data: Vec<f64>,
  /// The precomputed invariant scalars for this value.
  #[serde(default)]
  pub invariants: InvariantData
}

/// A structural part: a node collection and an element collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Part {
  /// The name of the part instance.
  #[serde(default)]
  pub name: String,
  /// The nodes of the part, in database iteration order.
  #[serde(default)]
  pub nodes: Vec<Node>,
  /// The elements of the part, in database iteration order.
  #[serde(default)]
  pub elements: Vec<Element>
}

/// A mesh node.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Node {
  /// The node label. Some records omit explicit labels.
  #[serde(default)]
  pub label: Option<i64>,
  /// The node coordinates.
  #[serde(default)]
  pub coordinates: Vec<f64>
}

/// A mesh element.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Element {
  /// The element label. Some records omit explicit labels.
  #[serde(default)]
  pub label: Option<i64>,
  /// The native element-type code, e.g. `C3D10` or `B31`.
  pub type_code: String,
  /// The element connectivity: node labels in native order.
  #[serde(default)]
  pub connectivity: Vec<i64>
}
