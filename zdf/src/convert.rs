//! This module implements the extraction orchestration: mesh, fields,
//! steps, and finally the whole document. Each extraction reads an
//! independent slice of the read-only source and writes into its own
//! freshly-allocated output subtree; the pipeline is one-shot and
//! synchronous.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use odb::prelude::*;

use crate::document::*;
use crate::elements::{reorder, ElementShape};
use crate::errors::ConversionError;
use crate::record::RecordBuilder;

/// The constant time value stamped into every step result. True
/// per-frame time is available in the source but not yet carried
/// through.
pub const TIME_VALUE: f64 = 1.0;

/// The suffix appended to field names resampled from integration points,
/// so consumers can tell element-based fields from node-based ones.
pub const ELEMENT_RESULT_SUFFIX: &str = " element result";

/// Produces the neutral mesh from the source's first structural part.
/// Additional parts are silently ignored.
pub fn extract_mesh(odb: &Odb) -> Result<Mesh, ConversionError> {
  let part = odb.first_part().ok_or(SourceError::NoParts)?;
  debug!("Extracting mesh from part \"{}\".", part.name);
  // one pass over the node collection
  let mut node_builder = RecordBuilder::new();
  for node in &part.nodes {
    node_builder.push(node.label, node.coordinates.clone());
  }
  let (node_ids, coordinates) = node_builder.finish()?;
  // one pass over the element collection, grouping by canonical shape
  let mut groups: BTreeMap<&'static str, (ElementShape, RecordBuilder<i64>)> =
    BTreeMap::new();
  for element in &part.elements {
    let shape = ElementShape::classify(&element.type_code)?;
    let (_, builder) = groups
      .entry(shape.name())
      .or_insert_with(|| (shape, RecordBuilder::new()));
    builder.push(element.label, reorder(&element.connectivity, shape.name())?);
  }
  // seal the groups
  let mut elements = BTreeMap::new();
  for (name, (shape, builder)) in groups {
    debug!("Sealing {} \"{}\" element(s).", builder.len(), name);
    let (id, value) = builder.finish()?;
    elements.insert(
      name.to_owned(),
      ElementGroup { type_id: shape.type_id(), id, value }
    );
  }
  return Ok(Mesh {
    nodes: NodeBlock { id: node_ids, value: coordinates },
    elements
  });
}

/// Produces one field record from one named field output. Returns the
/// output key alongside: integration-point fields are read through their
/// centroid subset and keyed with the element-result suffix, never under
/// their bare name.
pub fn convert_field(
  name: &str,
  output: &FieldOutput
) -> Result<(String, FieldRecord), ConversionError> {
  let (key, values) = if output.location == Location::IntegrationPoint {
    let subset = output.centroid_subset().ok_or_else(|| {
      SourceError::MissingCentroidSubset { field: name.to_owned() }
    })?;
    (format!("{}{}", name, ELEMENT_RESULT_SUFFIX), subset)
  } else {
    (name.to_owned(), output.values.as_slice())
  };
  // invariant names first, in declared order, then raw component labels
  let mut variables: Vec<String> = output
    .valid_invariants
    .iter()
    .map(|k| k.name().to_owned())
    .collect();
  variables.extend(output.component_labels.iter().cloned());
  let mut builder = RecordBuilder::new();
  for value in values {
    let mut row: Vec<f64> = Vec::with_capacity(variables.len());
    for kind in &output.valid_invariants {
      row.push(value.invariants.get(*kind).ok_or_else(|| {
        ConversionError::UnsupportedInvariant { field: key.clone(), kind: *kind }
      })?);
    }
    row.extend(value.data.iter().copied());
    builder.push(value.label, row);
  }
  debug!("Field \"{}\": {} value(s), {} variable(s).",
    key,
    builder.len(),
    variables.len()
  );
  let (id, value) = builder.finish()?;
  return Ok((key, FieldRecord { variables, kind: "translation", id, value }));
}

/// Produces the result of one step from its final frame, or None when
/// the step has no frames at all.
pub fn convert_step(
  name: &str,
  step: &Step
) -> Result<Option<StepResult>, ConversionError> {
  let Some(frame) = step.frames.last() else {
    debug!("Step \"{}\" has no frames, skipping.", name);
    return Ok(None);
  };
  let mut fields = BTreeMap::new();
  for (field_name, output) in &frame.field_outputs {
    let (key, record) = convert_field(field_name, output)?;
    fields.insert(key, record);
  }
  return Ok(Some(StepResult {
    step: step.number,
    time_value: TIME_VALUE,
    fields
  }));
}

/// Assembles the whole document: header, units, mesh, and one result set
/// keyed by the model name.
pub fn to_document(
  odb: &Odb,
  model_name: &str,
  date: String
) -> Result<Document, ConversionError> {
  let mesh = extract_mesh(odb)?;
  let mut items = BTreeMap::new();
  for (name, step) in &odb.steps {
    if let Some(result) = convert_step(name, step)? {
      items.insert(name.clone(), result);
    }
  }
  info!(
    "Assembled document: {} node(s), {} element group(s), {} step(s).",
    mesh.nodes.id.len(),
    mesh.elements.len(),
    items.len()
  );
  let mut result_sets = BTreeMap::new();
  result_sets.insert(model_name.to_owned(), ResultSet { analysis: 1, items });
  return Ok(Document {
    header: Header::new(model_name, date),
    global: Global::default(),
    model: Model { mesh },
    result_sets
  });
}

/// Derives the model name from a source file path: the base name up to
/// its first dot.
pub fn model_base_name(path: &Path) -> String {
  let base = path
    .file_name()
    .and_then(|s| s.to_str())
    .unwrap_or("model");
  return base.split('.').next().unwrap_or(base).to_owned();
}
