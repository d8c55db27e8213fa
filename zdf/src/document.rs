//! This module implements the layout of a ZDF document: header, global
//! unit declarations, mesh, and result sets. The whole document is a
//! pure tree, built bottom-up and serialized top-down; key names here
//! are the stable wire names of the interchange format.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{DimensionedArray, IdArray};

/// The fixed document format version.
pub const FORMAT_VERSION: f64 = 1.0;

/// The organization stamped into every header.
pub const ORG: &str = "ZWSoft";

/// The fixed version digest stamped into every header.
pub const VERSION_DIGEST: &str =
  "1.0.0,VERNUM:04/29/2022(9485:eccfecd9f9e4)";

/// The prefix for custom header keys.
pub const CUSTOMIZE_PREFIX: &str = "zw_";

/// The consuming application named in the header.
pub const ZW_APP: &str = "ZW3D";

/// The static document header.
#[derive(Clone, Debug, Serialize)]
pub struct Header {
  /// The format version.
  pub version: f64,
  /// The document creation date, `YYYY-MM-DD HH:MM:SS`.
  pub date: String,
  /// The producing organization.
  pub org: &'static str,
  /// The document author. Always empty.
  pub author: &'static str,
  /// The model name, i.e. the source file's base name.
  pub model: String,
  /// The version digest of the producing tool.
  pub version_digest: &'static str,
  /// The prefix used for customized keys.
  pub customize_prefix: &'static str,
  /// The consuming application.
  pub zw_app: &'static str
}

impl Header {
  /// Builds a header for a model name and a pre-formatted date string.
  pub fn new(model: &str, date: String) -> Self {
    return Self {
      version: FORMAT_VERSION,
      date,
      org: ORG,
      author: "",
      model: model.to_owned(),
      version_digest: VERSION_DIGEST,
      customize_prefix: CUSTOMIZE_PREFIX,
      zw_app: ZW_APP
    };
  }
}

/// The fixed global unit declarations: one base unit per SI quantity.
#[derive(Clone, Debug, Serialize)]
pub struct Units {
  /// The mass unit.
  pub mass: &'static str,
  /// The length unit.
  pub length: &'static str,
  /// The time unit.
  pub time: &'static str,
  /// The temperature unit.
  pub temperature: &'static str,
  /// The electric current unit.
  pub electric_current: &'static str,
  /// The substance amount unit.
  pub substance_amount: &'static str,
  /// The luminous intensity unit.
  pub luminous_intensity: &'static str,
  /// The angle unit.
  pub angle: &'static str
}

impl Default for Units {
  fn default() -> Self {
    return Self {
      mass: "Kilogram",
      length: "Meter",
      time: "Second",
      temperature: "Kelvin",
      electric_current: "Ampere",
      substance_amount: "Mole",
      luminous_intensity: "Candela",
      angle: "Radian"
    };
  }
}

/// The `global` section of the document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Global {
  /// The unit declarations.
  pub units: Units
}

/// The node block of a mesh: parallel id and coordinate records.
#[derive(Clone, Debug, Serialize)]
pub struct NodeBlock {
  /// The node labels, 1-D.
  pub id: IdArray,
  /// The node coordinates, 2-D, row i belonging to id i.
  pub value: DimensionedArray<Vec<f64>>
}

/// One group of elements sharing a canonical shape.
#[derive(Clone, Debug, Serialize)]
pub struct ElementGroup {
  /// The numeric type id of the shape.
  #[serde(rename = "type id")]
  pub type_id: usize,
  /// The element labels, 1-D.
  pub id: IdArray,
  /// The canonical-order connectivity, 2-D, row i belonging to id i.
  pub value: DimensionedArray<Vec<i64>>
}

/// The neutral mesh representation: nodes plus elements grouped by
/// canonical shape name. Built once per document, immutable thereafter.
#[derive(Clone, Debug, Serialize)]
pub struct Mesh {
  /// The node block.
  pub nodes: NodeBlock,
  /// The element groups, keyed by canonical shape name.
  pub elements: BTreeMap<String, ElementGroup>
}

/// The `model` section of the document.
#[derive(Clone, Debug, Serialize)]
pub struct Model {
  /// The mesh.
  pub mesh: Mesh
}

/// One extracted field: variable names plus parallel id/value records.
/// Each data row is `[invariant values..., raw components...]`, in the
/// order `variables` lists them.
#[derive(Clone, Debug, Serialize)]
pub struct FieldRecord {
  /// The invariant names (declared order) followed by the raw component
  /// labels. Every data row has exactly this many entries.
  pub variables: Vec<String>,
  /// The record kind. Always "translation".
  #[serde(rename = "type")]
  pub kind: &'static str,
  /// The node or element labels, 1-D.
  pub id: IdArray,
  /// The field data, 2-D, row i belonging to id i.
  pub value: DimensionedArray<Vec<f64>>
}

/// The results of one analysis step: its ordinal, a time value, and the
/// extracted fields keyed by (possibly suffixed) field name as sibling
/// keys on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct StepResult {
  /// The ordinal number of the step.
  pub step: usize,
  /// The time value of the step.
  pub time_value: f64,
  /// The extracted fields, flattened next to `step`/`time_value`.
  #[serde(flatten)]
  pub fields: BTreeMap<String, FieldRecord>
}

/// One result set: an analysis id and the per-step results.
#[derive(Clone, Debug, Serialize)]
pub struct ResultSet {
  /// The analysis id. Always 1.
  pub analysis: usize,
  /// The step results, keyed by step name.
  pub items: BTreeMap<String, StepResult>
}

/// A complete ZDF document. Constructed once, emitted once.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
  /// The static header.
  pub header: Header,
  /// The global declarations.
  pub global: Global,
  /// The model section.
  pub model: Model,
  /// The result sets, keyed by model name.
  pub result_sets: BTreeMap<String, ResultSet>
}
