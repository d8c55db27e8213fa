use std::collections::BTreeMap;
use std::path::Path;

use odb::prelude::*;
use serde_json::json;

use crate::prelude::*;

#[test]
fn classify_supported_codes() {
  let check = |code: &str, name: &str, id: usize| {
    let shape = ElementShape::classify(code)
      .unwrap_or_else(|e| panic!("{} should classify: {}", code, e));
    assert_eq!(shape.name(), name, "bad name for {}", code);
    assert_eq!(shape.type_id(), id, "bad type id for {}", code);
  };
  // beams: only the second character matters
  check("B21", "beam2", 6);
  check("B22", "beam2", 6);
  check("B31", "beam3", 7);
  check("B32", "beam3", 7);
  // 1D continuum
  check("C1D2", "edge2", 6);
  check("C1D3", "edge3", 7);
  // 2D continuum
  check("C2D3", "faceq3", 20);
  check("C2D6", "faceq6", 21);
  check("C2D4", "faceq4", 22);
  check("C2D8", "faceq8", 23);
  // 3D continuum
  check("C3D4", "tetra4", 27);
  check("C3D10", "tetra10", 28);
  check("C3D8", "hexa8", 29);
  check("C3D20", "hexa20", 30);
  check("C3D27", "hexa27", 31);
  check("C3D5", "pyramid5", 32);
  check("C3D13", "pyramid13", 33);
  check("C3D14", "pyramid14", 34);
  check("C3D6", "wedge6", 35);
  check("C3D7", "wedge15", 36);
  check("C3D18", "wedge18", 37);
  // formulation suffixes after the node count are ignored
  check("C3D8R", "hexa8", 29);
  check("C3D10M", "tetra10", 28);
}

#[test]
fn classify_rejects_out_of_scope_codes() {
  let family = |code: &str| {
    assert!(
      matches!(
        ElementShape::classify(code),
        Err(ConversionError::UnknownElementFamily { .. })
      ),
      "{} should fail as unknown family",
      code
    );
  };
  let etype = |code: &str| {
    assert!(
      matches!(
        ElementShape::classify(code),
        Err(ConversionError::UnknownElementType { .. })
      ),
      "{} should fail as unknown type",
      code
    );
  };
  family("S4"); // shells are out of scope
  family("DC3D8");
  family("");
  family("C4D8");
  family("CAX4");
  etype("C3D9"); // not in the dimension/count table
  etype("C2D5");
  etype("C3D");
  etype("B41");
  etype("B");
}

#[test]
fn shape_metadata_is_consistent() {
  for shape in ElementShape::all() {
    assert!(!shape.name().is_empty());
    assert!(shape.type_id() > 0);
    assert!((1..=3).contains(&shape.dimension()));
    match shape.family() {
      ElementFamily::Beam => assert_eq!(shape.dimension(), 1),
      ElementFamily::Continuum => {}
    }
  }
}

#[test]
fn reorder_applies_permutations() {
  // spot-check against the fixed map
  assert_eq!(
    reorder(&[11, 22, 33, 44], "tetra").unwrap(),
    vec![22, 11, 33, 44]
  );
  assert_eq!(
    reorder(&[1, 2, 3, 4, 5, 6], "faceq6").unwrap(),
    vec![1, 2, 3, 5, 6, 4]
  );
  assert_eq!(
    reorder(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], "tetra10").unwrap(),
    vec![2, 1, 3, 4, 7, 6, 5, 9, 8, 10]
  );
  // every permutation is a bijection on index positions
  for name in ["faceq6", "tetra", "tetra10", "wedge15", "pyram13"] {
    let perm = node_order(name).unwrap();
    let input: Vec<i64> = (0..perm.len() as i64).collect();
    let mut output = reorder(&input, name).unwrap();
    output.sort_unstable();
    assert_eq!(output, input, "permutation for {} is not a bijection", name);
  }
}

#[test]
fn reorder_is_identity_for_unmapped_names() {
  let conn = vec![8, 6, 7, 5, 3, 0, 9, 1];
  assert_eq!(reorder(&conn, "hexa8").unwrap(), conn);
  // canonical names that only appear in the classifier, not the map
  assert_eq!(reorder(&[4, 3, 2, 1], "tetra4").unwrap(), vec![4, 3, 2, 1]);
  assert!(node_order("tetra4").is_none());
  assert!(node_order("pyramid13").is_none());
}

#[test]
fn reorder_checks_connectivity_length() {
  assert!(matches!(
    reorder(&[1, 2, 3], "tetra"),
    Err(ConversionError::ConnectivityLengthMismatch {
      expected: 4,
      got: 3,
      ..
    })
  ));
}

#[test]
fn builder_stamps_dims() {
  let mut builder = RecordBuilder::new();
  builder.push(Some(10), vec![1.0, 2.0]);
  builder.push(Some(20), vec![3.0, 4.0]);
  builder.push(Some(30), vec![5.0, 6.0]);
  let (id, value) = builder.finish().unwrap();
  assert_eq!(id.dims(), &[3]);
  assert_eq!(id.data(), &[Some(10), Some(20), Some(30)]);
  assert_eq!(value.dims(), &[3, 2]);
  assert_eq!(value.data().len(), 3);
  for row in value.data() {
    assert_eq!(row.len(), 2);
  }
}

#[test]
fn builder_handles_empty_input() {
  let builder: RecordBuilder<f64> = RecordBuilder::new();
  let (id, value) = builder.finish().unwrap();
  assert_eq!(id.dims(), &[0]);
  assert!(id.is_empty());
  assert_eq!(value.dims(), &[0, 0]);
  assert!(value.is_empty());
}

#[test]
fn builder_substitutes_uniformly_absent_ids() {
  let mut builder = RecordBuilder::new();
  for x in [1.0, 2.0, 3.0] {
    builder.push(None, vec![x]);
  }
  let (id, _) = builder.finish().unwrap();
  assert_eq!(id.data(), &[Some(1), Some(2), Some(3)]);
}

#[test]
fn builder_keeps_mixed_ids_untouched() {
  // substitution only triggers when the *first* id is absent
  let mut builder = RecordBuilder::new();
  builder.push(Some(5), vec![1.0]);
  builder.push(None, vec![2.0]);
  builder.push(Some(7), vec![3.0]);
  let (id, _) = builder.finish().unwrap();
  assert_eq!(id.data(), &[Some(5), None, Some(7)]);
}

#[test]
fn builder_rejects_irregular_rows() {
  let mut builder = RecordBuilder::new();
  builder.push(Some(1), vec![1.0, 2.0]);
  builder.push(Some(2), vec![3.0]);
  assert!(matches!(
    builder.finish(),
    Err(ConversionError::IrregularRowLength {
      row: 1,
      expected: 2,
      got: 1
    })
  ));
}

/// Builds a displacement-like nodal field output.
fn displacement_output(values: Vec<FieldValue>) -> FieldOutput {
  return FieldOutput {
    component_labels: vec!["U1".into(), "U2".into(), "U3".into()],
    valid_invariants: vec![InvariantKind::Magnitude],
    location: Location::Nodal,
    values,
    centroid_values: None
  };
}

/// Builds a field value with a label, components, and a magnitude.
fn displacement_value(label: i64, data: Vec<f64>) -> FieldValue {
  let magnitude = data.iter().map(|x| x * x).sum::<f64>().sqrt();
  return FieldValue {
    label: Some(label),
    data,
    invariants: InvariantData { magnitude: Some(magnitude), ..Default::default() }
  };
}

#[test]
fn field_rows_match_variables() {
  let output = displacement_output(vec![
    displacement_value(1, vec![1.0, 0.0, 0.0]),
    displacement_value(2, vec![0.0, 2.0, 0.0])
  ]);
  let (key, record) = convert_field("U", &output).unwrap();
  assert_eq!(key, "U");
  assert_eq!(record.variables, vec!["MAGNITUDE", "U1", "U2", "U3"]);
  assert_eq!(record.kind, "translation");
  assert_eq!(record.value.dims(), &[2, 4]);
  for row in record.value.data() {
    assert_eq!(row.len(), record.variables.len());
  }
  // invariants come first, in declared order
  assert_eq!(record.value.data()[0], vec![1.0, 1.0, 0.0, 0.0]);
  assert_eq!(record.id.data(), &[Some(1), Some(2)]);
}

#[test]
fn integration_point_fields_use_centroid_subset() {
  let mut output = displacement_output(vec![displacement_value(1, vec![
    9.0, 9.0, 9.0
  ])]);
  output.location = Location::IntegrationPoint;
  output.centroid_values =
    Some(vec![displacement_value(1, vec![1.0, 2.0, 2.0])]);
  let (key, record) = convert_field("S", &output).unwrap();
  assert_eq!(key, "S element result");
  // the raw integration-point values must not leak through
  assert_eq!(record.value.data()[0][1..], [1.0, 2.0, 2.0]);
}

#[test]
fn integration_point_fields_require_centroid_subset() {
  let mut output = displacement_output(vec![]);
  output.location = Location::IntegrationPoint;
  assert!(matches!(
    convert_field("S", &output),
    Err(ConversionError::Source(SourceError::MissingCentroidSubset { .. }))
  ));
}

#[test]
fn centroid_located_fields_keep_their_bare_name() {
  let mut output = displacement_output(vec![]);
  output.location = Location::Centroid;
  let (key, _) = convert_field("EVOL", &output).unwrap();
  assert_eq!(key, "EVOL");
}

#[test]
fn declared_invariant_missing_from_a_value_is_fatal() {
  let mut value = displacement_value(1, vec![1.0, 0.0, 0.0]);
  value.invariants = InvariantData::default();
  let output = displacement_output(vec![value]);
  assert!(matches!(
    convert_field("U", &output),
    Err(ConversionError::UnsupportedInvariant {
      kind: InvariantKind::Magnitude,
      ..
    })
  ));
}

#[test]
fn steps_without_frames_are_skipped() {
  let step = Step { number: 3, frames: vec![] };
  assert!(convert_step("Step-3", &step).unwrap().is_none());
}

#[test]
fn step_results_read_the_final_frame() {
  let early = Frame {
    field_outputs: BTreeMap::from([(
      "U".to_owned(),
      displacement_output(vec![displacement_value(1, vec![0.0, 0.0, 0.0])])
    )])
  };
  let last = Frame {
    field_outputs: BTreeMap::from([(
      "U".to_owned(),
      displacement_output(vec![displacement_value(1, vec![4.0, 0.0, 3.0])])
    )])
  };
  let step = Step { number: 2, frames: vec![early, last] };
  let result = convert_step("Step-2", &step).unwrap().unwrap();
  assert_eq!(result.step, 2);
  assert_eq!(result.time_value, TIME_VALUE);
  let record = result.fields.get("U").unwrap();
  assert_eq!(record.value.data()[0], vec![5.0, 4.0, 0.0, 3.0]);
}

#[test]
fn model_base_name_strips_directory_and_extension() {
  assert_eq!(model_base_name(Path::new("/tmp/Job-12.odb")), "Job-12");
  assert_eq!(model_base_name(Path::new("a.b.odb")), "a");
  assert_eq!(model_base_name(Path::new("plain")), "plain");
}

/// Builds the minimal synthetic source: one step, one frame, a single
/// 3-component displacement field without invariants, and one C3D8
/// element on 8 nodes.
fn synthetic_odb() -> Odb {
  let nodes: Vec<Node> = (1..=8)
    .map(|i| Node {
      label: Some(i),
      coordinates: vec![i as f64, 0.0, 0.0]
    })
    .collect();
  let element = Element {
    label: Some(1),
    type_code: "C3D8".to_owned(),
    connectivity: (1..=8).collect()
  };
  let values: Vec<FieldValue> = (1..=8)
    .map(|i| FieldValue {
      label: Some(i),
      data: vec![0.1 * i as f64, 0.0, 0.0],
      invariants: InvariantData::default()
    })
    .collect();
  let output = FieldOutput {
    component_labels: vec!["U1".into(), "U2".into(), "U3".into()],
    valid_invariants: vec![],
    location: Location::Nodal,
    values,
    centroid_values: None
  };
  let frame = Frame {
    field_outputs: BTreeMap::from([("U".to_owned(), output)])
  };
  let step = Step { number: 1, frames: vec![frame] };
  return Odb {
    steps: BTreeMap::from([("Step-1".to_owned(), step)]),
    parts: vec![Part {
      name: "PART-1-1".to_owned(),
      nodes,
      elements: vec![element]
    }]
  };
}

#[test]
fn end_to_end_document_shape() {
  let odb = synthetic_odb();
  let doc =
    to_document(&odb, "job", "2024-01-01 00:00:00".to_owned()).unwrap();
  let v = serde_json::to_value(&doc).unwrap();
  // header and units
  assert_eq!(v["header"]["model"], json!("job"));
  assert_eq!(v["header"]["org"], json!("ZWSoft"));
  assert_eq!(v["global"]["units"]["mass"], json!("Kilogram"));
  assert_eq!(v["global"]["units"]["angle"], json!("Radian"));
  // mesh
  let hexa = &v["model"]["mesh"]["elements"]["hexa8"];
  assert_eq!(hexa["type id"], json!(29));
  assert_eq!(hexa["id"]["__dims__"], json!([1]));
  assert_eq!(hexa["value"]["__dims__"], json!([1, 8]));
  assert_eq!(hexa["value"]["__isRecord__"], json!(true));
  let nodes = &v["model"]["mesh"]["nodes"];
  assert_eq!(nodes["id"]["__dims__"], json!([8]));
  assert_eq!(nodes["value"]["__dims__"], json!([8, 3]));
  // result sets
  let u = &v["result_sets"]["job"]["items"]["Step-1"]["U"];
  assert_eq!(u["variables"], json!(["U1", "U2", "U3"]));
  assert_eq!(u["type"], json!("translation"));
  assert_eq!(u["value"]["__dims__"], json!([8, 3]));
  assert_eq!(
    v["result_sets"]["job"]["items"]["Step-1"]["step"],
    json!(1)
  );
  assert_eq!(
    v["result_sets"]["job"]["items"]["Step-1"]["time_value"],
    json!(1.0)
  );
}

#[test]
fn conversion_requires_a_part() {
  let mut odb = synthetic_odb();
  odb.parts.clear();
  assert!(matches!(
    to_document(&odb, "job", String::new()),
    Err(ConversionError::Source(SourceError::NoParts))
  ));
}

#[test]
fn unsupported_elements_abort_the_mesh() {
  let mut odb = synthetic_odb();
  odb.parts[0].elements.push(Element {
    label: Some(2),
    type_code: "S4".to_owned(),
    connectivity: vec![1, 2, 3, 4]
  });
  assert!(matches!(
    extract_mesh(&odb),
    Err(ConversionError::UnknownElementFamily { .. })
  ));
}

#[test]
fn mesh_groups_preserve_iteration_order() {
  let mut odb = synthetic_odb();
  // a second hexa and a tetra, appended after the first hexa
  odb.parts[0].elements.push(Element {
    label: Some(7),
    type_code: "C3D8".to_owned(),
    connectivity: (1..=8).collect()
  });
  odb.parts[0].elements.push(Element {
    label: Some(3),
    type_code: "C3D4".to_owned(),
    connectivity: vec![1, 2, 3, 4]
  });
  let mesh = extract_mesh(&odb).unwrap();
  assert_eq!(mesh.elements.len(), 2);
  let hexa = mesh.elements.get("hexa8").unwrap();
  assert_eq!(hexa.id.data(), &[Some(1), Some(7)]);
  let tetra = mesh.elements.get("tetra4").unwrap();
  assert_eq!(tetra.type_id, 27);
  // tetra4 has no node-order entry, so connectivity stays native
  assert_eq!(tetra.value.data()[0], vec![1, 2, 3, 4]);
}
