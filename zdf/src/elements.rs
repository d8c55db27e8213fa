//! This module defines the normalized element taxonomy, the classifier
//! from native type codes, and the canonical node-order maps.
//!
//! Only beams (`B*`) and continuum solids (`C1D*`/`C2D*`/`C3D*`) are in
//! scope. Native code naming follows the source package's conventions;
//! trailing formulation suffixes (`R`, `H`, ...) are ignored.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::ConversionError;

/// Broadly-defined element families, selected by the leading character
/// of a native type code.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ElementFamily {
  /// Beam elements, like B31.
  Beam,
  /// Continuum (solid) elements, like C3D10.
  Continuum
}

/// Generates the ElementShape enum.
macro_rules! gen_shapes {
  (
    $(($vn:ident, $nm:literal, $tid:literal, $fam:ident, $dim:literal,
       $nc:literal),)*
  ) => {
    /// The canonical element shapes of the output taxonomy.
    #[derive(
      Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd,
      Ord
    )]
    #[non_exhaustive]
    pub enum ElementShape {
      $(
        #[doc = concat!("The ", $nm, " shape, type id ", $tid, ".")]
        $vn,
      )*
    }

    impl ElementShape {
      /// Returns the canonical name of the shape.
      pub const fn name(&self) -> &'static str {
        return match self {
          $(Self::$vn => $nm,)*
        };
      }

      /// Returns the numeric type id used in the output format.
      pub const fn type_id(&self) -> usize {
        return match self {
          $(Self::$vn => $tid,)*
        };
      }

      /// Returns the family of the shape.
      pub const fn family(&self) -> ElementFamily {
        return match self {
          $(Self::$vn => ElementFamily::$fam,)*
        };
      }

      /// Returns the spatial dimension of the shape.
      pub const fn dimension(&self) -> usize {
        return match self {
          $(Self::$vn => $dim,)*
        };
      }

      /// Returns the canonical node count of the shape.
      pub const fn node_count(&self) -> usize {
        return match self {
          $(Self::$vn => $nc,)*
        };
      }

      /// Returns a static slice with all known shapes.
      pub const fn all() -> &'static [Self] {
        return &[
          $(Self::$vn,)*
        ];
      }
    }
  };
}

gen_shapes!(
  // beams
  (Beam2, "beam2", 6, Beam, 1, 2),
  (Beam3, "beam3", 7, Beam, 1, 3),
  // 1D continuum
  (Edge2, "edge2", 6, Continuum, 1, 2),
  (Edge3, "edge3", 7, Continuum, 1, 3),
  // 2D continuum
  (Faceq3, "faceq3", 20, Continuum, 2, 3),
  (Faceq6, "faceq6", 21, Continuum, 2, 6),
  (Faceq4, "faceq4", 22, Continuum, 2, 4),
  (Faceq8, "faceq8", 23, Continuum, 2, 8),
  // 3D continuum
  (Tetra4, "tetra4", 27, Continuum, 3, 4),
  (Tetra10, "tetra10", 28, Continuum, 3, 10),
  (Hexa8, "hexa8", 29, Continuum, 3, 8),
  (Hexa20, "hexa20", 30, Continuum, 3, 20),
  (Hexa27, "hexa27", 31, Continuum, 3, 27),
  (Pyramid5, "pyramid5", 32, Continuum, 3, 5),
  (Pyramid13, "pyramid13", 33, Continuum, 3, 13),
  (Pyramid14, "pyramid14", 34, Continuum, 3, 14),
  (Wedge6, "wedge6", 35, Continuum, 3, 6),
  (Wedge15, "wedge15", 36, Continuum, 3, 15),
  (Wedge18, "wedge18", 37, Continuum, 3, 18),
);

impl Display for ElementShape {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.name());
  }
}

/// The continuum lookup table: (dimension, node count parsed from the
/// native code) to canonical shape. Note that wedge15 is keyed under
/// node count 7.
const CONTINUUM_SHAPES: &[(usize, usize, ElementShape)] = &[
  (1, 2, ElementShape::Edge2),
  (1, 3, ElementShape::Edge3),
  (2, 3, ElementShape::Faceq3),
  (2, 4, ElementShape::Faceq4),
  (2, 6, ElementShape::Faceq6),
  (2, 8, ElementShape::Faceq8),
  (3, 4, ElementShape::Tetra4),
  (3, 5, ElementShape::Pyramid5),
  (3, 6, ElementShape::Wedge6),
  (3, 7, ElementShape::Wedge15),
  (3, 8, ElementShape::Hexa8),
  (3, 10, ElementShape::Tetra10),
  (3, 13, ElementShape::Pyramid13),
  (3, 14, ElementShape::Pyramid14),
  (3, 18, ElementShape::Wedge18),
  (3, 20, ElementShape::Hexa20),
  (3, 27, ElementShape::Hexa27),
];

impl ElementShape {
  /// Classifies a native element-type code into a canonical shape.
  ///
  /// The leading character selects the family; beams resolve on the
  /// second character, continuum codes on their `<dim>D` marker plus the
  /// node count given by the leading digits of the remainder.
  pub fn classify(code: &str) -> Result<Self, ConversionError> {
    match code.chars().next() {
      Some('B') => {
        return match code.chars().nth(1) {
          Some('2') => Ok(Self::Beam2),
          Some('3') => Ok(Self::Beam3),
          _ => Err(ConversionError::UnknownElementType {
            code: code.to_owned()
          })
        };
      },
      Some('C') => {},
      _ => {
        return Err(ConversionError::UnknownElementFamily {
          code: code.to_owned()
        });
      }
    };
    let dimension: usize = match code.get(1..3) {
      Some("1D") => 1,
      Some("2D") => 2,
      Some("3D") => 3,
      _ => {
        return Err(ConversionError::UnknownElementFamily {
          code: code.to_owned()
        });
      }
    };
    let digits: String = code[3..]
      .chars()
      .take_while(|c| c.is_ascii_digit())
      .collect();
    let node_count: usize = digits.parse().map_err(|_| {
      ConversionError::UnknownElementType { code: code.to_owned() }
    })?;
    return CONTINUUM_SHAPES
      .iter()
      .find(|(d, n, _)| *d == dimension && *n == node_count)
      .map(|(_, _, shape)| *shape)
      .ok_or_else(|| ConversionError::UnknownElementType {
        code: code.to_owned()
      });
  }
}

/// The node-order map: canonical-name-keyed permutations describing how
/// native connectivity is reordered into canonical order. Names absent
/// from the map keep their native ordering.
const NODE_ORDER_MAP: &[(&str, &[usize])] = &[
  ("faceq6", &[0, 1, 2, 4, 5, 3]),
  ("tetra", &[1, 0, 2, 3]),
  ("tetra10", &[1, 0, 2, 3, 6, 5, 4, 8, 7, 9]),
  ("wedge15", &[0, 1, 2, 3, 4, 5, 12, 13, 14, 7, 8, 6, 10, 11, 9]),
  ("pyram13", &[0, 1, 2, 3, 4, 9, 10, 11, 12, 5, 6, 7, 8]),
];

/// Looks up the node-order permutation for a canonical element name.
pub fn node_order(name: &str) -> Option<&'static [usize]> {
  return NODE_ORDER_MAP
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, perm)| *perm);
}

/// Reorders a native connectivity sequence into canonical node order.
/// Names without a permutation pass through unchanged. Node identifier
/// values are not validated.
pub fn reorder(
  connectivity: &[i64],
  name: &str
) -> Result<Vec<i64>, ConversionError> {
  let Some(perm) = node_order(name) else {
    return Ok(connectivity.to_vec());
  };
  if connectivity.len() != perm.len() {
    return Err(ConversionError::ConnectivityLengthMismatch {
      shape: name.to_owned(),
      expected: perm.len(),
      got: connectivity.len()
    });
  }
  return Ok(perm.iter().map(|&i| connectivity[i]).collect());
}
