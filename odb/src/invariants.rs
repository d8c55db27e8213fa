//! This module defines the derived scalar invariants a result database
//! declares and precomputes for vector/tensor field outputs.

use core::str::FromStr;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Generates the InvariantKind enum with its fixed wire names.
macro_rules! gen_invariants {
  (
    $(($vn:ident, $nm:literal, $fld:ident),)+
  ) => {
    /// The invariant kinds a field output can declare as valid. The wire
    /// names match the source package's symbolic constants exactly.
    #[derive(
      Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd,
      Ord
    )]
    #[allow(missing_docs)]
    pub enum InvariantKind {
      $(
        #[serde(rename = $nm)]
        $vn,
      )+
    }

    impl InvariantKind {
      /// Returns the all-caps name of the invariant, as the source
      /// package stringifies it.
      pub const fn name(&self) -> &'static str {
        return match self {
          $(Self::$vn => $nm,)+
        };
      }

      /// Returns a static slice with all known invariant kinds.
      pub const fn all() -> &'static [Self] {
        return &[
          $(Self::$vn,)+
        ];
      }
    }

    impl FromStr for InvariantKind {
      type Err = ();

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s {
          $(
            $nm => Ok(Self::$vn),
          )+
          _ => Err(())
        };
      }
    }

    /// The precomputed invariant scalars attached to a single field
    /// value. Each one is optional: the database only fills in the
    /// scalars the field output actually declares.
    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct InvariantData {
      $(
        #[doc = concat!("The precomputed ", $nm, " scalar, if present.")]
        pub $fld: Option<f64>,
      )+
    }

    impl InvariantData {
      /// Reads the precomputed scalar for an invariant kind directly off
      /// this value. These are never recomputed here.
      pub const fn get(&self, kind: InvariantKind) -> Option<f64> {
        return match kind {
          $(InvariantKind::$vn => self.$fld,)+
        };
      }
    }
  };
}

gen_invariants!(
  (Magnitude, "MAGNITUDE", magnitude),
  (Mises, "MISES", mises),
  (Tresca, "TRESCA", tresca),
  (Press, "PRESS", press),
  (Inv3, "INV3", inv3),
  (MaxPrincipal, "MAX_PRINCIPAL", max_principal),
  (MidPrincipal, "MID_PRINCIPAL", mid_principal),
  (MinPrincipal, "MIN_PRINCIPAL", min_principal),
  (MaxInPlanePrincipal, "MAX_INPLANE_PRINCIPAL", max_in_plane_principal),
  (MinInPlanePrincipal, "MIN_INPLANE_PRINCIPAL", min_in_plane_principal),
  (OutOfPlanePrincipal, "OUTOFPLANE_PRINCIPAL", out_of_plane_principal),
);

impl Display for InvariantKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.name());
  }
}
