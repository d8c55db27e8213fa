//! This library implements the ZDF interchange document model and the
//! translation engine that produces it from a result-database snapshot.
//!
//! The engine has five cooperating pieces: the element-type classifier
//! and node-order maps (`elements`), the dimensioned-array container and
//! its builder (`record`), the output document layout (`document`), the
//! mesh/field/result-set extraction (`convert`), and the conversion
//! error taxonomy (`errors`).

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod convert;
pub mod document;
pub mod elements;
pub mod errors;
pub mod record;

#[cfg(test)]
mod tests;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::convert::*;
  pub use crate::document::*;
  pub use crate::elements::*;
  pub use crate::errors::*;
  pub use crate::record::*;
}
