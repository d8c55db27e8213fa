//! This library implements the read-only query surface over a result
//! database produced by an Abaqus-like FEA package.
//!
//! The proprietary binary database is never opened directly; instead, a
//! JSON snapshot of its contents (steps, frames, field outputs, field
//! values, parts, nodes, elements) is materialized once and read here.
//! Everything in this crate is a plain data structure: nothing is ever
//! mutated after a snapshot has been loaded.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod invariants;
pub mod model;
pub mod reader;


/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::invariants::*;
  pub use crate::model::*;
  pub use crate::reader::*;
}
