//! Input/output helpers.
//!
//! - curve JSON read/write (`curve`)
//! - observation CSV ingest (`ingest`)
//! - derived-parameter exports (CSV/JSON) (`export`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
