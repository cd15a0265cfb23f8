//! Domain types used throughout the extraction engine.
//!
//! This module defines:
//!
//! - search enums (`Direction`, `Side`, `ParamName`)
//! - the observed temperature domain (`ObservedDomain`)
//! - engine configuration (`ExtractConfig`)
//! - the output bundle (`DerivedParams`)

pub mod types;

pub use types::*;
