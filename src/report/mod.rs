//! Reporting utilities: formatted terminal output for extracted bundles.

pub mod format;

pub use format::*;
