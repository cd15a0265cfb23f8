//! `tpc-params` library crate.
//!
//! Derives summary parameters (optimum temperature, maximum rate, critical
//! thermal limits, activation energies, breadths) from fitted thermal
//! performance curves.
//!
//! The binary (`tpc`) is a thin wrapper around this library so that:
//!
//! - the extraction engine is testable without spawning processes
//! - callers with their own fitting routine can use `extract::assemble` directly

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
