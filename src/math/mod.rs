//! Mathematical utilities: Arrhenius transforms and least squares.

pub mod arrhenius;
pub mod ols;

pub use arrhenius::*;
pub use ols::*;
