//! Thermal performance curve models.
//!
//! Rate equations are small, pure functions over positional coefficients so that
//! the extraction code can stay generic over `CurveModel`.

pub mod family;
pub mod model;
pub mod registry;

pub use family::*;
pub use model::*;
pub use registry::*;
