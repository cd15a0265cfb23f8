//! Derived-parameter extraction.
//!
//! Responsibilities:
//!
//! - sample a fitted curve on dense grids (`sampler`)
//! - locate the optimum (`extremum`) and thermal limits (`boundary`)
//! - estimate slope parameters from local regressions (`regression`)
//! - compose the bundle (`assembler`), one curve or many in parallel (`batch`)

pub mod assembler;
pub mod batch;
pub mod boundary;
pub mod extremum;
pub mod regression;
pub mod sampler;

pub use assembler::*;
pub use batch::*;
pub use boundary::*;
pub use extremum::*;
pub use regression::*;
pub use sampler::*;
