#![forbid(unsafe_code)]
#![doc = "Common types, error codes, and identifiers for the aesmux cipher engine."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
