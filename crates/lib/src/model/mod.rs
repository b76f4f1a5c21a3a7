//! The mutable build description stage configurators write into.

mod types;

pub use types::*;
