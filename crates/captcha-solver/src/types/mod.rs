//! Data and error types used by the resolver layer.

pub mod answer;
pub mod error;

pub use answer::*;
pub use error::*;
