//! Pipeline module.
//!
//! Loads, cleans and derives the result sets in one synchronous pass.

mod builder;

pub use builder::{Pipeline, PipelineBuilder};
