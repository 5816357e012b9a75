//! GLSL code generation backend.
//!
//! This module serializes a shader statement tree to GLSL source for one
//! stage, in either the desktop or the ES dialect.

pub mod generator;
pub mod options;
mod validate;

pub use generator::GlslGenerator;
pub use options::{Dialect, GlslOptions, Precision};

#[cfg(test)]
mod tests;
