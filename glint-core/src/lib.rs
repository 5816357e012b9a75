//! Typed shader IR with a builder DSL and a GLSL source generator.
//!
//! Shaders are described as a small tree of operands and statements,
//! usually through [`builder::ShaderBuilder`], and serialized to GLSL by
//! [`glsl::GlslGenerator`]. [`layout::VertexLayout`] computes the matching
//! vertex buffer packing.

pub mod builder;
pub mod cache;
pub mod defaults;
pub mod error;
pub mod glsl;
pub mod interface;
pub mod ir;
pub mod layout;
pub mod shader;
pub mod types;
pub mod visitor;

pub use error::{GlslError, Result};
pub use glsl::{Dialect, GlslGenerator, GlslOptions, Precision};
pub use ir::{AsOperand, Attribute, Lit, Operand, Stm, Temp, Uniform, Variable, Varying};
pub use layout::VertexLayout;
pub use shader::{FragmentShader, Program, ProgramSources, VertexShader};
pub use types::{ShaderStage, VarType};
