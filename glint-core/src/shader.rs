//! Built shaders and programs
//!
//! A shader is built once through [`ShaderBuilder`] and then only read. The
//! stage is part of the type, so a vertex shader can't be handed to the
//! fragment slot of a [`Program`].

use crate::builder::ShaderBuilder;
use crate::error::Result;
use crate::glsl::{GlslGenerator, GlslOptions};
use crate::ir::Stm;
use crate::types::ShaderStage;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statement tree tagged with the stage it runs in
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    stage: ShaderStage,
    body: Stm,
}

impl Shader {
    pub fn new(stage: ShaderStage, body: Stm) -> Self {
        Shader { stage, body }
    }

    pub fn build(stage: ShaderStage, build: impl FnOnce(&mut ShaderBuilder)) -> Self {
        let mut builder = ShaderBuilder::new(stage);
        build(&mut builder);
        Shader::new(stage, builder.finish())
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn body(&self) -> &Stm {
        &self.body
    }

    pub fn to_glsl(&self, options: &GlslOptions) -> Result<String> {
        GlslGenerator::new(self.stage, *options).generate(&self.body)
    }
}

macro_rules! stage_shader {
    ($name:ident, $stage:expr) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Shader);

        impl $name {
            pub fn new(body: Stm) -> Self {
                $name(Shader::new($stage, body))
            }

            pub fn build(build: impl FnOnce(&mut ShaderBuilder)) -> Self {
                $name(Shader::build($stage, build))
            }

            pub fn shader(&self) -> &Shader {
                &self.0
            }

            pub fn body(&self) -> &Stm {
                self.0.body()
            }

            pub fn to_glsl(&self, options: &GlslOptions) -> Result<String> {
                self.0.to_glsl(options)
            }
        }
    };
}

stage_shader!(VertexShader, ShaderStage::Vertex);
stage_shader!(FragmentShader, ShaderStage::Fragment);

static NEXT_PROGRAM_ID: AtomicU64 = AtomicU64::new(0);

/// Identity token of a [`Program`]. Clones share the id of the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(u64);

/// GLSL text for both stages of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSources {
    pub vertex: String,
    pub fragment: String,
}

/// A vertex/fragment pair drawn together
#[derive(Debug, Clone)]
pub struct Program {
    id: ProgramId,
    name: String,
    vertex: VertexShader,
    fragment: FragmentShader,
}

impl Program {
    pub fn new(name: impl Into<String>, vertex: VertexShader, fragment: FragmentShader) -> Self {
        Program {
            id: ProgramId(NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            vertex,
            fragment,
        }
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &VertexShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &FragmentShader {
        &self.fragment
    }

    pub fn to_glsl(&self, options: &GlslOptions) -> Result<ProgramSources> {
        Ok(ProgramSources {
            vertex: self.vertex.to_glsl(options)?,
            fragment: self.fragment.to_glsl(options)?,
        })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program[{}]", self.name)
    }
}
