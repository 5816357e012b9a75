//! Shader value types and stages.
//!
//! `VarType` is the closed set of types a shader operand can carry. Each type
//! knows its byte size (used when packing vertex buffers) and its component
//! count (used when binding vertex attributes and validating constructors).

use std::fmt;

/// Type carried by every operand in the shader tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Bool1,
    Int1,
    Float1,
    Float2,
    Float3,
    Float4,
    Mat4,
    /// Four packed bytes, exposed to the shader as a `vec4`
    Byte4,
    TextureUnit,
}

/// Scalar storage of a vertex attribute component, as seen by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Float,
    Int,
    UnsignedByte,
}

impl VarType {
    /// Size in bytes of one value of this type inside a vertex buffer
    pub fn byte_size(self) -> usize {
        match self {
            VarType::Bool1 => 1,
            VarType::Int1 => 4,
            VarType::Float1 => 4,
            VarType::Float2 => 8,
            VarType::Float3 => 12,
            VarType::Float4 => 16,
            VarType::Mat4 => 4 * 4 * 4,
            VarType::Byte4 => 4,
            VarType::TextureUnit => 4,
        }
    }

    /// Number of scalar components
    pub fn element_count(self) -> usize {
        match self {
            VarType::Bool1 | VarType::Int1 | VarType::Float1 | VarType::TextureUnit => 1,
            VarType::Float2 => 2,
            VarType::Float3 => 3,
            VarType::Float4 | VarType::Byte4 => 4,
            VarType::Mat4 => 16,
        }
    }

    pub fn element_kind(self) -> ElementKind {
        match self {
            VarType::Int1 | VarType::TextureUnit => ElementKind::Int,
            VarType::Float1 | VarType::Float2 | VarType::Float3 | VarType::Float4 | VarType::Mat4 => {
                ElementKind::Float
            }
            VarType::Bool1 | VarType::Byte4 => ElementKind::UnsignedByte,
        }
    }

    /// GLSL spelling of this type in declarations, if it has one
    pub fn glsl_name(self) -> Option<&'static str> {
        match self {
            VarType::Float1 => Some("float"),
            VarType::Float2 => Some("vec2"),
            VarType::Float3 => Some("vec3"),
            VarType::Float4 => Some("vec4"),
            VarType::Byte4 => Some("vec4"),
            VarType::Mat4 => Some("mat4"),
            VarType::TextureUnit => Some("sampler2D"),
            VarType::Bool1 | VarType::Int1 => None,
        }
    }

    /// Whether a swizzle suffix may be applied to values of this type
    pub fn is_swizzleable(self) -> bool {
        matches!(
            self,
            VarType::Float1 | VarType::Float2 | VarType::Float3 | VarType::Float4 | VarType::Byte4
        )
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Pipeline stage a shader runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Builtin variable the stage's `Output` is written to
    pub fn output_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "gl_Position",
            ShaderStage::Fragment => "gl_FragColor",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}
