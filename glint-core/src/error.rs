use crate::types::VarType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlslError {
    #[error("Unsupported declaration type {ty} for '{name}'")]
    UnsupportedType { ty: VarType, name: String },

    #[error("Attribute '{name}' can't be used in a fragment shader")]
    StageViolation { name: String },

    #[error("Invalid swizzle '.{mask}' on {ty}: {reason}")]
    SwizzleMismatch {
        mask: String,
        ty: VarType,
        reason: String,
    },

    #[error("Constructor for {ty} expects {expected} components, found {found}")]
    ArityMismatch {
        ty: VarType,
        expected: usize,
        found: usize,
    },

    #[error("Conflicting declarations for '{name}'")]
    ConflictingDeclaration { name: String },

    #[error("Float literal {0} has no GLSL representation")]
    NonFiniteLiteral(f32),
}

impl GlslError {
    /// Name of the variable the error is about, if any
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { name, .. }
            | Self::StageViolation { name }
            | Self::ConflictingDeclaration { name } => Some(name),
            Self::SwizzleMismatch { .. } | Self::ArityMismatch { .. } | Self::NonFiniteLiteral(_) => {
                None
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GlslError>;

#[macro_export]
macro_rules! bail_type {
    ($ty:expr, $name:expr) => {
        return Err($crate::error::GlslError::UnsupportedType {
            ty: $ty,
            name: ($name).to_string(),
        })
    };
}

#[macro_export]
macro_rules! bail_swizzle {
    ($mask:expr, $ty:expr, $($arg:tt)*) => {
        return Err($crate::error::GlslError::SwizzleMismatch {
            mask: ($mask).to_string(),
            ty: $ty,
            reason: format!($($arg)*),
        })
    };
}
