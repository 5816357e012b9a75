//! Generator configuration

use std::fmt;

/// Flavor of GLSL to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Desktop GLSL. The precision block is guarded by `#ifdef GL_ES`.
    #[default]
    Desktop,
    /// GLSL ES. Precision statements are emitted unguarded.
    Es,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Low,
    Medium,
    High,
}

impl Precision {
    pub fn qualifier(self) -> &'static str {
        match self {
            Precision::Low => "lowp",
            Precision::Medium => "mediump",
            Precision::High => "highp",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlslOptions {
    pub dialect: Dialect,
    pub float_precision: Precision,
    pub int_precision: Precision,
    /// Applies to both `sampler2D` and `samplerCube`
    pub sampler_precision: Precision,
}

impl Default for GlslOptions {
    fn default() -> Self {
        GlslOptions {
            dialect: Dialect::Desktop,
            float_precision: Precision::Medium,
            int_precision: Precision::Medium,
            sampler_precision: Precision::Low,
        }
    }
}

impl GlslOptions {
    /// Default options for the given dialect flag
    pub fn gles(gles: bool) -> Self {
        let dialect = if gles { Dialect::Es } else { Dialect::Desktop };
        GlslOptions {
            dialect,
            ..Self::default()
        }
    }

    pub fn with_dialect(self, dialect: Dialect) -> Self {
        GlslOptions { dialect, ..self }
    }

    pub fn with_float_precision(self, float_precision: Precision) -> Self {
        GlslOptions {
            float_precision,
            ..self
        }
    }

    pub fn with_int_precision(self, int_precision: Precision) -> Self {
        GlslOptions { int_precision, ..self }
    }

    pub fn with_sampler_precision(self, sampler_precision: Precision) -> Self {
        GlslOptions {
            sampler_precision,
            ..self
        }
    }

    pub fn is_gles(&self) -> bool {
        self.dialect == Dialect::Es
    }
}
