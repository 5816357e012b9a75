//! Shader IR: operands and statements
//!
//! The tree is a plain value: every node owns its children and nothing is
//! mutated once built. Construction never fails. Type mismatches and
//! malformed swizzles are representable here and only rejected when GLSL is
//! generated.

use crate::types::VarType;
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};

/// Per-vertex input, only legal in the vertex stage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub ty: VarType,
    /// Fixed-point data is normalized to [0, 1] / [-1, 1] when fetched
    pub normalized: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: VarType, normalized: bool) -> Self {
        Attribute {
            name: name.into(),
            ty,
            normalized,
        }
    }
}

/// Value interpolated from the vertex stage to the fragment stage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Varying {
    pub name: String,
    pub ty: VarType,
}

impl Varying {
    pub fn new(name: impl Into<String>, ty: VarType) -> Self {
        Varying { name: name.into(), ty }
    }
}

/// Constant bound by the caller for a whole draw call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uniform {
    pub name: String,
    pub ty: VarType,
}

impl Uniform {
    pub fn new(name: impl Into<String>, ty: VarType) -> Self {
        Uniform { name: name.into(), ty }
    }
}

/// Scratch value local to `main`, named `temp<id>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temp {
    pub id: u32,
    pub ty: VarType,
}

impl Temp {
    pub fn new(id: u32, ty: VarType) -> Self {
        Temp { id, ty }
    }

    pub fn name(&self) -> String {
        format!("temp{}", self.id)
    }
}

/// Named storage referenced by the shader
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variable {
    Attribute(Attribute),
    Varying(Varying),
    Uniform(Uniform),
    Temp(Temp),
    /// The stage's mandatory output (`gl_Position` / `gl_FragColor`)
    Output,
}

impl Variable {
    pub fn ty(&self) -> VarType {
        match self {
            Variable::Attribute(a) => a.ty,
            Variable::Varying(v) => v.ty,
            Variable::Uniform(u) => u.ty,
            Variable::Temp(t) => t.ty,
            Variable::Output => VarType::Float4,
        }
    }

    /// Declared name. The output has no declared name; generators substitute
    /// the stage builtin.
    pub fn name(&self) -> String {
        match self {
            Variable::Attribute(a) => a.name.clone(),
            Variable::Varying(v) => v.name.clone(),
            Variable::Uniform(u) => u.name.clone(),
            Variable::Temp(t) => t.name(),
            Variable::Output => "out".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fixed vocabulary of callable GLSL builtins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Radians,
    Degrees,
    Texture2D,
    Pow,
    Exp,
    Exp2,
    Log,
    Log2,
    Sqrt,
    InverseSqrt,
    Abs,
    Sign,
    Ceil,
    Floor,
    Fract,
    Clamp,
    Min,
    Max,
    Mod,
    Step,
    SmoothStep,
    Mix,
}

impl Builtin {
    /// GLSL function name
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Asin => "asin",
            Builtin::Acos => "acos",
            Builtin::Atan => "atan",
            Builtin::Radians => "radians",
            Builtin::Degrees => "degrees",
            Builtin::Texture2D => "texture2D",
            Builtin::Pow => "pow",
            Builtin::Exp => "exp",
            Builtin::Exp2 => "exp2",
            Builtin::Log => "log",
            Builtin::Log2 => "log2",
            Builtin::Sqrt => "sqrt",
            Builtin::InverseSqrt => "inversesqrt",
            Builtin::Abs => "abs",
            Builtin::Sign => "sign",
            Builtin::Ceil => "ceil",
            Builtin::Floor => "floor",
            Builtin::Fract => "fract",
            Builtin::Clamp => "clamp",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Mod => "mod",
            Builtin::Step => "step",
            Builtin::SmoothStep => "smoothstep",
            Builtin::Mix => "mix",
        }
    }

    /// Result type of a call with the given arguments.
    ///
    /// `texture2D` samples a color; `step`/`smoothstep` follow their last
    /// argument; everything else follows its first (GLSL genType rule).
    pub fn return_type(self, args: &[Operand]) -> VarType {
        let pick = match self {
            Builtin::Texture2D => return VarType::Float4,
            Builtin::Step | Builtin::SmoothStep => args.last(),
            _ => args.first(),
        };
        pick.map(Operand::ty).unwrap_or(VarType::Float1)
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Var(Variable),
    IntLit(i32),
    FloatLit(f32),
    BoolLit(bool),
    Binop {
        left: Box<Operand>,
        op: BinOp,
        right: Box<Operand>,
    },
    /// Constructor call building `ty` from the listed components
    Vector { ty: VarType, ops: Vec<Operand> },
    Swizzle { src: Box<Operand>, mask: String },
    Func { func: Builtin, args: Vec<Operand> },
}

impl Operand {
    /// The stage output (`gl_Position` / `gl_FragColor`)
    pub const OUTPUT: Operand = Operand::Var(Variable::Output);

    pub fn ty(&self) -> VarType {
        match self {
            Operand::Var(v) => v.ty(),
            Operand::IntLit(_) => VarType::Int1,
            Operand::FloatLit(_) => VarType::Float1,
            Operand::BoolLit(_) => VarType::Bool1,
            // The right operand is never checked against the left
            Operand::Binop { left, .. } => left.ty(),
            Operand::Vector { ty, .. } => *ty,
            Operand::Swizzle { src, .. } => src.ty(),
            Operand::Func { func, args } => func.return_type(args),
        }
    }

    pub fn binop(left: impl Into<Operand>, op: BinOp, right: impl Into<Operand>) -> Self {
        Operand::Binop {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    pub fn vector(ty: VarType, ops: Vec<Operand>) -> Self {
        Operand::Vector { ty, ops }
    }

    pub fn call(func: Builtin, args: Vec<Operand>) -> Self {
        Operand::Func { func, args }
    }
}

/// Anything that can stand in an expression position
pub trait AsOperand {
    fn as_operand(&self) -> Operand;

    /// Component selection, e.g. `pos.swizzle("xy")`
    fn swizzle(&self, mask: impl Into<String>) -> Operand {
        Operand::Swizzle {
            src: Box::new(self.as_operand()),
            mask: mask.into(),
        }
    }
}

impl AsOperand for Operand {
    fn as_operand(&self) -> Operand {
        self.clone()
    }
}

impl AsOperand for Variable {
    fn as_operand(&self) -> Operand {
        Operand::Var(self.clone())
    }
}

impl AsOperand for Attribute {
    fn as_operand(&self) -> Operand {
        Operand::Var(Variable::Attribute(self.clone()))
    }
}

impl AsOperand for Varying {
    fn as_operand(&self) -> Operand {
        Operand::Var(Variable::Varying(self.clone()))
    }
}

impl AsOperand for Uniform {
    fn as_operand(&self) -> Operand {
        Operand::Var(Variable::Uniform(self.clone()))
    }
}

impl AsOperand for Temp {
    fn as_operand(&self) -> Operand {
        Operand::Var(Variable::Temp(*self))
    }
}

impl<T: AsOperand + ?Sized> From<&T> for Operand {
    fn from(value: &T) -> Self {
        value.as_operand()
    }
}

impl From<Variable> for Operand {
    fn from(value: Variable) -> Self {
        Operand::Var(value)
    }
}

impl From<Attribute> for Operand {
    fn from(value: Attribute) -> Self {
        Operand::Var(Variable::Attribute(value))
    }
}

impl From<Varying> for Operand {
    fn from(value: Varying) -> Self {
        Operand::Var(Variable::Varying(value))
    }
}

impl From<Uniform> for Operand {
    fn from(value: Uniform) -> Self {
        Operand::Var(Variable::Uniform(value))
    }
}

impl From<Temp> for Operand {
    fn from(value: Temp) -> Self {
        Operand::Var(Variable::Temp(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::IntLit(value)
    }
}

impl From<f32> for Operand {
    fn from(value: f32) -> Self {
        Operand::FloatLit(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::BoolLit(value)
    }
}

/// Literal sugar: `1i32.lit()`, `0.5f32.lit()`, `true.lit()`
pub trait Lit {
    fn lit(self) -> Operand;
}

impl Lit for i32 {
    fn lit(self) -> Operand {
        Operand::IntLit(self)
    }
}

impl Lit for f32 {
    fn lit(self) -> Operand {
        Operand::FloatLit(self)
    }
}

impl Lit for bool {
    fn lit(self) -> Operand {
        Operand::BoolLit(self)
    }
}

macro_rules! impl_binops {
    ($($target:ty),* $(,)?) => {
        $(
            impl<R: Into<Operand>> Add<R> for $target {
                type Output = Operand;

                fn add(self, rhs: R) -> Operand {
                    Operand::binop(self, BinOp::Add, rhs)
                }
            }

            impl<R: Into<Operand>> Sub<R> for $target {
                type Output = Operand;

                fn sub(self, rhs: R) -> Operand {
                    Operand::binop(self, BinOp::Sub, rhs)
                }
            }

            impl<R: Into<Operand>> Mul<R> for $target {
                type Output = Operand;

                fn mul(self, rhs: R) -> Operand {
                    Operand::binop(self, BinOp::Mul, rhs)
                }
            }

            impl<R: Into<Operand>> Div<R> for $target {
                type Output = Operand;

                fn div(self, rhs: R) -> Operand {
                    Operand::binop(self, BinOp::Div, rhs)
                }
            }

            impl<R: Into<Operand>> Rem<R> for $target {
                type Output = Operand;

                fn rem(self, rhs: R) -> Operand {
                    Operand::binop(self, BinOp::Rem, rhs)
                }
            }
        )*
    };
}

impl_binops!(Operand, &Operand, &Variable, &Attribute, &Varying, &Uniform, &Temp);

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stm {
    Stms(Vec<Stm>),
    /// Assignment of `from` into `to`
    Set { to: Operand, from: Operand },
    If {
        cond: Operand,
        then_body: Box<Stm>,
        else_body: Option<Box<Stm>>,
    },
}

impl Stm {
    pub fn set(to: impl Into<Operand>, from: impl Into<Operand>) -> Self {
        Stm::Set {
            to: to.into(),
            from: from.into(),
        }
    }

    pub fn empty() -> Self {
        Stm::Stms(Vec::new())
    }
}
