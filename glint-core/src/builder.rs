//! Shader builder DSL
//!
//! `ShaderBuilder` accumulates statements for one scope. Nested scopes (the
//! branches of an `if_`) get their own builder, and the finished statements
//! are wrapped in a `Stm::Stms` block.
//!
//! ```
//! use glint_core::builder::ShaderBuilder;
//! use glint_core::ir::{Lit, Temp};
//! use glint_core::types::{ShaderStage, VarType};
//!
//! let temp = Temp::new(0, VarType::Float4);
//! let mut b = ShaderBuilder::new(ShaderStage::Vertex);
//! b.if_(true.lit(), |b| b.set(&temp, 1i32.lit() * 2i32.lit()))
//!     .else_(|b| b.set(&temp, 3i32.lit() * 4i32.lit()));
//! let body = b.finish();
//! ```

use crate::ir::{Builtin, Operand, Stm};
use crate::types::{ShaderStage, VarType};
use log::trace;

pub struct ShaderBuilder {
    stage: ShaderStage,
    stms: Vec<Stm>,
}

impl ShaderBuilder {
    pub fn new(stage: ShaderStage) -> Self {
        ShaderBuilder {
            stage,
            stms: Vec::new(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Statements accumulated so far in this scope
    pub fn statements(&self) -> &[Stm] {
        &self.stms
    }

    /// Consume the builder, producing the scope as one block
    pub fn finish(self) -> Stm {
        Stm::Stms(self.stms)
    }

    /// Append `target = expr;`
    pub fn set(&mut self, target: impl Into<Operand>, expr: impl Into<Operand>) {
        self.stms.push(Stm::set(target, expr));
    }

    /// The stage output (`gl_Position` or `gl_FragColor`)
    pub fn out(&self) -> Operand {
        Operand::OUTPUT
    }

    /// Build a nested scope with `body` and run it in a fresh builder
    fn scope(&self, body: impl FnOnce(&mut ShaderBuilder)) -> Stm {
        let mut nested = ShaderBuilder::new(self.stage);
        body(&mut nested);
        trace!("closed nested scope with {} statements", nested.stms.len());
        nested.finish()
    }

    /// Open a conditional. The returned handle can attach an else branch;
    /// the `If` statement is appended to this scope when the handle drops.
    pub fn if_(&mut self, cond: impl Into<Operand>, body: impl FnOnce(&mut ShaderBuilder)) -> IfBuilder<'_> {
        let then_body = self.scope(body);
        IfBuilder {
            cond: Some(cond.into()),
            then_body: Some(then_body),
            else_body: None,
            parent: self,
        }
    }

    /// Constructor expression of an arbitrary type, e.g. `lit(Float2, [x, y])`
    pub fn lit(&self, ty: VarType, ops: impl IntoIterator<Item = Operand>) -> Operand {
        Operand::vector(ty, ops.into_iter().collect())
    }

    pub fn vec4(&self, ops: impl IntoIterator<Item = Operand>) -> Operand {
        self.lit(VarType::Float4, ops)
    }
}

macro_rules! builtin_fns {
    ($($fn_name:ident => $builtin:ident ( $($arg:ident),+ );)*) => {
        impl ShaderBuilder {
            $(
                pub fn $fn_name(&self, $($arg: impl Into<Operand>),+) -> Operand {
                    Operand::call(Builtin::$builtin, vec![$($arg.into()),+])
                }
            )*
        }
    };
}

builtin_fns! {
    sin => Sin(arg);
    cos => Cos(arg);
    tan => Tan(arg);
    asin => Asin(arg);
    acos => Acos(arg);
    atan => Atan(arg);
    radians => Radians(arg);
    degrees => Degrees(arg);
    texture2d => Texture2D(sampler, coord);
    pow => Pow(base, exponent);
    exp => Exp(v);
    exp2 => Exp2(v);
    log => Log(v);
    log2 => Log2(v);
    sqrt => Sqrt(v);
    inversesqrt => InverseSqrt(v);
    abs => Abs(v);
    sign => Sign(v);
    ceil => Ceil(v);
    floor => Floor(v);
    fract => Fract(v);
    clamp => Clamp(v, min, max);
    min => Min(a, b);
    max => Max(a, b);
    modulo => Mod(a, b);
    step => Step(edge, x);
    smoothstep => SmoothStep(edge0, edge1, x);
    mix => Mix(a, b, amount);
}

/// Pending conditional returned by [`ShaderBuilder::if_`]
pub struct IfBuilder<'a> {
    cond: Option<Operand>,
    then_body: Option<Stm>,
    else_body: Option<Stm>,
    parent: &'a mut ShaderBuilder,
}

impl IfBuilder<'_> {
    /// Attach the else branch. Calling this again replaces the previous one.
    pub fn else_(&mut self, body: impl FnOnce(&mut ShaderBuilder)) -> &mut Self {
        self.else_body = Some(self.parent.scope(body));
        self
    }
}

impl Drop for IfBuilder<'_> {
    fn drop(&mut self) {
        if let (Some(cond), Some(then_body)) = (self.cond.take(), self.then_body.take()) {
            self.parent.stms.push(Stm::If {
                cond,
                then_body: Box::new(then_body),
                else_body: self.else_body.take().map(Box::new),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BinOp, Lit, Temp, Uniform};

    #[test]
    fn test_set_appends_in_order() {
        let t = Temp::new(0, VarType::Float1);
        let mut b = ShaderBuilder::new(ShaderStage::Fragment);
        b.set(&t, 1.0f32);
        b.set(b.out(), b.vec4([t.into(), 0.0f32.lit(), 0.0f32.lit(), 1.0f32.lit()]));

        match b.finish() {
            Stm::Stms(stms) => {
                assert_eq!(stms.len(), 2);
                assert_eq!(stms[0], Stm::set(&t, 1.0f32));
                match &stms[1] {
                    Stm::Set { to, from } => {
                        assert_eq!(*to, Operand::OUTPUT);
                        assert_eq!(from.ty(), VarType::Float4);
                    }
                    other => panic!("Expected set, got {:?}", other),
                }
            }
            other => panic!("Expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        let t = Temp::new(1, VarType::Float1);
        let mut b = ShaderBuilder::new(ShaderStage::Vertex);
        b.if_(false.lit(), |b| b.set(&t, 2));

        let Stm::Stms(stms) = b.finish() else {
            panic!("Expected block");
        };
        assert_eq!(
            stms,
            vec![Stm::If {
                cond: Operand::BoolLit(false),
                then_body: Box::new(Stm::Stms(vec![Stm::set(&t, 2)])),
                else_body: None,
            }]
        );
    }

    #[test]
    fn test_else_last_write_wins() {
        let t = Temp::new(0, VarType::Float1);
        let mut b = ShaderBuilder::new(ShaderStage::Vertex);
        b.if_(true.lit(), |b| b.set(&t, 1))
            .else_(|b| b.set(&t, 2))
            .else_(|b| b.set(&t, 3));

        let Stm::Stms(stms) = b.finish() else {
            panic!("Expected block");
        };
        assert_eq!(stms.len(), 1);
        match &stms[0] {
            Stm::If { else_body, .. } => {
                assert_eq!(
                    else_body.as_deref(),
                    Some(&Stm::Stms(vec![Stm::set(&t, 3)]))
                );
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_if_lands_in_inner_scope() {
        let t = Temp::new(0, VarType::Float1);
        let mut b = ShaderBuilder::new(ShaderStage::Vertex);
        b.if_(true.lit(), |b| {
            b.if_(false.lit(), |b| b.set(&t, 1));
        });
        b.set(&t, 5);

        let Stm::Stms(stms) = b.finish() else {
            panic!("Expected block");
        };
        assert_eq!(stms.len(), 2);
        let Stm::If { then_body, .. } = &stms[0] else {
            panic!("Expected if");
        };
        let Stm::Stms(inner) = then_body.as_ref() else {
            panic!("Expected block");
        };
        assert!(matches!(inner.as_slice(), [Stm::If { .. }]));
    }

    #[test]
    fn test_builtins_preserve_name_and_argument_order() {
        let b = ShaderBuilder::new(ShaderStage::Fragment);
        let u = Uniform::new("u_Amount", VarType::Float1);
        let call = b.mix(1.0f32, 2.0f32, &u);
        assert_eq!(
            call,
            Operand::Func {
                func: Builtin::Mix,
                args: vec![Operand::FloatLit(1.0), Operand::FloatLit(2.0), Operand::from(&u)],
            }
        );
        assert_eq!(Builtin::Mix.name(), "mix");
        assert_eq!(Builtin::InverseSqrt.name(), "inversesqrt");
        assert!(matches!(b.modulo(1, 2), Operand::Func { func: Builtin::Mod, .. }));
    }

    #[test]
    fn test_operator_sugar() {
        let u = Uniform::new("u_A", VarType::Float1);
        let expr = (&u + 1.0f32) % 2.0f32;
        match expr {
            Operand::Binop { op, left, .. } => {
                assert_eq!(op, BinOp::Rem);
                assert!(matches!(*left, Operand::Binop { op: BinOp::Add, .. }));
            }
            other => panic!("Expected binop, got {:?}", other),
        }
    }
}
