//! Traversal over shader statements and operands
//!
//! Two passes walk the same tree: the GLSL generator, which writes text and
//! records declarations as it goes, and the interface collector, which only
//! records variables. Each hook defaults to recursing into its children, so
//! a pass overrides the node kinds it cares about and returns
//! `ControlFlow::Break` to abort the walk.

use crate::ir::*;
use std::ops::ControlFlow;

/// One hook per statement and operand kind. Leaves do nothing by default.
pub trait Visitor: Sized {
    type Break;

    // --- Statements ---
    fn visit_stm(&mut self, s: &Stm) -> ControlFlow<Self::Break> {
        walk_stm(self, s)
    }

    fn visit_stms(&mut self, stms: &[Stm]) -> ControlFlow<Self::Break> {
        walk_stms(self, stms)
    }

    fn visit_set(&mut self, to: &Operand, from: &Operand) -> ControlFlow<Self::Break> {
        walk_set(self, to, from)
    }

    fn visit_if(
        &mut self,
        cond: &Operand,
        then_body: &Stm,
        else_body: Option<&Stm>,
    ) -> ControlFlow<Self::Break> {
        walk_if(self, cond, then_body, else_body)
    }

    // --- Operands ---
    fn visit_operand(&mut self, o: &Operand) -> ControlFlow<Self::Break> {
        walk_operand(self, o)
    }

    fn visit_variable(&mut self, v: &Variable) -> ControlFlow<Self::Break> {
        walk_variable(self, v)
    }

    fn visit_attribute(&mut self, _a: &Attribute) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_varying(&mut self, _v: &Varying) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_uniform(&mut self, _u: &Uniform) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_temp(&mut self, _t: &Temp) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_output(&mut self) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_int_literal(&mut self, _n: i32) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_float_literal(&mut self, _f: f32) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_bool_literal(&mut self, _b: bool) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_binop(&mut self, left: &Operand, _op: BinOp, right: &Operand) -> ControlFlow<Self::Break> {
        walk_binop(self, left, right)
    }

    fn visit_vector(&mut self, _ty: crate::types::VarType, ops: &[Operand]) -> ControlFlow<Self::Break> {
        walk_vector(self, ops)
    }

    fn visit_swizzle(&mut self, src: &Operand, _mask: &str) -> ControlFlow<Self::Break> {
        walk_swizzle(self, src)
    }

    fn visit_func(&mut self, _func: Builtin, args: &[Operand]) -> ControlFlow<Self::Break> {
        walk_func(self, args)
    }
}

// Default traversal, reusable from overridden hooks

pub fn walk_stm<V: Visitor>(v: &mut V, s: &Stm) -> ControlFlow<V::Break> {
    match s {
        Stm::Stms(stms) => v.visit_stms(stms),
        Stm::Set { to, from } => v.visit_set(to, from),
        Stm::If {
            cond,
            then_body,
            else_body,
        } => v.visit_if(cond, then_body, else_body.as_deref()),
    }
}

pub fn walk_stms<V: Visitor>(v: &mut V, stms: &[Stm]) -> ControlFlow<V::Break> {
    for stm in stms {
        v.visit_stm(stm)?;
    }
    ControlFlow::Continue(())
}

/// Visits the target before the source, matching emission order
pub fn walk_set<V: Visitor>(v: &mut V, to: &Operand, from: &Operand) -> ControlFlow<V::Break> {
    v.visit_operand(to)?;
    v.visit_operand(from)
}

pub fn walk_if<V: Visitor>(
    v: &mut V,
    cond: &Operand,
    then_body: &Stm,
    else_body: Option<&Stm>,
) -> ControlFlow<V::Break> {
    v.visit_operand(cond)?;
    v.visit_stm(then_body)?;
    if let Some(else_body) = else_body {
        v.visit_stm(else_body)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_operand<V: Visitor>(v: &mut V, o: &Operand) -> ControlFlow<V::Break> {
    match o {
        Operand::Var(var) => v.visit_variable(var),
        Operand::IntLit(n) => v.visit_int_literal(*n),
        Operand::FloatLit(f) => v.visit_float_literal(*f),
        Operand::BoolLit(b) => v.visit_bool_literal(*b),
        Operand::Binop { left, op, right } => v.visit_binop(left, *op, right),
        Operand::Vector { ty, ops } => v.visit_vector(*ty, ops),
        Operand::Swizzle { src, mask } => v.visit_swizzle(src, mask),
        Operand::Func { func, args } => v.visit_func(*func, args),
    }
}

pub fn walk_variable<V: Visitor>(v: &mut V, var: &Variable) -> ControlFlow<V::Break> {
    match var {
        Variable::Attribute(a) => v.visit_attribute(a),
        Variable::Varying(vary) => v.visit_varying(vary),
        Variable::Uniform(u) => v.visit_uniform(u),
        Variable::Temp(t) => v.visit_temp(t),
        Variable::Output => v.visit_output(),
    }
}

pub fn walk_binop<V: Visitor>(v: &mut V, left: &Operand, right: &Operand) -> ControlFlow<V::Break> {
    v.visit_operand(left)?;
    v.visit_operand(right)
}

pub fn walk_vector<V: Visitor>(v: &mut V, ops: &[Operand]) -> ControlFlow<V::Break> {
    for op in ops {
        v.visit_operand(op)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_swizzle<V: Visitor>(v: &mut V, src: &Operand) -> ControlFlow<V::Break> {
    v.visit_operand(src)
}

pub fn walk_func<V: Visitor>(v: &mut V, args: &[Operand]) -> ControlFlow<V::Break> {
    for arg in args {
        v.visit_operand(arg)?;
    }
    ControlFlow::Continue(())
}
