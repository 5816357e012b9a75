//! Generation-time checks on nodes the IR accepts unconditionally

use crate::error::{GlslError, Result};
use crate::ir::{BinOp, Builtin, Operand};
use crate::types::VarType;
use crate::{bail_swizzle, bail_type};

const COMPONENT_SETS: [&str; 3] = ["xyzw", "rgba", "stpq"];

/// GLSL spelling of `ty`, failing for types that can't be declared
pub(super) fn type_name(ty: VarType, name: &str) -> Result<&'static str> {
    match ty.glsl_name() {
        Some(glsl) => Ok(glsl),
        None => bail_type!(ty, name),
    }
}

pub(super) fn check_swizzle(ty: VarType, mask: &str) -> Result<()> {
    if !ty.is_swizzleable() {
        bail_swizzle!(mask, ty, "type has no components to select");
    }
    let len = mask.chars().count();
    if len == 0 || len > 4 {
        bail_swizzle!(mask, ty, "mask must select 1 to 4 components, got {}", len);
    }
    let first = mask.chars().next().unwrap_or('x');
    let Some(set) = COMPONENT_SETS.iter().find(|set| set.contains(first)) else {
        bail_swizzle!(mask, ty, "'{}' is not a component name", first);
    };
    for c in mask.chars() {
        match set.find(c) {
            Some(index) if index < ty.element_count() => {}
            Some(_) => bail_swizzle!(mask, ty, "component '{}' is out of range", c),
            None => bail_swizzle!(mask, ty, "'{}' mixes component sets", c),
        }
    }
    Ok(())
}

/// A constructor takes either a single component to splat, or components
/// whose counts add up to the target's count.
pub(super) fn check_constructor(ty: VarType, ops: &[Operand]) -> Result<()> {
    if ops.len() == 1 {
        return Ok(());
    }
    let expected = ty.element_count();
    let found: usize = ops.iter().map(component_count).sum();
    if found != expected {
        return Err(GlslError::ArityMismatch { ty, expected, found });
    }
    Ok(())
}

/// Components an operand contributes to a constructor
fn component_count(op: &Operand) -> usize {
    value_type(op).element_count()
}

/// Float vector with `n` components
fn float_vector(n: usize) -> Option<VarType> {
    match n {
        1 => Some(VarType::Float1),
        2 => Some(VarType::Float2),
        3 => Some(VarType::Float3),
        4 => Some(VarType::Float4),
        _ => None,
    }
}

/// Type GLSL gives the value of `op`, used only for checking swizzles and
/// constructors. `Operand::ty` stays the IR's coarser rule.
pub(super) fn value_type(op: &Operand) -> VarType {
    match op {
        Operand::Binop { left, op, right } => binop_type(value_type(left), *op, value_type(right)),
        Operand::Swizzle { src, mask } => {
            float_vector(mask.chars().count()).unwrap_or_else(|| value_type(src))
        }
        Operand::Func { func, args } => {
            let pick = match func {
                Builtin::Texture2D => return VarType::Float4,
                Builtin::Step | Builtin::SmoothStep => args.last(),
                _ => args.first(),
            };
            pick.map(value_type).unwrap_or(VarType::Float1)
        }
        other => other.ty(),
    }
}

fn binop_type(left: VarType, op: BinOp, right: VarType) -> VarType {
    let scalar = |ty: VarType| ty.element_count() == 1;
    match (left, right) {
        _ if left == right => left,
        // Matrix times vector and vector times matrix both give a vector
        (VarType::Mat4, VarType::Float4 | VarType::Byte4) if op == BinOp::Mul => VarType::Float4,
        (VarType::Float4 | VarType::Byte4, VarType::Mat4) if op == BinOp::Mul => VarType::Float4,
        (l, r) if scalar(l) && !scalar(r) => r,
        (l, _) => l,
    }
}

/// Float literal with a decimal point or exponent, so GLSL reads it as float
pub(super) fn float_literal(f: f32) -> Result<String> {
    if !f.is_finite() {
        return Err(GlslError::NonFiniteLiteral(f));
    }
    let s = format!("{:?}", f);
    if s.contains('.') || s.contains('e') || s.contains('E') {
        Ok(s)
    } else {
        Ok(format!("{}.0", s))
    }
}
