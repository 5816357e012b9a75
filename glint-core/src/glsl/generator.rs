//! GLSL generation
//!
//! The generator walks a statement tree once. While walking it appends the
//! GLSL text of every node to the body buffer and records each referenced
//! variable in an order-preserving set for its class. Declarations are then
//! emitted from those sets, so a variable referenced many times is declared
//! once, in first-reference order.

use super::options::{Dialect, GlslOptions};
use super::validate::{check_constructor, check_swizzle, float_literal, type_name, value_type};
use crate::error::{GlslError, Result};
use crate::ir::{Attribute, BinOp, Builtin, Operand, Stm, Temp, Uniform, Variable, Varying};
use crate::types::{ShaderStage, VarType};
use crate::visitor::{Visitor, walk_stms, walk_variable};
use indexmap::IndexSet;
use log::debug;
use std::collections::HashSet;
use std::ops::ControlFlow;

fn flow<T>(result: Result<T>) -> ControlFlow<GlslError, T> {
    match result {
        Ok(value) => ControlFlow::Continue(value),
        Err(err) => ControlFlow::Break(err),
    }
}

/// Serializes one stage's statement tree to GLSL.
///
/// An instance can be reused: every `generate` call starts from a clean
/// state. It is not meant to be shared between threads mid-call.
pub struct GlslGenerator {
    stage: ShaderStage,
    options: GlslOptions,
    temps: IndexSet<Temp>,
    attributes: IndexSet<Attribute>,
    varyings: IndexSet<Varying>,
    uniforms: IndexSet<Uniform>,
    /// Text of `main`'s body
    body: String,
}

impl GlslGenerator {
    pub fn new(stage: ShaderStage, options: GlslOptions) -> Self {
        GlslGenerator {
            stage,
            options,
            temps: IndexSet::new(),
            attributes: IndexSet::new(),
            varyings: IndexSet::new(),
            uniforms: IndexSet::new(),
            body: String::new(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn options(&self) -> &GlslOptions {
        &self.options
    }

    /// Drop everything collected by the previous run
    pub fn reset(&mut self) {
        self.temps.clear();
        self.attributes.clear();
        self.varyings.clear();
        self.uniforms.clear();
        self.body.clear();
    }

    /// Produce complete GLSL source for `root`. No partial output is
    /// returned on error.
    pub fn generate(&mut self, root: &Stm) -> Result<String> {
        self.reset();
        if let ControlFlow::Break(err) = self.visit_stm(root) {
            return Err(err);
        }
        self.check_unique_names()?;

        let mut output = String::new();
        self.write_preamble(&mut output);
        self.write_declarations(&mut output)?;

        output.push_str("void main() {");
        for temp in &self.temps {
            let ty = type_name(temp.ty, &temp.name())?;
            output.push_str(&format!("{} {};", ty, temp.name()));
        }
        output.push_str(&self.body);
        output.push_str("}\n");

        debug!(
            "Generated {} shader: {} attributes, {} uniforms, {} varyings, {} temps",
            self.stage,
            self.attributes.len(),
            self.uniforms.len(),
            self.varyings.len(),
            self.temps.len()
        );
        Ok(output)
    }

    /// Attributes referenced by the last generated tree
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &Uniform> {
        self.uniforms.iter()
    }

    pub fn varyings(&self) -> impl Iterator<Item = &Varying> {
        self.varyings.iter()
    }

    pub fn temps(&self) -> impl Iterator<Item = &Temp> {
        self.temps.iter()
    }

    fn write_preamble(&self, output: &mut String) {
        let guarded = self.options.dialect == Dialect::Desktop;
        if guarded {
            output.push_str("#ifdef GL_ES\n");
        }
        output.push_str(&format!("precision {} float;\n", self.options.float_precision));
        output.push_str(&format!("precision {} int;\n", self.options.int_precision));
        output.push_str(&format!("precision {} sampler2D;\n", self.options.sampler_precision));
        output.push_str(&format!("precision {} samplerCube;\n", self.options.sampler_precision));
        if guarded {
            output.push_str("#endif\n");
        }
    }

    /// Attributes, then uniforms, then varyings
    fn write_declarations(&self, output: &mut String) -> Result<()> {
        for a in &self.attributes {
            output.push_str(&format!("attribute {} {};\n", type_name(a.ty, &a.name)?, a.name));
        }
        for u in &self.uniforms {
            output.push_str(&format!("uniform {} {};\n", type_name(u.ty, &u.name)?, u.name));
        }
        for v in &self.varyings {
            output.push_str(&format!("varying {} {};\n", type_name(v.ty, &v.name)?, v.name));
        }
        Ok(())
    }

    /// Negative literals are parenthesized so `a - -1` can't become `a--1`
    fn push_literal(&mut self, text: &str) {
        if text.starts_with('-') {
            self.body.push('(');
            self.body.push_str(text);
            self.body.push(')');
        } else {
            self.body.push_str(text);
        }
    }

    /// Distinct variables must not share a GLSL name
    fn check_unique_names(&self) -> Result<()> {
        let names = self
            .attributes
            .iter()
            .map(|a| a.name.clone())
            .chain(self.uniforms.iter().map(|u| u.name.clone()))
            .chain(self.varyings.iter().map(|v| v.name.clone()))
            .chain(self.temps.iter().map(Temp::name));

        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(GlslError::ConflictingDeclaration { name });
            }
        }
        Ok(())
    }
}

impl Visitor for GlslGenerator {
    type Break = GlslError;

    fn visit_stms(&mut self, stms: &[Stm]) -> ControlFlow<GlslError> {
        self.body.push('{');
        walk_stms(self, stms)?;
        self.body.push('}');
        ControlFlow::Continue(())
    }

    fn visit_set(&mut self, to: &Operand, from: &Operand) -> ControlFlow<GlslError> {
        self.visit_operand(to)?;
        self.body.push_str(" = ");
        self.visit_operand(from)?;
        self.body.push(';');
        ControlFlow::Continue(())
    }

    fn visit_if(&mut self, cond: &Operand, then_body: &Stm, else_body: Option<&Stm>) -> ControlFlow<GlslError> {
        self.body.push_str("if (");
        self.visit_operand(cond)?;
        self.body.push_str(") ");
        self.visit_stm(then_body)?;
        if let Some(else_body) = else_body {
            self.body.push_str(" else ");
            self.visit_stm(else_body)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_variable(&mut self, v: &Variable) -> ControlFlow<GlslError> {
        match v {
            Variable::Output => self.body.push_str(self.stage.output_name()),
            other => self.body.push_str(&other.name()),
        }
        walk_variable(self, v)
    }

    fn visit_attribute(&mut self, a: &Attribute) -> ControlFlow<GlslError> {
        if self.stage == ShaderStage::Fragment {
            return ControlFlow::Break(GlslError::StageViolation { name: a.name.clone() });
        }
        self.attributes.insert(a.clone());
        ControlFlow::Continue(())
    }

    fn visit_varying(&mut self, v: &Varying) -> ControlFlow<GlslError> {
        self.varyings.insert(v.clone());
        ControlFlow::Continue(())
    }

    fn visit_uniform(&mut self, u: &Uniform) -> ControlFlow<GlslError> {
        self.uniforms.insert(u.clone());
        ControlFlow::Continue(())
    }

    fn visit_temp(&mut self, t: &Temp) -> ControlFlow<GlslError> {
        self.temps.insert(*t);
        ControlFlow::Continue(())
    }

    fn visit_int_literal(&mut self, n: i32) -> ControlFlow<GlslError> {
        self.push_literal(&n.to_string());
        ControlFlow::Continue(())
    }

    fn visit_float_literal(&mut self, f: f32) -> ControlFlow<GlslError> {
        let text = flow(float_literal(f))?;
        self.push_literal(&text);
        ControlFlow::Continue(())
    }

    fn visit_bool_literal(&mut self, b: bool) -> ControlFlow<GlslError> {
        self.body.push_str(if b { "true" } else { "false" });
        ControlFlow::Continue(())
    }

    fn visit_binop(&mut self, left: &Operand, op: BinOp, right: &Operand) -> ControlFlow<GlslError> {
        self.body.push('(');
        self.visit_operand(left)?;
        self.body.push_str(op.symbol());
        self.visit_operand(right)?;
        self.body.push(')');
        ControlFlow::Continue(())
    }

    fn visit_vector(&mut self, ty: VarType, ops: &[Operand]) -> ControlFlow<GlslError> {
        let ctor = flow(type_name(ty, "vector constructor"))?;
        flow(check_constructor(ty, ops))?;
        self.body.push_str(ctor);
        self.body.push('(');
        for (i, op) in ops.iter().enumerate() {
            if i > 0 {
                self.body.push(',');
            }
            self.visit_operand(op)?;
        }
        self.body.push(')');
        ControlFlow::Continue(())
    }

    fn visit_swizzle(&mut self, src: &Operand, mask: &str) -> ControlFlow<GlslError> {
        flow(check_swizzle(value_type(src), mask))?;
        self.visit_operand(src)?;
        self.body.push('.');
        self.body.push_str(mask);
        ControlFlow::Continue(())
    }

    fn visit_func(&mut self, func: Builtin, args: &[Operand]) -> ControlFlow<GlslError> {
        self.body.push_str(func.name());
        self.body.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.body.push_str(", ");
            }
            self.visit_operand(arg)?;
        }
        self.body.push(')');
        ControlFlow::Continue(())
    }
}
