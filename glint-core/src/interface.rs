//! Program interface extraction
//!
//! The names a program exposes (attributes, uniforms, varyings) are the
//! only coupling between generated GLSL and the backend that binds vertex
//! buffers and uniform values. This module recovers them from the IR without
//! generating text, and checks a draw call's inputs against them.

use crate::ir::{Attribute, Stm, Uniform, Varying};
use crate::layout::VertexLayout;
use crate::shader::Program;
use crate::visitor::Visitor;
use indexmap::IndexSet;
use std::convert::Infallible;
use std::ops::ControlFlow;

/// Gathers every variable a statement tree references, in first-reference
/// order
#[derive(Debug, Default)]
pub struct VariableCollector {
    pub attributes: IndexSet<Attribute>,
    pub uniforms: IndexSet<Uniform>,
    pub varyings: IndexSet<Varying>,
}

impl VariableCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(mut self, root: &Stm) -> Self {
        let ControlFlow::Continue(()) = self.visit_stm(root);
        self
    }
}

impl Visitor for VariableCollector {
    type Break = Infallible;

    fn visit_attribute(&mut self, a: &Attribute) -> ControlFlow<Infallible> {
        self.attributes.insert(a.clone());
        ControlFlow::Continue(())
    }

    fn visit_uniform(&mut self, u: &Uniform) -> ControlFlow<Infallible> {
        self.uniforms.insert(u.clone());
        ControlFlow::Continue(())
    }

    fn visit_varying(&mut self, v: &Varying) -> ControlFlow<Infallible> {
        self.varyings.insert(v.clone());
        ControlFlow::Continue(())
    }
}

/// Variables a program expects from, or exchanges with, the outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInterface {
    /// Vertex-stage attributes
    pub attributes: IndexSet<Attribute>,
    /// Uniforms of both stages, vertex stage first
    pub uniforms: IndexSet<Uniform>,
    pub vertex_varyings: IndexSet<Varying>,
    pub fragment_varyings: IndexSet<Varying>,
}

impl ProgramInterface {
    pub fn of(program: &Program) -> Self {
        let vertex = VariableCollector::new().collect(program.vertex().body());
        let fragment = VariableCollector::new().collect(program.fragment().body());

        let mut uniforms = vertex.uniforms;
        uniforms.extend(fragment.uniforms);

        ProgramInterface {
            // Attributes in a fragment tree are a generation error, not an input
            attributes: vertex.attributes,
            uniforms,
            vertex_varyings: vertex.varyings,
            fragment_varyings: fragment.varyings,
        }
    }

    /// Fragment varyings the vertex stage never mentions
    pub fn unmatched_varyings(&self) -> Vec<&Varying> {
        self.fragment_varyings
            .iter()
            .filter(|v| !self.vertex_varyings.contains(*v))
            .collect()
    }

    /// Compare a draw call's vertex layout and uniform keys with what the
    /// program reads. Names are the matching key, as they are for the
    /// backend's attribute and uniform location lookups.
    pub fn check_draw<'a>(
        &self,
        layout: &VertexLayout,
        uniform_names: impl IntoIterator<Item = &'a str>,
    ) -> DrawReport {
        let supplied: IndexSet<&str> = uniform_names.into_iter().collect();
        let expected: IndexSet<&str> = self.uniforms.iter().map(|u| u.name.as_str()).collect();
        let in_layout: IndexSet<&str> = layout.attributes().iter().map(|a| a.name.as_str()).collect();
        let read: IndexSet<&str> = self.attributes.iter().map(|a| a.name.as_str()).collect();

        DrawReport {
            missing_uniforms: names(expected.difference(&supplied)),
            unexpected_uniforms: names(supplied.difference(&expected)),
            missing_attributes: names(read.difference(&in_layout)),
            unexpected_attributes: names(in_layout.difference(&read)),
        }
    }
}

fn names<S: ToString>(iter: impl Iterator<Item = S>) -> Vec<String> {
    iter.map(|name| name.to_string()).collect()
}

impl Program {
    pub fn interface(&self) -> ProgramInterface {
        ProgramInterface::of(self)
    }
}

/// Mismatches between a draw call and a program's interface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawReport {
    /// Uniforms the program reads but the draw call doesn't bind
    pub missing_uniforms: Vec<String>,
    pub unexpected_uniforms: Vec<String>,
    /// Attributes the program reads but the layout doesn't provide
    pub missing_attributes: Vec<String>,
    pub unexpected_attributes: Vec<String>,
}

impl DrawReport {
    pub fn is_clean(&self) -> bool {
        self.missing_uniforms.is_empty()
            && self.unexpected_uniforms.is_empty()
            && self.missing_attributes.is_empty()
            && self.unexpected_attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AsOperand, Lit};
    use crate::shader::{FragmentShader, VertexShader};
    use crate::types::VarType;

    fn sample_program() -> (Program, Attribute, Attribute) {
        let pos = Attribute::new("a_Pos", VarType::Float2, false);
        let tex = Attribute::new("a_Tex", VarType::Float2, false);
        let v_tex = Varying::new("v_Tex", VarType::Float2);
        let v_col = Varying::new("v_Col", VarType::Float4);
        let proj = Uniform::new("u_ProjMat", VarType::Mat4);
        let sampler = Uniform::new("u_Tex", VarType::TextureUnit);

        let vs = VertexShader::build(|b| {
            b.set(&v_tex, &tex);
            b.set(b.out(), &proj * b.vec4([pos.swizzle("xy"), 0.0f32.lit(), 1.0f32.lit()]));
        });
        let fs = FragmentShader::build(|b| {
            b.set(b.out(), b.texture2d(&sampler, &v_tex) * &v_col);
        });
        (Program::new("sample", vs, fs), pos, tex)
    }

    #[test]
    fn test_interface_collects_both_stages() {
        let (program, pos, tex) = sample_program();
        let iface = program.interface();

        let attrs: Vec<&str> = iface.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(attrs, vec!["a_Tex", "a_Pos"]);
        assert!(iface.attributes.contains(&pos) && iface.attributes.contains(&tex));

        let uniforms: Vec<&str> = iface.uniforms.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(uniforms, vec!["u_ProjMat", "u_Tex"]);

        let unmatched: Vec<&str> = iface.unmatched_varyings().into_iter().map(|v| v.name.as_str()).collect();
        assert_eq!(unmatched, vec!["v_Col"]);
    }

    #[test]
    fn test_check_draw_reports_mismatches() {
        let (program, pos, tex) = sample_program();
        let iface = program.interface();

        let full = VertexLayout::new(vec![pos.clone(), tex.clone()]);
        assert!(iface.check_draw(&full, ["u_ProjMat", "u_Tex"]).is_clean());

        let col = Attribute::new("a_Col", VarType::Byte4, true);
        let partial = VertexLayout::new(vec![pos, col]);
        let report = iface.check_draw(&partial, ["u_Tex", "u_Alpha"]);
        assert!(!report.is_clean());
        assert_eq!(report.missing_uniforms, vec!["u_ProjMat"]);
        assert_eq!(report.unexpected_uniforms, vec!["u_Alpha"]);
        assert_eq!(report.missing_attributes, vec!["a_Tex"]);
        assert_eq!(report.unexpected_attributes, vec!["a_Col"]);
    }
}
