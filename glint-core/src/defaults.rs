//! Stock variables, layouts and programs for textured 2D drawing

use crate::ir::{AsOperand, Attribute, Lit, Temp, Uniform, Varying};
use crate::layout::VertexLayout;
use crate::shader::{FragmentShader, Program, VertexShader};
use crate::types::VarType;
use std::sync::LazyLock;

pub static U_TEX: LazyLock<Uniform> = LazyLock::new(|| Uniform::new("u_Tex", VarType::TextureUnit));
pub static U_PROJ_MAT: LazyLock<Uniform> = LazyLock::new(|| Uniform::new("u_ProjMat", VarType::Mat4));

pub static A_POS: LazyLock<Attribute> = LazyLock::new(|| Attribute::new("a_Pos", VarType::Float2, false));
pub static A_TEX: LazyLock<Attribute> = LazyLock::new(|| Attribute::new("a_Tex", VarType::Float2, false));
/// Packed RGBA, normalized to [0, 1] on fetch
pub static A_COL: LazyLock<Attribute> = LazyLock::new(|| Attribute::new("a_Col", VarType::Byte4, true));

pub static V_TEX: LazyLock<Varying> = LazyLock::new(|| Varying::new("v_Tex", VarType::Float2));
pub static V_COL: LazyLock<Varying> = LazyLock::new(|| Varying::new("v_Col", VarType::Float4));

pub const TEMP0: Temp = Temp { id: 0, ty: VarType::Float4 };
pub const TEMP1: Temp = Temp { id: 1, ty: VarType::Float4 };

pub static LAYOUT_TEXTURED: LazyLock<VertexLayout> =
    LazyLock::new(|| VertexLayout::new(vec![A_POS.clone(), A_TEX.clone()]));

pub static LAYOUT_TEXTURED_COLORED: LazyLock<VertexLayout> =
    LazyLock::new(|| VertexLayout::new(vec![A_POS.clone(), A_TEX.clone(), A_COL.clone()]));

/// Projects `a_Pos` and passes texture coordinates through
fn textured_vertex(colored: bool) -> VertexShader {
    VertexShader::build(|b| {
        b.set(&*V_TEX, &*A_TEX);
        if colored {
            b.set(&*V_COL, &*A_COL);
        }
        let pos = b.vec4([A_POS.as_operand(), 0.0f32.lit(), 1.0f32.lit()]);
        b.set(b.out(), &*U_PROJ_MAT * pos);
    })
}

pub static PROGRAM_TEXTURED: LazyLock<Program> = LazyLock::new(|| {
    Program::new(
        "textured",
        textured_vertex(false),
        FragmentShader::build(|b| {
            b.set(b.out(), b.texture2d(&*U_TEX, &*V_TEX));
        }),
    )
});

/// Texture sample tinted by the per-vertex color
pub static PROGRAM_TEXTURED_COLORED: LazyLock<Program> = LazyLock::new(|| {
    Program::new(
        "textured-colored",
        textured_vertex(true),
        FragmentShader::build(|b| {
            b.set(TEMP0, b.texture2d(&*U_TEX, &*V_TEX));
            b.set(TEMP1, &TEMP0 * &*V_COL);
            b.set(b.out(), TEMP1);
        }),
    )
});

/// Stock program by name, as used on the command line
pub fn program(name: &str) -> Option<&'static Program> {
    match name {
        "textured" => Some(&*PROGRAM_TEXTURED),
        "textured-colored" => Some(&*PROGRAM_TEXTURED_COLORED),
        _ => None,
    }
}

/// Layout matching a stock program's attributes
pub fn layout(name: &str) -> Option<&'static VertexLayout> {
    match name {
        "textured" => Some(&*LAYOUT_TEXTURED),
        "textured-colored" => Some(&*LAYOUT_TEXTURED_COLORED),
        _ => None,
    }
}

pub const PROGRAM_NAMES: [&str; 2] = ["textured", "textured-colored"];
