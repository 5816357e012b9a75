use super::*;
use crate::builder::ShaderBuilder;
use crate::error::GlslError;
use crate::ir::{AsOperand, Attribute, Lit, Operand, Stm, Temp, Uniform, Varying};
use crate::types::{ShaderStage, VarType};

fn generate(stage: ShaderStage, build: impl FnOnce(&mut ShaderBuilder)) -> Result<String, GlslError> {
    let mut b = ShaderBuilder::new(stage);
    build(&mut b);
    GlslGenerator::new(stage, GlslOptions::default()).generate(&b.finish())
}

/// Everything from `void main()` on, trimmed
fn main_of(source: &str) -> &str {
    match source.find("void main()") {
        Some(start) => source[start..].trim(),
        None => panic!("Expected a main function in:\n{}", source),
    }
}

fn declarations(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter(|l| l.starts_with("attribute ") || l.starts_with("uniform ") || l.starts_with("varying "))
        .collect()
}

#[test]
fn test_if_else_fixture() {
    let temp = Temp::new(0, VarType::Float4);
    let source = generate(ShaderStage::Vertex, |b| {
        b.if_(true.lit(), |b| b.set(&temp, 1i32.lit() * 2i32.lit()))
            .else_(|b| b.set(&temp, 3i32.lit() * 4i32.lit()));
    })
    .unwrap();

    assert_eq!(
        main_of(&source),
        "void main() {vec4 temp0;{if (true) {temp0 = (1*2);} else {temp0 = (3*4);}}}"
    );
}

#[test]
fn test_empty_tree() {
    let source = generate(ShaderStage::Vertex, |_| {}).unwrap();
    assert_eq!(main_of(&source), "void main() {{}}");
    assert!(declarations(&source).is_empty());
}

#[test]
fn test_attribute_in_fragment_stage() {
    let pos = Attribute::new("a_Pos", VarType::Float4, false);
    let result = generate(ShaderStage::Fragment, |b| b.set(b.out(), &pos));
    match result {
        Err(GlslError::StageViolation { name }) => assert_eq!(name, "a_Pos"),
        other => panic!("Expected stage violation, got {:?}", other),
    }
}

#[test]
fn test_attribute_allowed_in_vertex_stage() {
    let pos = Attribute::new("a_Pos", VarType::Float4, false);
    let source = generate(ShaderStage::Vertex, |b| b.set(b.out(), &pos)).unwrap();
    assert_eq!(declarations(&source), vec!["attribute vec4 a_Pos;"]);
    assert_eq!(main_of(&source), "void main() {{gl_Position = a_Pos;}}");
}

#[test]
fn test_attribute_and_varying_declared_once() {
    let tex = Attribute::new("a_Tex", VarType::Float2, false);
    let v_tex = Varying::new("v_Tex", VarType::Float2);
    let source = generate(ShaderStage::Vertex, |b| {
        b.set(&v_tex, &tex);
        b.set(&v_tex, &v_tex + &tex);
        b.if_(true.lit(), |b| b.set(&v_tex, &tex * &v_tex));
    })
    .unwrap();

    assert_eq!(declarations(&source), vec!["attribute vec2 a_Tex;", "varying vec2 v_Tex;"]);
    assert_eq!(source.matches("a_Tex").count(), 4);
}

#[test]
fn test_uniform_declared_once() {
    let scale = Uniform::new("u_Scale", VarType::Float1);
    let t0 = Temp::new(0, VarType::Float1);
    let t1 = Temp::new(1, VarType::Float1);
    let source = generate(ShaderStage::Vertex, |b| {
        b.set(&t0, &scale * 2.0f32);
        b.set(&t1, &scale + &t0);
    })
    .unwrap();

    assert_eq!(declarations(&source), vec!["uniform float u_Scale;"]);
    assert_eq!(source.matches("float temp").count(), 2);
}

#[test]
fn test_declaration_order() {
    let v_tex = Varying::new("v_Tex", VarType::Float2);
    let tex = Attribute::new("a_Tex", VarType::Float2, false);
    let proj = Uniform::new("u_ProjMat", VarType::Mat4);
    let pos = Attribute::new("a_Pos", VarType::Float4, false);
    let source = generate(ShaderStage::Vertex, |b| {
        b.set(&v_tex, &tex);
        b.set(b.out(), &proj * &pos);
    })
    .unwrap();

    assert_eq!(
        declarations(&source),
        vec![
            "attribute vec2 a_Tex;",
            "attribute vec4 a_Pos;",
            "uniform mat4 u_ProjMat;",
            "varying vec2 v_Tex;",
        ]
    );
    assert_eq!(
        main_of(&source),
        "void main() {{v_Tex = a_Tex;gl_Position = (u_ProjMat*a_Pos);}}"
    );
}

#[test]
fn test_output_name_follows_stage() {
    let color = Varying::new("v_Col", VarType::Float4);
    let source = generate(ShaderStage::Fragment, |b| b.set(b.out(), &color)).unwrap();
    assert_eq!(main_of(&source), "void main() {{gl_FragColor = v_Col;}}");
    assert!(!source.contains("gl_Position"));
}

#[test]
fn test_nested_binops_are_parenthesized() {
    let t = Temp::new(0, VarType::Float1);
    let source = generate(ShaderStage::Vertex, |b| {
        b.set(&t, (1.0f32.lit() + 2.0f32) * (3.0f32.lit() - 4.0f32) / 5.0f32);
    })
    .unwrap();
    assert!(source.contains("temp0 = (((1.0+2.0)*(3.0-4.0))/5.0);"));
}

#[test]
fn test_constructors_swizzles_and_calls() {
    let tex = Uniform::new("u_Tex", VarType::TextureUnit);
    let uv = Varying::new("v_Tex", VarType::Float2);
    let col = Varying::new("v_Col", VarType::Float4);
    let source = generate(ShaderStage::Fragment, |b| {
        let rgb = b.mix(b.texture2d(&tex, &uv), col.as_operand(), 0.5f32);
        b.set(b.out(), b.vec4([rgb.swizzle("rgb"), col.swizzle("a")]));
    })
    .unwrap();

    assert!(source.contains(
        "gl_FragColor = vec4(mix(texture2D(u_Tex, v_Tex), v_Col, 0.5).rgb,v_Col.a);"
    ));
}

#[test]
fn test_generation_is_deterministic_and_reusable() {
    let proj = Uniform::new("u_ProjMat", VarType::Mat4);
    let pos = Attribute::new("a_Pos", VarType::Float4, false);
    let mut first = ShaderBuilder::new(ShaderStage::Vertex);
    first.set(first.out(), &proj * &pos);
    let first = first.finish();

    let mut generator = GlslGenerator::new(ShaderStage::Vertex, GlslOptions::default());
    let a = generator.generate(&first).unwrap();
    let b = generator.generate(&first).unwrap();
    assert_eq!(a, b);

    let empty = generator.generate(&Stm::empty()).unwrap();
    assert!(declarations(&empty).is_empty());
    assert_eq!(generator.uniforms().count(), 0);
    assert_eq!(generator.attributes().count(), 0);
}

#[test]
fn test_dialect_preamble() {
    let desktop = GlslGenerator::new(ShaderStage::Vertex, GlslOptions::default())
        .generate(&Stm::empty())
        .unwrap();
    assert!(desktop.starts_with("#ifdef GL_ES\nprecision mediump float;\n"));
    assert!(desktop.contains("precision lowp sampler2D;\nprecision lowp samplerCube;\n#endif\n"));

    let options = GlslOptions::gles(true).with_float_precision(Precision::High);
    let es = GlslGenerator::new(ShaderStage::Vertex, options)
        .generate(&Stm::empty())
        .unwrap();
    assert!(es.starts_with("precision highp float;\nprecision mediump int;\n"));
    assert!(!es.contains("#ifdef"));
}

#[test]
fn test_undeclarable_temp() {
    let counter = Temp::new(2, VarType::Int1);
    let result = generate(ShaderStage::Vertex, |b| b.set(&counter, 1));
    assert_eq!(
        result,
        Err(GlslError::UnsupportedType {
            ty: VarType::Int1,
            name: "temp2".to_string(),
        })
    );
}

#[test]
fn test_conflicting_names() {
    let as_uniform = Uniform::new("u_Color", VarType::Float4);
    let as_varying = Varying::new("u_Color", VarType::Float4);
    let result = generate(ShaderStage::Fragment, |b| b.set(b.out(), &as_uniform * &as_varying));
    match result {
        Err(err @ GlslError::ConflictingDeclaration { .. }) => {
            assert_eq!(err.variable(), Some("u_Color"));
        }
        other => panic!("Expected conflicting declaration, got {:?}", other),
    }
}

#[test]
fn test_invalid_swizzle_and_arity() {
    let uv = Varying::new("v_Tex", VarType::Float2);
    let result = generate(ShaderStage::Fragment, |b| b.set(b.out(), b.vec4([uv.swizzle("xyz")])));
    assert!(matches!(result, Err(GlslError::SwizzleMismatch { .. })));

    let result = generate(ShaderStage::Fragment, |b| {
        b.set(b.out(), b.vec4([uv.as_operand(), Operand::FloatLit(1.0)]))
    });
    assert!(matches!(
        result,
        Err(GlslError::ArityMismatch {
            expected: 4,
            found: 3,
            ..
        })
    ));
}

#[test]
fn test_swizzle_of_matrix_product() {
    let proj = Uniform::new("u_ProjMat", VarType::Mat4);
    let pos = Attribute::new("a_Pos", VarType::Float4, false);
    let source = generate(ShaderStage::Vertex, |b| {
        b.set(b.out(), b.vec4([(&proj * &pos).swizzle("xy"), 0.0f32.lit(), 1.0f32.lit()]));
    })
    .unwrap();
    assert!(source.contains("gl_Position = vec4((u_ProjMat*a_Pos).xy,0.0,1.0);"));
}

#[test]
fn test_scalar_times_vector_in_constructor() {
    let uv = Varying::new("v_Tex", VarType::Float2);
    let source = generate(ShaderStage::Fragment, |b| {
        b.set(b.out(), b.vec4([2.0f32.lit() * &uv, 0.0f32.lit(), 1.0f32.lit()]));
    })
    .unwrap();
    assert!(source.contains("gl_FragColor = vec4((2.0*v_Tex),0.0,1.0);"));
}

#[test]
fn test_swizzle_of_swizzle_uses_inner_mask() {
    let col = Varying::new("v_Col", VarType::Float4);
    let result = generate(ShaderStage::Fragment, |b| {
        b.set(b.out(), b.vec4([col.swizzle("x").swizzle("w")]))
    });
    match result {
        Err(GlslError::SwizzleMismatch { mask, ty, .. }) => {
            assert_eq!(mask, "w");
            assert_eq!(ty, VarType::Float1);
        }
        other => panic!("Expected swizzle error, got {:?}", other),
    }

    let source = generate(ShaderStage::Fragment, |b| {
        b.set(b.out(), b.vec4([col.swizzle("xy").swizzle("yx"), col.swizzle("zw")]))
    })
    .unwrap();
    assert!(source.contains("vec4(v_Col.xy.yx,v_Col.zw)"));
}

#[test]
fn test_negative_literals_are_parenthesized() {
    let t = Temp::new(0, VarType::Float1);
    let source = generate(ShaderStage::Vertex, |b| b.set(&t, 1.0f32.lit() - (-3.0f32))).unwrap();
    assert_eq!(main_of(&source), "void main() {float temp0;{temp0 = (1.0-(-3.0));}}");

    let source = generate(ShaderStage::Vertex, |b| {
        b.set(&t, 2.0f32.lit() * (1i32.lit() - (-2)));
    })
    .unwrap();
    assert!(source.contains("temp0 = (2.0*(1-(-2)));"));
}
