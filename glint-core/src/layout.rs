//! Vertex buffer layout
//!
//! Attributes are packed back to back in declaration order. Offsets are the
//! running sum of the preceding attributes' byte sizes and the stride is the
//! sum of all of them.

use crate::ir::Attribute;
use crate::types::ElementKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    attributes: Vec<Attribute>,
    offsets: Vec<usize>,
    stride: usize,
}

/// Everything a backend needs for one `vertexAttribPointer`-style call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding<'a> {
    /// Must match the attribute name in the generated GLSL
    pub name: &'a str,
    pub components: usize,
    pub element_kind: ElementKind,
    pub normalized: bool,
    pub stride: usize,
    pub offset: usize,
}

impl VertexLayout {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        let mut stride = 0;
        let offsets = attributes
            .iter()
            .map(|a| {
                let offset = stride;
                stride += a.ty.byte_size();
                offset
            })
            .collect();

        VertexLayout {
            attributes,
            offsets,
            stride,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Byte offset of each attribute, parallel to `attributes()`
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Bytes per vertex
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Offset of the attribute with the given name
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name == name)
            .map(|i| self.offsets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, usize)> {
        self.attributes.iter().zip(self.offsets.iter().copied())
    }

    pub fn bindings(&self) -> impl Iterator<Item = AttributeBinding<'_>> {
        self.iter().map(|(a, offset)| AttributeBinding {
            name: &a.name,
            components: a.ty.element_count(),
            element_kind: a.ty.element_kind(),
            normalized: a.normalized,
            stride: self.stride,
            offset,
        })
    }
}

impl FromIterator<Attribute> for VertexLayout {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        VertexLayout::new(iter.into_iter().collect())
    }
}

impl fmt::Display for VertexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.attributes.iter().map(|a| a.name.as_str()).collect();
        write!(f, "VertexLayout[{}]", names.join(", "))
    }
}
