// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.

use std::sync::Arc;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Fixed-size scalar.
    Primitive(PrimitiveKind),
    /// UTF-8 text, optionally bounded to a maximum character count.
    String { max_length: Option<usize> },
    /// Struct with named fields in declaration order.
    Struct(Vec<FieldDescriptor>),
    /// Sequence (dynamic length).
    Sequence(SequenceDescriptor),
    /// Array (fixed length).
    Array(ArrayDescriptor),
}

impl TypeKind {
    /// Short label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::String { .. } => "string",
            Self::Struct(_) => "struct",
            Self::Sequence(_) => "sequence",
            Self::Array(_) => "array",
        }
    }
}

/// A complete type descriptor.
///
/// Descriptors describe logical shape only; in-memory layout is owned by
/// [`DynamicValue`](crate::DynamicValue) and never leaks into this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a primitive type descriptor.
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::new(name, TypeKind::Primitive(kind))
    }

    /// Create an unbounded string type descriptor.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::String { max_length: None })
    }

    /// Create a struct type descriptor.
    pub fn struct_type(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, TypeKind::Struct(fields))
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Check if this is a string type.
    pub fn is_string(&self) -> bool {
        matches!(self.kind, TypeKind::String { .. })
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is a sequence or array type.
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Sequence(_) | TypeKind::Array(_))
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.kind {
            TypeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields()?.iter().position(|f| f.name == name)
    }

    /// Get the element type if this is a sequence or array.
    pub fn element_type(&self) -> Option<&Arc<TypeDescriptor>> {
        match &self.kind {
            TypeKind::Sequence(seq) => Some(&seq.element_type),
            TypeKind::Array(arr) => Some(&arr.element_type),
            _ => None,
        }
    }

    /// Structural compatibility, as used for assignment and comparison.
    ///
    /// Type names are ignored; member names, member order, and array lengths
    /// must agree. Sequence and string bounds do not affect compatibility
    /// (bounds are enforced where the value grows).
    pub fn compatible(&self, other: &TypeDescriptor) -> bool {
        match (&self.kind, &other.kind) {
            (TypeKind::Primitive(a), TypeKind::Primitive(b)) => a == b,
            (TypeKind::String { .. }, TypeKind::String { .. }) => true,
            (TypeKind::Struct(a), TypeKind::Struct(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(fa, fb)| fa.name == fb.name && fa.type_desc.compatible(&fb.type_desc))
            }
            (TypeKind::Sequence(a), TypeKind::Sequence(b)) => {
                a.element_type.compatible(&b.element_type)
            }
            (TypeKind::Array(a), TypeKind::Array(b)) => {
                a.length == b.length && a.element_type.compatible(&b.element_type)
            }
            _ => false,
        }
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within its struct.
    pub name: String,
    /// Field type.
    pub type_desc: Arc<TypeDescriptor>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, type_desc: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_desc,
        }
    }
}

/// Sequence type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
    /// Maximum length (None = unbounded).
    pub max_length: Option<usize>,
}

impl SequenceDescriptor {
    /// Create unbounded sequence.
    pub fn unbounded(element_type: Arc<TypeDescriptor>) -> Self {
        Self {
            element_type,
            max_length: None,
        }
    }

    /// Create bounded sequence.
    pub fn bounded(element_type: Arc<TypeDescriptor>, max_length: usize) -> Self {
        Self {
            element_type,
            max_length: Some(max_length),
        }
    }
}

/// Array type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
    /// Fixed length.
    pub length: usize,
}

impl ArrayDescriptor {
    /// Create array descriptor.
    pub fn new(element_type: Arc<TypeDescriptor>, length: usize) -> Self {
        Self {
            element_type,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_type() -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::primitive("uint32", PrimitiveKind::U32))
    }

    #[test]
    fn test_type_descriptor_struct() {
        let f64_type = Arc::new(TypeDescriptor::primitive("float64", PrimitiveKind::F64));

        let fields = vec![
            FieldDescriptor::new("x", u32_type()),
            FieldDescriptor::new("y", f64_type),
        ];

        let desc = TypeDescriptor::struct_type("Point", fields);
        assert!(desc.is_struct());
        assert!(!desc.is_collection());
        assert_eq!(desc.fields().map(|f| f.len()), Some(2));
        assert!(desc.field("x").is_some());
        assert!(desc.field("z").is_none());
        assert_eq!(desc.field_index("y"), Some(1));
    }

    #[test]
    fn test_sequence_descriptor() {
        let unbounded = SequenceDescriptor::unbounded(u32_type());
        assert!(unbounded.max_length.is_none());

        let bounded = SequenceDescriptor::bounded(u32_type(), 100);
        assert_eq!(bounded.max_length, Some(100));
    }

    #[test]
    fn test_element_type() {
        let seq = TypeDescriptor::new(
            "S",
            TypeKind::Sequence(SequenceDescriptor::unbounded(u32_type())),
        );
        assert_eq!(
            seq.element_type().map(|t| t.kind.clone()),
            Some(TypeKind::Primitive(PrimitiveKind::U32))
        );
        assert!(u32_type().element_type().is_none());
    }

    #[test]
    fn test_compatible_ignores_names_and_bounds() {
        let a = TypeDescriptor::new(
            "A",
            TypeKind::Sequence(SequenceDescriptor::bounded(u32_type(), 8)),
        );
        let b = TypeDescriptor::new(
            "B",
            TypeKind::Sequence(SequenceDescriptor::unbounded(u32_type())),
        );
        assert!(a.compatible(&b));
    }

    #[test]
    fn test_compatible_checks_structure() {
        let point = TypeDescriptor::struct_type(
            "Point",
            vec![
                FieldDescriptor::new("x", u32_type()),
                FieldDescriptor::new("y", u32_type()),
            ],
        );
        let renamed = TypeDescriptor::struct_type(
            "Vec2",
            vec![
                FieldDescriptor::new("x", u32_type()),
                FieldDescriptor::new("y", u32_type()),
            ],
        );
        let reordered = TypeDescriptor::struct_type(
            "Point",
            vec![
                FieldDescriptor::new("y", u32_type()),
                FieldDescriptor::new("x", u32_type()),
            ],
        );
        assert!(point.compatible(&renamed));
        assert!(!point.compatible(&reordered));
    }

    #[test]
    fn test_compatible_array_length() {
        let a3 = TypeDescriptor::new("A3", TypeKind::Array(ArrayDescriptor::new(u32_type(), 3)));
        let a4 = TypeDescriptor::new("A4", TypeKind::Array(ArrayDescriptor::new(u32_type(), 4)));
        assert!(!a3.compatible(&a4));
        assert!(a3.compatible(&a3.clone()));
    }
}
