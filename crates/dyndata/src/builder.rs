// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::descriptor::{
    ArrayDescriptor, FieldDescriptor, PrimitiveKind, SequenceDescriptor, TypeDescriptor, TypeKind,
};
use std::sync::Arc;

/// Builder for struct type descriptors.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a struct type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a primitive field.
    pub fn field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let type_desc = Arc::new(TypeDescriptor::primitive("", kind));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a field with a type descriptor.
    pub fn field_with_type(
        mut self,
        name: impl Into<String>,
        type_desc: Arc<TypeDescriptor>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a string field.
    pub fn string_field(mut self, name: impl Into<String>) -> Self {
        let type_desc = Arc::new(TypeDescriptor::string(""));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a string field bounded to `max_length` characters.
    pub fn bounded_string_field(mut self, name: impl Into<String>, max_length: usize) -> Self {
        let type_desc = Arc::new(TypeDescriptor::new(
            "",
            TypeKind::String {
                max_length: Some(max_length),
            },
        ));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a sequence field.
    pub fn sequence_field(mut self, name: impl Into<String>, element_kind: PrimitiveKind) -> Self {
        let element_type = Arc::new(TypeDescriptor::primitive("", element_kind));
        let seq_desc = SequenceDescriptor::unbounded(element_type);
        let type_desc = Arc::new(TypeDescriptor::new("", TypeKind::Sequence(seq_desc)));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a bounded sequence field.
    pub fn bounded_sequence_field(
        mut self,
        name: impl Into<String>,
        element_kind: PrimitiveKind,
        max_length: usize,
    ) -> Self {
        let element_type = Arc::new(TypeDescriptor::primitive("", element_kind));
        let seq_desc = SequenceDescriptor::bounded(element_type, max_length);
        let type_desc = Arc::new(TypeDescriptor::new("", TypeKind::Sequence(seq_desc)));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add an array field.
    pub fn array_field(
        mut self,
        name: impl Into<String>,
        element_kind: PrimitiveKind,
        length: usize,
    ) -> Self {
        let element_type = Arc::new(TypeDescriptor::primitive("", element_kind));
        let arr_desc = ArrayDescriptor::new(element_type, length);
        let type_desc = Arc::new(TypeDescriptor::new("", TypeKind::Array(arr_desc)));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a nested struct field.
    pub fn nested_field(self, name: impl Into<String>, nested: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, nested)
    }

    /// Build the TypeDescriptor.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name; member names must be unique
    /// within a struct.
    pub fn build(self) -> TypeDescriptor {
        for (i, field) in self.fields.iter().enumerate() {
            assert!(
                !self.fields[..i].iter().any(|f| f.name == field.name),
                "duplicate member `{}` in type `{}`",
                field.name,
                self.name
            );
        }
        TypeDescriptor::struct_type(self.name, self.fields)
    }
}

/// Builder for sequence types.
#[derive(Debug)]
pub struct SequenceBuilder {
    name: String,
    element_type: Arc<TypeDescriptor>,
    max_length: Option<usize>,
}

impl SequenceBuilder {
    /// Create unbounded sequence of primitives.
    pub fn of_primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::of_type(name, Arc::new(TypeDescriptor::primitive("", kind)))
    }

    /// Create sequence of custom type.
    pub fn of_type(name: impl Into<String>, element_type: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            element_type,
            max_length: None,
        }
    }

    /// Set maximum length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        let seq_desc = match self.max_length {
            Some(max) => SequenceDescriptor::bounded(self.element_type, max),
            None => SequenceDescriptor::unbounded(self.element_type),
        };
        TypeDescriptor::new(self.name, TypeKind::Sequence(seq_desc))
    }
}

/// Builder for array types.
#[derive(Debug)]
pub struct ArrayBuilder {
    name: String,
    element_type: Arc<TypeDescriptor>,
    length: usize,
}

impl ArrayBuilder {
    /// Create array of primitives.
    pub fn of_primitive(name: impl Into<String>, kind: PrimitiveKind, length: usize) -> Self {
        Self::of_type(name, Arc::new(TypeDescriptor::primitive("", kind)), length)
    }

    /// Create array of custom type.
    pub fn of_type(
        name: impl Into<String>,
        element_type: Arc<TypeDescriptor>,
        length: usize,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            length,
        }
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        let arr_desc = ArrayDescriptor::new(self.element_type, self.length);
        TypeDescriptor::new(self.name, TypeKind::Array(arr_desc))
    }
}
