// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged-union instance representation.
//!
//! A [`DynamicValue`] is the storage for one runtime-typed instance. It is
//! never self-describing: struct fields are stored positionally, in the
//! declaration order of the owning [`TypeDescriptor`], so a value is only
//! meaningful next to its descriptor.

use crate::descriptor::{PrimitiveKind, TypeDescriptor, TypeKind};

/// A dynamic value that can hold any describable instance.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Composites. Struct fields are positional (declaration order).
    Struct(Vec<DynamicValue>),
    Sequence(Vec<DynamicValue>),
    Array(Vec<DynamicValue>),
}

impl DynamicValue {
    /// Default-constructed value for a descriptor: zeroed scalars, empty
    /// strings and sequences, arrays filled with default elements.
    pub fn default_for(ty: &TypeDescriptor) -> Self {
        match &ty.kind {
            TypeKind::Primitive(p) => Self::default_primitive(*p),
            TypeKind::String { .. } => Self::String(String::new()),
            TypeKind::Struct(fields) => Self::Struct(
                fields
                    .iter()
                    .map(|f| Self::default_for(&f.type_desc))
                    .collect(),
            ),
            TypeKind::Sequence(_) => Self::Sequence(Vec::new()),
            TypeKind::Array(arr) => {
                let elem = Self::default_for(&arr.element_type);
                Self::Array(vec![elem; arr.length])
            }
        }
    }

    fn default_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Self::Bool(false),
            PrimitiveKind::U8 => Self::U8(0),
            PrimitiveKind::U16 => Self::U16(0),
            PrimitiveKind::U32 => Self::U32(0),
            PrimitiveKind::U64 => Self::U64(0),
            PrimitiveKind::I8 => Self::I8(0),
            PrimitiveKind::I16 => Self::I16(0),
            PrimitiveKind::I32 => Self::I32(0),
            PrimitiveKind::I64 => Self::I64(0),
            PrimitiveKind::F32 => Self::F32(0.0),
            PrimitiveKind::F64 => Self::F64(0.0),
            PrimitiveKind::Char => Self::Char('\0'),
        }
    }

    /// Whether this value's shape matches a descriptor, recursively.
    ///
    /// Checks variant/kind agreement, struct arity, array lengths, and
    /// declared sequence/string bounds.
    pub fn conforms_to(&self, ty: &TypeDescriptor) -> bool {
        match (&ty.kind, self) {
            (TypeKind::Primitive(p), v) => primitive_matches(*p, v),
            (TypeKind::String { max_length }, Self::String(s)) => {
                max_length.map_or(true, |max| s.chars().count() <= max)
            }
            (TypeKind::Struct(fields), Self::Struct(values)) => {
                fields.len() == values.len()
                    && fields
                        .iter()
                        .zip(values)
                        .all(|(f, v)| v.conforms_to(&f.type_desc))
            }
            (TypeKind::Sequence(seq), Self::Sequence(elems)) => {
                seq.max_length.map_or(true, |max| elems.len() <= max)
                    && elems.iter().all(|v| v.conforms_to(&seq.element_type))
            }
            (TypeKind::Array(arr), Self::Array(elems)) => {
                elems.len() == arr.length
                    && elems.iter().all(|v| v.conforms_to(&arr.element_type))
            }
            _ => false,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u8.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u16.
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::U16(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i8.
    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Self::I8(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i16.
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Self::I16(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as char.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get the elements of a sequence or array.
    pub fn as_slice(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(v) | Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

fn primitive_matches(kind: PrimitiveKind, value: &DynamicValue) -> bool {
    matches!(
        (kind, value),
        (PrimitiveKind::Bool, DynamicValue::Bool(_))
            | (PrimitiveKind::U8, DynamicValue::U8(_))
            | (PrimitiveKind::U16, DynamicValue::U16(_))
            | (PrimitiveKind::U32, DynamicValue::U32(_))
            | (PrimitiveKind::U64, DynamicValue::U64(_))
            | (PrimitiveKind::I8, DynamicValue::I8(_))
            | (PrimitiveKind::I16, DynamicValue::I16(_))
            | (PrimitiveKind::I32, DynamicValue::I32(_))
            | (PrimitiveKind::I64, DynamicValue::I64(_))
            | (PrimitiveKind::F32, DynamicValue::F32(_))
            | (PrimitiveKind::F64, DynamicValue::F64(_))
            | (PrimitiveKind::Char, DynamicValue::Char(_))
    )
}

/// Rust types that map onto a primitive or string leaf.
///
/// Implemented for the scalar primitives and `String`; drives the typed view
/// accessors and sequence append/extraction.
pub trait ScalarValue: Sized {
    /// Whether a leaf of `kind` stores this Rust type.
    fn matches(kind: &TypeKind) -> bool;
    /// Borrow the typed payload out of a value of the matching variant.
    fn extract(value: &DynamicValue) -> Option<&Self>;
    /// Wrap an owned value into the matching variant.
    fn wrap(self) -> DynamicValue;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl ScalarValue for $ty {
            fn matches(kind: &TypeKind) -> bool {
                matches!(kind, TypeKind::Primitive(PrimitiveKind::$variant))
            }

            fn extract(value: &DynamicValue) -> Option<&Self> {
                match value {
                    DynamicValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn wrap(self) -> DynamicValue {
                DynamicValue::$variant(self)
            }
        }

        impl From<$ty> for DynamicValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(char, Char);

impl ScalarValue for String {
    fn matches(kind: &TypeKind) -> bool {
        matches!(kind, TypeKind::String { .. })
    }

    fn extract(value: &DynamicValue) -> Option<&Self> {
        match value {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn wrap(self) -> DynamicValue {
        DynamicValue::String(self)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArrayDescriptor, FieldDescriptor, SequenceDescriptor};
    use std::sync::Arc;

    #[test]
    fn test_primitive_values() {
        let v = DynamicValue::from(42u32);
        assert_eq!(v.as_u32(), Some(42));
        assert_eq!(v.as_i32(), None);

        let v = DynamicValue::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_default_for_struct() {
        let point = TypeDescriptor::struct_type(
            "Point",
            vec![
                FieldDescriptor::new(
                    "x",
                    Arc::new(TypeDescriptor::primitive("", PrimitiveKind::F64)),
                ),
                FieldDescriptor::new("label", Arc::new(TypeDescriptor::string(""))),
            ],
        );

        let value = DynamicValue::default_for(&point);
        assert_eq!(
            value,
            DynamicValue::Struct(vec![
                DynamicValue::F64(0.0),
                DynamicValue::String(String::new()),
            ])
        );
        assert!(value.conforms_to(&point));
    }

    #[test]
    fn test_default_for_array() {
        let a = TypeDescriptor::new(
            "Triple",
            TypeKind::Array(ArrayDescriptor::new(
                Arc::new(TypeDescriptor::primitive("", PrimitiveKind::I16)),
                3,
            )),
        );
        let value = DynamicValue::default_for(&a);
        assert_eq!(value.as_slice().map(<[DynamicValue]>::len), Some(3));
        assert!(value.conforms_to(&a));
    }

    #[test]
    fn test_conforms_rejects_wrong_variant() {
        let u32_ty = TypeDescriptor::primitive("uint32", PrimitiveKind::U32);
        assert!(DynamicValue::U32(7).conforms_to(&u32_ty));
        assert!(!DynamicValue::I32(7).conforms_to(&u32_ty));
    }

    #[test]
    fn test_conforms_checks_bounds() {
        let bounded = TypeDescriptor::new(
            "Small",
            TypeKind::Sequence(SequenceDescriptor::bounded(
                Arc::new(TypeDescriptor::primitive("", PrimitiveKind::U8)),
                2,
            )),
        );
        assert!(DynamicValue::from(vec![1u8, 2]).conforms_to(&bounded));
        assert!(!DynamicValue::from(vec![1u8, 2, 3]).conforms_to(&bounded));
    }

    #[test]
    fn test_scalar_roundtrip() {
        let v = 3.5f64.wrap();
        assert_eq!(f64::extract(&v), Some(&3.5));
        assert_eq!(u64::extract(&v), None);
    }
}
