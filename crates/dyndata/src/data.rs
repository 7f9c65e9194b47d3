// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Views and the owning container for runtime-typed instances.
//!
//! [`DynamicRef`] and [`DynamicMut`] are non-owning (descriptor, value)
//! handles; [`DynamicData`] owns its value and hands out views over it.
//! Contract breaches (wrong kind, absent member, out-of-range index) panic;
//! only growth failures are reported through [`DynamicDataError`].

use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::value::{DynamicValue, ScalarValue};
use crate::visit::{self, VisitNode, VisitNodeMut};
use std::fmt;
use std::sync::Arc;

/// Recoverable errors for dynamic data operations.
///
/// Everything else this module can reject is a caller contract breach and
/// panics at the point of detection.
#[derive(Debug)]
pub enum DynamicDataError {
    /// A bounded sequence is already at its declared maximum.
    SequenceTooLong { length: usize, max: usize },
    /// Reserving storage for an appended element failed.
    OutOfMemory,
    /// A value handed to [`DynamicData::from_value`] does not have the
    /// shape its descriptor declares.
    ValueShapeMismatch { type_name: String },
}

impl fmt::Display for DynamicDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceTooLong { length, max } => {
                write!(f, "Sequence length exceeds maximum: {} > {}", length, max)
            }
            Self::OutOfMemory => write!(f, "Out of memory growing sequence"),
            Self::ValueShapeMismatch { type_name } => {
                write!(f, "Value shape does not match type `{}`", type_name)
            }
        }
    }
}

impl std::error::Error for DynamicDataError {}

/// Read-only view over a typed value location.
///
/// A cheap (descriptor, value) reference pair. Structural accessors return
/// further views with the same root lifetime, so access chains compose:
/// `view.member("pose").member("x").value::<f64>()`.
#[derive(Debug, Clone, Copy)]
pub struct DynamicRef<'a> {
    ty: &'a TypeDescriptor,
    value: &'a DynamicValue,
}

impl<'a> DynamicRef<'a> {
    pub(crate) fn new(ty: &'a TypeDescriptor, value: &'a DynamicValue) -> Self {
        Self { ty, value }
    }

    /// The descriptor this view is typed by.
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.ty
    }

    /// Opaque identity derived from the value's address.
    ///
    /// For logging and debugging only; never a substitute for `==`, which
    /// compares structurally.
    pub fn instance_id(&self) -> usize {
        self.value as *const DynamicValue as usize
    }

    /// Borrow the scalar payload.
    ///
    /// # Panics
    ///
    /// Panics unless the view is primitive or string typed with `T` matching
    /// the underlying representation.
    pub fn value<T: ScalarValue>(&self) -> &'a T {
        assert!(
            T::matches(&self.ty.kind),
            "typed access on `{}`: view is {} typed",
            self.ty.name,
            self.ty.kind.label()
        );
        match T::extract(self.value) {
            Some(v) => v,
            None => unreachable!("value does not conform to `{}`", self.ty.name),
        }
    }

    /// Borrow the text payload.
    ///
    /// # Panics
    ///
    /// Panics unless the view is string typed.
    pub fn string(&self) -> &'a str {
        assert!(
            self.ty.is_string(),
            "string access on {} type `{}`",
            self.ty.kind.label(),
            self.ty.name
        );
        match self.value {
            DynamicValue::String(s) => s,
            _ => unreachable!("string value for `{}`", self.ty.name),
        }
    }

    /// View over a struct member.
    ///
    /// # Panics
    ///
    /// Panics unless the view is struct typed and the member exists.
    pub fn member(&self, name: &str) -> DynamicRef<'a> {
        let ty = self.ty;
        let (fields, values) = match (&ty.kind, self.value) {
            (TypeKind::Struct(fields), DynamicValue::Struct(values)) => (fields, values),
            _ => panic!("member access on {} type `{}`", ty.kind.label(), ty.name),
        };
        let index = ty
            .field_index(name)
            .unwrap_or_else(|| panic!("type `{}` has no member `{}`", ty.name, name));
        DynamicRef::new(&fields[index].type_desc, &values[index])
    }

    /// View over a collection element.
    ///
    /// Element location is delegated to the value representation; this layer
    /// never assumes contiguity.
    ///
    /// # Panics
    ///
    /// Panics unless the view is collection typed and `index < len()`.
    pub fn at(&self, index: usize) -> DynamicRef<'a> {
        let ty = self.ty;
        let (element_type, elems) = match (&ty.kind, self.value) {
            (TypeKind::Sequence(seq), DynamicValue::Sequence(elems)) => {
                (&seq.element_type, elems)
            }
            (TypeKind::Array(arr), DynamicValue::Array(elems)) => (&arr.element_type, elems),
            _ => panic!("indexed access on {} type `{}`", ty.kind.label(), ty.name),
        };
        assert!(
            index < elems.len(),
            "index out of bounds: {} >= {}",
            index,
            elems.len()
        );
        DynamicRef::new(element_type, &elems[index])
    }

    /// Current element count.
    ///
    /// # Panics
    ///
    /// Panics unless the view is collection typed.
    pub fn len(&self) -> usize {
        assert!(
            self.ty.is_collection(),
            "length of {} type `{}`",
            self.ty.kind.label(),
            self.ty.name
        );
        match self.value {
            DynamicValue::Sequence(elems) | DynamicValue::Array(elems) => elems.len(),
            _ => unreachable!("collection value for `{}`", self.ty.name),
        }
    }

    /// Whether the collection has no elements.
    ///
    /// # Panics
    ///
    /// Panics unless the view is collection typed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the elements of a scalar collection out into an owned `Vec`.
    ///
    /// The one read operation that copies rather than borrows: the result
    /// escapes the instance's element representation.
    ///
    /// # Panics
    ///
    /// Panics unless the view is collection typed with element
    /// representation `T`.
    pub fn to_vec<T: ScalarValue + Clone>(&self) -> Vec<T> {
        let ty = self.ty;
        let (element_type, elems) = match (&ty.kind, self.value) {
            (TypeKind::Sequence(seq), DynamicValue::Sequence(elems)) => {
                (&seq.element_type, elems)
            }
            (TypeKind::Array(arr), DynamicValue::Array(elems)) => (&arr.element_type, elems),
            _ => panic!("element extraction on {} type `{}`", ty.kind.label(), ty.name),
        };
        assert!(
            T::matches(&element_type.kind),
            "element extraction from `{}`: elements are {} typed",
            ty.name,
            element_type.kind.label()
        );
        elems
            .iter()
            .map(|v| match T::extract(v) {
                Some(x) => x.clone(),
                None => unreachable!("element does not conform to `{}`", element_type.name),
            })
            .collect()
    }

    /// Depth-first pre-order walk over this subtree.
    ///
    /// The callback runs once per node, parents before children, siblings in
    /// declared member order or index order.
    pub fn visit<F>(&self, f: F)
    where
        F: for<'n> FnMut(&VisitNode<'a, 'n>),
    {
        visit::walk(self.ty, self.value, f);
    }

    pub(crate) fn raw(&self) -> &'a DynamicValue {
        self.value
    }
}

/// Structural equality: descriptor compatibility plus value equality.
/// Views over incompatible descriptors compare unequal.
impl PartialEq for DynamicRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ty.compatible(other.ty) && self.value == other.value
    }
}

/// Mutable view over a typed value location.
///
/// Behaves like [`DynamicRef`] for every read operation and adds in-place
/// mutation. The write capability is the `&mut` borrow itself; downgrade
/// with [`DynamicMut::as_ref`].
#[derive(Debug)]
pub struct DynamicMut<'a> {
    ty: &'a TypeDescriptor,
    value: &'a mut DynamicValue,
}

impl<'a> DynamicMut<'a> {
    pub(crate) fn new(ty: &'a TypeDescriptor, value: &'a mut DynamicValue) -> Self {
        Self { ty, value }
    }

    /// The descriptor this view is typed by.
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.ty
    }

    /// Downgrade to a read-only view.
    pub fn as_ref(&self) -> DynamicRef<'_> {
        DynamicRef::new(self.ty, self.value)
    }

    /// See [`DynamicRef::instance_id`].
    pub fn instance_id(&self) -> usize {
        self.as_ref().instance_id()
    }

    /// See [`DynamicRef::value`].
    pub fn value<T: ScalarValue>(&self) -> &T {
        self.as_ref().value()
    }

    /// See [`DynamicRef::string`].
    pub fn string(&self) -> &str {
        self.as_ref().string()
    }

    /// See [`DynamicRef::member`].
    pub fn member(&self, name: &str) -> DynamicRef<'_> {
        self.as_ref().member(name)
    }

    /// See [`DynamicRef::at`].
    pub fn at(&self, index: usize) -> DynamicRef<'_> {
        self.as_ref().at(index)
    }

    /// See [`DynamicRef::len`].
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    /// See [`DynamicRef::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    /// See [`DynamicRef::to_vec`].
    pub fn to_vec<T: ScalarValue + Clone>(&self) -> Vec<T> {
        self.as_ref().to_vec()
    }

    /// See [`DynamicRef::visit`].
    pub fn visit<'s, F>(&'s self, f: F)
    where
        F: for<'n> FnMut(&VisitNode<'s, 'n>),
    {
        self.as_ref().visit(f);
    }

    /// Deep value replacement: drop the current value, copy from `other`.
    ///
    /// The view keeps denoting the same location afterwards; only the value
    /// changes.
    ///
    /// # Panics
    ///
    /// Panics unless `other`'s descriptor is compatible with this view's.
    pub fn assign(&mut self, other: DynamicRef<'_>) {
        assert!(
            self.ty.compatible(other.descriptor()),
            "assignment to `{}` from incompatible type `{}`",
            self.ty.name,
            other.descriptor().name
        );
        *self.value = other.raw().clone();
    }

    /// Replace the scalar payload.
    ///
    /// # Panics
    ///
    /// Panics unless the view is primitive or string typed with `T` matching
    /// the underlying representation.
    pub fn set<T: ScalarValue>(&mut self, v: T) {
        assert!(
            T::matches(&self.ty.kind),
            "typed write on `{}`: view is {} typed",
            self.ty.name,
            self.ty.kind.label()
        );
        *self.value = v.wrap();
    }

    /// Replace the text payload.
    ///
    /// # Panics
    ///
    /// Panics unless the view is string typed.
    pub fn set_string(&mut self, s: impl Into<String>) {
        assert!(
            self.ty.is_string(),
            "string write on {} type `{}`",
            self.ty.kind.label(),
            self.ty.name
        );
        *self.value = DynamicValue::String(s.into());
    }

    /// Mutable view over a struct member.
    ///
    /// # Panics
    ///
    /// Panics unless the view is struct typed and the member exists.
    pub fn member_mut(&mut self, name: &str) -> DynamicMut<'_> {
        let ty = self.ty;
        let (fields, values) = match (&ty.kind, &mut *self.value) {
            (TypeKind::Struct(fields), DynamicValue::Struct(values)) => (fields, values),
            _ => panic!("member access on {} type `{}`", ty.kind.label(), ty.name),
        };
        let index = ty
            .field_index(name)
            .unwrap_or_else(|| panic!("type `{}` has no member `{}`", ty.name, name));
        DynamicMut::new(&fields[index].type_desc, &mut values[index])
    }

    /// Mutable view over a collection element.
    ///
    /// # Panics
    ///
    /// Panics unless the view is collection typed and `index < len()`.
    pub fn at_mut(&mut self, index: usize) -> DynamicMut<'_> {
        let ty = self.ty;
        let (element_type, elems) = match (&ty.kind, &mut *self.value) {
            (TypeKind::Sequence(seq), DynamicValue::Sequence(elems)) => {
                (&seq.element_type, elems)
            }
            (TypeKind::Array(arr), DynamicValue::Array(elems)) => (&arr.element_type, elems),
            _ => panic!("indexed access on {} type `{}`", ty.kind.label(), ty.name),
        };
        assert!(
            index < elems.len(),
            "index out of bounds: {} >= {}",
            index,
            elems.len()
        );
        DynamicMut::new(element_type, &mut elems[index])
    }

    /// Append a scalar element to a sequence.
    ///
    /// # Panics
    ///
    /// Panics unless the view is sequence typed with element representation
    /// `T`. Arrays are fixed-size and never grow.
    ///
    /// # Errors
    ///
    /// [`DynamicDataError::SequenceTooLong`] when the declared bound is
    /// reached, [`DynamicDataError::OutOfMemory`] when storage cannot be
    /// reserved. The sequence is unchanged on error.
    pub fn push<T: ScalarValue>(&mut self, v: T) -> Result<(), DynamicDataError> {
        let seq = match &self.ty.kind {
            TypeKind::Sequence(seq) => seq,
            _ => panic!(
                "append on {} type `{}`",
                self.ty.kind.label(),
                self.ty.name
            ),
        };
        assert!(
            T::matches(&seq.element_type.kind),
            "append to `{}`: elements are {} typed",
            self.ty.name,
            seq.element_type.kind.label()
        );
        let max = seq.max_length;
        self.push_raw(max, v.wrap())
    }

    /// Append a deep copy of another view's value to a sequence.
    ///
    /// # Panics
    ///
    /// Panics unless the view is sequence typed and `element`'s descriptor
    /// is compatible with the element type.
    ///
    /// # Errors
    ///
    /// As [`DynamicMut::push`].
    pub fn push_ref(&mut self, element: DynamicRef<'_>) -> Result<(), DynamicDataError> {
        let seq = match &self.ty.kind {
            TypeKind::Sequence(seq) => seq,
            _ => panic!(
                "append on {} type `{}`",
                self.ty.kind.label(),
                self.ty.name
            ),
        };
        assert!(
            seq.element_type.compatible(element.descriptor()),
            "append to `{}` from incompatible element type `{}`",
            self.ty.name,
            element.descriptor().name
        );
        let max = seq.max_length;
        self.push_raw(max, element.raw().clone())
    }

    fn push_raw(
        &mut self,
        max: Option<usize>,
        element: DynamicValue,
    ) -> Result<(), DynamicDataError> {
        let elems = match &mut *self.value {
            DynamicValue::Sequence(elems) => elems,
            _ => unreachable!("sequence value for `{}`", self.ty.name),
        };
        if let Some(max) = max {
            if elems.len() >= max {
                log::debug!(
                    "append to `{}` rejected: bound {} reached",
                    self.ty.name,
                    max
                );
                return Err(DynamicDataError::SequenceTooLong {
                    length: elems.len() + 1,
                    max,
                });
            }
        }
        elems
            .try_reserve(1)
            .map_err(|_| DynamicDataError::OutOfMemory)?;
        elems.push(element);
        Ok(())
    }

    /// Depth-first pre-order walk where the callback may mutate each visited
    /// node's value in place.
    ///
    /// Resizing a collection from inside a visit of that collection is a
    /// caller error and unsupported.
    pub fn visit_mut<'s, F>(&'s mut self, f: F)
    where
        F: for<'n> FnMut(&mut VisitNodeMut<'s, 'n>),
    {
        visit::walk_mut(self.ty, self.value, f);
    }
}

/// Owning container: a descriptor plus a value built for it.
///
/// The sole owner of its storage. `Clone` deep-copies, a move transfers the
/// value without copying, and `Drop` releases it exactly once; views handed
/// out by [`DynamicData::as_ref`]/[`DynamicData::as_mut`] are borrows whose
/// validity the compiler scopes to the container's life.
#[derive(Debug, Clone)]
pub struct DynamicData {
    descriptor: Arc<TypeDescriptor>,
    value: DynamicValue,
}

impl DynamicData {
    /// Create a default-constructed instance of `descriptor`.
    pub fn new(descriptor: &Arc<TypeDescriptor>) -> Self {
        let value = DynamicValue::default_for(descriptor);
        log::trace!("constructed dynamic instance of `{}`", descriptor.name);
        Self {
            descriptor: descriptor.clone(),
            value,
        }
    }

    /// Adopt an externally built value after validating its shape.
    ///
    /// # Errors
    ///
    /// [`DynamicDataError::ValueShapeMismatch`] when `value` does not
    /// conform to `descriptor`.
    pub fn from_value(
        descriptor: &Arc<TypeDescriptor>,
        value: DynamicValue,
    ) -> Result<Self, DynamicDataError> {
        if !value.conforms_to(descriptor) {
            return Err(DynamicDataError::ValueShapeMismatch {
                type_name: descriptor.name.clone(),
            });
        }
        Ok(Self {
            descriptor: descriptor.clone(),
            value,
        })
    }

    /// Get the type descriptor.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Get the type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Get the underlying value.
    pub fn value(&self) -> &DynamicValue {
        &self.value
    }

    /// Get mutable reference to the underlying value.
    ///
    /// The caller must keep the value conforming to the descriptor.
    pub fn value_mut(&mut self) -> &mut DynamicValue {
        &mut self.value
    }

    /// Into inner value.
    pub fn into_value(self) -> DynamicValue {
        self.value
    }

    /// Read-only view over this container's storage.
    pub fn as_ref(&self) -> DynamicRef<'_> {
        DynamicRef::new(&self.descriptor, &self.value)
    }

    /// Writable view over this container's storage.
    pub fn as_mut(&mut self) -> DynamicMut<'_> {
        DynamicMut::new(&self.descriptor, &mut self.value)
    }

    /// Read a scalar member by name.
    ///
    /// # Panics
    ///
    /// Panics unless this is a struct with a member `name` of scalar
    /// representation `T`.
    pub fn get<T: ScalarValue + Clone>(&self, name: &str) -> T {
        self.as_ref().member(name).value::<T>().clone()
    }

    /// Write a scalar member by name.
    ///
    /// # Panics
    ///
    /// As [`DynamicData::get`].
    pub fn set<T: ScalarValue>(&mut self, name: &str, v: T) {
        self.as_mut().member_mut(name).set(v);
    }
}

impl PartialEq for DynamicData {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}
