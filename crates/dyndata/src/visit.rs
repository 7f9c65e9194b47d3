// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive traversal over runtime-typed instances.
//!
//! The walk is depth-first pre-order and deterministic: a parent is visited
//! before its children, struct members in declaration order, collection
//! elements in index order. Ancestors live in an explicit stack owned by the
//! walk; nodes are transient and only valid inside the callback, which the
//! borrow checker enforces.
//!
//! A walk is restartable but not resumable: every `visit` call re-walks from
//! its root and runs the callback over the whole subtree in one invocation.

use crate::data::{DynamicMut, DynamicRef};
use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKind};
use crate::value::DynamicValue;
use std::fmt;

/// The step used to reach a node from its parent.
#[derive(Debug, Clone, Copy)]
pub enum AccessStep<'a> {
    /// Struct member, identified by its descriptor.
    Member(&'a FieldDescriptor),
    /// Collection element, identified by its index.
    Index(usize),
}

impl<'a> AccessStep<'a> {
    /// The member descriptor, if this step is a member access.
    pub fn as_member(&self) -> Option<&'a FieldDescriptor> {
        match *self {
            Self::Member(field) => Some(field),
            Self::Index(_) => None,
        }
    }

    /// The element index, if this step is an indexed access.
    pub fn as_index(&self) -> Option<usize> {
        match *self {
            Self::Member(_) => None,
            Self::Index(index) => Some(index),
        }
    }
}

impl fmt::Display for AccessStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(field) => write!(f, ".{}", field.name),
            Self::Index(index) => write!(f, "[{}]", index),
        }
    }
}

#[derive(Clone, Copy)]
struct NodeRecord<'a> {
    ty: &'a TypeDescriptor,
    value: &'a DynamicValue,
    access: Option<AccessStep<'a>>,
}

/// A node handed to read-only visit callbacks.
pub struct VisitNode<'a, 'n> {
    trail: &'n [NodeRecord<'a>],
    node: NodeRecord<'a>,
}

impl<'a, 'n> VisitNode<'a, 'n> {
    /// The node's type descriptor.
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.node.ty
    }

    /// Read-only view over the node's value.
    pub fn data(&self) -> DynamicRef<'a> {
        DynamicRef::new(self.node.ty, self.node.value)
    }

    /// Distance from the traversal root (root = 0).
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Whether this node has a parent (false only at the root).
    pub fn has_parent(&self) -> bool {
        !self.trail.is_empty()
    }

    /// The parent node, rebuilt from the ancestor stack.
    pub fn parent(&self) -> Option<VisitNode<'a, 'n>> {
        let (last, rest) = self.trail.split_last()?;
        Some(VisitNode {
            trail: rest,
            node: *last,
        })
    }

    /// The step that reached this node from its parent (None at the root).
    pub fn access(&self) -> Option<AccessStep<'a>> {
        self.node.access
    }

    /// Rendered access path from the traversal root, e.g. `.pose.x` or
    /// `.readings[3]`. Empty at the root.
    pub fn path(&self) -> String {
        render_path(
            self.trail
                .iter()
                .map(|record| record.access)
                .chain([self.node.access]),
        )
    }
}

#[derive(Clone, Copy)]
struct PathRecord<'a> {
    ty: &'a TypeDescriptor,
    access: Option<AccessStep<'a>>,
}

/// A node handed to mutable visit callbacks.
///
/// Ancestor values are not exposed: the node's `&mut` borrow would alias
/// them. Ancestor descriptors and access steps remain available.
pub struct VisitNodeMut<'a, 'n> {
    trail: &'n [PathRecord<'a>],
    ty: &'a TypeDescriptor,
    access: Option<AccessStep<'a>>,
    value: &'n mut DynamicValue,
}

impl<'a, 'n> VisitNodeMut<'a, 'n> {
    /// The node's type descriptor.
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.ty
    }

    /// Read-only view over the node's value.
    pub fn data(&self) -> DynamicRef<'_> {
        DynamicRef::new(self.ty, self.value)
    }

    /// Writable view over the node's value.
    pub fn data_mut(&mut self) -> DynamicMut<'_> {
        DynamicMut::new(self.ty, self.value)
    }

    /// Distance from the traversal root (root = 0).
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Whether this node has a parent (false only at the root).
    pub fn has_parent(&self) -> bool {
        !self.trail.is_empty()
    }

    /// The parent's type descriptor.
    pub fn parent_descriptor(&self) -> Option<&'a TypeDescriptor> {
        self.trail.last().map(|record| record.ty)
    }

    /// The step that reached this node from its parent (None at the root).
    pub fn access(&self) -> Option<AccessStep<'a>> {
        self.access
    }

    /// Rendered access path from the traversal root. Empty at the root.
    pub fn path(&self) -> String {
        render_path(
            self.trail
                .iter()
                .map(|record| record.access)
                .chain([self.access]),
        )
    }
}

fn render_path<'a>(steps: impl Iterator<Item = Option<AccessStep<'a>>>) -> String {
    use fmt::Write;
    let mut out = String::new();
    for step in steps.flatten() {
        let _ = write!(out, "{}", step);
    }
    out
}

pub(crate) fn walk<'a, F>(ty: &'a TypeDescriptor, value: &'a DynamicValue, mut f: F)
where
    F: for<'n> FnMut(&VisitNode<'a, 'n>),
{
    let mut trail = Vec::new();
    walk_inner(
        &mut trail,
        NodeRecord {
            ty,
            value,
            access: None,
        },
        &mut f,
    );
}

fn walk_inner<'a, F>(trail: &mut Vec<NodeRecord<'a>>, node: NodeRecord<'a>, f: &mut F)
where
    F: for<'n> FnMut(&VisitNode<'a, 'n>),
{
    f(&VisitNode {
        trail: trail.as_slice(),
        node,
    });
    match (&node.ty.kind, node.value) {
        (TypeKind::Struct(fields), DynamicValue::Struct(values)) => {
            trail.push(node);
            for (field, value) in fields.iter().zip(values) {
                walk_inner(
                    trail,
                    NodeRecord {
                        ty: &field.type_desc,
                        value,
                        access: Some(AccessStep::Member(field)),
                    },
                    f,
                );
            }
            trail.pop();
        }
        (TypeKind::Sequence(seq), DynamicValue::Sequence(elems)) => {
            trail.push(node);
            for (index, value) in elems.iter().enumerate() {
                walk_inner(
                    trail,
                    NodeRecord {
                        ty: &seq.element_type,
                        value,
                        access: Some(AccessStep::Index(index)),
                    },
                    f,
                );
            }
            trail.pop();
        }
        (TypeKind::Array(arr), DynamicValue::Array(elems)) => {
            trail.push(node);
            for (index, value) in elems.iter().enumerate() {
                walk_inner(
                    trail,
                    NodeRecord {
                        ty: &arr.element_type,
                        value,
                        access: Some(AccessStep::Index(index)),
                    },
                    f,
                );
            }
            trail.pop();
        }
        // Scalar leaf: no children.
        _ => {}
    }
}

pub(crate) fn walk_mut<'a, F>(ty: &'a TypeDescriptor, value: &mut DynamicValue, mut f: F)
where
    F: for<'n> FnMut(&mut VisitNodeMut<'a, 'n>),
{
    let mut trail = Vec::new();
    walk_mut_inner(&mut trail, ty, None, value, &mut f);
}

fn walk_mut_inner<'a, F>(
    trail: &mut Vec<PathRecord<'a>>,
    ty: &'a TypeDescriptor,
    access: Option<AccessStep<'a>>,
    value: &mut DynamicValue,
    f: &mut F,
) where
    F: for<'n> FnMut(&mut VisitNodeMut<'a, 'n>),
{
    f(&mut VisitNodeMut {
        trail: trail.as_slice(),
        ty,
        access,
        value: &mut *value,
    });
    match (&ty.kind, value) {
        (TypeKind::Struct(fields), DynamicValue::Struct(values)) => {
            trail.push(PathRecord { ty, access });
            for (field, value) in fields.iter().zip(values.iter_mut()) {
                walk_mut_inner(
                    trail,
                    &field.type_desc,
                    Some(AccessStep::Member(field)),
                    value,
                    f,
                );
            }
            trail.pop();
        }
        (TypeKind::Sequence(seq), DynamicValue::Sequence(elems)) => {
            trail.push(PathRecord { ty, access });
            for (index, value) in elems.iter_mut().enumerate() {
                walk_mut_inner(
                    trail,
                    &seq.element_type,
                    Some(AccessStep::Index(index)),
                    value,
                    f,
                );
            }
            trail.pop();
        }
        (TypeKind::Array(arr), DynamicValue::Array(elems)) => {
            trail.push(PathRecord { ty, access });
            for (index, value) in elems.iter_mut().enumerate() {
                walk_mut_inner(
                    trail,
                    &arr.element_type,
                    Some(AccessStep::Index(index)),
                    value,
                    f,
                );
            }
            trail.pop();
        }
        _ => {}
    }
}
