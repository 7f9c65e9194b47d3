// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dyndata - Runtime dynamic data for middleware
//!
//! Read, write, and structurally traverse values whose shape is only known
//! at runtime, without generating per-type code. This is the data layer
//! generic tools build on: bridges, introspectors, debuggers, and generic
//! publishers/subscribers that manipulate arbitrarily-typed messages through
//! one value representation paired with a runtime type descriptor.
//!
//! # Features
//!
//! - **TypeDescriptor**: Runtime type description (primitives, strings,
//!   structs, sequences, arrays)
//! - **DynamicData**: Owning, type-checked instance container
//! - **DynamicRef / DynamicMut**: Borrowed read-only and mutable views with
//!   member, index, and scalar access
//! - **Traversal**: Depth-first structural walk with access paths and
//!   parent chains
//! - **Builder API**: Fluent interface for building type descriptors
//!
//! # Example
//!
//! ```rust
//! use dyndata::{DynamicData, PrimitiveKind, TypeDescriptorBuilder};
//! use std::sync::Arc;
//!
//! // Build a type descriptor at runtime
//! let descriptor = Arc::new(TypeDescriptorBuilder::new("SensorReading")
//!     .field("sensor_id", PrimitiveKind::U32)
//!     .field("temperature", PrimitiveKind::F64)
//!     .string_field("location")
//!     .build());
//!
//! // Create and populate an instance
//! let mut data = DynamicData::new(&descriptor);
//! data.set("sensor_id", 42u32);
//! data.set("temperature", 23.5f64);
//! data.as_mut().member_mut("location").set_string("Building A");
//!
//! // Typed access through views
//! assert_eq!(data.get::<f64>("temperature"), 23.5);
//! assert_eq!(data.as_ref().member("location").string(), "Building A");
//!
//! // Generic introspection without compile-time type knowledge
//! data.as_ref().visit(|node| {
//!     println!("{} ({})", node.path(), node.descriptor().kind.label());
//! });
//! ```
//!
//! # Contract
//!
//! Kind mismatches, absent members, and out-of-range indices are caller
//! contract breaches and panic at the point of detection; only growth
//! failures ([`DynamicDataError`]) are recoverable. Mutation requires a
//! `&mut` borrow, so exclusive write access is compiler-enforced; the crate
//! adds no locking of its own.

mod builder;
mod data;
mod descriptor;
mod value;
mod visit;

pub use builder::{ArrayBuilder, SequenceBuilder, TypeDescriptorBuilder};
pub use data::{DynamicData, DynamicDataError, DynamicMut, DynamicRef};
pub use descriptor::{
    ArrayDescriptor, FieldDescriptor, PrimitiveKind, SequenceDescriptor, TypeDescriptor, TypeKind,
};
pub use value::{DynamicValue, ScalarValue};
pub use visit::{AccessStep, VisitNode, VisitNodeMut};
