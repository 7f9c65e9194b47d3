// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic Access Benchmark
//!
//! Measures the core costs of the runtime-typed value layer:
//! - Member lookup through nested views
//! - Deep copy of a populated instance
//! - Full structural traversal
//!
//! This benchmark isolates the data-layer overhead without any I/O.

#![allow(clippy::uninlined_format_args)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dyndata::{DynamicData, PrimitiveKind, TypeDescriptorBuilder};
use std::hint::black_box as bb;
use std::sync::Arc;

fn telemetry_type(samples: usize) -> (Arc<dyndata::TypeDescriptor>, DynamicData) {
    let pose = Arc::new(
        TypeDescriptorBuilder::new("Pose")
            .field("x", PrimitiveKind::F64)
            .field("y", PrimitiveKind::F64)
            .field("z", PrimitiveKind::F64)
            .build(),
    );
    let descriptor = Arc::new(
        TypeDescriptorBuilder::new("Telemetry")
            .field("seq", PrimitiveKind::U64)
            .string_field("source")
            .nested_field("pose", pose)
            .sequence_field("samples", PrimitiveKind::F64)
            .build(),
    );

    let mut data = DynamicData::new(&descriptor);
    data.set("seq", 1u64);
    data.as_mut().member_mut("source").set_string("bench");
    {
        let mut view = data.as_mut();
        let mut seq = view.member_mut("samples");
        for i in 0..samples {
            seq.push(i as f64).expect("push");
        }
    }
    (descriptor, data)
}

fn bench_member_access(c: &mut Criterion) {
    let (_descriptor, data) = telemetry_type(16);

    c.bench_function("member_read_nested", |b| {
        b.iter(|| {
            let view = data.as_ref();
            bb(*view.member("pose").member("z").value::<f64>())
        });
    });

    c.bench_function("member_write_nested", |b| {
        let mut data = data.clone();
        b.iter(|| {
            data.as_mut()
                .member_mut("pose")
                .member_mut("z")
                .set(bb(42.0f64));
        });
    });
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_clone");
    for samples in [16, 256, 4096] {
        let (_descriptor, data) = telemetry_type(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &data, |b, data| {
            b.iter(|| bb(data.clone()));
        });
    }
    group.finish();
}

fn bench_visit(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_full_tree");
    for samples in [16, 256, 4096] {
        let (_descriptor, data) = telemetry_type(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &data, |b, data| {
            b.iter(|| {
                let mut nodes = 0usize;
                data.as_ref().visit(|node| {
                    nodes += node.depth();
                });
                bb(nodes)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_member_access, bench_clone, bench_visit);
criterion_main!(benches);
