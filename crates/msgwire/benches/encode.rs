// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode throughput
//!
//! Compares coalesced scalar runs against per-field writes on a record that
//! is mostly fixed-width scalars, and measures decode of the same message.

#![allow(clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use msgwire::{CodecOptions, MemberDef, RecordDef, RecordValue, Schema, Value};

fn schema() -> Schema {
    let mut imu = RecordDef::new("sensors.Imu").field("stamp", "int64");
    for axis in ["ax", "ay", "az", "gx", "gy", "gz", "mx", "my", "mz"] {
        imu = imu.field(axis, "float64");
    }
    Schema::builder()
        .record(imu.field("valid", "boolean"))
        .record(
            RecordDef::new("sensors.Batch")
                .field("frame", "string")
                .field("n", "int32")
                .member(MemberDef::new("samples", "sensors.Imu").sized_by("n"))
                .member(MemberDef::new("cov", "float64").fixed(9)),
        )
        .build()
        .expect("bench schema")
}

fn batch(n: usize) -> RecordValue {
    let sample = |i: usize| {
        let mut v = RecordValue::new("sensors.Imu")
            .with("stamp", i as i64)
            .with("valid", true);
        for axis in ["ax", "ay", "az", "gx", "gy", "gz", "mx", "my", "mz"] {
            v.set(axis, i as f64 * 0.01);
        }
        Value::from(v)
    };
    RecordValue::new("sensors.Batch")
        .with("frame", "imu_link")
        .with("n", n as i32)
        .with("samples", (0..n).map(sample).collect::<Vec<_>>())
        .with("cov", vec![Value::Float64(0.0); 9])
}

fn bench_encode(c: &mut Criterion) {
    let schema = schema();
    let coalesced = schema.codec("sensors.Batch").expect("codec");
    let per_field = coalesced.with_options(CodecOptions::default().coalesce_primitive_runs(false));
    let value = batch(256);
    let size = coalesced.encode(&value).expect("encode").len();

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("coalesced", |b| {
        b.iter(|| coalesced.encode(black_box(&value)).expect("encode"));
    });
    group.bench_function("per_field", |b| {
        b.iter(|| per_field.encode(black_box(&value)).expect("encode"));
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let schema = schema();
    let codec = schema.codec("sensors.Batch").expect("codec");
    let bytes = codec.encode(&batch(256)).expect("encode");

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("batch_256", |b| {
        b.iter(|| codec.decode(black_box(&bytes)).expect("decode"));
    });
    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    c.bench_function("fingerprint_cold", |b| {
        b.iter(|| {
            let schema = schema();
            let id = schema.lookup("sensors.Batch").expect("record");
            black_box(schema.fingerprint(id))
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_fingerprint);
criterion_main!(benches);
