// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Randomized round trips over a schema that exercises every member shape,
// plus byte-identity between coalesced and per-field encoding and
// truncation at every boundary.

use msgwire::{
    CodecOptions, MemberDef, PrimitiveKind, RecordDef, RecordValue, Schema, Value, WireError,
};

fn schema() -> Schema {
    Schema::builder()
        .record(
            RecordDef::new("telemetry.Sample")
                .field("id", "int64")
                .field("ok", "boolean")
                .field("level", "int8")
                .field("temp", "float")
                .field("label", "string")
                .field("gain", "double"),
        )
        .record(
            RecordDef::new("telemetry.Frame")
                .field("seq", "int32")
                .field("n", "int16")
                .member(MemberDef::new("samples", "telemetry.Sample").sized_by("n"))
                .member(MemberDef::new("names", "string").sized_by("n"))
                .field("len", "byte")
                .member(MemberDef::new("payload", "byte").sized_by("len"))
                .member(MemberDef::new("matrix", "float64").fixed(2).fixed(3))
                .member(MemberDef::new("flags", "boolean").fixed(4))
                .member(MemberDef::new("raw", "byte").fixed(2).sized_by("len"))
                .field("origin", "telemetry.Sample"),
        )
        .build()
        .unwrap()
}

fn random_string(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..12);
    (0..len).map(|_| rng.choice(['a', 'z', '0', ' ', 'é', '✓']).unwrap()).collect()
}

fn random_sample(rng: &mut fastrand::Rng) -> RecordValue {
    RecordValue::new("telemetry.Sample")
        .with("id", rng.i64(..))
        .with("ok", rng.bool())
        .with("level", rng.i8(..))
        .with("temp", rng.f32() * 100.0 - 50.0)
        .with("label", random_string(rng))
        .with("gain", rng.f64())
}

fn random_frame(rng: &mut fastrand::Rng) -> RecordValue {
    let n = rng.usize(0..5);
    let len = rng.usize(0..9);
    let bytes = |rng: &mut fastrand::Rng| (0..len).map(|_| rng.u8(..)).collect::<Vec<u8>>();

    RecordValue::new("telemetry.Frame")
        .with("seq", rng.i32(..))
        .with("n", n as i16)
        .with(
            "samples",
            (0..n).map(|_| Value::from(random_sample(rng))).collect::<Vec<_>>(),
        )
        .with(
            "names",
            (0..n).map(|_| Value::from(random_string(rng))).collect::<Vec<_>>(),
        )
        .with("len", len as u8)
        .with("payload", bytes(rng))
        .with(
            "matrix",
            (0..2)
                .map(|_| Value::Array((0..3).map(|_| Value::Float64(rng.f64())).collect()))
                .collect::<Vec<_>>(),
        )
        .with(
            "flags",
            (0..4).map(|_| Value::Boolean(rng.bool())).collect::<Vec<_>>(),
        )
        .with(
            "raw",
            vec![Value::Bytes(bytes(rng)), Value::Bytes(bytes(rng))],
        )
        .with("origin", random_sample(rng))
}

#[test]
fn random_frames_round_trip() {
    let schema = schema();
    let codec = schema.codec("telemetry.Frame").unwrap();
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for _ in 0..200 {
        let frame = random_frame(&mut rng);
        let bytes = codec.encode(&frame).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, frame);
    }
}

#[test]
fn default_instance_round_trips() {
    let schema = schema();
    let id = schema.lookup("telemetry.Frame").unwrap();
    let codec = schema.codec_for(id);
    let frame = schema.default_value(id);
    let bytes = codec.encode(&frame).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap(), frame);
}

#[test]
fn coalescing_does_not_change_bytes() {
    let schema = schema();
    let coalesced = schema.codec("telemetry.Frame").unwrap();
    let per_field =
        coalesced.with_options(CodecOptions::default().coalesce_primitive_runs(false));
    let mut rng = fastrand::Rng::with_seed(7);

    for _ in 0..50 {
        let frame = random_frame(&mut rng);
        let a = coalesced.encode(&frame).unwrap();
        let b = per_field.encode(&frame).unwrap();
        assert_eq!(a, b);
        assert_eq!(per_field.decode(&a).unwrap(), frame);
    }
}

#[test]
fn truncation_at_every_boundary_is_malformed() {
    let schema = schema();
    let codec = schema.codec("telemetry.Frame").unwrap();
    let mut rng = fastrand::Rng::with_seed(42);
    let frame = random_frame(&mut rng);
    let bytes = codec.encode(&frame).unwrap();

    for cut in 0..bytes.len() {
        let err = codec.decode(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, WireError::MalformedInput { .. }),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn every_primitive_kind_round_trips() {
    let mut builder = Schema::builder();
    for kind in PrimitiveKind::ALL {
        builder.add(
            RecordDef::new(format!("k.{}", kind.name()))
                .field("v", kind.name())
                .member(MemberDef::new("arr", kind.name()).fixed(2)),
        );
    }
    let schema = builder.build().unwrap();

    for kind in PrimitiveKind::ALL {
        let name = format!("k.{}", kind.name());
        let arr = if kind == PrimitiveKind::Byte {
            Value::Bytes(vec![0, 0])
        } else {
            Value::Array(vec![Value::zero(kind), Value::zero(kind)])
        };
        let value = RecordValue::new(name.as_str())
            .with("v", Value::zero(kind))
            .with("arr", arr);
        let codec = schema.codec(&name).unwrap();
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value, "{kind}");
    }
}
