// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Hand-written `WireMessage` impls, shaped like generated code, must agree
// byte for byte with the dynamic codec on the equivalent schema.

use msgwire::codec::primitives::{WireReader, WireWriter};
use msgwire::fingerprint::combine;
use msgwire::message::descend;
use msgwire::{MemberDef, RecordDef, RecordValue, Result, Schema, Value, WireMessage};
use std::io::{Read, Write};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl WireMessage for Point {
    const TYPE_NAME: &'static str = "geo.Point";

    fn hash_recursive(parents: &[&'static str]) -> u64 {
        match descend(parents, Self::TYPE_NAME) {
            Some(_) => combine(0x1, []),
            None => 0,
        }
    }

    fn fingerprint() -> u64 {
        static FP: OnceLock<u64> = OnceLock::new();
        *FP.get_or_init(|| Self::hash_recursive(&[]))
    }

    fn encode_body<W: Write>(&self, w: &mut WireWriter<W>) -> Result<()> {
        w.write_block(&[self.x, self.y])
    }

    fn decode_body<R: Read>(r: &mut WireReader<R>) -> Result<Self> {
        let v = r.read_block::<i32>(2)?;
        Ok(Self { x: v[0], y: v[1] })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Path {
    name: String,
    points: Vec<Point>,
    weights: Vec<f64>,
    closed: bool,
    origin: Point,
}

impl WireMessage for Path {
    const TYPE_NAME: &'static str = "geo.Path";

    fn hash_recursive(parents: &[&'static str]) -> u64 {
        let Some(path) = descend(parents, Self::TYPE_NAME) else {
            return 0;
        };
        combine(
            0x20,
            [Point::hash_recursive(&path), Point::hash_recursive(&path)],
        )
    }

    fn fingerprint() -> u64 {
        static FP: OnceLock<u64> = OnceLock::new();
        *FP.get_or_init(|| Self::hash_recursive(&[]))
    }

    fn encode_body<W: Write>(&self, w: &mut WireWriter<W>) -> Result<()> {
        w.write_string(&self.name)?;
        w.write_i32(self.points.len() as i32)?;
        for p in &self.points {
            p.encode_body(w)?;
        }
        w.write_block(&self.weights)?;
        w.write_bool(self.closed)?;
        self.origin.encode_body(w)
    }

    fn decode_body<R: Read>(r: &mut WireReader<R>) -> Result<Self> {
        let name = r.read_string()?;
        let raw = r.read_i32()?;
        let n = r.length_from(i64::from(raw))?;
        let points = (0..n)
            .map(|_| Point::decode_body(r))
            .collect::<Result<Vec<_>>>()?;
        let weights = r.read_block::<f64>(n)?;
        let closed = r.read_bool()?;
        let origin = Point::decode_body(r)?;
        Ok(Self {
            name,
            points,
            weights,
            closed,
            origin,
        })
    }
}

fn schema() -> Schema {
    Schema::builder()
        .record(
            RecordDef::new("geo.Point")
                .shape_seed(0x1)
                .field("x", "int32")
                .field("y", "int32"),
        )
        .record(
            RecordDef::new("geo.Path")
                .shape_seed(0x20)
                .field("name", "string")
                .field("n", "int32")
                .member(MemberDef::new("points", "geo.Point").sized_by("n"))
                .member(MemberDef::new("weights", "float64").sized_by("n"))
                .field("closed", "boolean")
                .field("origin", "geo.Point"),
        )
        .build()
        .unwrap()
}

fn point_value(p: &Point) -> RecordValue {
    RecordValue::new("geo.Point").with("x", p.x).with("y", p.y)
}

fn path_value(p: &Path) -> RecordValue {
    RecordValue::new("geo.Path")
        .with("name", p.name.as_str())
        .with("n", p.points.len() as i32)
        .with(
            "points",
            p.points
                .iter()
                .map(|pt| Value::from(point_value(pt)))
                .collect::<Vec<_>>(),
        )
        .with(
            "weights",
            p.weights.iter().map(|w| Value::Float64(*w)).collect::<Vec<_>>(),
        )
        .with("closed", p.closed)
        .with("origin", point_value(&p.origin))
}

fn sample() -> Path {
    Path {
        name: "loop".into(),
        points: vec![Point { x: 0, y: 0 }, Point { x: 5, y: -5 }],
        weights: vec![0.5, 2.0],
        closed: true,
        origin: Point { x: 1, y: 1 },
    }
}

#[test]
fn typed_fingerprints_match_schema() {
    let schema = schema();
    assert_eq!(Point::fingerprint(), schema.fingerprint(schema.lookup("geo.Point").unwrap()));
    assert_eq!(Path::fingerprint(), schema.fingerprint(schema.lookup("geo.Path").unwrap()));
}

#[test]
fn cached_fingerprints_stay_per_type() {
    let (point, path) = (Point::fingerprint(), Path::fingerprint());
    assert_ne!(point, path);
    assert_eq!(point, Point::hash_recursive(&[]));
    assert_eq!(path, Path::hash_recursive(&[]));
    assert_eq!((Point::fingerprint(), Path::fingerprint()), (point, path));
}

#[test]
fn typed_and_dynamic_bytes_agree() {
    let schema = schema();
    let codec = schema.codec("geo.Path").unwrap();
    let path = sample();

    let typed = path.encode().unwrap();
    let dynamic = codec.encode(&path_value(&path)).unwrap();
    assert_eq!(typed, dynamic);

    assert_eq!(Path::decode(&dynamic).unwrap(), path);
    assert_eq!(codec.decode(&typed).unwrap(), path_value(&path));
}

#[test]
fn typed_decode_rejects_other_record() {
    let bytes = Point { x: 1, y: 2 }.encode().unwrap();
    let err = Path::decode(&bytes).unwrap_err();
    assert!(err.is_schema_mismatch());
}

#[test]
fn typed_stream_decoding() {
    let mut stream = Vec::new();
    let a = sample();
    let b = Path {
        name: String::new(),
        points: vec![],
        weights: vec![],
        closed: false,
        origin: Point { x: 0, y: 0 },
    };
    a.encode_into(&mut stream).unwrap();
    b.encode_into(&mut stream).unwrap();

    let mut cursor = std::io::Cursor::new(stream);
    assert_eq!(Path::decode_from(&mut cursor).unwrap(), a);
    assert_eq!(Path::decode_from(&mut cursor).unwrap(), b);
}
