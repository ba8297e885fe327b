// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// A built schema is shared read-only across threads: the lazily computed
// fingerprint is the same for every reader and codecs run concurrently.

use msgwire::{MemberDef, RecordDef, RecordValue, Schema, Value};
use std::thread;

fn schema() -> Schema {
    Schema::builder()
        .record(
            RecordDef::new("Node")
                .field("id", "int32")
                .field("n", "int32")
                .member(MemberDef::new("kids", "Node").sized_by("n")),
        )
        .record(RecordDef::new("Root").field("a", "Node").field("b", "Node"))
        .build()
        .unwrap()
}

#[test]
fn first_fingerprint_access_from_many_threads() {
    let schema = schema();
    let root = schema.lookup("Root").unwrap();

    let seen: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| schema.fingerprint(root)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(seen.iter().all(|fp| *fp == seen[0]));
    assert_eq!(seen[0], msgwire::fingerprint::compute(&schema, root, &[]));
}

#[test]
fn codecs_share_one_schema() {
    let schema = schema();
    let codec = schema.codec("Node").unwrap();

    thread::scope(|s| {
        for t in 0..4i32 {
            s.spawn(move || {
                for i in 0..100 {
                    let leaf = RecordValue::new("Node")
                        .with("id", i)
                        .with("n", 0i32)
                        .with("kids", Vec::<Value>::new());
                    let node = RecordValue::new("Node")
                        .with("id", t)
                        .with("n", 1i32)
                        .with("kids", vec![Value::from(leaf)]);
                    let bytes = codec.encode(&node).unwrap();
                    assert_eq!(codec.decode(&bytes).unwrap(), node);
                }
            });
        }
    });
}
