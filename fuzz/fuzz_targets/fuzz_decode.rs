// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use msgwire::{CodecOptions, MemberDef, RecordDef, Schema};
use std::sync::OnceLock;

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::builder()
            .record(
                RecordDef::new("Inner")
                    .shape_seed(0)
                    .field("flag", "boolean")
                    .field("name", "string"),
            )
            .record(
                RecordDef::new("Outer")
                    .shape_seed(0)
                    .field("n", "int32")
                    .member(MemberDef::new("inner", "Inner").sized_by("n"))
                    .member(MemberDef::new("blob", "byte").sized_by("n"))
                    .member(MemberDef::new("vals", "int16").fixed(2).sized_by("n"))
                    .field("tail", "double"),
            )
            .record(
                RecordDef::new("Tree")
                    .shape_seed(0)
                    .field("n", "int8")
                    .member(MemberDef::new("kids", "Tree").sized_by("n")),
            )
            .build()
            .expect("fuzz schema")
    })
}

fn check(record: &str, data: &[u8]) {
    let codec = schema()
        .codec(record)
        .expect("codec")
        .with_options(CodecOptions::default().max_sequence_len(4096));

    // Skip the header check so the body decoder sees every input.
    let mut msg = codec.packed_fingerprint().to_vec();
    msg.extend_from_slice(data);

    // Anything that decodes must re-encode, and that encoding is stable.
    if let Ok(value) = codec.decode(&msg) {
        let bytes = codec.encode(&value).expect("re-encode decoded value");
        let again = codec.decode(&bytes).expect("decode re-encoded value");
        assert_eq!(codec.encode(&again).expect("second re-encode"), bytes);
    }
}

fuzz_target!(|data: &[u8]| {
    check("Outer", data);
    check("Tree", data);
});
