// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use msgwire::Schema;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(schema) = Schema::from_json(doc) else {
        return;
    };

    // Every accepted schema must fingerprint and produce encodable defaults.
    for id in schema.ids().collect::<Vec<_>>() {
        let _ = schema.fingerprint(id);
        let _ = schema.dependencies_of(id);
        let value = schema.default_value(id);
        schema.codec_for(id).encode(&value).expect("default value encodes");
    }
});
