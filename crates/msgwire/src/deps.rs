// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record-to-record dependency sets for the packaging layer.

use crate::model::{RecordId, Schema};
use std::collections::BTreeSet;

/// Fully-qualified names of every distinct record referenced by the members
/// of `id`, excluding `id` itself. Only direct references are listed.
pub fn dependencies_of(schema: &Schema, id: RecordId) -> BTreeSet<String> {
    schema
        .record(id)
        .record_refs()
        .filter(|dep| *dep != id)
        .map(|dep| schema.record(dep).name().to_string())
        .collect()
}
