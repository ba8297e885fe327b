// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural fingerprints.
//!
//! A record's fingerprint is its shape seed plus the fingerprints of every
//! record-typed member (wrapping add), rotated left by one. A record already
//! on the current path contributes 0, which terminates self- and
//! mutually-recursive graphs.

use crate::model::{DimensionDef, MemberDef, PrimitiveKind, RecordDef, RecordId, Schema};

/// Fingerprint of `id` with `parents` on the current path.
///
/// `compute(schema, id, &[])` is the packed fingerprint; prefer the memoized
/// [`Schema::fingerprint`].
pub fn compute(schema: &Schema, id: RecordId, parents: &[RecordId]) -> u64 {
    if parents.contains(&id) {
        return 0;
    }

    let record = schema.record(id);
    let mut path = Vec::with_capacity(parents.len() + 1);
    path.extend_from_slice(parents);
    path.push(id);

    let children = record.record_refs().map(|child| compute(schema, child, &path));
    let hash = combine(record.shape_seed(), children);
    log::trace!(
        "[fingerprint] {} depth {} -> {:#018x}",
        record.name(),
        parents.len(),
        hash
    );
    hash
}

/// Fold child fingerprints into a seed: wrapping sum, then rotate left by 1.
///
/// Exposed for hand-written or generated [`WireMessage`](crate::WireMessage)
/// impls, which walk their own type graph.
pub fn combine(seed: u64, children: impl IntoIterator<Item = u64>) -> u64 {
    children
        .into_iter()
        .fold(seed, u64::wrapping_add)
        .rotate_left(1)
}

const SHAPE_SEED_INIT: u64 = 0x1234_5678;

fn hash_update(v: u64, byte: u8) -> u64 {
    ((v << 8) ^ (v >> 55)).wrapping_add(u64::from(byte))
}

fn hash_str(v: u64, s: &str) -> u64 {
    let v = hash_update(v, s.len() as u8);
    s.bytes().fold(v, hash_update)
}

/// Derive a shape seed from a record's declared members.
///
/// Covers member names, primitive element type names, dimension count, and
/// each dimension's mode and size text. Record-typed members contribute only
/// their name; the referenced record enters through [`compute`]. Constants
/// do not take part.
pub fn derive_shape_seed(def: &RecordDef) -> u64 {
    def.members.iter().fold(SHAPE_SEED_INIT, hash_member)
}

fn hash_member(mut v: u64, member: &MemberDef) -> u64 {
    v = hash_str(v, &member.name);
    if let Some(kind) = PrimitiveKind::from_name(&member.type_name) {
        v = hash_str(v, kind.name());
    }
    v = hash_update(v, member.dims.len() as u8);
    for dim in &member.dims {
        let (mode, size) = match dim {
            DimensionDef::Const(n) => (0, n.to_string()),
            DimensionDef::Var(field) => (1, field.clone()),
        };
        v = hash_update(v, mode);
        v = hash_str(v, &size);
    }
    v
}
