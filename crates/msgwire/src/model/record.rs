// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Frozen record types, constants and qualified names.

use super::member::{Member, TypeRef};
use super::primitive::PrimitiveKind;
use crate::codec::plan::Plan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Dotted record name, e.g. `geo.shapes.Point`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last dot; empty for unqualified names.
    pub fn package(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(pkg, _)| pkg)
    }

    pub fn short_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, short)| short)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal value of a named constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
}

impl ConstValue {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::Float(_) => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub kind: PrimitiveKind,
    pub value: ConstValue,
}

/// A validated record type.
///
/// Members are in wire order. The packed fingerprint is memoized on first
/// access through [`Schema::fingerprint`](super::Schema::fingerprint).
#[derive(Debug)]
pub struct RecordType {
    pub(crate) name: QualifiedName,
    pub(crate) members: Vec<Member>,
    pub(crate) constants: Vec<Constant>,
    pub(crate) shape_seed: u64,
    pub(crate) plan: Plan,
    pub(crate) fingerprint: OnceLock<u64>,
}

impl RecordType {
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    pub fn shape_seed(&self) -> u64 {
        self.shape_seed
    }

    /// Record references in member order, duplicates included.
    pub fn record_refs(&self) -> impl Iterator<Item = super::RecordId> + '_ {
        self.members.iter().filter_map(|m| match m.ty {
            TypeRef::Record(id) => Some(id),
            TypeRef::Primitive(_) => None,
        })
    }
}
