// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved record members: element type plus ordered array dimensions.

use super::primitive::PrimitiveKind;
use std::fmt;

/// Index of a record inside its [`Schema`](super::Schema) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) u32);

impl RecordId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element type of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Record(RecordId),
}

impl TypeRef {
    pub const fn primitive(self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(kind),
            Self::Record(_) => None,
        }
    }

    pub const fn record(self) -> Option<RecordId> {
        match self {
            Self::Record(id) => Some(id),
            Self::Primitive(_) => None,
        }
    }

    /// Width of a fixed-width primitive element; `None` for strings and records.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Primitive(kind) => kind.width(),
            Self::Record(_) => None,
        }
    }
}

/// One array dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// Size fixed in the schema.
    Const(u32),
    /// Size read from an earlier integer member of the same record.
    Var(String),
}

impl Dimension {
    pub fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Textual size as declared: the literal or the length field name.
    pub fn size_text(&self) -> String {
        match self {
            Self::Const(n) => n.to_string(),
            Self::Var(field) => field.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: TypeRef,
    pub dimensions: Vec<Dimension>,
}

impl Member {
    pub fn is_scalar(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Scalar of a fixed-width primitive: eligible for coalesced runs.
    pub fn is_packable_scalar(&self) -> bool {
        self.is_scalar() && self.ty.fixed_width().is_some()
    }
}
