// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema construction and the wire codec.
//!
//! `SchemaError` is raised while a type model is validated and frozen.
//! `WireError` is raised by encode/decode; every variant aborts the whole
//! message, no partial value or buffer is handed back.

use std::io;
use thiserror::Error;

/// Encode/decode failure modes.
#[derive(Debug, Error)]
pub enum WireError {
    /// The 8-byte header does not match the expected record's fingerprint.
    #[error("schema mismatch for {record}: expected fingerprint {expected:#018x}, found {found:#018x}")]
    SchemaMismatch {
        record: String,
        expected: u64,
        found: u64,
    },

    /// The source ran out, or declared a size it cannot back.
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedInput { offset: usize, reason: String },

    /// The instance does not conform to its record type. Signals a bug
    /// upstream of the codec, never bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Lookup of a record name that the schema does not contain.
    #[error("unknown record type: {0}")]
    UnknownRecord(String),

    /// Writer or reader failure other than end of input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl WireError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation(reason.into())
    }

    /// Map a reader error, turning end of input into `MalformedInput`.
    pub(crate) fn from_read(err: io::Error, offset: usize) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::malformed(offset, "unexpected end of input")
        } else {
            Self::Io(err)
        }
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

/// Type model validation failures.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("record {0} is declared more than once")]
    DuplicateRecord(String),

    #[error("record {record} declares member {member} more than once")]
    DuplicateMember { record: String, member: String },

    #[error("record {record}, member {member}: unknown type {type_name}")]
    UnknownType {
        record: String,
        member: String,
        type_name: String,
    },

    #[error("record {record}, member {member}: length field {field} does not exist")]
    LengthFieldNotFound {
        record: String,
        member: String,
        field: String,
    },

    #[error("record {record}, member {member}: length field {field} must be declared before it")]
    LengthFieldNotEarlier {
        record: String,
        member: String,
        field: String,
    },

    #[error("record {record}, member {member}: length field {field} is not an integer")]
    LengthFieldNotInteger {
        record: String,
        member: String,
        field: String,
    },

    #[error("record {record}, member {member}: length field {field} is an array")]
    LengthFieldNotScalar {
        record: String,
        member: String,
        field: String,
    },

    #[error("record {record}, constant {constant}: {reason}")]
    InvalidConstant {
        record: String,
        constant: String,
        reason: String,
    },

    #[error("record {0} contains itself through members that cannot be empty")]
    InfiniteRecord(String),

    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = WireError> = std::result::Result<T, E>;
