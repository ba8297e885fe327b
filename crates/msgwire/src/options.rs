// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec tuning knobs.

use serde::{Deserialize, Serialize};

/// Default upper bound for string byte lengths and array element counts.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 16 * 1024 * 1024;

/// Default nesting limit for record-typed members.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options attached to a [`RecordCodec`](crate::RecordCodec).
///
/// None of them change the byte layout of a valid message.
///
/// ```
/// use msgwire::CodecOptions;
///
/// let opts: CodecOptions = serde_json::from_str(r#"{ "max_sequence_len": 1024 }"#).unwrap();
/// assert!(opts.coalesce_primitive_runs);
/// assert_eq!(opts.max_sequence_len, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Move adjacent fixed-width scalar members with one write/read.
    pub coalesce_primitive_runs: bool,
    /// Largest string length or variable element count, on both encode
    /// and decode. Constant dimensions are sized by the schema and exempt.
    pub max_sequence_len: usize,
    /// Deepest chain of nested records below the top-level one.
    pub max_depth: usize,
    /// Accept input left over after a complete message in `decode(&[u8])`.
    pub allow_trailing_bytes: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            coalesce_primitive_runs: true,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_bytes: true,
        }
    }
}

impl CodecOptions {
    #[must_use]
    pub fn coalesce_primitive_runs(mut self, enabled: bool) -> Self {
        self.coalesce_primitive_runs = enabled;
        self
    }

    #[must_use]
    pub fn max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = max;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    #[must_use]
    pub fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}
