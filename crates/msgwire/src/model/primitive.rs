// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive wire types.

use std::fmt;

/// Primitive member kinds. All fixed-width kinds are big-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Byte,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        Self::Byte,
        Self::Boolean,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::String,
    ];

    /// Encoded width in bytes, `None` for `string`.
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Byte | Self::Boolean | Self::Int8 => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Float64 => Some(8),
            Self::String => None,
        }
    }

    pub const fn is_fixed_width(self) -> bool {
        self.width().is_some()
    }

    /// Kinds usable as a variable-dimension length field.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Kinds allowed for named constants.
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64)
    }

    /// Canonical schema name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }

    /// Resolve a schema type name, accepting the C-style aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "byte" => Self::Byte,
            "boolean" => Self::Boolean,
            "int8" | "int8_t" => Self::Int8,
            "int16" | "int16_t" => Self::Int16,
            "int32" | "int32_t" => Self::Int32,
            "int64" | "int64_t" => Self::Int64,
            "float32" | "float" => Self::Float32,
            "float64" | "double" => Self::Float64,
            "string" => Self::String,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
