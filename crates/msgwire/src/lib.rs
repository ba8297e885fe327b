// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # msgwire - schema-driven binary message codec
//!
//! Serializes record instances described by a message schema into a compact
//! big-endian wire format, and back. Every message starts with an 8-byte
//! structural fingerprint of its record type so that a receiver built against
//! a different definition rejects it instead of misreading it.
//!
//! ## Quick Start
//!
//! ```rust
//! use msgwire::{MemberDef, RecordDef, RecordValue, Schema, Value};
//!
//! let schema = Schema::builder()
//!     .record(
//!         RecordDef::new("geo.Polyline")
//!             .field("count", "int32")
//!             .member(MemberDef::new("xs", "float64").sized_by("count")),
//!     )
//!     .build()?;
//!
//! let codec = schema.codec("geo.Polyline")?;
//! let line = RecordValue::new("geo.Polyline")
//!     .with("count", 2i32)
//!     .with("xs", vec![Value::Float64(0.5), Value::Float64(1.5)]);
//!
//! let bytes = codec.encode(&line)?;
//! assert_eq!(bytes.len(), 8 + 4 + 2 * 8);
//! assert_eq!(codec.decode(&bytes)?, line);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Wire format
//!
//! ```text
//! +--------------------+--------------------------------------------+
//! | fingerprint u64 BE | body: members in declaration order         |
//! +--------------------+--------------------------------------------+
//!   scalars      big-endian, byte/boolean/int8 = 1, int16 = 2,
//!                int32/float32 = 4, int64/float64 = 8
//!   string       u32 BE (utf-8 length + 1), bytes, 0x00
//!   record       nested body, no header
//!   array        elements of each dimension in order; sizes come from the
//!                schema or from an earlier integer member
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Schema`] | Validated, immutable set of record types |
//! | [`RecordCodec`] | Encoder/decoder bound to one record type |
//! | [`RecordValue`] | Dynamic instance of a record |
//! | [`WireMessage`] | Trait for statically typed records |
//! | [`CodecOptions`] | Coalescing, length and depth limits, trailing-byte policy |

pub mod codec;
pub mod deps;
pub mod error;
pub mod fingerprint;
pub mod message;
pub mod model;
pub mod options;
pub mod value;

pub use codec::RecordCodec;
pub use deps::dependencies_of;
pub use error::{Result, SchemaError, WireError};
pub use message::WireMessage;
pub use model::{
    ConstValue, Constant, ConstantDef, Dimension, DimensionDef, Member, MemberDef,
    PrimitiveKind, QualifiedName, RecordDef, RecordId, RecordType, Schema, SchemaBuilder,
    SchemaDef, TypeRef,
};
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SEQUENCE_LEN};
pub use value::{RecordValue, Value};
