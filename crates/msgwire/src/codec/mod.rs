// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic wire codec.
//!
//! A message is the record's packed fingerprint (8 bytes, big-endian)
//! followed by the body. [`RecordCodec`] binds one record of a [`Schema`]
//! to a set of [`CodecOptions`] and moves [`RecordValue`]s in and out of
//! that format.
//!
//! ```
//! use msgwire::{RecordDef, RecordValue, Schema};
//!
//! let schema = Schema::builder()
//!     .record(RecordDef::new("geo.Point").shape_seed(1).field("x", "int32").field("y", "int32"))
//!     .build()
//!     .unwrap();
//! let codec = schema.codec("geo.Point").unwrap();
//!
//! let point = RecordValue::new("geo.Point").with("x", 1i32).with("y", -1i32);
//! let bytes = codec.encode(&point).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]);
//! assert_eq!(codec.decode(&bytes).unwrap(), point);
//! ```

mod decode;
mod encode;
pub(crate) mod plan;
pub mod primitives;

use self::decode::Decoder;
use self::encode::Encoder;
use self::primitives::{WireReader, WireWriter};
use crate::error::{Result, WireError};
use crate::model::{RecordId, RecordType, Schema};
use crate::options::CodecOptions;
use crate::value::RecordValue;
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Encoder/decoder for one record type of a schema.
#[derive(Debug, Clone, Copy)]
pub struct RecordCodec<'s> {
    schema: &'s Schema,
    id: RecordId,
    options: CodecOptions,
}

impl<'s> RecordCodec<'s> {
    pub fn new(schema: &'s Schema, id: RecordId) -> Self {
        Self {
            schema,
            id,
            options: CodecOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn record(&self) -> &'s RecordType {
        self.schema.record(self.id)
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn fingerprint(&self) -> u64 {
        self.schema.fingerprint(self.id)
    }

    pub fn packed_fingerprint(&self) -> [u8; 8] {
        self.schema.packed_fingerprint(self.id)
    }

    /// Names of the other records this record's members refer to.
    pub fn dependencies(&self) -> BTreeSet<String> {
        self.schema.dependencies_of(self.id)
    }

    /// Encode `value` into a fresh buffer. On error nothing is returned.
    pub fn encode(&self, value: &RecordValue) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_into(value, &mut buf)?;
        Ok(buf)
    }

    /// Stream the message into `writer`, returning the number of bytes
    /// written. On error `writer` may hold a partial message.
    pub fn encode_into<W: Write>(&self, value: &RecordValue, writer: W) -> Result<usize> {
        let encoder = Encoder::new(self.schema, &self.options);
        encoder.check_type(self.id, value)?;

        let mut w = WireWriter::new(writer).with_max_sequence_len(self.options.max_sequence_len);
        w.write_u64(self.fingerprint())?;
        encoder.encode_body(self.id, value, &mut w)?;
        log::trace!(
            "[codec] encoded {} ({} bytes)",
            self.record().name(),
            w.written()
        );
        Ok(w.written())
    }

    /// Decode one message from `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> Result<RecordValue> {
        let mut r = self.reader(bytes);
        let value = self.read_message(&mut r)?;
        let consumed = r.offset();
        if !self.options.allow_trailing_bytes && consumed < bytes.len() {
            return Err(WireError::malformed(
                consumed,
                format!("{} trailing bytes after message", bytes.len() - consumed),
            ));
        }
        Ok(value)
    }

    /// Decode one message from `reader`, leaving anything after it unread.
    pub fn decode_from<R: Read>(&self, reader: R) -> Result<RecordValue> {
        self.read_message(&mut self.reader(reader))
    }

    fn reader<R: Read>(&self, inner: R) -> WireReader<R> {
        WireReader::new(inner).with_max_sequence_len(self.options.max_sequence_len)
    }

    fn read_message<R: Read>(&self, r: &mut WireReader<R>) -> Result<RecordValue> {
        let expected = self.fingerprint();
        let found = r.read_u64()?;
        if found != expected {
            log::debug!(
                "[codec] header mismatch for {}: expected {:#018x}, found {:#018x}",
                self.record().name(),
                expected,
                found
            );
            return Err(WireError::SchemaMismatch {
                record: self.record().name().to_string(),
                expected,
                found,
            });
        }
        Decoder::new(self.schema, &self.options).decode_body(self.id, r)
    }
}
