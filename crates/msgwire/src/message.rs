// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Statically typed messages.
//!
//! Generated (or hand-written) record structs implement [`WireMessage`] and
//! produce the same bytes as the dynamic [`RecordCodec`](crate::RecordCodec)
//! for the equivalent schema record. Nested member types are checked by the
//! compiler, so typed bodies carry no runtime fingerprint assertion.
//!
//! ```
//! use msgwire::codec::primitives::{WireReader, WireWriter};
//! use msgwire::{fingerprint, Result, WireMessage};
//! use std::io::{Read, Write};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl WireMessage for Point {
//!     const TYPE_NAME: &'static str = "geo.Point";
//!
//!     fn hash_recursive(parents: &[&'static str]) -> u64 {
//!         match msgwire::message::descend(parents, Self::TYPE_NAME) {
//!             Some(_) => fingerprint::combine(1, []),
//!             None => 0,
//!         }
//!     }
//!
//!     fn fingerprint() -> u64 {
//!         static FP: OnceLock<u64> = OnceLock::new();
//!         *FP.get_or_init(|| Self::hash_recursive(&[]))
//!     }
//!
//!     fn encode_body<W: Write>(&self, w: &mut WireWriter<W>) -> Result<()> {
//!         w.write_block(&[self.x, self.y])
//!     }
//!
//!     fn decode_body<R: Read>(r: &mut WireReader<R>) -> Result<Self> {
//!         Ok(Self { x: r.read_i32()?, y: r.read_i32()? })
//!     }
//! }
//!
//! let bytes = Point { x: 1, y: -1 }.encode().unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]);
//! assert_eq!(Point::decode(&bytes).unwrap(), Point { x: 1, y: -1 });
//! ```

use crate::codec::primitives::{WireReader, WireWriter};
use crate::error::{Result, WireError};
use std::io::{Read, Write};

/// Path for a nested fingerprint computation, or `None` when `name` is
/// already on it (the recursive reference then contributes 0).
pub fn descend(parents: &[&'static str], name: &'static str) -> Option<Vec<&'static str>> {
    if parents.contains(&name) {
        return None;
    }
    let mut path = Vec::with_capacity(parents.len() + 1);
    path.extend_from_slice(parents);
    path.push(name);
    Some(path)
}

pub trait WireMessage: Sized {
    /// Fully-qualified record name.
    const TYPE_NAME: &'static str;

    /// Fingerprint of this type with `parents` on the current path.
    ///
    /// Returns 0 when `TYPE_NAME` is in `parents`; otherwise the shape seed
    /// combined with `hash_recursive` of each record-typed member, as in
    /// [`fingerprint::combine`](crate::fingerprint::combine).
    fn hash_recursive(parents: &[&'static str]) -> u64;

    fn encode_body<W: Write>(&self, w: &mut WireWriter<W>) -> Result<()>;

    fn decode_body<R: Read>(r: &mut WireReader<R>) -> Result<Self>;

    /// Fingerprint of this type as a top-level message.
    ///
    /// The provided body recomputes the hash on every call. A `static`
    /// inside a generic default would be shared by every implementor, so
    /// impls memoize by overriding this with their own
    /// `static FP: OnceLock<u64>`, as in the module example.
    fn fingerprint() -> u64 {
        Self::hash_recursive(&[])
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    fn encode_into<W: Write>(&self, writer: W) -> Result<usize> {
        let mut w = WireWriter::new(writer);
        w.write_u64(Self::fingerprint())?;
        self.encode_body(&mut w)?;
        Ok(w.written())
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_from(bytes)
    }

    fn decode_from<R: Read>(reader: R) -> Result<Self> {
        let mut r = WireReader::new(reader);
        let expected = Self::fingerprint();
        let found = r.read_u64()?;
        if found != expected {
            log::debug!(
                "[message] header mismatch for {}: expected {:#018x}, found {:#018x}",
                Self::TYPE_NAME,
                expected,
                found
            );
            return Err(WireError::SchemaMismatch {
                record: Self::TYPE_NAME.to_string(),
                expected,
                found,
            });
        }
        Self::decode_body(&mut r)
    }
}
