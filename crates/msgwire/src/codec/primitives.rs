// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Big-endian primitive I/O shared by the dynamic codec and typed messages.
//!
//! [`WireWriter`] and [`WireReader`] wrap any `Write`/`Read`. The reader
//! tracks how many bytes it consumed so that end of input surfaces as
//! `MalformedInput` with an offset, and enforces an upper bound on string
//! and array lengths read from the wire. The writer enforces the same bound
//! so that it never produces a message the reader refuses.

use crate::error::{Result, WireError};
use crate::model::PrimitiveKind;
use crate::options::DEFAULT_MAX_SEQUENCE_LEN;
use crate::value::Value;
use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Upper bound on up-front allocation for wire-sized byte buffers.
const PREALLOC_BYTES: usize = 64 * 1024;

/// Fixed-width scalar with a big-endian wire form.
pub trait BePrimitive: Copy {
    const WIDTH: usize;

    /// Write into `out[..WIDTH]`.
    fn put(self, out: &mut [u8]);

    /// Read from `bytes[..WIDTH]`.
    fn get(bytes: &[u8]) -> Self;
}

macro_rules! impl_be_primitive {
    ($ty:ty, $width:expr, $write:ident, $read:ident) => {
        impl BePrimitive for $ty {
            const WIDTH: usize = $width;

            fn put(self, out: &mut [u8]) {
                BigEndian::$write(out, self);
            }

            fn get(bytes: &[u8]) -> Self {
                BigEndian::$read(bytes)
            }
        }
    };
}

impl_be_primitive!(i16, 2, write_i16, read_i16);
impl_be_primitive!(i32, 4, write_i32, read_i32);
impl_be_primitive!(i64, 8, write_i64, read_i64);
impl_be_primitive!(f32, 4, write_f32, read_f32);
impl_be_primitive!(f64, 8, write_f64, read_f64);

impl BePrimitive for u8 {
    const WIDTH: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = self;
    }

    fn get(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl BePrimitive for i8 {
    const WIDTH: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    fn get(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

impl BePrimitive for bool {
    const WIDTH: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    /// Any non-zero byte reads as `true`.
    fn get(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Append `value` to `out`.
pub fn push<T: BePrimitive>(out: &mut Vec<u8>, value: T) {
    let start = out.len();
    out.resize(start + T::WIDTH, 0);
    value.put(&mut out[start..]);
}

/// Append one fixed-width dynamic scalar; the variant must match `kind`.
pub(crate) fn push_value(out: &mut Vec<u8>, kind: PrimitiveKind, value: &Value) -> Result<()> {
    match (kind, value) {
        (PrimitiveKind::Byte, Value::Byte(v)) => push(out, *v),
        (PrimitiveKind::Boolean, Value::Boolean(v)) => push(out, *v),
        (PrimitiveKind::Int8, Value::Int8(v)) => push(out, *v),
        (PrimitiveKind::Int16, Value::Int16(v)) => push(out, *v),
        (PrimitiveKind::Int32, Value::Int32(v)) => push(out, *v),
        (PrimitiveKind::Int64, Value::Int64(v)) => push(out, *v),
        (PrimitiveKind::Float32, Value::Float32(v)) => push(out, *v),
        (PrimitiveKind::Float64, Value::Float64(v)) => push(out, *v),
        _ => {
            return Err(WireError::invariant(format!(
                "expected {kind} value, got {}",
                value.kind_name()
            )))
        }
    }
    Ok(())
}

/// Decode one fixed-width scalar of `kind` from `bytes[..width]`.
pub(crate) fn unpack_value(kind: PrimitiveKind, bytes: &[u8]) -> Value {
    match kind {
        PrimitiveKind::Byte => Value::Byte(u8::get(bytes)),
        PrimitiveKind::Boolean => Value::Boolean(bool::get(bytes)),
        PrimitiveKind::Int8 => Value::Int8(i8::get(bytes)),
        PrimitiveKind::Int16 => Value::Int16(i16::get(bytes)),
        PrimitiveKind::Int32 => Value::Int32(i32::get(bytes)),
        PrimitiveKind::Int64 => Value::Int64(i64::get(bytes)),
        PrimitiveKind::Float32 => Value::Float32(f32::get(bytes)),
        PrimitiveKind::Float64 => Value::Float64(f64::get(bytes)),
        PrimitiveKind::String => unreachable!("string has no fixed width"),
    }
}

/// Generate big-endian write methods through `WriteBytesExt`.
macro_rules! impl_write_be {
    ($name:ident, $ty:ty, $method:ident) => {
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            self.inner.$method::<BigEndian>(value)?;
            self.written += std::mem::size_of::<$ty>();
            Ok(())
        }
    };
}

/// Generate big-endian read methods through `ReadBytesExt`.
macro_rules! impl_read_be {
    ($name:ident, $ty:ty, $method:ident) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let value = self
                .inner
                .$method::<BigEndian>()
                .map_err(|e| WireError::from_read(e, self.offset))?;
            self.offset += std::mem::size_of::<$ty>();
            Ok(value)
        }
    };
}

/// Big-endian message writer.
pub struct WireWriter<W> {
    inner: W,
    written: usize,
    max_sequence_len: usize,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }

    /// Same limit as the reader, so nothing is written that a reader with
    /// equal options would refuse.
    #[must_use]
    pub fn with_max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = max;
        self
    }

    /// Reject string lengths and variable element counts above the limit.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_sequence_len {
            return Err(WireError::invariant(format!(
                "length {len} exceeds limit of {}",
                self.max_sequence_len
            )));
        }
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_u8(value)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.inner.write_i8(value)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    impl_write_be!(write_i16, i16, write_i16);
    impl_write_be!(write_i32, i32, write_i32);
    impl_write_be!(write_i64, i64, write_i64);
    impl_write_be!(write_u32, u32, write_u32);
    impl_write_be!(write_u64, u64, write_u64);
    impl_write_be!(write_f32, f32, write_f32);
    impl_write_be!(write_f64, f64, write_f64);

    /// `u32` length (UTF-8 bytes + 1), the bytes, then a NUL.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.check_len(bytes.len())?;
        let len = u32::try_from(bytes.len() + 1)
            .map_err(|_| WireError::invariant("string longer than u32::MAX bytes"))?;
        self.write_u32(len)?;
        self.write_raw(bytes)?;
        self.write_u8(0)
    }

    /// Pack `items` into one contiguous block and write it in a single call.
    pub fn write_block<T: BePrimitive>(&mut self, items: &[T]) -> Result<()> {
        let mut block = Vec::with_capacity(items.len() * T::WIDTH);
        for item in items {
            push(&mut block, *item);
        }
        self.write_raw(&block)
    }
}

/// Big-endian message reader.
pub struct WireReader<R> {
    inner: R,
    offset: usize,
    max_sequence_len: usize,
}

impl<R: Read> WireReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }

    #[must_use]
    pub fn with_max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = max;
        self
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_raw(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner
            .read_exact(buf)
            .map_err(|e| WireError::from_read(e, self.offset))?;
        self.offset += buf.len();
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self
            .inner
            .read_u8()
            .map_err(|e| WireError::from_read(e, self.offset))?;
        self.offset += 1;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    impl_read_be!(read_i16, i16, read_i16);
    impl_read_be!(read_i32, i32, read_i32);
    impl_read_be!(read_i64, i64, read_i64);
    impl_read_be!(read_u32, u32, read_u32);
    impl_read_be!(read_u64, u64, read_u64);
    impl_read_be!(read_f32, f32, read_f32);
    impl_read_be!(read_f64, f64, read_f64);

    /// Reject element counts above the configured limit.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_sequence_len {
            return Err(WireError::malformed(
                self.offset,
                format!(
                    "length {len} exceeds limit of {}",
                    self.max_sequence_len
                ),
            ));
        }
        Ok(())
    }

    /// Convert a decoded length field into an element count.
    pub fn length_from(&self, raw: i64) -> Result<usize> {
        let len = usize::try_from(raw).map_err(|_| {
            WireError::malformed(self.offset, format!("invalid array length {raw}"))
        })?;
        self.check_len(len)?;
        Ok(len)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let start = self.offset;
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Err(WireError::malformed(
                start,
                "string length 0 leaves no room for the terminator",
            ));
        }
        self.check_len(len - 1)?;

        let mut bytes = self.read_vec(len)?;
        if bytes.pop() != Some(0) {
            return Err(WireError::malformed(start, "string is not NUL-terminated"));
        }
        String::from_utf8(bytes)
            .map_err(|e| WireError::malformed(start, format!("string is not UTF-8: {e}")))
    }

    /// Read `len` raw bytes. The caller validates `len` when it comes from
    /// the wire.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_vec(len)
    }

    /// Read `count` packed elements with a single read.
    pub fn read_block<T: BePrimitive>(&mut self, count: usize) -> Result<Vec<T>> {
        let bytes = self.read_block_bytes(count, T::WIDTH)?;
        Ok(bytes.chunks_exact(T::WIDTH).map(T::get).collect())
    }

    pub(crate) fn read_block_bytes(&mut self, count: usize, width: usize) -> Result<Vec<u8>> {
        let total = count
            .checked_mul(width)
            .ok_or_else(|| WireError::malformed(self.offset, "array size overflows"))?;
        self.read_vec(total)
    }

    /// Buffer grows with the bytes actually read, so a declared size the
    /// input cannot back fails without allocating it up front.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_BYTES));
        let read = (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| WireError::from_read(e, self.offset))?;
        self.offset += read;
        if read < len {
            return Err(WireError::malformed(self.offset, "unexpected end of input"));
        }
        Ok(buf)
    }
}
