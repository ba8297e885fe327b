// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic encoder: [`RecordValue`] to message body.

use super::plan::Step;
use super::primitives::{push_value, WireWriter};
use crate::error::{Result, WireError};
use crate::model::{Dimension, Member, PrimitiveKind, RecordId, Schema, TypeRef};
use crate::options::CodecOptions;
use crate::value::{RecordValue, Value};
use std::io::Write;

pub(crate) struct Encoder<'s> {
    schema: &'s Schema,
    coalesce: bool,
    max_depth: usize,
}

impl<'s> Encoder<'s> {
    pub(crate) fn new(schema: &'s Schema, options: &CodecOptions) -> Self {
        Self {
            schema,
            coalesce: options.coalesce_primitive_runs,
            max_depth: options.max_depth,
        }
    }

    /// Fail unless `value` is an instance of `expected`, or of a record with
    /// the same fingerprint.
    pub(crate) fn check_type(&self, expected: RecordId, value: &RecordValue) -> Result<()> {
        let actual = self.schema.lookup(&value.type_name).ok_or_else(|| {
            WireError::invariant(format!("unknown record type {}", value.type_name))
        })?;
        if actual == expected {
            return Ok(());
        }
        let (want, got) = (self.schema.fingerprint(expected), self.schema.fingerprint(actual));
        if want != got {
            return Err(WireError::invariant(format!(
                "{} (fingerprint {got:#018x}) given where {} (fingerprint {want:#018x}) is expected",
                value.type_name,
                self.schema.record(expected).name()
            )));
        }
        Ok(())
    }

    /// Body only; the caller has already checked the type of `value`.
    pub(crate) fn encode_body<W: Write>(
        &self,
        id: RecordId,
        value: &RecordValue,
        w: &mut WireWriter<W>,
    ) -> Result<()> {
        self.encode_record(id, value, w, 0)
    }

    fn encode_record<W: Write>(
        &self,
        id: RecordId,
        value: &RecordValue,
        w: &mut WireWriter<W>,
        depth: usize,
    ) -> Result<()> {
        let record = self.schema.record(id);
        let members = record.members();

        if !self.coalesce {
            return members
                .iter()
                .try_for_each(|m| self.encode_member(m, value, w, depth));
        }

        for step in record.plan.steps() {
            match step {
                Step::Run { fields, width } => {
                    let mut block = Vec::with_capacity(*width);
                    for (idx, kind) in fields {
                        push_value(&mut block, *kind, field(value, &members[*idx])?)
                            .map_err(|e| in_member(e, &members[*idx]))?;
                    }
                    w.write_raw(&block)?;
                }
                Step::Member(idx) => self.encode_member(&members[*idx], value, w, depth)?,
            }
        }
        Ok(())
    }

    fn encode_member<W: Write>(
        &self,
        member: &Member,
        parent: &RecordValue,
        w: &mut WireWriter<W>,
        depth: usize,
    ) -> Result<()> {
        let value = field(parent, member)?;
        self.encode_dims(member, &member.dimensions, value, parent, w, depth)
            .map_err(|e| in_member(e, member))
    }

    fn encode_dims<W: Write>(
        &self,
        member: &Member,
        dims: &[Dimension],
        value: &Value,
        parent: &RecordValue,
        w: &mut WireWriter<W>,
        depth: usize,
    ) -> Result<()> {
        let Some((dim, rest)) = dims.split_first() else {
            return self.encode_element(member.ty, value, w, depth);
        };
        let len = dim_size(dim, parent)?;
        if matches!(dim, Dimension::Var(_)) {
            w.check_len(len)?;
        }

        if rest.is_empty() {
            match member.ty {
                TypeRef::Primitive(PrimitiveKind::Byte) => {
                    let Value::Bytes(bytes) = value else {
                        return Err(mismatch("bytes", value));
                    };
                    check_len(bytes.len(), len)?;
                    return w.write_raw(bytes);
                }
                TypeRef::Primitive(kind) if kind.is_fixed_width() => {
                    let items = as_array(value, len)?;
                    let mut block = Vec::with_capacity(items.len() * kind.width().unwrap_or(0));
                    for item in items {
                        push_value(&mut block, kind, item)?;
                    }
                    return w.write_raw(&block);
                }
                _ => {}
            }
        }

        for item in as_array(value, len)? {
            if rest.is_empty() {
                self.encode_element(member.ty, item, w, depth)?;
            } else {
                self.encode_dims(member, rest, item, parent, w, depth)?;
            }
        }
        Ok(())
    }

    fn encode_element<W: Write>(
        &self,
        ty: TypeRef,
        value: &Value,
        w: &mut WireWriter<W>,
        depth: usize,
    ) -> Result<()> {
        match ty {
            TypeRef::Record(id) => {
                if depth >= self.max_depth {
                    return Err(WireError::invariant(format!(
                        "records nested deeper than {}",
                        self.max_depth
                    )));
                }
                let nested = value.as_record().ok_or_else(|| mismatch("record", value))?;
                self.check_type(id, nested)?;
                self.encode_record(id, nested, w, depth + 1)
            }
            TypeRef::Primitive(kind) => write_value(w, kind, value),
        }
    }
}

fn write_value<W: Write>(w: &mut WireWriter<W>, kind: PrimitiveKind, value: &Value) -> Result<()> {
    match (kind, value) {
        (PrimitiveKind::Byte, Value::Byte(v)) => w.write_u8(*v),
        (PrimitiveKind::Boolean, Value::Boolean(v)) => w.write_bool(*v),
        (PrimitiveKind::Int8, Value::Int8(v)) => w.write_i8(*v),
        (PrimitiveKind::Int16, Value::Int16(v)) => w.write_i16(*v),
        (PrimitiveKind::Int32, Value::Int32(v)) => w.write_i32(*v),
        (PrimitiveKind::Int64, Value::Int64(v)) => w.write_i64(*v),
        (PrimitiveKind::Float32, Value::Float32(v)) => w.write_f32(*v),
        (PrimitiveKind::Float64, Value::Float64(v)) => w.write_f64(*v),
        (PrimitiveKind::String, Value::String(s)) => w.write_string(s),
        _ => Err(mismatch(kind.name(), value)),
    }
}

fn field<'v>(parent: &'v RecordValue, member: &Member) -> Result<&'v Value> {
    parent.get(&member.name).ok_or_else(|| {
        WireError::invariant(format!(
            "{} is missing member {}",
            parent.type_name, member.name
        ))
    })
}

fn dim_size(dim: &Dimension, parent: &RecordValue) -> Result<usize> {
    match dim {
        Dimension::Const(n) => Ok(*n as usize),
        Dimension::Var(name) => {
            let raw = parent.get(name).and_then(Value::as_i64).ok_or_else(|| {
                WireError::invariant(format!("length field {name} is missing or not an integer"))
            })?;
            usize::try_from(raw)
                .map_err(|_| WireError::invariant(format!("length field {name} is negative ({raw})")))
        }
    }
}

fn as_array(value: &Value, len: usize) -> Result<&[Value]> {
    let Value::Array(items) = value else {
        return Err(mismatch("array", value));
    };
    check_len(items.len(), len)?;
    Ok(items)
}

fn check_len(actual: usize, declared: usize) -> Result<()> {
    if actual != declared {
        return Err(WireError::invariant(format!(
            "array holds {actual} elements, dimension says {declared}"
        )));
    }
    Ok(())
}

fn mismatch(expected: &str, value: &Value) -> WireError {
    WireError::invariant(format!("expected {expected} value, got {}", value.kind_name()))
}

fn in_member(err: WireError, member: &Member) -> WireError {
    match err {
        WireError::InvariantViolation(reason) => {
            WireError::InvariantViolation(format!("{}: {reason}", member.name))
        }
        other => other,
    }
}
