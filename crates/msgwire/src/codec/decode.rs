// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic decoder: message body to [`RecordValue`].

use super::plan::Step;
use super::primitives::{unpack_value, WireReader};
use crate::error::{Result, WireError};
use crate::model::{Dimension, Member, PrimitiveKind, RecordId, Schema, TypeRef};
use crate::options::CodecOptions;
use crate::value::{RecordValue, Value};
use std::collections::HashMap;
use std::io::Read;

/// Upper bound on up-front allocation for element-wise arrays; the rest
/// grows as elements actually arrive.
const PREALLOC_LIMIT: usize = 1024;

pub(crate) struct Decoder<'s> {
    schema: &'s Schema,
    coalesce: bool,
    max_depth: usize,
}

impl<'s> Decoder<'s> {
    pub(crate) fn new(schema: &'s Schema, options: &CodecOptions) -> Self {
        Self {
            schema,
            coalesce: options.coalesce_primitive_runs,
            max_depth: options.max_depth,
        }
    }

    pub(crate) fn decode_body<R: Read>(
        &self,
        id: RecordId,
        r: &mut WireReader<R>,
    ) -> Result<RecordValue> {
        self.decode_record(id, r, 0)
    }

    /// `depth` counts the records enclosing this one.
    fn decode_record<R: Read>(
        &self,
        id: RecordId,
        r: &mut WireReader<R>,
        depth: usize,
    ) -> Result<RecordValue> {
        let record = self.schema.record(id);
        let members = record.members();
        let mut fields = HashMap::with_capacity(members.len());

        if self.coalesce {
            for step in record.plan.steps() {
                match step {
                    Step::Run { fields: run, width } => {
                        let mut block = vec![0u8; *width];
                        r.read_raw(&mut block)?;
                        let mut pos = 0;
                        for (idx, kind) in run {
                            fields.insert(members[*idx].name.clone(), unpack_value(*kind, &block[pos..]));
                            pos += kind.width().unwrap_or(0);
                        }
                    }
                    Step::Member(idx) => {
                        let member = &members[*idx];
                        let value = self.decode_dims(member, &member.dimensions, &fields, r, depth)?;
                        fields.insert(member.name.clone(), value);
                    }
                }
            }
        } else {
            for member in members {
                let value = self.decode_dims(member, &member.dimensions, &fields, r, depth)?;
                fields.insert(member.name.clone(), value);
            }
        }

        Ok(RecordValue {
            type_name: record.name().to_string(),
            fields,
        })
    }

    fn decode_dims<R: Read>(
        &self,
        member: &Member,
        dims: &[Dimension],
        decoded: &HashMap<String, Value>,
        r: &mut WireReader<R>,
        depth: usize,
    ) -> Result<Value> {
        let Some((dim, rest)) = dims.split_first() else {
            return self.decode_element(member.ty, r, depth);
        };
        let len = match dim {
            Dimension::Const(n) => *n as usize,
            Dimension::Var(name) => {
                let raw = decoded.get(name).and_then(Value::as_i64).ok_or_else(|| {
                    WireError::invariant(format!(
                        "{}: length field {name} was not decoded",
                        member.name
                    ))
                })?;
                r.length_from(raw)?
            }
        };

        if rest.is_empty() {
            match member.ty {
                TypeRef::Primitive(PrimitiveKind::Byte) => return Ok(Value::Bytes(r.read_bytes(len)?)),
                TypeRef::Primitive(kind) if kind.is_fixed_width() => {
                    let width = kind.width().unwrap_or(1);
                    let block = r.read_block_bytes(len, width)?;
                    return Ok(Value::Array(
                        block
                            .chunks_exact(width)
                            .map(|chunk| unpack_value(kind, chunk))
                            .collect(),
                    ));
                }
                _ => {}
            }
        }

        let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            items.push(if rest.is_empty() {
                self.decode_element(member.ty, r, depth)?
            } else {
                self.decode_dims(member, rest, decoded, r, depth)?
            });
        }
        Ok(Value::Array(items))
    }

    fn decode_element<R: Read>(
        &self,
        ty: TypeRef,
        r: &mut WireReader<R>,
        depth: usize,
    ) -> Result<Value> {
        match ty {
            TypeRef::Record(id) => {
                if depth >= self.max_depth {
                    return Err(WireError::malformed(
                        r.offset(),
                        format!("records nested deeper than {}", self.max_depth),
                    ));
                }
                Ok(Value::Record(self.decode_record(id, r, depth + 1)?))
            }
            TypeRef::Primitive(kind) => read_value(r, kind),
        }
    }
}

fn read_value<R: Read>(r: &mut WireReader<R>, kind: PrimitiveKind) -> Result<Value> {
    Ok(match kind {
        PrimitiveKind::Byte => Value::Byte(r.read_u8()?),
        PrimitiveKind::Boolean => Value::Boolean(r.read_bool()?),
        PrimitiveKind::Int8 => Value::Int8(r.read_i8()?),
        PrimitiveKind::Int16 => Value::Int16(r.read_i16()?),
        PrimitiveKind::Int32 => Value::Int32(r.read_i32()?),
        PrimitiveKind::Int64 => Value::Int64(r.read_i64()?),
        PrimitiveKind::Float32 => Value::Float32(r.read_f32()?),
        PrimitiveKind::Float64 => Value::Float64(r.read_f64()?),
        PrimitiveKind::String => Value::String(r.read_string()?),
    })
}
