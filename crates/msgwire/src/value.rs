// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic record instances.
//!
//! A [`RecordValue`] names its record type and maps member names to
//! [`Value`]s. Arrays nest one [`Value::Array`] per dimension; the last
//! dimension of a `byte` member is a flat [`Value::Bytes`] blob.

use crate::model::{Dimension, Member, PrimitiveKind, RecordId, Schema, TypeRef};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(u8),
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Record(RecordValue),
}

impl Value {
    /// Integer payload of an integer scalar, used for length fields.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Int8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Short variant label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Byte(_) => "byte",
            Self::Boolean(_) => "boolean",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }

    /// Zero value of a primitive kind.
    pub fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Byte => Self::Byte(0),
            PrimitiveKind::Boolean => Self::Boolean(false),
            PrimitiveKind::Int8 => Self::Int8(0),
            PrimitiveKind::Int16 => Self::Int16(0),
            PrimitiveKind::Int32 => Self::Int32(0),
            PrimitiveKind::Int64 => Self::Int64(0),
            PrimitiveKind::Float32 => Self::Float32(0.0),
            PrimitiveKind::Float64 => Self::Float64(0.0),
            PrimitiveKind::String => Self::String(String::new()),
        }
    }

    /// Integer value of `kind` for a length field; `None` if it does not fit.
    pub fn integer(kind: PrimitiveKind, v: i64) -> Option<Self> {
        let value = match kind {
            PrimitiveKind::Byte => Self::Byte(u8::try_from(v).ok()?),
            PrimitiveKind::Int8 => Self::Int8(i8::try_from(v).ok()?),
            PrimitiveKind::Int16 => Self::Int16(i16::try_from(v).ok()?),
            PrimitiveKind::Int32 => Self::Int32(i32::try_from(v).ok()?),
            PrimitiveKind::Int64 => Self::Int64(v),
            _ => return None,
        };
        Some(value)
    }
}

impl From<RecordValue> for Value {
    fn from(value: RecordValue) -> Self {
        Self::Record(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar!(
    u8 => Byte,
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
);

/// Instance of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub type_name: String,
    pub fields: HashMap<String, Value>,
}

impl RecordValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

pub(crate) fn default_record(schema: &Schema, id: RecordId) -> RecordValue {
    let record = schema.record(id);
    let fields = record
        .members()
        .iter()
        .map(|m| (m.name.clone(), default_member(schema, m, &m.dimensions)))
        .collect();
    RecordValue {
        type_name: record.name().to_string(),
        fields,
    }
}

fn default_member(schema: &Schema, member: &Member, dims: &[Dimension]) -> Value {
    let Some((dim, rest)) = dims.split_first() else {
        return match member.ty {
            TypeRef::Primitive(kind) => Value::zero(kind),
            TypeRef::Record(id) => Value::Record(default_record(schema, id)),
        };
    };

    // Length fields default to 0, so variable dimensions start empty.
    let len = match dim {
        Dimension::Const(n) => *n as usize,
        Dimension::Var(_) => 0,
    };
    if rest.is_empty() && member.ty == TypeRef::Primitive(PrimitiveKind::Byte) {
        return Value::Bytes(vec![0; len]);
    }
    Value::Array((0..len).map(|_| default_member(schema, member, rest)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberDef, RecordDef};

    #[test]
    fn default_instance_shapes() {
        let schema = Schema::builder()
            .record(RecordDef::new("Point").field("x", "int32"))
            .record(
                RecordDef::new("Frame")
                    .field("n", "int16")
                    .field("name", "string")
                    .field("origin", "Point")
                    .member(MemberDef::new("grid", "double").fixed(2).fixed(3))
                    .member(MemberDef::new("raw", "byte").fixed(4))
                    .member(MemberDef::new("rows", "byte").fixed(2).sized_by("n"))
                    .member(MemberDef::new("pts", "Point").sized_by("n")),
            )
            .build()
            .unwrap();
        let frame = schema.default_value(schema.lookup("Frame").unwrap());

        assert_eq!(frame.type_name, "Frame");
        assert_eq!(frame.get("n"), Some(&Value::Int16(0)));
        assert_eq!(frame.get("name"), Some(&Value::String(String::new())));
        assert_eq!(
            frame.get("origin"),
            Some(&Value::Record(RecordValue::new("Point").with("x", 0i32)))
        );
        assert_eq!(
            frame.get("grid"),
            Some(&Value::Array(vec![
                Value::Array(vec![Value::Float64(0.0); 3]),
                Value::Array(vec![Value::Float64(0.0); 3]),
            ]))
        );
        assert_eq!(frame.get("raw"), Some(&Value::Bytes(vec![0; 4])));
        assert_eq!(
            frame.get("rows"),
            Some(&Value::Array(vec![Value::Bytes(vec![]), Value::Bytes(vec![])]))
        );
        assert_eq!(frame.get("pts"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn integer_conversion_checks_range() {
        assert_eq!(Value::integer(PrimitiveKind::Byte, 255), Some(Value::Byte(255)));
        assert_eq!(Value::integer(PrimitiveKind::Byte, 256), None);
        assert_eq!(Value::integer(PrimitiveKind::Int8, -128), Some(Value::Int8(-128)));
        assert_eq!(Value::integer(PrimitiveKind::String, 1), None);
        assert_eq!(Value::Int16(-3).as_i64(), Some(-3));
        assert_eq!(Value::Boolean(true).as_i64(), None);
    }
}
