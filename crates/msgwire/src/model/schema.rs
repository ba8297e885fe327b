// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validated, immutable type model.
//!
//! A [`Schema`] is an arena of [`RecordType`]s addressed by [`RecordId`].
//! Record references are indices, so self- and mutually-recursive records
//! need no owned cycles. Once built the schema is read-only and can be
//! shared across threads; the only interior mutability is the per-record
//! fingerprint memo.

use super::def::{ConstantDef, DimensionDef, MemberDef, RecordDef, SchemaDef};
use super::member::{Dimension, Member, RecordId, TypeRef};
use super::primitive::PrimitiveKind;
use super::record::{ConstValue, Constant, QualifiedName, RecordType};
use crate::codec::plan::Plan;
use crate::codec::RecordCodec;
use crate::error::{Result, SchemaError, WireError};
use crate::fingerprint;
use crate::value::{self, RecordValue};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Schema {
    records: Vec<RecordType>,
    by_name: HashMap<String, RecordId>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn from_def(def: SchemaDef) -> Result<Self, SchemaError> {
        SchemaBuilder { records: def.records }.build()
    }

    pub fn from_json(doc: &str) -> Result<Self, SchemaError> {
        let def: SchemaDef = serde_json::from_str(doc)?;
        Self::from_def(def)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let doc = fs::read_to_string(path)?;
        Self::from_json(&doc)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<RecordId> {
        self.by_name.get(name).copied()
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this schema.
    pub fn record(&self, id: RecordId) -> &RecordType {
        &self.records[id.index()]
    }

    pub fn record_by_name(&self, name: &str) -> Option<&RecordType> {
        self.lookup(name).map(|id| self.record(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> {
        (0..self.records.len() as u32).map(RecordId)
    }

    pub fn records(&self) -> impl Iterator<Item = (RecordId, &RecordType)> {
        self.ids().zip(self.records.iter())
    }

    /// Packed fingerprint of `id`, computed on first access.
    pub fn fingerprint(&self, id: RecordId) -> u64 {
        *self
            .record(id)
            .fingerprint
            .get_or_init(|| fingerprint::compute(self, id, &[]))
    }

    /// Fingerprint as it appears in a message header.
    pub fn packed_fingerprint(&self, id: RecordId) -> [u8; 8] {
        self.fingerprint(id).to_be_bytes()
    }

    pub fn dependencies_of(&self, id: RecordId) -> BTreeSet<String> {
        crate::deps::dependencies_of(self, id)
    }

    /// Record ids grouped by package name (empty string for the root package).
    pub fn records_by_package(&self) -> BTreeMap<String, Vec<RecordId>> {
        let mut packages: BTreeMap<String, Vec<RecordId>> = BTreeMap::new();
        for (id, record) in self.records() {
            packages
                .entry(record.name.package().to_string())
                .or_default()
                .push(id);
        }
        packages
    }

    pub fn constant(&self, id: RecordId, name: &str) -> Option<ConstValue> {
        self.record(id).constant(name).map(|c| c.value)
    }

    /// Zero-initialized instance of `id`.
    pub fn default_value(&self, id: RecordId) -> RecordValue {
        value::default_record(self, id)
    }

    pub fn codec(&self, name: &str) -> Result<RecordCodec<'_>> {
        let id = self
            .lookup(name)
            .ok_or_else(|| WireError::UnknownRecord(name.to_string()))?;
        Ok(RecordCodec::new(self, id))
    }

    pub fn codec_for(&self, id: RecordId) -> RecordCodec<'_> {
        RecordCodec::new(self, id)
    }
}

/// Collects record definitions and validates them into a [`Schema`].
#[derive(Debug, Default, Clone)]
pub struct SchemaBuilder {
    records: Vec<RecordDef>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn record(mut self, record: RecordDef) -> Self {
        self.records.push(record);
        self
    }

    pub fn add(&mut self, record: RecordDef) -> &mut Self {
        self.records.push(record);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut by_name = HashMap::with_capacity(self.records.len());
        for (idx, def) in self.records.iter().enumerate() {
            if by_name
                .insert(def.name.clone(), RecordId(idx as u32))
                .is_some()
            {
                return Err(SchemaError::DuplicateRecord(def.name.clone()));
            }
        }

        let mut records = Vec::with_capacity(self.records.len());
        for def in &self.records {
            let members = resolve_members(def, &by_name)?;
            let constants = resolve_constants(def)?;
            let shape_seed = def
                .shape_seed
                .unwrap_or_else(|| fingerprint::derive_shape_seed(def));
            let plan = Plan::build(&members);
            log::trace!(
                "[schema] {} -> {} members, {} plan steps, seed {:#018x}",
                def.name,
                members.len(),
                plan.steps().len(),
                shape_seed
            );
            records.push(RecordType {
                name: QualifiedName::new(def.name.clone()),
                members,
                constants,
                shape_seed,
                plan,
                fingerprint: OnceLock::new(),
            });
        }

        check_finite(&records)?;
        log::debug!("[schema] built {} record types", records.len());
        Ok(Schema { records, by_name })
    }
}

fn resolve_members(
    def: &RecordDef,
    by_name: &HashMap<String, RecordId>,
) -> Result<Vec<Member>, SchemaError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(def.members.len());
    let mut members: Vec<Member> = Vec::with_capacity(def.members.len());

    for member in &def.members {
        if !seen.insert(member.name.as_str()) {
            return Err(SchemaError::DuplicateMember {
                record: def.name.clone(),
                member: member.name.clone(),
            });
        }

        let ty = resolve_type(def, member, by_name)?;
        let mut dimensions = Vec::with_capacity(member.dims.len());
        for dim in &member.dims {
            dimensions.push(match dim {
                DimensionDef::Const(n) => Dimension::Const(*n),
                DimensionDef::Var(field) => {
                    check_length_field(def, member, field, &members)?;
                    Dimension::Var(field.clone())
                }
            });
        }

        members.push(Member {
            name: member.name.clone(),
            ty,
            dimensions,
        });
    }
    Ok(members)
}

/// Records reachable from `record` through members that always hold at
/// least one element.
fn mandatory_children(record: &RecordType) -> impl Iterator<Item = RecordId> + '_ {
    record.members.iter().filter_map(|m| {
        let always_present = m
            .dimensions
            .iter()
            .all(|d| matches!(d, Dimension::Const(n) if *n > 0));
        m.ty.record().filter(|_| always_present)
    })
}

fn check_finite(records: &[RecordType]) -> Result<(), SchemaError> {
    for (idx, record) in records.iter().enumerate() {
        let start = RecordId(idx as u32);
        let mut seen = HashSet::new();
        let mut stack: Vec<RecordId> = mandatory_children(record).collect();
        while let Some(id) = stack.pop() {
            if id == start {
                return Err(SchemaError::InfiniteRecord(record.name.to_string()));
            }
            if seen.insert(id) {
                stack.extend(mandatory_children(&records[id.index()]));
            }
        }
    }
    Ok(())
}

fn resolve_type(
    def: &RecordDef,
    member: &MemberDef,
    by_name: &HashMap<String, RecordId>,
) -> Result<TypeRef, SchemaError> {
    if let Some(kind) = PrimitiveKind::from_name(&member.type_name) {
        return Ok(TypeRef::Primitive(kind));
    }
    by_name
        .get(&member.type_name)
        .map(|id| TypeRef::Record(*id))
        .ok_or_else(|| SchemaError::UnknownType {
            record: def.name.clone(),
            member: member.name.clone(),
            type_name: member.type_name.clone(),
        })
}

/// `earlier` holds only the members declared before `member`.
fn check_length_field(
    def: &RecordDef,
    member: &MemberDef,
    field: &str,
    earlier: &[Member],
) -> Result<(), SchemaError> {
    let err_ctx = || (def.name.clone(), member.name.clone(), field.to_string());

    let Some(length) = earlier.iter().find(|m| m.name == field) else {
        let (record, member, field) = err_ctx();
        return if def.members.iter().any(|m| m.name == field) {
            Err(SchemaError::LengthFieldNotEarlier {
                record,
                member,
                field,
            })
        } else {
            Err(SchemaError::LengthFieldNotFound {
                record,
                member,
                field,
            })
        };
    };

    if !length.is_scalar() {
        let (record, member, field) = err_ctx();
        return Err(SchemaError::LengthFieldNotScalar {
            record,
            member,
            field,
        });
    }
    if !length.ty.primitive().is_some_and(PrimitiveKind::is_integer) {
        let (record, member, field) = err_ctx();
        return Err(SchemaError::LengthFieldNotInteger {
            record,
            member,
            field,
        });
    }
    Ok(())
}

fn resolve_constants(def: &RecordDef) -> Result<Vec<Constant>, SchemaError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(def.constants.len());
    def.constants
        .iter()
        .map(|c| {
            if !seen.insert(c.name.as_str()) {
                return Err(invalid_constant(def, c, "declared more than once"));
            }
            resolve_constant(def, c)
        })
        .collect()
}

fn resolve_constant(def: &RecordDef, c: &ConstantDef) -> Result<Constant, SchemaError> {
    let kind = PrimitiveKind::from_name(&c.type_name)
        .filter(|k| k.is_numeric())
        .ok_or_else(|| {
            invalid_constant(def, c, &format!("type {} is not numeric", c.type_name))
        })?;

    let value = match (kind, c.value) {
        (PrimitiveKind::Float32 | PrimitiveKind::Float64, v) => ConstValue::Float(v.as_f64()),
        (_, ConstValue::Float(_)) => {
            return Err(invalid_constant(def, c, "integer constant has a float literal"));
        }
        (_, ConstValue::Int(v)) => {
            let (min, max) = integer_range(kind);
            if v < min || v > max {
                return Err(invalid_constant(
                    def,
                    c,
                    &format!("{v} does not fit in {kind}"),
                ));
            }
            ConstValue::Int(v)
        }
    };

    Ok(Constant {
        name: c.name.clone(),
        kind,
        value,
    })
}

fn integer_range(kind: PrimitiveKind) -> (i64, i64) {
    match kind {
        PrimitiveKind::Byte => (0, i64::from(u8::MAX)),
        PrimitiveKind::Int8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
        PrimitiveKind::Int16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
        PrimitiveKind::Int32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
        _ => (i64::MIN, i64::MAX),
    }
}

fn invalid_constant(def: &RecordDef, c: &ConstantDef, reason: &str) -> SchemaError {
    SchemaError::InvalidConstant {
        record: def.name.clone(),
        constant: c.name.clone(),
        reason: reason.to_string(),
    }
}
