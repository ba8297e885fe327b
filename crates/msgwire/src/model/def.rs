// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Unvalidated type model, as handed over by a schema front end.
//!
//! These types deserialize from the JSON schema document and double as the
//! input of [`SchemaBuilder`](super::SchemaBuilder) for programmatic use.
//! Types are referenced by name; resolution happens at build time.

use super::record::ConstValue;
use serde::{Deserialize, Serialize};

/// Top-level schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDef {
    #[serde(default)]
    pub records: Vec<RecordDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDef {
    pub name: String,
    /// Derived from the declared shape when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_seed: Option<u64>,
    #[serde(default)]
    pub members: Vec<MemberDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantDef>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape_seed: None,
            members: Vec::new(),
            constants: Vec::new(),
        }
    }

    #[must_use]
    pub fn shape_seed(mut self, seed: u64) -> Self {
        self.shape_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    /// Shorthand for a scalar member.
    #[must_use]
    pub fn field(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.member(MemberDef::new(name, type_name))
    }

    #[must_use]
    pub fn constant(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: ConstValue,
    ) -> Self {
        self.constants.push(ConstantDef {
            name: name.into(),
            type_name: type_name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dims: Vec<DimensionDef>,
}

impl MemberDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            dims: Vec::new(),
        }
    }

    #[must_use]
    pub fn fixed(mut self, size: u32) -> Self {
        self.dims.push(DimensionDef::Const(size));
        self
    }

    #[must_use]
    pub fn sized_by(mut self, field: impl Into<String>) -> Self {
        self.dims.push(DimensionDef::Var(field.into()));
        self
    }
}

/// `{"const": 4}` or `{"var": "count"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionDef {
    Const(u32),
    Var(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: ConstValue,
}
