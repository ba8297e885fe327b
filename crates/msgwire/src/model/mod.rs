// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type model: primitives, records, members, dimensions and constants.
//!
//! The front end describes records with the `*Def` types (or a JSON document
//! of the same shape); [`SchemaBuilder`] validates them and freezes the
//! result into a [`Schema`].

mod def;
mod member;
mod primitive;
mod record;
mod schema;

pub use def::{ConstantDef, DimensionDef, MemberDef, RecordDef, SchemaDef};
pub use member::{Dimension, Member, RecordId, TypeRef};
pub use primitive::PrimitiveKind;
pub use record::{ConstValue, Constant, QualifiedName, RecordType};
pub use schema::{Schema, SchemaBuilder};
