// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-record serialization plan.
//!
//! Built once when the schema is frozen. Consecutive scalar members of
//! fixed-width primitive type collapse into a single [`Step::Run`], which
//! the codec moves with one buffer write or read. Every other member is a
//! [`Step::Member`] handled on its own.

use crate::model::{Member, PrimitiveKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// Adjacent packable scalars: member index and kind, plus total bytes.
    Run {
        fields: Vec<(usize, PrimitiveKind)>,
        width: usize,
    },
    /// Strings, arrays and nested records.
    Member(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub(crate) fn build(members: &[Member]) -> Self {
        let mut steps = Vec::new();
        let mut fields = Vec::new();
        let mut width = 0;

        for (idx, member) in members.iter().enumerate() {
            match member.ty.primitive().filter(|_| member.is_packable_scalar()) {
                Some(kind) => {
                    fields.push((idx, kind));
                    width += kind.width().unwrap_or(0);
                }
                None => {
                    flush(&mut steps, &mut fields, &mut width);
                    steps.push(Step::Member(idx));
                }
            }
        }
        flush(&mut steps, &mut fields, &mut width);

        Self { steps }
    }

    pub(crate) fn steps(&self) -> &[Step] {
        &self.steps
    }
}

fn flush(steps: &mut Vec<Step>, fields: &mut Vec<(usize, PrimitiveKind)>, width: &mut usize) {
    if !fields.is_empty() {
        steps.push(Step::Run {
            fields: std::mem::take(fields),
            width: std::mem::take(width),
        });
    }
}
