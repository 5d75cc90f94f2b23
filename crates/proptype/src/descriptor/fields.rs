// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Flattened field cache.
//!
//! Naming of flattened leaves:
//!
//! | Position | Name |
//! |----------|------|
//! | simple member | `field` |
//! | member of a nested struct | `member.field` |
//! | array of simple leaves | `name[i]` |
//! | array of structs | `name[i].field` |
//!
//! Array members keep their own names without a prefix.

use super::{Node, TypeDescriptor};
use crate::error::{Error, Result};
use crate::variant::VariantKind;
use std::collections::HashMap;
use std::ops::Range;

/// A flattened leaf: its absolute offset and simple descriptor.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    offset: usize,
    leaf: TypeDescriptor,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.leaf.size()
    }

    pub fn kind(&self) -> VariantKind {
        self.leaf.kind()
    }

    /// The simple descriptor of this leaf.
    pub fn leaf(&self) -> &TypeDescriptor {
        &self.leaf
    }

    pub(crate) fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.leaf.size()
    }
}

#[derive(Debug, Default)]
pub(crate) struct FieldCache {
    order: Vec<FieldDef>,
    index: HashMap<String, usize>,
}

impl FieldCache {
    /// Flatten `root`, failing on duplicate names.
    pub(crate) fn collect(root: &TypeDescriptor) -> Result<Self> {
        let mut cache = Self::default();
        for def in flatten(root, 0) {
            if cache.index.contains_key(&def.name) {
                return Err(Error::invalid_definition(
                    root.name(),
                    format!("duplicate field '{}'", def.name),
                ));
            }
            cache.index.insert(def.name.clone(), cache.order.len());
            cache.order.push(def);
        }
        Ok(cache)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&FieldDef> {
        self.index.get(name).map(|&i| &self.order[i])
    }

    pub(crate) fn all(&self) -> &[FieldDef] {
        &self.order
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}

/// Leaves of `descriptor` placed at `base`, named relative to it.
fn flatten(descriptor: &TypeDescriptor, base: usize) -> Vec<FieldDef> {
    match descriptor.node() {
        Node::Simple(_) => vec![FieldDef {
            name: descriptor.name().to_string(),
            offset: base,
            leaf: descriptor.clone(),
        }],
        Node::Array { element, count } => {
            let stride = element.size();
            (0..*count)
                .flat_map(|i| {
                    let offset = base + i * stride;
                    let slot = format!("{}[{}]", descriptor.name(), i);
                    if element.is_field() {
                        vec![FieldDef {
                            name: slot,
                            offset,
                            leaf: element.clone(),
                        }]
                    } else {
                        prefixed(&slot, flatten(element, offset))
                    }
                })
                .collect()
        }
        Node::Struct { members, .. } => members
            .iter()
            .flat_map(|member| {
                let defs = flatten(&member.descriptor, base + member.offset);
                if member.descriptor.is_struct() {
                    prefixed(member.descriptor.name(), defs)
                } else {
                    defs
                }
            })
            .collect(),
    }
}

fn prefixed(prefix: &str, defs: Vec<FieldDef>) -> Vec<FieldDef> {
    defs.into_iter()
        .map(|mut def| {
            def.name = format!("{}.{}", prefix, def.name);
            def
        })
        .collect()
}
