// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: byte layouts of property records.
//!
//! A descriptor tree is made of three node kinds:
//!
//! - **Simple**: a named scalar leaf with a kind, a byte size, an optional
//!   default value and an optional [`Enumeration`]
//! - **Array**: an element descriptor repeated `count` times
//! - **Struct**: ordered members at sequential offsets, or all at offset 0
//!   when built as a union
//!
//! Shapes are shared through `Arc`, so [`TypeDescriptor::alias`] renames a
//! node without copying it. Once the tree is assembled, [`TypeDescriptor::build`]
//! flattens it into a name -> (offset, leaf) cache used by `get`/`set`.
//!
//! # Example
//!
//! ```rust
//! use proptype::{TypeDescriptor, Variant, VariantKind};
//!
//! let hp = TypeDescriptor::simple("hp", VariantKind::Int, 4)?.with_default(100)?;
//! let slot = TypeDescriptor::simple("slot", VariantKind::Float, 4)?;
//! let slots = TypeDescriptor::array(slot, 3)?;
//! let mut actor = TypeDescriptor::structure("Actor", vec![hp, slots])?;
//! actor.build()?;
//!
//! let mut record = vec![0u8; actor.size()];
//! actor.to_defaults(&mut record)?;
//! assert_eq!(actor.get(&record, "hp")?, Variant::Int(100));
//!
//! actor.set(&mut record, "slot[2]", &Variant::Float(0.5))?;
//! assert_eq!(actor.get(&record, "slot[2]")?, Variant::Float(0.5));
//! # Ok::<(), proptype::Error>(())
//! ```

mod fields;
mod layout;

#[cfg(test)]
mod tests;

pub use fields::FieldDef;

use crate::enumeration::Enumeration;
use crate::error::{Error, Result};
use crate::variant::{Variant, VariantKind};
use fields::FieldCache;
use std::sync::Arc;

/// Scalar leaf shape.
#[derive(Debug)]
pub(crate) struct Simple {
    kind: VariantKind,
    size: usize,
    enumeration: Option<Arc<Enumeration>>,
}

/// Struct or union member.
#[derive(Debug, Clone)]
pub(crate) struct Member {
    offset: usize,
    descriptor: TypeDescriptor,
}

/// Node shape, shared between aliases.
#[derive(Debug)]
pub(crate) enum Node {
    Simple(Simple),
    Array {
        element: TypeDescriptor,
        count: usize,
    },
    Struct {
        members: Vec<Member>,
        unioned: bool,
        size: usize,
    },
}

/// A named node of a descriptor tree.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    node: Arc<Node>,
    /// Only meaningful on simple leaves.
    default: Option<Variant>,
    fields: Option<Arc<FieldCache>>,
}

impl TypeDescriptor {
    fn from_node(name: impl Into<String>, node: Node) -> Self {
        Self {
            name: name.into(),
            node: Arc::new(node),
            default: None,
            fields: None,
        }
    }

    /// Simple leaf of `kind` occupying `size` bytes.
    pub fn simple(name: impl Into<String>, kind: VariantKind, size: usize) -> Result<Self> {
        let name = name.into();
        layout::validate(&name, kind, size)?;
        Ok(Self::from_node(
            name,
            Node::Simple(Simple {
                kind,
                size,
                enumeration: None,
            }),
        ))
    }

    /// Simple leaf whose values are symbols of `enumeration`.
    pub fn enumerated(
        name: impl Into<String>,
        enumeration: Arc<Enumeration>,
        size: usize,
    ) -> Result<Self> {
        let name = name.into();
        let kind = enumeration.kind();
        layout::validate(&name, kind, size)?;
        Ok(Self::from_node(
            name,
            Node::Simple(Simple {
                kind,
                size,
                enumeration: Some(enumeration),
            }),
        ))
    }

    /// `count` consecutive copies of `element`, named after the element.
    pub fn array(element: TypeDescriptor, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::invalid_definition(&element.name, "array of zero elements"));
        }
        let name = element.name.clone();
        Ok(Self::from_node(name, Node::Array { element, count }))
    }

    /// Struct with members laid out one after the other.
    pub fn structure(name: impl Into<String>, members: Vec<TypeDescriptor>) -> Result<Self> {
        Self::compose(name.into(), members, false)
    }

    /// Struct whose members all start at offset 0.
    pub fn union(name: impl Into<String>, members: Vec<TypeDescriptor>) -> Result<Self> {
        Self::compose(name.into(), members, true)
    }

    fn compose(name: String, members: Vec<TypeDescriptor>, unioned: bool) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::invalid_definition(&name, "no members"));
        }

        let mut offset = 0;
        let mut size = 0;
        let members: Vec<Member> = members
            .into_iter()
            .map(|descriptor| {
                let member_size = descriptor.size();
                let member = Member {
                    offset: if unioned { 0 } else { offset },
                    descriptor,
                };
                if unioned {
                    size = size.max(member_size);
                } else {
                    offset += member_size;
                    size = offset;
                }
                member
            })
            .collect();

        let descriptor = Self::from_node(
            name,
            Node::Struct {
                members,
                unioned,
                size,
            },
        );
        // reject duplicate flattened names up front
        FieldCache::collect(&descriptor)?;
        Ok(descriptor)
    }

    /// Same shape under another name. The alias must be built on its own.
    pub fn alias(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node: Arc::clone(&self.node),
            default: self.default.clone(),
            fields: None,
        }
    }

    /// Set the default of a simple leaf. Allowed until [`build`](Self::build).
    pub fn set_default(&mut self, value: impl Into<Variant>) -> Result<()> {
        if self.is_built() {
            return Err(Error::AlreadyBuilt(self.name.clone()));
        }
        let Node::Simple(simple) = &*self.node else {
            return Err(Error::invalid_definition(&self.name, "only simple leaves have defaults"));
        };
        let value = value.into();
        let value = value.convert(simple.kind).map_err(|_| Error::TypeMismatch {
            expected: simple.kind,
            found: value.kind(),
        })?;
        self.default = Some(value);
        Ok(())
    }

    /// Builder-style [`set_default`](Self::set_default).
    pub fn with_default(mut self, value: impl Into<Variant>) -> Result<Self> {
        self.set_default(value)?;
        Ok(self)
    }

    /// Flatten the tree into the field cache. Required before field access.
    pub fn build(&mut self) -> Result<()> {
        let cache = FieldCache::collect(self)?;
        log::debug!("[descriptor] built '{}': {} fields, {} bytes", self.name, cache.len(), self.size());
        self.fields = Some(Arc::new(cache));
        Ok(())
    }

    /// Builder-style [`build`](Self::build).
    pub fn built(mut self) -> Result<Self> {
        self.build()?;
        Ok(self)
    }

    pub fn is_built(&self) -> bool {
        self.fields.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte size of the whole node.
    pub fn size(&self) -> usize {
        match &*self.node {
            Node::Simple(simple) => simple.size,
            Node::Array { element, count } => element.size() * count,
            Node::Struct { size, .. } => *size,
        }
    }

    /// Kind of a simple leaf, `Invalid` for arrays and structs.
    pub fn kind(&self) -> VariantKind {
        match &*self.node {
            Node::Simple(simple) => simple.kind,
            _ => VariantKind::Invalid,
        }
    }

    /// True for simple leaves.
    pub fn is_field(&self) -> bool {
        matches!(&*self.node, Node::Simple(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(&*self.node, Node::Array { .. })
    }

    /// True for structs and unions.
    pub fn is_struct(&self) -> bool {
        matches!(&*self.node, Node::Struct { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(&*self.node, Node::Struct { unioned: true, .. })
    }

    pub fn is_enumerated(&self) -> bool {
        self.enumeration().is_some()
    }

    pub fn enumeration(&self) -> Option<&Arc<Enumeration>> {
        match &*self.node {
            Node::Simple(simple) => simple.enumeration.as_ref(),
            _ => None,
        }
    }

    pub fn default_value(&self) -> Option<&Variant> {
        self.default.as_ref()
    }

    /// Element and count of an array.
    pub fn element(&self) -> Option<(&TypeDescriptor, usize)> {
        match &*self.node {
            Node::Array { element, count } => Some((element, *count)),
            _ => None,
        }
    }

    /// `(offset, member)` pairs of a struct, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (usize, &TypeDescriptor)> {
        let members: &[Member] = match &*self.node {
            Node::Struct { members, .. } => members,
            _ => &[],
        };
        members.iter().map(|m| (m.offset, &m.descriptor))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    fn cache(&self) -> Result<&FieldCache> {
        self.fields
            .as_deref()
            .ok_or_else(|| Error::NotBuilt(self.name.clone()))
    }

    /// Flattened leaves in layout order.
    pub fn fields(&self) -> Result<&[FieldDef]> {
        Ok(self.cache()?.all())
    }

    /// Offset and leaf of a flattened field.
    ///
    /// A simple root also answers to the empty name.
    pub fn field_def(&self, name: &str) -> Result<&FieldDef> {
        let cache = self.cache()?;
        if name.is_empty() && self.is_field() {
            return cache
                .all()
                .first()
                .ok_or_else(|| Error::FieldNotFound(name.to_string()));
        }
        cache
            .get(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    fn check_buffer(&self, len: usize) -> Result<()> {
        if len < self.size() {
            return Err(Error::SizeMismatch {
                expected: self.size(),
                found: len,
            });
        }
        Ok(())
    }

    /// Read a field out of a record buffer.
    pub fn get(&self, buffer: &[u8], name: &str) -> Result<Variant> {
        let def = self.field_def(name)?;
        self.check_buffer(buffer.len())?;
        layout::read(def.kind(), &buffer[def.range()])
    }

    /// Write a field into a record buffer, coercing `value` to the leaf kind.
    pub fn set(&self, buffer: &mut [u8], name: &str, value: &Variant) -> Result<()> {
        let def = self.field_def(name)?;
        self.check_buffer(buffer.len())?;
        let kind = def.kind();
        let value = value.convert(kind).map_err(|_| Error::TypeMismatch {
            expected: kind,
            found: value.kind(),
        })?;
        layout::write(kind, &mut buffer[def.range()], &value)
    }

    /// Zero the record and write every leaf default at its offset.
    pub fn to_defaults(&self, buffer: &mut [u8]) -> Result<()> {
        let cache = self.cache()?;
        self.check_buffer(buffer.len())?;
        buffer[..self.size()].fill(0);
        for def in cache.all() {
            if let Some(value) = def.leaf().default_value() {
                layout::write(def.kind(), &mut buffer[def.range()], value)?;
            }
        }
        Ok(())
    }

    /// A fresh record holding the defaults.
    pub fn default_record(&self) -> Result<Vec<u8>> {
        let mut record = vec![0u8; self.size()];
        self.to_defaults(&mut record)?;
        Ok(record)
    }
}
