// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Unique symbolic object names.

use super::single::StringStorage;
use super::{DataStorage, FieldDesc, ObjectIds};
use crate::config::StorageConfig;
use crate::error::Result;
use crate::variant::Variant;
use crate::ObjectId;
use std::collections::HashMap;
use std::io::{Read, Write};

/// String storage whose non-empty values are unique across objects.
///
/// Keeps a reverse `name -> id` index. The empty name means "unnamed" and is
/// never indexed, so any number of objects may be created without a name.
#[derive(Debug, Clone, Default)]
pub struct SymNameStorage {
    names: StringStorage,
    ids: HashMap<String, ObjectId>,
}

impl SymNameStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.names = self.names.with_config(config);
        self
    }

    /// Object carrying `name`.
    pub fn object_named(&self, name: &str) -> Option<ObjectId> {
        self.ids.get(name).copied()
    }

    pub fn name_used(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Name of `id`, empty when unnamed.
    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// True when `name` may be given to `id`.
    fn available(&self, name: &str, id: ObjectId) -> bool {
        name.is_empty() || self.ids.get(name).map_or(true, |&owner| owner == id)
    }

    fn unindex(&mut self, id: ObjectId) {
        if let Some(old) = self.names.get(id) {
            if !old.is_empty() {
                self.ids.remove(old.as_str());
            }
        }
    }
}

impl DataStorage for SymNameStorage {
    fn create(&mut self, id: ObjectId) -> bool {
        self.names.create(id)
    }

    fn create_with_value(&mut self, id: ObjectId, value: &Variant) -> Result<bool> {
        let name = StringStorage::coerce(value)?;
        if self.names.has(id) {
            return Ok(false);
        }
        if !self.available(&name, id) {
            log::warn!("[symname] name '{}' already used, object {} not created", name, id);
            return Ok(false);
        }
        self.names.insert(id, name.clone());
        if !name.is_empty() {
            self.ids.insert(name, id);
        }
        Ok(true)
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        self.unindex(id);
        self.names.destroy(id)
    }

    fn has(&self, id: ObjectId) -> bool {
        self.names.has(id)
    }

    fn clone_data(&mut self, src: ObjectId, dst: ObjectId) -> bool {
        log::warn!(
            "[symname] cannot clone object {} into {}: names must stay unique",
            src,
            dst
        );
        false
    }

    fn get_field(&self, id: ObjectId, field: &str) -> Result<Option<Variant>> {
        self.names.get_field(id, field)
    }

    fn set_field(&mut self, id: ObjectId, field: &str, value: &Variant) -> Result<bool> {
        if !field.is_empty() {
            return self.names.set_field(id, field, value);
        }
        let name = StringStorage::coerce(value)?;
        if !self.names.has(id) {
            return Ok(false);
        }
        if !self.available(&name, id) {
            log::warn!("[symname] name '{}' already used, object {} keeps its name", name, id);
            return Ok(false);
        }
        self.unindex(id);
        if !name.is_empty() {
            self.ids.insert(name.clone(), id);
        }
        if let Some(slot) = self.names.get_mut(id) {
            *slot = name;
        }
        Ok(true)
    }

    fn write_to(&self, out: &mut dyn Write, id: ObjectId, with_size: bool) -> Result<bool> {
        self.names.write_to(out, id, with_size)
    }

    fn read_from(&mut self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<bool> {
        if self.names.has(id) {
            self.names.discard_value(input, id, with_size)?;
            return Ok(false);
        }
        let Some(name) = self.names.read_value(input, id, with_size)? else {
            return Ok(false);
        };
        if !self.available(&name, id) {
            log::warn!("[symname] stored name '{}' of object {} already used, skipping", name, id);
            return Ok(false);
        }
        if !name.is_empty() {
            self.ids.insert(name.clone(), id);
        }
        self.names.insert(id, name);
        Ok(true)
    }

    fn clear(&mut self) {
        self.names.clear();
        self.ids.clear();
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    fn stored_objects(&self) -> ObjectIds<'_> {
        self.names.stored_objects()
    }

    fn field_desc(&self) -> &[FieldDesc] {
        self.names.field_desc()
    }

    fn data_size(&self) -> Option<usize> {
        None
    }
}
