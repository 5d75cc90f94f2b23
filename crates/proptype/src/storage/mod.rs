// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object-indexed record storages.
//!
//! Every storage keeps at most one record per [`ObjectId`] and writes records
//! in the legacy format:
//!
//! ```text
//! [u32 record length]              with_size = true only
//! <field 1><field 2>...<field N>   registration order
//! ```
//!
//! # Implementations
//!
//! - [`SingleFieldStorage`] -- one unnamed scalar per object
//! - [`StructStorage`] -- a host struct with registered field accessors
//! - [`DescribedStorage`] -- raw buffers laid out by a [`TypeDescriptor`]
//! - [`SymNameStorage`] -- unique names with reverse lookup
//!
//! [`TypeDescriptor`]: crate::TypeDescriptor

mod described;
mod record;
mod single;
mod structs;
mod symname;

pub use described::DescribedStorage;
pub use single::{
    BoolStorage, FieldValue, FloatStorage, IntStorage, RotationStorage, SingleFieldStorage,
    StringStorage, UIntStorage, VectorStorage,
};
pub use structs::{StructStorage, StructStorageBuilder};
pub use symname::SymNameStorage;

use crate::enumeration::Enumeration;
use crate::error::Result;
use crate::variant::{Variant, VariantKind};
use crate::ObjectId;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::sync::Arc;

/// Field values keyed by field name, for [`DataStorage::create_with_values`].
pub type VariantMap = BTreeMap<String, Variant>;

/// Single-pass iterator over stored object ids, ascending.
pub type ObjectIds<'a> = Box<dyn Iterator<Item = ObjectId> + 'a>;

/// Schema description of one stored field, for editors and other tooling.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDesc {
    pub name: String,
    pub label: String,
    /// Stored bytes, `-1` for variable-length fields.
    pub size: i32,
    pub kind: VariantKind,
    #[serde(serialize_with = "enumeration_name")]
    pub enumeration: Option<Arc<Enumeration>>,
}

impl FieldDesc {
    pub(crate) fn new(name: &str, kind: VariantKind, size: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            size: size.map_or(-1, |s| i32::try_from(s).unwrap_or(i32::MAX)),
            kind,
            enumeration: None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.size < 0
    }
}

fn enumeration_name<S: Serializer>(
    enumeration: &Option<Arc<Enumeration>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match enumeration {
        Some(e) => serializer.serialize_some(e.name()),
        None => serializer.serialize_none(),
    }
}

/// Object-id indexed record storage.
///
/// Lifecycle calls report normal failures as `false`: creating an id that
/// already holds data, cloning from a missing id, writing a missing id, or
/// reading a record that had to be skipped.
pub trait DataStorage {
    /// Create a defaulted record. `false` if `id` already has data.
    fn create(&mut self, id: ObjectId) -> bool;

    /// Create a record, then apply `values` by field name.
    ///
    /// If a value is rejected the new record is destroyed again.
    fn create_with_values(&mut self, id: ObjectId, values: &VariantMap) -> Result<bool> {
        if !self.create(id) {
            return Ok(false);
        }
        for (field, value) in values {
            if let Err(e) = self.set_field(id, field, value) {
                self.destroy(id);
                return Err(e);
            }
        }
        Ok(true)
    }

    /// Create a record and set its unnamed field.
    fn create_with_value(&mut self, id: ObjectId, value: &Variant) -> Result<bool> {
        if !self.create(id) {
            return Ok(false);
        }
        if let Err(e) = self.set_field(id, "", value) {
            self.destroy(id);
            return Err(e);
        }
        Ok(true)
    }

    /// Remove a record. `false` if there was none.
    fn destroy(&mut self, id: ObjectId) -> bool;

    fn has(&self, id: ObjectId) -> bool;

    /// Deep copy `src` into `dst`. `false` if `src` is absent or `dst` present.
    fn clone_data(&mut self, src: ObjectId, dst: ObjectId) -> bool;

    /// Field value, `None` when `id` has no data.
    fn get_field(&self, id: ObjectId, field: &str) -> Result<Option<Variant>>;

    /// Set a field, coercing `value`. `false` when `id` has no data.
    fn set_field(&mut self, id: ObjectId, field: &str, value: &Variant) -> Result<bool>;

    /// Write the record of `id`. `false` (nothing written) when absent.
    fn write_to(&self, out: &mut dyn Write, id: ObjectId, with_size: bool) -> Result<bool>;

    /// Read one record into `id`.
    ///
    /// Returns `false` when the record was consumed but skipped: `id` already
    /// has data, or the stored length disagrees with the schema. The stream
    /// is left at the start of the next record in both cases.
    fn read_from(&mut self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<bool>;

    fn clear(&mut self);

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn stored_objects(&self) -> ObjectIds<'_>;

    /// Pre-size for ids in `min..=max`. Map-backed storages ignore it.
    fn grow(&mut self, _min: ObjectId, _max: ObjectId) {}

    /// Stored fields, in on-disk order.
    fn field_desc(&self) -> &[FieldDesc];

    /// Bytes of one record, `None` when records vary in size.
    fn data_size(&self) -> Option<usize>;
}
