// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host struct storage with registered field accessors.
//!
//! Each registered field captures a getter, a mutable getter and a
//! [`Serializer`] bound to the field's type, erased behind [`FieldOps`].
//! Registration order is the on-disk field order.
//!
//! ```rust
//! use proptype::storage::{DataStorage, StructStorage};
//! use proptype::serializer::FixedStringSerializer;
//! use proptype::Variant;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Door {
//!     locked: bool,
//!     key: String,
//! }
//!
//! let mut doors = StructStorage::<Door>::builder()
//!     .field("locked", |d: &Door| &d.locked, |d: &mut Door| &mut d.locked)
//!     .label("Locked")
//!     .field_with("key", |d: &Door| &d.key, |d: &mut Door| &mut d.key, FixedStringSerializer::<16>)
//!     .build()?;
//!
//! doors.create(4);
//! doors.set_field(4, "locked", &Variant::from("yes"))?;
//! assert_eq!(doors.record(4).map(|d| d.locked), Some(true));
//! assert_eq!(doors.data_size(), Some(20));
//! # Ok::<(), proptype::Error>(())
//! ```

use super::record::{fixed_total, write_record, RecordReader};
use super::{DataStorage, FieldDesc, ObjectIds};
use crate::config::StorageConfig;
use crate::enumeration::Enumeration;
use crate::error::{Error, Result};
use crate::serializer::{Serializable, Serializer};
use crate::variant::{FromVariant, Variant, VariantKind};
use crate::ObjectId;
use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};
use std::sync::Arc;

/// Type-erased operations on one field of `T`.
trait FieldOps<T> {
    fn get(&self, record: &T) -> Variant;
    fn set(&self, record: &mut T, value: &Variant) -> Result<()>;
    fn write(&self, record: &T, out: &mut dyn Write) -> Result<()>;
    fn read(&self, record: &mut T, input: &mut dyn Read) -> Result<()>;
    fn stored_size(&self, record: &T) -> usize;
    fn fixed_size(&self) -> Option<usize>;
}

struct Accessor<T, FT, S> {
    get: fn(&T) -> &FT,
    get_mut: fn(&mut T) -> &mut FT,
    serializer: S,
}

impl<T, FT, S> FieldOps<T> for Accessor<T, FT, S>
where
    FT: FromVariant + Into<Variant> + Clone,
    S: Serializer<Value = FT>,
{
    fn get(&self, record: &T) -> Variant {
        (self.get)(record).clone().into()
    }

    fn set(&self, record: &mut T, value: &Variant) -> Result<()> {
        let value = FT::from_variant(value).map_err(|_| Error::TypeMismatch {
            expected: FT::KIND,
            found: value.kind(),
        })?;
        *(self.get_mut)(record) = value;
        Ok(())
    }

    fn write(&self, record: &T, out: &mut dyn Write) -> Result<()> {
        self.serializer.serialize(out, (self.get)(record))
    }

    fn read(&self, record: &mut T, input: &mut dyn Read) -> Result<()> {
        self.serializer.deserialize(input, (self.get_mut)(record))
    }

    fn stored_size(&self, record: &T) -> usize {
        self.serializer.stored_size((self.get)(record))
    }

    fn fixed_size(&self) -> Option<usize> {
        self.serializer.fixed_size()
    }
}

/// Registration step of a [`StructStorage`].
pub struct StructStorageBuilder<T> {
    desc: Vec<FieldDesc>,
    ops: Vec<Box<dyn FieldOps<T>>>,
    default: T,
    config: StorageConfig,
    name: String,
    error: Option<Error>,
}

impl<T: Clone + Default + 'static> StructStorageBuilder<T> {
    fn new() -> Self {
        Self {
            desc: Vec::new(),
            ops: Vec::new(),
            default: T::default(),
            config: StorageConfig::default(),
            name: short_type_name::<T>().to_string(),
            error: None,
        }
    }

    /// Register a field with its type's default codec.
    pub fn field<FT>(self, name: &str, get: fn(&T) -> &FT, get_mut: fn(&mut T) -> &mut FT) -> Self
    where
        FT: Serializable + FromVariant + Into<Variant> + Clone + 'static,
    {
        self.field_with(name, get, get_mut, FT::Serializer::default())
    }

    /// Register a field with an explicit codec.
    pub fn field_with<FT, S>(
        mut self,
        name: &str,
        get: fn(&T) -> &FT,
        get_mut: fn(&mut T) -> &mut FT,
        serializer: S,
    ) -> Self
    where
        FT: FromVariant + Into<Variant> + Clone + 'static,
        S: Serializer<Value = FT> + 'static,
    {
        if self.desc.iter().any(|d| d.name == name) {
            self.fail(Error::invalid_definition(
                &self.name,
                format!("field '{}' registered twice", name),
            ));
            return self;
        }
        self.desc
            .push(FieldDesc::new(name, FT::KIND, serializer.fixed_size()));
        self.ops.push(Box::new(Accessor {
            get,
            get_mut,
            serializer,
        }));
        self
    }

    /// Display label of the last registered field.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        if let Some(desc) = self.desc.last_mut() {
            desc.label = label.into();
        }
        self
    }

    /// Enumeration of the last registered field.
    pub fn enumerated(mut self, enumeration: Arc<Enumeration>) -> Self {
        let Some(kind) = self.desc.last().map(|d| d.kind) else {
            return self;
        };
        if enumeration.kind() != kind {
            self.fail(Error::TypeMismatch {
                expected: kind,
                found: enumeration.kind(),
            });
            return self;
        }
        if let Some(desc) = self.desc.last_mut() {
            desc.enumeration = Some(enumeration);
        }
        self
    }

    /// Record given to objects on [`create`](DataStorage::create).
    pub fn defaults(mut self, record: T) -> Self {
        self.default = record;
        self
    }

    /// Name used in log lines (defaults to the host type name).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Finish registration. Fails on the first registration error.
    pub fn build(self) -> Result<StructStorage<T>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let index = self
            .desc
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();
        let fixed_size = fixed_total(self.ops.iter().map(|op| op.fixed_size()));
        log::debug!(
            "[storage] {}: {} fields registered, record size {:?}",
            self.name,
            self.desc.len(),
            fixed_size
        );
        Ok(StructStorage {
            desc: self.desc,
            ops: self.ops,
            index,
            fixed_size,
            default: self.default,
            data: BTreeMap::new(),
            config: self.config,
            name: self.name,
        })
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Storage of host records `T` with fields addressed by registered names.
pub struct StructStorage<T> {
    desc: Vec<FieldDesc>,
    ops: Vec<Box<dyn FieldOps<T>>>,
    index: HashMap<String, usize>,
    fixed_size: Option<usize>,
    default: T,
    data: BTreeMap<ObjectId, T>,
    config: StorageConfig,
    name: String,
}

impl<T: Clone + Default + 'static> StructStorage<T> {
    pub fn builder() -> StructStorageBuilder<T> {
        StructStorageBuilder::new()
    }

    /// Typed access to a stored record.
    pub fn record(&self, id: ObjectId) -> Option<&T> {
        self.data.get(&id)
    }

    pub fn record_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.data.get_mut(&id)
    }

    /// Insert a typed record. `false` if `id` already has data.
    pub fn insert(&mut self, id: ObjectId, record: T) -> bool {
        if self.data.contains_key(&id) {
            return false;
        }
        self.data.insert(id, record);
        true
    }

    /// Kind of a registered field.
    pub fn field_kind(&self, field: &str) -> Result<VariantKind> {
        Ok(self.desc[self.lookup(field)?].kind)
    }

    fn lookup(&self, field: &str) -> Result<usize> {
        self.index
            .get(field)
            .copied()
            .ok_or_else(|| Error::FieldNotFound(field.to_string()))
    }

    fn stored_size(&self, record: &T) -> usize {
        self.ops.iter().map(|op| op.stored_size(record)).sum()
    }

    fn decode(&self, input: &mut dyn Read) -> Result<T> {
        let mut record = self.default.clone();
        for op in &self.ops {
            op.read(&mut record, input)?;
        }
        Ok(record)
    }

    fn reader(&self) -> RecordReader<'_> {
        RecordReader {
            config: &self.config,
            storage: &self.name,
            fixed_size: self.fixed_size,
        }
    }
}

impl<T: Clone + Default + 'static> DataStorage for StructStorage<T> {
    fn create(&mut self, id: ObjectId) -> bool {
        let record = self.default.clone();
        self.insert(id, record)
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        self.data.remove(&id).is_some()
    }

    fn has(&self, id: ObjectId) -> bool {
        self.data.contains_key(&id)
    }

    fn clone_data(&mut self, src: ObjectId, dst: ObjectId) -> bool {
        if self.data.contains_key(&dst) {
            return false;
        }
        match self.data.get(&src) {
            Some(record) => {
                let record = record.clone();
                self.data.insert(dst, record);
                true
            }
            None => false,
        }
    }

    fn get_field(&self, id: ObjectId, field: &str) -> Result<Option<Variant>> {
        let op = &self.ops[self.lookup(field)?];
        Ok(self.data.get(&id).map(|record| op.get(record)))
    }

    fn set_field(&mut self, id: ObjectId, field: &str, value: &Variant) -> Result<bool> {
        let op = &self.ops[self.lookup(field)?];
        match self.data.get_mut(&id) {
            Some(record) => {
                op.set(record, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn write_to(&self, out: &mut dyn Write, id: ObjectId, with_size: bool) -> Result<bool> {
        let Some(record) = self.data.get(&id) else {
            return Ok(false);
        };
        write_record(out, with_size, self.stored_size(record), |out| {
            self.ops.iter().try_for_each(|op| op.write(record, out))
        })?;
        Ok(true)
    }

    fn read_from(&mut self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<bool> {
        if self.data.contains_key(&id) {
            self.reader()
                .discard(input, id, with_size, |r| self.decode(r))?;
            return Ok(false);
        }
        match self.reader().read(input, id, with_size, |r| self.decode(r))? {
            Some(record) => {
                self.data.insert(id, record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn stored_objects(&self) -> ObjectIds<'_> {
        Box::new(self.data.keys().copied())
    }

    fn field_desc(&self) -> &[FieldDesc] {
        &self.desc
    }

    fn data_size(&self) -> Option<usize> {
        self.fixed_size
    }
}
