// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One unnamed scalar per object.

use super::record::{decode_value, write_record, RecordReader};
use super::{DataStorage, FieldDesc, ObjectIds};
use crate::config::StorageConfig;
use crate::enumeration::Enumeration;
use crate::error::{Error, Result};
use crate::serializer::{Serializable, Serializer};
use crate::variant::{FromVariant, Variant};
use crate::ObjectId;
use glam::{Quat, Vec3};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::sync::Arc;

/// Scalar types a [`SingleFieldStorage`] can hold.
pub trait FieldValue: Serializable + FromVariant + Into<Variant> + Clone + Default + 'static {}

impl<T> FieldValue for T where T: Serializable + FromVariant + Into<Variant> + Clone + Default + 'static {}

/// Bool stored as a 4-byte word.
pub type BoolStorage = SingleFieldStorage<bool>;
pub type IntStorage = SingleFieldStorage<i32>;
pub type UIntStorage = SingleFieldStorage<u32>;
pub type FloatStorage = SingleFieldStorage<f32>;
/// Length-prefixed string, record size `len + 4`.
pub type StringStorage = SingleFieldStorage<String>;
pub type VectorStorage = SingleFieldStorage<Vec3>;
/// Quaternion compressed to heading/pitch/bank.
pub type RotationStorage = SingleFieldStorage<Quat>;

/// Storage of one scalar `T` per object, addressed by the empty field name.
#[derive(Debug, Clone)]
pub struct SingleFieldStorage<T: FieldValue> {
    data: BTreeMap<ObjectId, T>,
    default: T,
    serializer: T::Serializer,
    desc: [FieldDesc; 1],
    config: StorageConfig,
}

impl<T: FieldValue> Default for SingleFieldStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FieldValue> SingleFieldStorage<T> {
    pub fn new() -> Self {
        let serializer = T::Serializer::default();
        let desc = FieldDesc::new("", T::KIND, serializer.fixed_size());
        Self {
            data: BTreeMap::new(),
            default: T::default(),
            serializer,
            desc: [desc],
            config: StorageConfig::default(),
        }
    }

    /// Value given to objects on [`create`](DataStorage::create).
    pub fn with_default(mut self, value: T) -> Self {
        self.default = value;
        self
    }

    /// Display label reported by [`field_desc`](DataStorage::field_desc).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.desc[0].label = label.into();
        self
    }

    /// Tag the value with an enumeration of the same kind.
    pub fn with_enumeration(mut self, enumeration: Arc<Enumeration>) -> Result<Self> {
        if enumeration.kind() != T::KIND {
            return Err(Error::TypeMismatch {
                expected: T::KIND,
                found: enumeration.kind(),
            });
        }
        self.desc[0].enumeration = Some(enumeration);
        Ok(self)
    }

    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    /// Typed access to a stored value.
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.data.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.data.get_mut(&id)
    }

    /// Insert a typed value. `false` if `id` already has data.
    pub fn insert(&mut self, id: ObjectId, value: T) -> bool {
        if self.data.contains_key(&id) {
            return false;
        }
        self.data.insert(id, value);
        true
    }

    /// Stored `(id, value)` pairs, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.data.iter().map(|(id, v)| (*id, v))
    }

    fn check_field(field: &str) -> Result<()> {
        if field.is_empty() {
            Ok(())
        } else {
            Err(Error::FieldNotFound(field.to_string()))
        }
    }

    pub(crate) fn coerce(value: &Variant) -> Result<T> {
        T::from_variant(value).map_err(|_| Error::TypeMismatch {
            expected: T::KIND,
            found: value.kind(),
        })
    }

    fn reader(&self) -> RecordReader<'_> {
        RecordReader {
            config: &self.config,
            storage: T::KIND.name(),
            fixed_size: self.serializer.fixed_size(),
        }
    }

    /// Decode one record without storing it.
    pub(crate) fn read_value(&self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<Option<T>> {
        self.reader()
            .read(input, id, with_size, |r| decode_value(&self.serializer, r))
    }

    pub(crate) fn discard_value(&self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<()> {
        self.reader()
            .discard(input, id, with_size, |r| decode_value(&self.serializer, r))
    }
}

impl<T: FieldValue> DataStorage for SingleFieldStorage<T> {
    fn create(&mut self, id: ObjectId) -> bool {
        let value = self.default.clone();
        self.insert(id, value)
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
            Some(value) => {
                let value = value.clone();
                self.data.insert(dst, value);
                true
            }
            None => false,
        }
    }

    fn get_field(&self, id: ObjectId, field: &str) -> Result<Option<Variant>> {
        Self::check_field(field)?;
        Ok(self.data.get(&id).map(|v| v.clone().into()))
    }

    fn set_field(&mut self, id: ObjectId, field: &str, value: &Variant) -> Result<bool> {
        Self::check_field(field)?;
        let value = Self::coerce(value)?;
        match self.data.get_mut(&id) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn write_to(&self, out: &mut dyn Write, id: ObjectId, with_size: bool) -> Result<bool> {
        let Some(value) = self.data.get(&id) else {
            return Ok(false);
        };
        let size = self.serializer.stored_size(value);
        write_record(out, with_size, size, |out| self.serializer.serialize(out, value))?;
        Ok(true)
    }

    fn read_from(&mut self, input: &mut dyn Read, id: ObjectId, with_size: bool) -> Result<bool> {
        if self.data.contains_key(&id) {
            self.discard_value(input, id, with_size)?;
            return Ok(false);
        }
        match self.read_value(input, id, with_size)? {
            Some(value) => {
                self.data.insert(id, value);
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
        self.serializer.fixed_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_create_twice_keeps_data() {
        let mut ints = IntStorage::new().with_default(5);
        assert!(ints.create(7));
        ints.set_field(7, "", &Variant::Int(9)).expect("set");
        assert!(!ints.create(7));
        assert_eq!(ints.get_field(7, "").expect("get"), Some(Variant::Int(9)));
    }

    #[test]
    fn test_named_field_is_rejected() {
        let mut floats = FloatStorage::new();
        floats.create(1);
        assert!(matches!(floats.get_field(1, "x"), Err(Error::FieldNotFound(_))));
        assert_eq!(floats.get_field(2, "").expect("absent"), None);
        assert!(!floats.set_field(2, "", &Variant::Float(1.0)).expect("absent"));
    }

    #[test]
    fn test_set_field_coerces() {
        let mut uints = UIntStorage::new();
        uints.create(1);
        uints.set_field(1, "", &Variant::from("0x10")).expect("hex string");
        assert_eq!(uints.get(1), Some(&16));
        assert!(matches!(
            uints.set_field(1, "", &Variant::Vector(Vec3::ONE)),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bool_record_is_four_bytes() {
        let mut flags = BoolStorage::new();
        flags.create_with_value(3, &Variant::Bool(true)).expect("create");
        let mut out = Vec::new();
        assert!(flags.write_to(&mut out, 3, true).expect("write"));
        assert_eq!(out, [4, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(flags.data_size(), Some(4));
    }

    #[test]
    fn test_string_record_layout() {
        let mut names = StringStorage::new();
        names.create_with_value(1, &Variant::from("Ian")).expect("create");
        let mut out = Vec::new();
        names.write_to(&mut out, 1, true).expect("write");
        assert_eq!(out, [7, 0, 0, 0, 3, 0, 0, 0, b'I', b'a', b'n']);
        assert_eq!(names.data_size(), None);
        assert!(names.field_desc()[0].is_variable());

        names.clear();
        assert!(names.read_from(&mut Cursor::new(out), 1, true).expect("read"));
        assert_eq!(names.get(1).map(String::as_str), Some("Ian"));
    }

    #[test]
    fn test_clone_data_is_deep() {
        let mut vectors = VectorStorage::new();
        vectors.create_with_value(1, &Variant::Vector(Vec3::X)).expect("create");
        assert!(vectors.clone_data(1, 2));
        assert!(!vectors.clone_data(1, 2));
        assert!(!vectors.clone_data(9, 3));
        *vectors.get_mut(2).expect("clone") = Vec3::Y;
        assert_eq!(vectors.get(1), Some(&Vec3::X));
    }

    #[test]
    fn test_enumeration_kind_must_match() {
        let e = Arc::new(Enumeration::bitfield("Flags"));
        assert!(IntStorage::new().with_enumeration(Arc::clone(&e)).is_err());
        let storage = UIntStorage::new().with_enumeration(e).expect("uint");
        assert_eq!(
            storage.field_desc()[0].enumeration.as_ref().map(|e| e.name()),
            Some("Flags")
        );
    }

    #[test]
    fn test_stored_objects_ascending() {
        let mut ints = IntStorage::new();
        for id in [5, 1, 3] {
            ints.create(id);
        }
        let ids: Vec<ObjectId> = ints.stored_objects().collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(ints.destroy(3));
        assert!(!ints.destroy(3));
        assert_eq!(ints.len(), 2);
    }
}
