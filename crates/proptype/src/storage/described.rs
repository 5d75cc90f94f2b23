// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw record buffers laid out by a [`TypeDescriptor`].

use super::record::{write_record, RecordReader};
use super::{DataStorage, FieldDesc, ObjectIds};
use crate::config::StorageConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::variant::Variant;
use crate::ObjectId;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Storage whose records are `descriptor.size()` byte buffers.
///
/// Records are written verbatim, so the on-disk layout is the descriptor
/// layout and the size prefix always equals [`TypeDescriptor::size`].
#[derive(Debug, Clone)]
pub struct DescribedStorage {
    descriptor: TypeDescriptor,
    desc: Vec<FieldDesc>,
    /// Zeroed record with every leaf default applied.
    template: Box<[u8]>,
    data: BTreeMap<ObjectId, Box<[u8]>>,
    config: StorageConfig,
}

impl DescribedStorage {
    /// Storage for `descriptor`, building it first if needed.
    pub fn new(mut descriptor: TypeDescriptor) -> Result<Self> {
        if !descriptor.is_built() {
            descriptor.build()?;
        }
        let desc = descriptor
            .fields()?
            .iter()
            .map(|def| {
                let mut desc = FieldDesc::new(def.name(), def.kind(), Some(def.size()));
                desc.enumeration = def.leaf().enumeration().cloned();
                desc
            })
            .collect();
        let template = descriptor.default_record()?.into_boxed_slice();
        Ok(Self {
            descriptor,
            desc,
            template,
            data: BTreeMap::new(),
            config: StorageConfig::default(),
        })
    }

    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Raw record of `id`.
    pub fn record(&self, id: ObjectId) -> Option<&[u8]> {
        self.data.get(&id).map(|r| &r[..])
    }

    fn reader(&self) -> RecordReader<'_> {
        RecordReader {
            config: &self.config,
            storage: self.descriptor.name(),
            fixed_size: Some(self.descriptor.size()),
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Box<[u8]>> {
        let mut record = self.template.clone();
        input.read_exact(&mut record)?;
        Ok(record)
    }
}

impl DataStorage for DescribedStorage {
    fn create(&mut self, id: ObjectId) -> bool {
        if self.data.contains_key(&id) {
            return false;
        }
        self.data.insert(id, self.template.clone());
        true
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
        // unknown names fail even for absent objects
        self.descriptor.field_def(field)?;
        self.data
            .get(&id)
            .map(|record| self.descriptor.get(record, field))
            .transpose()
    }

    fn set_field(&mut self, id: ObjectId, field: &str, value: &Variant) -> Result<bool> {
        self.descriptor.field_def(field)?;
        match self.data.get_mut(&id) {
            Some(record) => {
                self.descriptor.set(record, field, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn write_to(&self, out: &mut dyn Write, id: ObjectId, with_size: bool) -> Result<bool> {
        let Some(record) = self.data.get(&id) else {
            return Ok(false);
        };
        write_record(out, with_size, record.len(), |out| {
            out.write_all(record)?;
            Ok(())
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
        Some(self.descriptor.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SizeMismatchPolicy;
    use crate::error::Error;
    use crate::variant::VariantKind;
    use std::io::Cursor;

    fn actor() -> DescribedStorage {
        let hp = TypeDescriptor::simple("hp", VariantKind::Int, 4)
            .and_then(|d| d.with_default(100))
            .expect("hp");
        let name = TypeDescriptor::simple("name", VariantKind::String, 8).expect("name");
        let actor = TypeDescriptor::structure("Actor", vec![hp, name]).expect("actor");
        DescribedStorage::new(actor).expect("storage")
    }

    #[test]
    fn test_new_builds_descriptor() {
        let storage = actor();
        assert!(storage.descriptor().is_built());
        assert_eq!(storage.data_size(), Some(12));
        let fields: Vec<(&str, i32)> = storage
            .field_desc()
            .iter()
            .map(|d| (d.name.as_str(), d.size))
            .collect();
        assert_eq!(fields, vec![("hp", 4), ("name", 8)]);
    }

    #[test]
    fn test_create_applies_defaults() {
        let mut storage = actor();
        assert!(storage.create(1));
        assert!(!storage.create(1));
        assert_eq!(storage.get_field(1, "hp").expect("hp"), Some(Variant::Int(100)));
        assert_eq!(
            storage.get_field(1, "name").expect("name"),
            Some(Variant::from(""))
        );
        assert_eq!(storage.get_field(2, "hp").expect("absent"), None);
        assert!(matches!(storage.get_field(2, "mana"), Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_record_is_descriptor_layout() {
        let mut storage = actor();
        storage.create(1);
        storage.set_field(1, "name", &Variant::from("Ian")).expect("name");
        let mut out = Vec::new();
        assert!(storage.write_to(&mut out, 1, true).expect("write"));
        assert_eq!(
            out,
            [12, 0, 0, 0, 100, 0, 0, 0, b'I', b'a', b'n', 0, 0, 0, 0, 0]
        );

        let mut copy = actor();
        assert!(copy.read_from(&mut Cursor::new(out), 1, true).expect("read"));
        assert_eq!(copy.record(1), storage.record(1));
    }

    #[test]
    fn test_wrong_record_size() {
        let mut bytes = vec![16, 0, 0, 0];
        bytes.extend_from_slice(&[7u8; 16]);
        let mut strict = actor();
        let mut input = Cursor::new(bytes.clone());
        assert!(!strict.read_from(&mut input, 1, true).expect("skipped"));
        assert_eq!(input.position(), 20);

        let mut lenient = actor().with_config(StorageConfig {
            size_mismatch: SizeMismatchPolicy::AcceptTrailing,
        });
        assert!(lenient.read_from(&mut Cursor::new(bytes), 1, true).expect("accepted"));
        assert_eq!(lenient.get_field(1, "hp").expect("hp"), Some(Variant::Int(0x0707_0707)));
    }

    #[test]
    fn test_clone_data_copies_buffer() {
        let mut storage = actor();
        storage.create(1);
        assert!(storage.clone_data(1, 2));
        storage.set_field(2, "hp", &Variant::Int(5)).expect("set");
        assert_eq!(storage.get_field(1, "hp").expect("hp"), Some(Variant::Int(100)));
        assert_eq!(storage.get_field(2, "hp").expect("hp"), Some(Variant::Int(5)));
    }
}
