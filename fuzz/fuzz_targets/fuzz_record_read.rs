// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use proptype::storage::{DataStorage, DescribedStorage, IntStorage, StringStorage, SymNameStorage};
use proptype::{TypeDescriptor, VariantKind};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Length-prefixed reads must never panic or over-allocate, whatever the prefix says
    let mut ints = IntStorage::new();
    let mut input = Cursor::new(data);
    for id in 0..8 {
        if ints.read_from(&mut input, id, true).is_err() {
            break;
        }
    }

    let mut strings = StringStorage::new();
    let _ = strings.read_from(&mut Cursor::new(data), 0, false);

    let mut names = SymNameStorage::new();
    let mut input = Cursor::new(data);
    for id in 0..8 {
        if names.read_from(&mut input, id, true).is_err() {
            break;
        }
    }

    let record = TypeDescriptor::simple("hp", VariantKind::Int, 4)
        .and_then(|hp| {
            let name = TypeDescriptor::simple("name", VariantKind::String, 16)?;
            TypeDescriptor::structure("Record", vec![hp, name])
        })
        .and_then(DescribedStorage::new);
    if let Ok(mut described) = record {
        let mut input = Cursor::new(data);
        for id in 0..8 {
            if described.read_from(&mut input, id, true).is_err() {
                break;
            }
            let _ = described.get_field(id, "name");
        }
    }
});
