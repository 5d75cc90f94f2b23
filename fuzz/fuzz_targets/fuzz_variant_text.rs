// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use proptype::{Variant, VariantKind};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let source = Variant::from(text);
    for kind in [
        VariantKind::Bool,
        VariantKind::Float,
        VariantKind::Int,
        VariantKind::UInt,
        VariantKind::Vector,
        VariantKind::Quaternion,
    ] {
        // Text parsing fails with an error, never a panic
        if let Ok(value) = source.convert(kind) {
            let _ = value.to_text();
            let _ = source.compare(&value);
        }
    }
});
