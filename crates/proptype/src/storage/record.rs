// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record framing shared by all storages.

use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::serializer::{Plain, Serializer};
use crate::ObjectId;
use std::io::{self, Cursor, Read, Write};

fn eof() -> Error {
    io::Error::from(io::ErrorKind::UnexpectedEof).into()
}

/// Write the optional size prefix, then the payload.
pub(crate) fn write_record(
    out: &mut dyn Write,
    with_size: bool,
    size: usize,
    payload: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    if with_size {
        let size = u32::try_from(size)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "record longer than u32"))?;
        size.write_le(out)?;
    }
    payload(out)
}

/// Consume `len` bytes.
fn skip(input: &mut dyn Read, len: u64) -> Result<()> {
    let skipped = io::copy(&mut input.take(len), &mut io::sink())?;
    if skipped != len {
        return Err(eof());
    }
    Ok(())
}

/// Read exactly `len` bytes without trusting `len` for the allocation.
fn read_payload(input: &mut dyn Read, len: u64) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    input.take(len).read_to_end(&mut payload)?;
    if payload.len() as u64 != len {
        return Err(eof());
    }
    Ok(payload)
}

/// Reads one record in the legacy framing.
pub(crate) struct RecordReader<'a> {
    pub config: &'a StorageConfig,
    /// Storage name for log lines.
    pub storage: &'a str,
    /// Record size when every record has the same size.
    pub fixed_size: Option<usize>,
}

impl RecordReader<'_> {
    /// Decode one record with `decode`.
    ///
    /// `Ok(None)` means the record was consumed and skipped after a size
    /// mismatch. Without a size prefix nothing can be checked and the
    /// record is decoded straight from the stream.
    pub(crate) fn read<R>(
        &self,
        input: &mut dyn Read,
        id: ObjectId,
        with_size: bool,
        decode: impl FnOnce(&mut dyn Read) -> Result<R>,
    ) -> Result<Option<R>> {
        if !with_size {
            return decode(input).map(Some);
        }

        let len = u32::read_le(input)?;
        let found = len as usize;
        if let Some(expected) = self.fixed_size {
            if !self.config.accepts(expected, found) {
                skip(input, u64::from(len))?;
                self.skipped(id, Error::SizeMismatch { expected, found });
                return Ok(None);
            }
        }

        let payload = read_payload(input, u64::from(len))?;
        let mut cursor = Cursor::new(payload.as_slice());
        let record = match decode(&mut cursor) {
            Ok(record) => record,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                self.skipped(id, format_args!("{} byte payload ends inside a field", found));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let consumed = cursor.position() as usize;
        if !self.config.accepts(consumed, found) {
            self.skipped(
                id,
                Error::SizeMismatch {
                    expected: consumed,
                    found,
                },
            );
            return Ok(None);
        }
        Ok(Some(record))
    }

    /// Consume a record that will not be kept.
    pub(crate) fn discard<R>(
        &self,
        input: &mut dyn Read,
        id: ObjectId,
        with_size: bool,
        decode: impl FnOnce(&mut dyn Read) -> Result<R>,
    ) -> Result<()> {
        log::warn!(
            "[storage] {}: object {} already has data, skipping stored record",
            self.storage,
            id
        );
        if with_size {
            let len = u32::read_le(input)?;
            skip(input, u64::from(len))
        } else {
            decode(input).map(drop)
        }
    }

    fn skipped(&self, id: ObjectId, reason: impl std::fmt::Display) {
        log::warn!("[storage] {}: skipping object {}: {}", self.storage, id, reason);
    }
}

/// Sum of per-field stored sizes when all are fixed.
pub(crate) fn fixed_total(sizes: impl IntoIterator<Item = Option<usize>>) -> Option<usize> {
    sizes.into_iter().sum()
}

/// Decode one value with `serializer` into a fresh default.
pub(crate) fn decode_value<S>(serializer: &S, input: &mut dyn Read) -> Result<S::Value>
where
    S: Serializer,
    S::Value: Default,
{
    let mut value = S::Value::default();
    serializer.deserialize(input, &mut value)?;
    Ok(value)
}
