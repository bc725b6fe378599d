use bytes::BufMut;

use crate::error::H3Error;
use crate::varint::{VARINT_MAX, encode_varint, varint_len};

/// SETTINGS_QPACK_MAX_TABLE_CAPACITY (RFC 9204 Section 5).
pub const SETTINGS_QPACK_MAX_TABLE_CAPACITY: u64 = 0x01;
/// SETTINGS_MAX_FIELD_SECTION_SIZE (RFC 9114 Section 7.2.4.1).
pub const SETTINGS_MAX_FIELD_SECTION_SIZE: u64 = 0x06;
/// SETTINGS_QPACK_BLOCKED_STREAMS (RFC 9204 Section 5).
pub const SETTINGS_QPACK_BLOCKED_STREAMS: u64 = 0x07;

/// Setting identifiers reserved from HTTP/2 (RFC 9114 Section 7.2.4.1).
const RESERVED_H2_SETTINGS: &[u64] = &[0x02, 0x03, 0x04, 0x05];

/// HTTP/3 SETTINGS parameters.
///
/// Entries keep their insertion order, which is also the order they are
/// written on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<(u64, u64)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `id` to `value`.
    ///
    /// Replacing an existing identifier keeps its original position. Returns
    /// the previous value, if any.
    pub fn insert(&mut self, id: u64, value: u64) -> Result<Option<u64>, H3Error> {
        if RESERVED_H2_SETTINGS.contains(&id) {
            return Err(H3Error::SettingsError);
        }
        if id > VARINT_MAX {
            return Err(H3Error::ValueOutOfRange(id));
        }
        if value > VARINT_MAX {
            return Err(H3Error::ValueOutOfRange(value));
        }
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == id) {
            return Ok(Some(std::mem::replace(&mut entry.1, value)));
        }
        self.entries.push((id, value));
        Ok(None)
    }

    pub fn get(&self, id: u64) -> Option<u64> {
        self.entries.iter().find(|(k, _)| *k == id).map(|&(_, v)| v)
    }

    /// Iterate `(identifier, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SETTINGS_QPACK_MAX_TABLE_CAPACITY, 0 when absent.
    pub fn qpack_max_table_capacity(&self) -> u64 {
        self.get(SETTINGS_QPACK_MAX_TABLE_CAPACITY).unwrap_or(0)
    }

    /// SETTINGS_MAX_FIELD_SECTION_SIZE, unlimited when absent.
    pub fn max_field_section_size(&self) -> u64 {
        self.get(SETTINGS_MAX_FIELD_SECTION_SIZE).unwrap_or(u64::MAX)
    }

    /// SETTINGS_QPACK_BLOCKED_STREAMS, 0 when absent.
    pub fn qpack_blocked_streams(&self) -> u64 {
        self.get(SETTINGS_QPACK_BLOCKED_STREAMS).unwrap_or(0)
    }

    /// Encode settings as a sequence of (identifier, value) varint pairs.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> Result<(), H3Error> {
        for &(id, value) in &self.entries {
            encode_varint(id, buf)?;
            encode_varint(value, buf)?;
        }
        Ok(())
    }

    /// Byte length when encoded.
    pub fn encoded_len(&self) -> usize {
        self.entries
            .iter()
            .map(|&(id, value)| varint_len(id).unwrap_or(8) + varint_len(value).unwrap_or(8))
            .sum()
    }
}
