//! QUIC variable-length integer codec (RFC 9000 Section 16).
//!
//! The two most significant bits of the first byte select the encoded
//! width; the remaining bits hold the value in network byte order:
//!
//! ```text
//! 00 -> 1 byte,  6-bit value
//! 01 -> 2 bytes, 14-bit value
//! 10 -> 4 bytes, 30-bit value
//! 11 -> 8 bytes, 62-bit value
//! ```

use bytes::BufMut;

use crate::error::H3Error;

/// Largest value representable as a varint (2^62 - 1).
pub const VARINT_MAX: u64 = (1 << 62) - 1;

/// Returns the encoded byte length for a varint value (1, 2, 4, or 8), or
/// `None` if the value exceeds [`VARINT_MAX`].
pub fn varint_len(value: u64) -> Option<usize> {
    if value <= 63 {
        Some(1)
    } else if value <= 16383 {
        Some(2)
    } else if value <= 1073741823 {
        Some(4)
    } else if value <= VARINT_MAX {
        Some(8)
    } else {
        None
    }
}

/// Encode a QUIC variable-length integer into `buf` using the minimal width.
pub fn encode_varint<B: BufMut>(value: u64, buf: &mut B) -> Result<(), H3Error> {
    match varint_len(value).ok_or(H3Error::ValueOutOfRange(value))? {
        1 => buf.put_u8(value as u8),
        2 => buf.put_u16(0x4000 | value as u16),
        4 => buf.put_u32(0x8000_0000 | value as u32),
        _ => buf.put_u64(0xc000_0000_0000_0000 | value),
    }
    Ok(())
}

/// Decode a QUIC variable-length integer from the start of `buf`.
///
/// Returns `(value, bytes_consumed)`. Fails with
/// [`H3Error::MalformedVarint`] when the buffer holds fewer bytes than the
/// length prefix announces.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), H3Error> {
    let first = *buf.first().ok_or(H3Error::MalformedVarint)?;
    let len = 1usize << (first >> 6);
    if buf.len() < len {
        return Err(H3Error::MalformedVarint);
    }
    let mut value = u64::from(first & 0x3f);
    for &b in &buf[1..len] {
        value = (value << 8) | u64::from(b);
    }
    Ok((value, len))
}
