//! Record codec
//!
//! Framing for a single stored text value.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────┐
//! │Magic (4) │ CRC (4)  │ Len (4)  │ Payload (UTF-8)  │
//! └──────────┴──────────┴──────────┴──────────────────┘
//! ```
//! CRC and length are little endian. The CRC covers the payload only.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{BridgeError, Result};

/// Record magic bytes
pub const MAGIC: &[u8; 4] = b"SBR1";

/// Header size: magic (4) + crc (4) + payload length (4)
pub const HEADER_SIZE: usize = 12;

/// Encode a text value into a framed record
pub fn encode_record(value: &str) -> Result<Vec<u8>> {
    let payload = value.as_bytes();
    let len = u32::try_from(payload.len()).map_err(|_| {
        BridgeError::Storage(format!("Record too large: {} bytes", payload.len()))
    })?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.put_slice(MAGIC);
    buf.put_u32_le(crc32fast::hash(payload));
    buf.put_u32_le(len);
    buf.put_slice(payload);

    Ok(buf.to_vec())
}

/// Decode a framed record back into its text value
///
/// Any framing, checksum, or encoding problem is reported as
/// `BridgeError::CorruptedRecord`.
pub fn decode_record(bytes: &[u8]) -> Result<String> {
    if bytes.len() < HEADER_SIZE {
        return Err(BridgeError::CorruptedRecord(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    if buf[..MAGIC.len()] != MAGIC[..] {
        return Err(BridgeError::CorruptedRecord("Bad magic".to_string()));
    }
    buf.advance(MAGIC.len());

    let expected_crc = buf.get_u32_le();
    let len = buf.get_u32_le() as usize;

    if buf.remaining() != len {
        return Err(BridgeError::CorruptedRecord(format!(
            "Length mismatch: header says {} bytes, found {}",
            len,
            buf.remaining()
        )));
    }

    let actual_crc = crc32fast::hash(buf);
    if actual_crc != expected_crc {
        return Err(BridgeError::CorruptedRecord(format!(
            "CRC mismatch: expected 0x{:08x}, got 0x{:08x}",
            expected_crc, actual_crc
        )));
    }

    String::from_utf8(buf.to_vec())
        .map_err(|e| BridgeError::CorruptedRecord(format!("Invalid UTF-8: {}", e)))
}
