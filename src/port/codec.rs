//! Port codec
//!
//! Encoding and decoding functions for the line-delimited wire form.
//!
//! Each message is a single JSON object on its own line. Blank lines are
//! ignored by the readers.

use std::io::{BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BridgeError, Result};
use super::{Request, Response};

/// Maximum accepted line length (16 MB)
pub const MAX_LINE_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request as a single JSON line (without the newline)
pub fn encode_request(request: &Request) -> Result<String> {
    encode(request)
}

/// Decode a request from one JSON line
pub fn decode_request(line: &str) -> Result<Request> {
    decode(line)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response as a single JSON line (without the newline)
pub fn encode_response(response: &Response) -> Result<String> {
    encode(response)
}

/// Decode a response from one JSON line
pub fn decode_response(line: &str) -> Result<Response> {
    decode(line)
}

// =============================================================================
// Stream Helpers
// =============================================================================

/// Read the next request from a stream
///
/// Returns `Ok(None)` at end of stream. A malformed line is returned as
/// `BridgeError::Protocol` after it has been consumed, so the caller can
/// keep reading.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<Request>> {
    match read_line(reader)? {
        Some(line) => decode_request(&line).map(Some),
        None => Ok(None),
    }
}

/// Write a request followed by a newline, then flush
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    write_line(writer, &encode_request(request)?)
}

/// Read the next response from a stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Option<Response>> {
    match read_line(reader)? {
        Some(line) => decode_response(&line).map(Some),
        None => Ok(None),
    }
}

/// Write a response followed by a newline, then flush
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_line(writer, &encode_response(response)?)
}

// =============================================================================
// Internals
// =============================================================================

fn encode<T: Serialize>(message: &T) -> Result<String> {
    serde_json::to_string(message).map_err(|e| BridgeError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(line: &str) -> Result<T> {
    serde_json::from_str(line.trim())
        .map_err(|e| BridgeError::Protocol(format!("Malformed port message: {}", e)))
}

/// Next non-blank line, trimmed of its line ending
///
/// At most `MAX_LINE_SIZE` bytes (plus the newline) are buffered. An
/// oversized or non-UTF-8 line is consumed in full and reported as
/// `BridgeError::Protocol`.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let limit = MAX_LINE_SIZE as u64 + 1;
        let n = Read::take(&mut *reader, limit).read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }

        if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_SIZE {
            let skipped = buf.len() + discard_line(reader)?;
            return Err(BridgeError::Protocol(format!(
                "Line too large: {} bytes (max {})",
                skipped, MAX_LINE_SIZE
            )));
        }

        let line = std::str::from_utf8(&buf)
            .map_err(|e| BridgeError::Protocol(format!("Invalid UTF-8 in line: {}", e)))?;
        if !line.trim().is_empty() {
            return Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()));
        }
    }
}

/// Skip the rest of the current line without buffering it
fn discard_line<R: BufRead>(reader: &mut R) -> Result<usize> {
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(skipped + pos + 1);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped += len;
            }
        }
    }
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
