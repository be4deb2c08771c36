// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte-level primitives shared by the block and tree codecs.
//!
//! Varints (LEB128) for counts, ids and deltas. Front coding for the sorted
//! term lists. A length-prefixed string table so each file name is stored once
//! per block instead of once per posting.
//!
//! Everything returns `io::Result` with `InvalidData` / `UnexpectedEof`; the
//! caller knows which file it was reading and turns that into a corrupt-block
//! error with the path attached.

use std::io;

/// A `u64` never needs more than ten 7-bit groups.
pub const MAX_VARINT_BYTES: usize = 10;

pub(crate) fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

pub(crate) fn eof(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, msg.into())
}

pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint, returning `(value, bytes_consumed)`.
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(eof("empty buffer for varint"));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let low = u64::from(byte & 0x7F);
        // The tenth group may only carry the top bit of a u64.
        if shift == 63 && low > 1 {
            return Err(invalid("varint overflows u64"));
        }
        result |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(invalid("varint exceeds maximum length (possible corruption)"))
    } else {
        Err(eof("incomplete varint"))
    }
}

/// Forward-only cursor over an encoded payload.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn varint(&mut self) -> io::Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// A varint that must fit a `u32`.
    pub fn varint_u32(&mut self) -> io::Result<u32> {
        let value = self.varint()?;
        u32::try_from(value).map_err(|_| invalid(format!("value {value} exceeds u32")))
    }

    /// A count that cannot exceed the bytes left, since every counted item
    /// takes at least one byte. Stops huge allocations on corrupt input.
    pub fn count(&mut self, what: &str) -> io::Result<usize> {
        let count = self.varint()? as usize;
        if count > self.remaining() {
            return Err(invalid(format!(
                "{what} count {count} exceeds available bytes {}",
                self.remaining()
            )));
        }
        Ok(count)
    }

    pub fn take(&mut self, len: usize) -> io::Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| invalid(format!("length {len} causes overflow")))?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| eof(format!("truncated: wanted {len} bytes at {}", self.pos)))?;
        self.pos = end;
        Ok(slice)
    }

    pub fn f64_le(&mut self) -> io::Result<f64> {
        let raw = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(raw);
        Ok(f64::from_le_bytes(buf))
    }

    pub fn string(&mut self) -> io::Result<String> {
        let len = self.varint()? as usize;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|e| invalid(format!("invalid UTF-8: {e}")))
    }
}

pub fn encode_f64(value: f64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn encode_string(value: &str, buf: &mut Vec<u8>) {
    encode_varint(value.len() as u64, buf);
    buf.extend_from_slice(value.as_bytes());
}

/// Length-prefixed table of strings, referenced elsewhere by index.
pub fn encode_string_table(strings: &[String], buf: &mut Vec<u8>) {
    encode_varint(strings.len() as u64, buf);
    for s in strings {
        encode_string(s, buf);
    }
}

pub fn decode_string_table(reader: &mut ByteReader<'_>) -> io::Result<Vec<String>> {
    let count = reader.count("string table")?;
    let mut table = Vec::with_capacity(count);
    for i in 0..count {
        let s = reader
            .string()
            .map_err(|e| io::Error::new(e.kind(), format!("string table entry {i}: {e}")))?;
        table.push(s);
    }
    Ok(table)
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Front-code one term against the previous one.
///
/// `[shared_prefix_len][suffix_len][suffix]`, so `"forecast"` after
/// `"forest"` costs `[4][4]"cast"`. The prefix is cut on a byte boundary; the
/// decoder validates UTF-8 after reassembly.
pub fn encode_front_coded(prev: &str, term: &str, buf: &mut Vec<u8>) {
    let bytes = term.as_bytes();
    let shared = common_prefix_len(prev.as_bytes(), bytes);
    let suffix = &bytes[shared..];
    encode_varint(shared as u64, buf);
    encode_varint(suffix.len() as u64, buf);
    buf.extend_from_slice(suffix);
}

pub fn decode_front_coded(prev: &str, reader: &mut ByteReader<'_>) -> io::Result<String> {
    let shared = reader.varint()? as usize;
    if shared > prev.len() {
        return Err(invalid(format!(
            "shared prefix length {shared} exceeds previous term length {}",
            prev.len()
        )));
    }
    let suffix_len = reader.varint()? as usize;
    let suffix = reader.take(suffix_len)?;

    let mut bytes = Vec::with_capacity(shared + suffix_len);
    bytes.extend_from_slice(&prev.as_bytes()[..shared]);
    bytes.extend_from_slice(suffix);
    String::from_utf8(bytes).map_err(|e| invalid(format!("invalid UTF-8 in term: {e}")))
}

/// Strictly ascending values as a count followed by gaps.
pub fn encode_deltas(values: &[u32], buf: &mut Vec<u8>) {
    encode_varint(values.len() as u64, buf);
    let mut prev = 0u32;
    for (i, &value) in values.iter().enumerate() {
        let delta = if i == 0 { value } else { value - prev };
        encode_varint(u64::from(delta), buf);
        prev = value;
    }
}

pub fn decode_deltas(reader: &mut ByteReader<'_>) -> io::Result<Vec<u32>> {
    let count = reader.count("delta list")?;
    let mut values = Vec::with_capacity(count);
    let mut prev = 0u32;
    for i in 0..count {
        let delta = reader.varint_u32()?;
        if i > 0 && delta == 0 {
            return Err(invalid("zero gap in ascending list"));
        }
        let value = prev
            .checked_add(delta)
            .ok_or_else(|| invalid("delta list overflows u32"))?;
        values.push(value);
        prev = value;
    }
    Ok(values)
}
