// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File envelope: fixed header, payload, checksum footer.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                            │
//! │   magic "QRYB" | "QRYT"          4           │
//! │   version                        1           │
//! │   flags (bit 0: brotli)          1           │
//! │   reserved                       2           │
//! │   payload length (u32 LE)        4           │
//! │   entry count (u32 LE)           4           │
//! ├──────────────────────────────────────────────┤
//! │ PAYLOAD (payload length bytes)               │
//! ├──────────────────────────────────────────────┤
//! │ FOOTER (8 bytes)                             │
//! │   crc32 over header + payload    4           │
//! │   magic reversed                 4           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The footer is checked before anything else is parsed. A truncated or
//! bit-flipped file fails here, not halfway through decoding.

use std::io::{self, Read};

use crc32fast::Hasher as Crc32Hasher;

use super::encoding::{eof, invalid};

pub const VERSION: u8 = 1;

/// Files larger than this are refused outright.
pub const MAX_FILE_SIZE: usize = 512 * 1024 * 1024;

/// What a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A group of posting lists (temporary or final).
    Block,
    /// The block tree: vocabulary → block plus the document table.
    Tree,
}

impl FileKind {
    pub fn magic(self) -> [u8; 4] {
        match self {
            FileKind::Block => *b"QRYB",
            FileKind::Tree => *b"QRYT",
        }
    }

    pub fn footer_magic(self) -> [u8; 4] {
        let mut magic = self.magic();
        magic.reverse();
        magic
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(pub(crate) u8);

impl Flags {
    pub const BROTLI: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_brotli(mut self, enabled: bool) -> Self {
        if enabled {
            self.0 |= Self::BROTLI;
        }
        self
    }

    pub fn is_brotli(self) -> bool {
        self.0 & Self::BROTLI != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: FileKind,
    pub version: u8,
    pub flags: Flags,
    pub payload_len: u32,
    pub entry_count: u32,
}

impl Header {
    pub const SIZE: usize = 16;

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.kind.magic());
        buf.push(self.version);
        buf.push(self.flags.0);
        buf.extend_from_slice(&[0u8; 2]);
        buf.extend_from_slice(&self.payload_len.to_le_bytes());
        buf.extend_from_slice(&self.entry_count.to_le_bytes());
    }

    pub fn read<R: Read>(r: &mut R, kind: FileKind) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != kind.magic() {
            return Err(invalid(format!(
                "invalid magic: expected {:?}, got {:?}",
                String::from_utf8_lossy(&kind.magic()),
                magic
            )));
        }

        let mut buf = [0u8; Self::SIZE - 4];
        r.read_exact(&mut buf)?;
        let version = buf[0];
        if version != VERSION {
            return Err(invalid(format!(
                "unsupported version {version} (expected {VERSION})"
            )));
        }

        Ok(Self {
            kind,
            version,
            flags: Flags(buf[1]),
            // buf[2..4] reserved
            payload_len: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            entry_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub crc32: u32,
}

impl Footer {
    pub const SIZE: usize = 8;

    pub fn write(&self, kind: FileKind, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&kind.footer_magic());
    }

    pub fn read(bytes: &[u8], kind: FileKind) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(eof("file too short for footer"));
        }
        let start = bytes.len() - Self::SIZE;
        let magic = &bytes[start + 4..];
        if magic != kind.footer_magic() {
            return Err(invalid(format!("invalid footer magic: got {:?}", magic)));
        }
        let crc32 = u32::from_le_bytes([
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ]);
        Ok(Self { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Wrap `payload` in header and footer.
pub fn seal(kind: FileKind, flags: Flags, entry_count: u32, payload: &[u8]) -> io::Result<Vec<u8>> {
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| invalid(format!("payload of {} bytes is too large", payload.len())))?;
    let header = Header {
        kind,
        version: VERSION,
        flags,
        payload_len,
        entry_count,
    };

    let mut buf = Vec::with_capacity(Header::SIZE + payload.len() + Footer::SIZE);
    header.write(&mut buf);
    buf.extend_from_slice(payload);
    let footer = Footer {
        crc32: Footer::compute_crc32(&buf),
    };
    footer.write(kind, &mut buf);
    Ok(buf)
}

/// Validate size, footer, checksum and header; return the header and the
/// raw (possibly compressed) payload.
pub fn open(kind: FileKind, bytes: &[u8]) -> io::Result<(Header, &[u8])> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(invalid(format!(
            "file too large: {} bytes (max {MAX_FILE_SIZE})",
            bytes.len()
        )));
    }
    let min_size = Header::SIZE + Footer::SIZE;
    if bytes.len() < min_size {
        return Err(eof(format!(
            "file too small: {} bytes (minimum {min_size})",
            bytes.len()
        )));
    }

    let footer = Footer::read(bytes, kind)?;
    let content = &bytes[..bytes.len() - Footer::SIZE];
    let computed = Footer::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(invalid(format!(
            "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
            footer.crc32, computed
        )));
    }

    let header = Header::read(&mut io::Cursor::new(content), kind)?;
    let payload = &content[Header::SIZE..];
    if payload.len() != header.payload_len as usize {
        return Err(invalid(format!(
            "payload length {} does not match header {}",
            payload.len(),
            header.payload_len
        )));
    }
    Ok((header, payload))
}
