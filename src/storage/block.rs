// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Block codec: a sorted group of posting lists in one file.
//!
//! Payload layout:
//!
//! ```text
//! file table          string table, one entry per distinct file in the block
//! per term (entry count from the header):
//!   term              front-coded against the previous term
//!   total frequency   varint
//!   idf               f64 LE
//!   posting count     varint
//!   per posting:
//!     doc id          varint, gap from the previous doc id (first absolute)
//!     file            varint index into the file table
//!     idf             f64 LE
//!     positions       count + gaps
//! ```
//!
//! Frequencies are not stored; a posting's frequency is its position count.
//! The decoder rebuilds `BTreeMap`s, so doc ids come back ascending whatever
//! order produced them.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::debug;

use super::encoding::{
    decode_deltas, decode_front_coded, decode_string_table, encode_deltas, encode_f64,
    encode_front_coded, encode_string_table, encode_varint, invalid, ByteReader,
};
use super::header::{self, FileKind, Flags, MAX_FILE_SIZE};
use crate::error::{Error, Result};
use crate::index::{Posting, PostingList};
use crate::types::DocId;

const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 9;
const BROTLI_WINDOW: u32 = 22;

pub(crate) fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(
            &mut compressed,
            BROTLI_BUFFER,
            BROTLI_QUALITY,
            BROTLI_WINDOW,
        );
        encoder.write_all(data)?;
        encoder.flush()?;
    }
    Ok(compressed)
}

pub(crate) fn decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, BROTLI_BUFFER)
        .take(MAX_FILE_SIZE as u64 + 1)
        .read_to_end(&mut out)?;
    if out.len() > MAX_FILE_SIZE {
        return Err(invalid("decompressed payload exceeds size limit"));
    }
    Ok(out)
}

/// Header, payload (compressed if asked) and footer for a set of posting lists.
pub fn encode_block(postings: &BTreeMap<String, PostingList>, compressed: bool) -> io::Result<Vec<u8>> {
    let entries = u32::try_from(postings.len())
        .map_err(|_| invalid(format!("{} terms do not fit one block", postings.len())))?;

    let mut files: Vec<String> = Vec::new();
    let mut file_ids: HashMap<&str, usize> = HashMap::new();
    for posting in postings.values().flat_map(PostingList::postings) {
        if !file_ids.contains_key(posting.file.as_str()) {
            file_ids.insert(posting.file.as_str(), files.len());
            files.push(posting.file.clone());
        }
    }

    let mut payload = Vec::new();
    encode_string_table(&files, &mut payload);

    let mut prev_term = "";
    for (term, list) in postings {
        encode_front_coded(prev_term, term, &mut payload);
        prev_term = term;

        encode_varint(list.total_frequency, &mut payload);
        encode_f64(list.idf, &mut payload);
        encode_varint(list.docs.len() as u64, &mut payload);

        let mut prev_doc = 0u32;
        for (i, posting) in list.postings().enumerate() {
            let doc = posting.doc_id.0;
            let gap = if i == 0 { doc } else { doc - prev_doc };
            prev_doc = doc;
            encode_varint(u64::from(gap), &mut payload);
            encode_varint(file_ids[posting.file.as_str()] as u64, &mut payload);
            encode_f64(posting.idf, &mut payload);
            encode_deltas(&posting.positions, &mut payload);
        }
    }

    let flags = Flags::new().with_brotli(compressed);
    if compressed {
        payload = compress(&payload)?;
    }
    header::seal(FileKind::Block, flags, entries, &payload)
}

/// Inverse of [`encode_block`]. Validates checksum, ordering and totals.
pub fn decode_block(bytes: &[u8]) -> io::Result<BTreeMap<String, PostingList>> {
    let (header, raw) = header::open(FileKind::Block, bytes)?;
    let inflated;
    let payload = if header.flags.is_brotli() {
        inflated = decompress(raw)?;
        inflated.as_slice()
    } else {
        raw
    };

    let mut reader = ByteReader::new(payload);
    let files = decode_string_table(&mut reader)?;

    let mut postings = BTreeMap::new();
    let mut prev_term = String::new();
    for i in 0..header.entry_count {
        let term = decode_front_coded(&prev_term, &mut reader)?;
        if term.is_empty() || (i > 0 && term <= prev_term) {
            return Err(invalid(format!("term {i} out of order or empty")));
        }

        let total_frequency = reader.varint()?;
        let idf = reader.f64_le()?;
        let doc_count = reader.count("posting")?;

        let mut list = PostingList {
            docs: BTreeMap::new(),
            total_frequency,
            idf,
        };
        let mut prev_doc = 0u32;
        let mut sum = 0u64;
        for j in 0..doc_count {
            let gap = reader.varint_u32()?;
            if j > 0 && gap == 0 {
                return Err(invalid(format!("duplicate doc id in '{term}'")));
            }
            let doc = prev_doc
                .checked_add(gap)
                .ok_or_else(|| invalid("doc id overflows u32"))?;
            prev_doc = doc;

            let file_index = reader.varint()? as usize;
            let file = files
                .get(file_index)
                .ok_or_else(|| invalid(format!("file index {file_index} out of range")))?;
            let doc_idf = reader.f64_le()?;
            let positions = decode_deltas(&mut reader)?;
            let frequency = u32::try_from(positions.len())
                .map_err(|_| invalid("position list too long"))?;
            sum += u64::from(frequency);

            list.docs.insert(
                DocId(doc),
                Posting {
                    doc_id: DocId(doc),
                    file: file.clone(),
                    frequency,
                    positions,
                    idf: doc_idf,
                },
            );
        }
        if sum != total_frequency {
            return Err(invalid(format!(
                "'{term}' claims total frequency {total_frequency} but postings sum to {sum}"
            )));
        }

        postings.insert(term.clone(), list);
        prev_term = term;
    }

    if !reader.is_at_end() {
        return Err(invalid(format!(
            "{} trailing bytes after last term",
            reader.remaining()
        )));
    }
    Ok(postings)
}

pub fn write_block(
    path: &Path,
    postings: &BTreeMap<String, PostingList>,
    compressed: bool,
) -> Result<usize> {
    let bytes = encode_block(postings, compressed).map_err(|e| Error::corrupt(path, e))?;
    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), terms = postings.len(), bytes = bytes.len(), "wrote block");
    Ok(bytes.len())
}

pub fn read_block(path: &Path) -> Result<BTreeMap<String, PostingList>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode_block(&bytes).map_err(|e| Error::corrupt(path, e))
}
