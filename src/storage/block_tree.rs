// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The block directory: which block holds which term, plus the document table.
//!
//! Payload layout:
//!
//! ```text
//! block names       string table
//! document count    varint
//! per term (entry count from the header):
//!   term            front-coded
//!   block           varint index into the block names
//! document table:
//!   count           varint
//!   per document:
//!     doc id        varint gap (first absolute)
//!     file          string
//!     term count    varint
//!     per term:     front-coded term, normalized frequency f64 LE
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::block::{compress, decompress};
use super::encoding::{
    decode_front_coded, decode_string_table, encode_f64, encode_front_coded, encode_string,
    encode_string_table, encode_varint, invalid, ByteReader,
};
use super::header::{self, FileKind, Flags};
use crate::error::{Error, Result};
use crate::index::{DocumentEntry, DocumentTable};
use crate::types::DocId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTree {
    /// Block file names, relative to the `blocks/` directory.
    blocks: Vec<String>,
    terms: BTreeMap<String, u32>,
    docs_num: usize,
    documents: DocumentTable,
}

impl BlockTree {
    pub fn new(docs_num: usize, documents: DocumentTable) -> Self {
        Self {
            blocks: Vec::new(),
            terms: BTreeMap::new(),
            docs_num,
            documents,
        }
    }

    /// Register a block and map each of its terms to it.
    pub fn add_block<'a, I>(&mut self, name: impl Into<String>, terms: I) -> u32
    where
        I: IntoIterator<Item = &'a String>,
    {
        let index = self.blocks.len() as u32;
        self.blocks.push(name.into());
        for term in terms {
            self.terms.insert(term.clone(), index);
        }
        index
    }

    pub fn block_for(&self, term: &str) -> Option<&str> {
        let index = *self.terms.get(term)?;
        self.blocks.get(index as usize).map(String::as_str)
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Terms held by each block, in block order.
    pub fn terms_per_block(&self) -> Vec<usize> {
        let mut counts = vec![0; self.blocks.len()];
        for &index in self.terms.values() {
            if let Some(count) = counts.get_mut(index as usize) {
                *count += 1;
            }
        }
        counts
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn docs_num(&self) -> usize {
        self.docs_num
    }

    pub fn documents(&self) -> &DocumentTable {
        &self.documents
    }

    pub fn encode(&self, compressed: bool) -> io::Result<Vec<u8>> {
        let entries = u32::try_from(self.terms.len())
            .map_err(|_| invalid("vocabulary too large for one tree"))?;

        let mut payload = Vec::new();
        encode_string_table(&self.blocks, &mut payload);
        encode_varint(self.docs_num as u64, &mut payload);

        let mut prev = "";
        for (term, &block) in &self.terms {
            encode_front_coded(prev, term, &mut payload);
            encode_varint(u64::from(block), &mut payload);
            prev = term;
        }

        encode_varint(self.documents.docs.len() as u64, &mut payload);
        let mut prev_doc = 0u32;
        for (i, (doc_id, entry)) in self.documents.docs.iter().enumerate() {
            let gap = if i == 0 { doc_id.0 } else { doc_id.0 - prev_doc };
            prev_doc = doc_id.0;
            encode_varint(u64::from(gap), &mut payload);
            encode_string(&entry.file, &mut payload);
            encode_varint(entry.terms.len() as u64, &mut payload);
            let mut prev = "";
            for (term, &frequency) in &entry.terms {
                encode_front_coded(prev, term, &mut payload);
                encode_f64(frequency, &mut payload);
                prev = term;
            }
        }

        let flags = Flags::new().with_brotli(compressed);
        if compressed {
            payload = compress(&payload)?;
        }
        header::seal(FileKind::Tree, flags, entries, &payload)
    }

    pub fn decode(bytes: &[u8]) -> io::Result<Self> {
        let (header, raw) = header::open(FileKind::Tree, bytes)?;
        let inflated;
        let payload = if header.flags.is_brotli() {
            inflated = decompress(raw)?;
            inflated.as_slice()
        } else {
            raw
        };

        let mut reader = ByteReader::new(payload);
        let blocks = decode_string_table(&mut reader)?;
        let docs_num = reader.varint()? as usize;

        let mut terms = BTreeMap::new();
        let mut prev = String::new();
        for i in 0..header.entry_count {
            let term = decode_front_coded(&prev, &mut reader)?;
            if term.is_empty() || (i > 0 && term <= prev) {
                return Err(invalid(format!("vocabulary entry {i} out of order or empty")));
            }
            let block = reader.varint_u32()?;
            if block as usize >= blocks.len() {
                return Err(invalid(format!("'{term}' points at missing block {block}")));
            }
            terms.insert(term.clone(), block);
            prev = term;
        }

        let doc_count = reader.count("document")?;
        let mut docs = BTreeMap::new();
        let mut prev_doc = 0u32;
        for i in 0..doc_count {
            let gap = reader.varint_u32()?;
            if i > 0 && gap == 0 {
                return Err(invalid("duplicate doc id in document table"));
            }
            let doc = prev_doc
                .checked_add(gap)
                .ok_or_else(|| invalid("doc id overflows u32"))?;
            prev_doc = doc;

            let file = reader.string()?;
            let term_count = reader.count("document term")?;
            let mut entry = DocumentEntry {
                file,
                terms: BTreeMap::new(),
            };
            let mut prev = String::new();
            for _ in 0..term_count {
                let term = decode_front_coded(&prev, &mut reader)?;
                let frequency = reader.f64_le()?;
                entry.terms.insert(term.clone(), frequency);
                prev = term;
            }
            docs.insert(DocId(doc), entry);
        }

        if !reader.is_at_end() {
            return Err(invalid(format!("{} trailing bytes in tree", reader.remaining())));
        }
        Ok(Self {
            blocks,
            terms,
            docs_num,
            documents: DocumentTable { docs },
        })
    }

    pub fn write(&self, path: &Path, compressed: bool) -> Result<()> {
        let bytes = self.encode(compressed).map_err(|e| Error::corrupt(path, e))?;
        fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), terms = self.terms.len(), blocks = self.blocks.len(), "wrote block tree");
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::decode(&bytes).map_err(|e| Error::corrupt(path, e))
    }
}
