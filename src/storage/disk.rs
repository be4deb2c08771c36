// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Querying a persisted index without loading every block.
//!
//! Opening reads only `index.tree`. The term dictionaries (k-grams, sound
//! codes, fuzzy trie) are rebuilt from its vocabulary on three rayon tasks.
//! A posting list lookup loads the single block holding the term and keeps it
//! in a cache, so a query touching N terms reads at most N blocks.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::block::read_block;
use super::block_tree::BlockTree;
use super::{BLOCKS_DIR, TREE_FILE};
use crate::config::OverlapFormula;
use crate::error::{Error, Result};
use crate::fuzzy::AutomatonTrie;
use crate::index::{self, PositionalMatch, PostingList, PostingsLookup};
use crate::kgram::KGramIndex;
use crate::phonetic::PhoneticIndex;
use crate::scoring;
use crate::types::{DocId, ScoredDoc};

type Block = Arc<BTreeMap<String, PostingList>>;

/// Per-block summary produced by [`DiskIndex::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub name: String,
    pub terms: usize,
    pub postings: usize,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct DiskIndex {
    root: PathBuf,
    tree: BlockTree,
    kgrams: KGramIndex,
    phonetic: PhoneticIndex,
    trie: AutomatonTrie,
    cache: Mutex<HashMap<String, Block>>,
}

impl DiskIndex {
    pub fn open(dir: &Path) -> Result<Self> {
        Self::open_with_kgram_size(dir, crate::config::IndexConfig::default().kgram_size)
    }

    pub fn open_with_kgram_size(dir: &Path, kgram_size: usize) -> Result<Self> {
        let tree = BlockTree::read(&dir.join(TREE_FILE))?;

        let vocabulary: Vec<&str> = tree.vocabulary().collect();
        let (kgrams, (phonetic, trie)) = rayon::join(
            || {
                let mut kgrams = KGramIndex::new(kgram_size);
                vocabulary.iter().for_each(|term| {
                    kgrams.insert(term);
                });
                kgrams
            },
            || {
                rayon::join(
                    || {
                        let mut phonetic = PhoneticIndex::new();
                        vocabulary.iter().for_each(|term| {
                            phonetic.insert(term);
                        });
                        phonetic
                    },
                    || {
                        let mut trie = AutomatonTrie::new();
                        vocabulary.iter().for_each(|term| {
                            trie.insert(term);
                        });
                        trie
                    },
                )
            },
        );
        info!(
            dir = %dir.display(),
            terms = tree.term_count(),
            blocks = tree.blocks().len(),
            documents = tree.docs_num(),
            "opened index"
        );

        Ok(Self {
            root: dir.to_path_buf(),
            tree,
            kgrams,
            phonetic,
            trie,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_path(&self, name: &str) -> PathBuf {
        self.root.join(BLOCKS_DIR).join(name)
    }

    fn load_block(&self, name: &str) -> Result<Block> {
        if let Some(block) = self.cache.lock().get(name) {
            return Ok(Arc::clone(block));
        }
        // Read outside the lock; a racing reader at worst decodes twice.
        let block = Arc::new(read_block(&self.block_path(name))?);
        debug!(block = name, terms = block.len(), "loaded block");
        self.cache
            .lock()
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(&block));
        Ok(block)
    }

    pub fn cached_blocks(&self) -> usize {
        self.cache.lock().len()
    }

    /// Decode every block (checking its checksum) and summarize it.
    pub fn verify(&self) -> Result<Vec<BlockSummary>> {
        let counts = self.tree.terms_per_block();
        let mut summaries = Vec::with_capacity(self.tree.blocks().len());
        for (i, name) in self.tree.blocks().iter().enumerate() {
            let path = self.block_path(name);
            let bytes = std::fs::metadata(&path)
                .map_err(|e| Error::io(&path, e))?
                .len();
            let block = read_block(&path)?;
            if block.len() != counts[i] {
                return Err(Error::corrupt(
                    &path,
                    format!("holds {} terms, tree expects {}", block.len(), counts[i]),
                ));
            }
            summaries.push(BlockSummary {
                name: name.clone(),
                terms: block.len(),
                postings: block.values().map(PostingList::docs_num).sum(),
                bytes,
            });
        }
        Ok(summaries)
    }

    pub fn intersect(&self, term1: &str, term2: &str) -> Result<Vec<DocId>> {
        Ok(match (self.posting_list(term1)?, self.posting_list(term2)?) {
            (Some(a), Some(b)) => index::intersect(&a, &b),
            _ => Vec::new(),
        })
    }

    pub fn positional_intersect(&self, term1: &str, term2: &str, k: u32) -> Result<Vec<PositionalMatch>> {
        Ok(match (self.posting_list(term1)?, self.posting_list(term2)?) {
            (Some(a), Some(b)) => index::positional_intersect(&a, &b, k),
            _ => Vec::new(),
        })
    }

    /// Documents containing every term.
    pub fn intersect_terms(&self, terms: &[String]) -> Result<Vec<DocId>> {
        let mut lists = Vec::with_capacity(terms.len());
        for term in terms {
            match self.posting_list(term)? {
                Some(list) => lists.push(list),
                None => return Ok(Vec::new()),
            }
        }
        let refs: Vec<&PostingList> = lists.iter().collect();
        Ok(index::intersect_all(&refs))
    }

    pub fn wildcard_search(&self, pattern: &str) -> Vec<String> {
        self.kgrams.wildcard_search(pattern)
    }

    pub fn kgram_terms_intersect(&self, gram1: &str, gram2: &str) -> Vec<String> {
        self.kgrams.kgram_terms_intersect(gram1, gram2)
    }

    pub fn fuzzy_search(&self, query: &str, max_edits: usize) -> Vec<String> {
        self.trie.fuzzy_search(query, max_edits)
    }

    pub fn phonetic_matches(&self, term: &str) -> Vec<String> {
        self.phonetic.matches(term)
    }

    pub fn rank_by_tfidf_overlap(
        &self,
        term1: &str,
        term2: &str,
        formula: OverlapFormula,
    ) -> Result<Vec<ScoredDoc>> {
        scoring::rank_by_tfidf_overlap(self, term1, term2, formula)
    }

    /// Top `top_k` documents for already analyzed query terms.
    pub fn rank_by_cosine(&self, terms: &[String], top_k: usize) -> Result<Vec<ScoredDoc>> {
        scoring::rank_by_cosine(self, terms, top_k)
    }
}

impl PostingsLookup for DiskIndex {
    fn posting_list(&self, term: &str) -> Result<Option<PostingList>> {
        let Some(name) = self.tree.block_for(term) else {
            return Ok(None);
        };
        let block = self.load_block(name)?;
        Ok(block.get(term).cloned())
    }

    fn document_count(&self) -> usize {
        self.tree.docs_num()
    }

    fn file(&self, doc_id: DocId) -> Option<String> {
        self.tree.documents().file(doc_id).map(str::to_string)
    }

    fn normalized_frequency(&self, doc_id: DocId, term: &str) -> Option<f64> {
        self.tree.documents().frequency(doc_id, term)
    }
}
