// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-pass in-memory indexing over a directory.
//!
//! Phases, each a hard barrier:
//!
//! 1. **load**: list and read the input files (parallel, bad files skipped)
//! 2. **tokenize**: analyze every document (parallel)
//! 3. **invert**: cut the token stream into `temp_block_size` slices, index
//!    each slice into its own [`Corpus`] and spill it to `temp/`
//! 4. **merge**: fold the spill files into one accumulator, one at a time,
//!    deleting each after it is read; then compute idf
//! 5. **persist**: write the sorted vocabulary as blocks of
//!    `terms_per_block` terms and the [`BlockTree`] that maps terms to them
//!
//! Final blocks and the tree are written under staging names and moved into
//! place only once everything else succeeded, so a failed build leaves a
//! previous index in the output directory readable.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use tracing::{debug, info};

use super::{load_documents_with_progress, progress_style, tokenize_documents};
use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::index::{Corpus, PostingList};
use crate::storage::{
    block_name, read_block, temp_block_name, write_block, BlockTree, BLOCKS_DIR, TEMP_DIR,
    TREE_FILE,
};
use crate::text::Analyzer;

const STAGING_SUFFIX: &str = ".partial";

/// What a build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub documents: usize,
    pub skipped: usize,
    pub tokens: usize,
    pub terms: usize,
    pub temp_blocks: usize,
    pub blocks: usize,
    pub bytes_written: usize,
}

pub struct SpimiBuilder {
    config: IndexConfig,
    analyzer: Analyzer,
    progress: MultiProgress,
}

impl SpimiBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            analyzer: Analyzer::new(),
            progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Draw phase bars on `progress` instead of discarding them.
    pub fn with_progress(mut self, progress: MultiProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn phase_bar(&self, prefix: &'static str, len: u64) -> ProgressBar {
        let bar = self.progress.add(ProgressBar::new(len));
        bar.set_style(progress_style());
        bar.set_prefix(prefix);
        bar
    }

    /// Build `input` into `output`, returning the block tree and a report.
    pub fn build(&self, input: &Path, output: &Path) -> Result<(BlockTree, BuildReport)> {
        self.config.validate()?;
        if self.config.threads == 0 {
            return self.run(input, output);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("cannot start thread pool: {e}")))?;
        pool.install(|| self.run(input, output))
    }

    fn run(&self, input: &Path, output: &Path) -> Result<(BlockTree, BuildReport)> {
        let mut report = BuildReport::default();

        // 1. load
        let load_bar = self.phase_bar("Loading", 0);
        let loaded = load_documents_with_progress(input, &load_bar)?;
        load_bar.finish_with_message(format!("{} documents", loaded.docs.len()));
        report.documents = loaded.docs.len();
        report.skipped = loaded.skipped.len();
        info!(
            input = %input.display(),
            documents = report.documents,
            skipped = report.skipped,
            "loaded documents"
        );

        // 2. tokenize
        let token_bar = self.phase_bar("Tokenizing", loaded.docs.len() as u64);
        let tokens = tokenize_documents(&self.analyzer, &loaded.docs, &token_bar);
        token_bar.finish_with_message(format!("{} tokens", tokens.len()));
        report.tokens = tokens.len();
        info!(tokens = report.tokens, "tokenized");

        // 3. invert
        let temp_dir = output.join(TEMP_DIR);
        create_dir(&temp_dir)?;
        let slices = tokens.len().div_ceil(self.config.temp_block_size);
        let invert_bar = self.phase_bar("Inverting", slices as u64);
        let mut temp_files = Vec::with_capacity(slices);
        for (i, slice) in tokens.chunks(self.config.temp_block_size).enumerate() {
            let corpus = Corpus::new(self.config.kgram_size);
            corpus.index_tokens(slice);
            let postings = corpus.into_postings();
            let path = temp_dir.join(temp_block_name(i));
            write_block(&path, &postings, self.config.compress_blocks)?;
            debug!(block = i, tokens = slice.len(), terms = postings.len(), "spilled temp block");
            temp_files.push(path);
            invert_bar.inc(1);
        }
        drop(tokens);
        invert_bar.finish_with_message(format!("{} temp blocks", temp_files.len()));
        report.temp_blocks = temp_files.len();
        info!(temp_blocks = report.temp_blocks, "inverted");

        // 4. merge
        let merge_bar = self.phase_bar("Merging", temp_files.len() as u64);
        let mut accumulator = Corpus::new(self.config.kgram_size);
        for doc in &loaded.docs {
            accumulator.register_document(doc.id, &doc.file);
        }
        for path in &temp_files {
            accumulator.merge_postings(read_block(path)?);
            fs::remove_file(path).map_err(|e| Error::io(path, e))?;
            merge_bar.inc(1);
        }
        remove_dir(&temp_dir)?;
        accumulator.compute_statistics();
        let docs_num = accumulator.documents().len();
        report.terms = accumulator.term_count();
        merge_bar.finish_with_message(format!("{} terms", report.terms));
        info!(terms = report.terms, documents = docs_num, "merged temp blocks");

        // 5. persist
        let (postings, table) = accumulator.into_parts();
        let staging = output.join(format!("{BLOCKS_DIR}{STAGING_SUFFIX}"));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;
        }
        create_dir(&staging)?;

        let block_count = postings.len().div_ceil(self.config.terms_per_block);
        let persist_bar = self.phase_bar("Writing", block_count as u64);
        let mut tree = BlockTree::new(docs_num, table);
        let mut group: BTreeMap<String, PostingList> = BTreeMap::new();
        let mut written = 0;
        for (term, list) in postings {
            group.insert(term, list);
            if group.len() == self.config.terms_per_block {
                report.bytes_written += self.flush_block(&staging, &mut tree, &mut group, &mut written)?;
                persist_bar.inc(1);
            }
        }
        if !group.is_empty() {
            report.bytes_written += self.flush_block(&staging, &mut tree, &mut group, &mut written)?;
            persist_bar.inc(1);
        }
        report.blocks = written;

        let tree_staging = output.join(format!("{TREE_FILE}{STAGING_SUFFIX}"));
        tree.write(&tree_staging, self.config.compress_blocks)?;
        report.bytes_written += fs::metadata(&tree_staging)
            .map_err(|e| Error::io(&tree_staging, e))?
            .len() as usize;

        let blocks_dir = output.join(BLOCKS_DIR);
        if blocks_dir.exists() {
            fs::remove_dir_all(&blocks_dir).map_err(|e| Error::io(&blocks_dir, e))?;
        }
        fs::rename(&staging, &blocks_dir).map_err(|e| Error::io(&blocks_dir, e))?;
        let tree_path = output.join(TREE_FILE);
        fs::rename(&tree_staging, &tree_path).map_err(|e| Error::io(&tree_path, e))?;
        persist_bar.finish_with_message(format!("{} blocks", report.blocks));
        info!(
            output = %output.display(),
            blocks = report.blocks,
            bytes = report.bytes_written,
            "persisted index"
        );

        Ok((tree, report))
    }

    fn flush_block(
        &self,
        dir: &Path,
        tree: &mut BlockTree,
        group: &mut BTreeMap<String, PostingList>,
        written: &mut usize,
    ) -> Result<usize> {
        let name = block_name(*written);
        let bytes = write_block(&dir.join(&name), group, self.config.compress_blocks)?;
        tree.add_block(name, group.keys());
        group.clear();
        *written += 1;
        Ok(bytes)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Build `input` into `output` with default settings apart from the two
/// block sizes.
pub fn spimi(input: &Path, output: &Path, temp_block_size: usize, terms_per_block: usize) -> Result<BlockTree> {
    let config = IndexConfig {
        temp_block_size,
        terms_per_block,
        ..IndexConfig::default()
    };
    SpimiBuilder::new(config).build(input, output).map(|(tree, _)| tree)
}
