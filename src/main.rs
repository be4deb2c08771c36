// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use indicatif::MultiProgress;
use tracing_subscriber::EnvFilter;

use quarry::storage::TREE_FILE;
use quarry::text::{normalize, LemmaColumns};
use quarry::{
    Analyzer, Config, DiskIndex, Language, Lemmatizer, PostingsLookup, ScoredDoc, SpimiBuilder,
};

mod cli;
use cli::display::{
    centered, format_size, line, pad_left, pad_right, paint, rule, score_value, timing_ms,
    truncate_path, Color, Edge, Frame, Style,
};
use cli::{Cli, Commands, SearchMode};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Quarry(#[from] quarry::Error),

    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = std::result::Result<T, CliError>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Index {
            input,
            output,
            config,
            temp_block_size,
            terms_per_block,
            compress,
            lemmas,
        } => run_index(
            &input,
            &output,
            config.as_deref(),
            temp_block_size,
            terms_per_block,
            compress,
            &lemmas,
        ),
        Commands::Search {
            index,
            query,
            mode,
            limit,
            window,
            max_edits,
            config,
            lemmas,
        } => run_search(
            &index,
            &query,
            mode,
            SearchLimits {
                limit,
                window,
                max_edits,
            },
            config.as_deref(),
            &lemmas,
        ),
        Commands::Inspect { index } => run_inspect(&index),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    Ok(match path {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    })
}

/// Parse `CODE=PATH` pairs into an analyzer with those dictionaries.
fn build_analyzer(lemmas: &[String]) -> CliResult<Analyzer> {
    let mut analyzer = Analyzer::new();
    for spec in lemmas {
        let (code, path) = spec
            .split_once('=')
            .ok_or_else(|| CliError::Usage(format!("expected CODE=PATH, got '{}'", spec)))?;
        let language = Language::from_code(code);
        if language == Language::Unknown {
            return Err(CliError::Usage(format!("unknown language code '{}'", code)));
        }
        let lemmatizer = Lemmatizer::from_file(Path::new(path), LemmaColumns::default())?;
        analyzer = analyzer.with_lemmatizer(language, lemmatizer);
    }
    Ok(analyzer)
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

fn run_index(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    temp_block_size: Option<usize>,
    terms_per_block: Option<usize>,
    compress: bool,
    lemmas: &[String],
) -> CliResult<()> {
    let mut config = load_config(config)?;
    if let Some(size) = temp_block_size {
        config.index.temp_block_size = size;
    }
    if let Some(size) = terms_per_block {
        config.index.terms_per_block = size;
    }
    if compress {
        config.index.compress_blocks = true;
    }
    let analyzer = build_analyzer(lemmas)?;

    let started = Instant::now();
    let (tree, report) = SpimiBuilder::new(config.index)
        .with_analyzer(analyzer)
        .with_progress(MultiProgress::new())
        .build(input, output)?;

    eprintln!();
    eprintln!(
        "✅ Build complete in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    eprintln!(
        "   {} documents │ {} skipped │ {} tokens │ {} terms │ {} blocks │ {}",
        report.documents,
        report.skipped,
        report.tokens,
        tree.term_count(),
        tree.blocks().len(),
        format_size(report.bytes_written as u64)
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

struct SearchLimits {
    limit: usize,
    window: u32,
    max_edits: usize,
}

fn two_terms(terms: &[String], mode: &str) -> CliResult<(String, String)> {
    match terms {
        [first, second, ..] => Ok((first.clone(), second.clone())),
        _ => Err(CliError::Usage(format!(
            "{} search needs two query terms, got {}",
            mode,
            terms.len()
        ))),
    }
}

fn run_search(
    index: &Path,
    query: &str,
    mode: SearchMode,
    limits: SearchLimits,
    config: Option<&Path>,
    lemmas: &[String],
) -> CliResult<()> {
    let config = load_config(config)?;
    let analyzer = build_analyzer(lemmas)?;
    let disk = DiskIndex::open_with_kgram_size(index, config.index.kgram_size)?;

    let started = Instant::now();
    let terms = analyzer.analyze_query(query);
    match mode {
        SearchMode::Cosine => {
            let ranked = disk.rank_by_cosine(&terms, limits.limit)?;
            print_ranked("COSINE", &ranked, started);
        }
        SearchMode::Overlap => {
            let (t1, t2) = two_terms(&terms, "overlap")?;
            let mut ranked =
                disk.rank_by_tfidf_overlap(&t1, &t2, config.scoring.overlap_formula)?;
            ranked.truncate(limits.limit);
            print_ranked("TF-IDF OVERLAP", &ranked, started);
        }
        SearchMode::And => {
            let docs = disk.intersect_terms(&terms)?;
            let files: Vec<String> = docs
                .iter()
                .take(limits.limit)
                .map(|&doc| disk.file(doc).unwrap_or_else(|| doc.to_string()))
                .collect();
            print_lines("DOCUMENTS", &files, docs.len(), started);
        }
        SearchMode::Phrase => {
            let (t1, t2) = two_terms(&terms, "phrase")?;
            let matches = disk.positional_intersect(&t1, &t2, limits.window)?;
            let lines: Vec<String> = matches
                .iter()
                .take(limits.limit)
                .map(|m| {
                    let pairs: Vec<String> =
                        m.pairs.iter().map(|(a, b)| format!("({}, {})", a, b)).collect();
                    format!("{}  {}", pad_right(&m.file, 32), pairs.join(" "))
                })
                .collect();
            print_lines("PHRASE MATCHES", &lines, matches.len(), started);
        }
        SearchMode::Wildcard => {
            let found = disk.wildcard_search(&normalize(query.trim()));
            print_terms("WILDCARD", &disk, &found, limits.limit, started)?;
        }
        SearchMode::Fuzzy => {
            let found = disk.fuzzy_search(&normalize(query.trim()), limits.max_edits);
            print_terms("FUZZY", &disk, &found, limits.limit, started)?;
        }
        SearchMode::Soundex => {
            let found = disk.phonetic_matches(&normalize(query.trim()));
            print_terms("SOUNDEX", &disk, &found, limits.limit, started)?;
        }
    }
    Ok(())
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn print_ranked(label: &str, ranked: &[ScoredDoc], started: Instant) {
    let best = ranked.first().map_or(0.0, |s| s.score);
    rule(Frame::Section, Edge::Top, Some(label));
    if ranked.is_empty() {
        line(Frame::Section, &paint(Color::Gray, Style::Plain, "  no matching documents"));
    }
    for (i, scored) in ranked.iter().enumerate() {
        let rank = paint(Color::Gray, Style::Plain, &format!("{:>3}.", i + 1));
        let file = pad_right(&truncate_path(&scored.file, 56), 56);
        line(Frame::Section, &format!("  {} {}  {}", rank, file, score_value(scored.score, best)));
    }
    rule(Frame::Section, Edge::Middle, Some("TIMING"));
    line(Frame::Section, &format!(
        "  {} results in {} ms",
        ranked.len(),
        timing_ms(elapsed_ms(started))
    ));
    rule(Frame::Section, Edge::Bottom, None);
}

fn print_lines(label: &str, lines: &[String], total: usize, started: Instant) {
    rule(Frame::Section, Edge::Top, Some(label));
    if lines.is_empty() {
        line(Frame::Section, &paint(Color::Gray, Style::Plain, "  no matching documents"));
    }
    for text in lines {
        line(Frame::Section, &format!("  {}", truncate_path(text, 76)));
    }
    rule(Frame::Section, Edge::Middle, Some("TIMING"));
    line(Frame::Section, &format!(
        "  {} of {} shown in {} ms",
        lines.len(),
        total,
        timing_ms(elapsed_ms(started))
    ));
    rule(Frame::Section, Edge::Bottom, None);
}

/// Vocabulary matches with their document frequency.
fn print_terms(
    label: &str,
    disk: &DiskIndex,
    terms: &[String],
    limit: usize,
    started: Instant,
) -> CliResult<()> {
    rule(Frame::Section, Edge::Top, Some(label));
    if terms.is_empty() {
        line(Frame::Section, &paint(Color::Gray, Style::Plain, "  no matching terms"));
    }
    for term in terms.iter().take(limit) {
        let docs = disk.posting_list(term)?.map_or(0, |list| list.docs_num());
        line(Frame::Section, &format!(
            "  {}  {}",
            pad_right(&paint(Color::Cyan, Style::Plain, term), 48),
            paint(Color::Gray, Style::Plain, &format!("{} docs", docs))
        ));
    }
    rule(Frame::Section, Edge::Middle, Some("TIMING"));
    line(Frame::Section, &format!(
        "  {} of {} shown in {} ms",
        terms.len().min(limit),
        terms.len(),
        timing_ms(elapsed_ms(started))
    ));
    rule(Frame::Section, Edge::Bottom, None);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(index: &Path) -> CliResult<()> {
    let started = Instant::now();
    let disk = DiskIndex::open(index)?;
    let summaries = disk.verify()?;
    let tree_path: PathBuf = index.join(TREE_FILE);
    let tree_bytes = fs::metadata(&tree_path)
        .map_err(|e| quarry::Error::Io {
            path: tree_path.clone(),
            source: e,
        })?
        .len();
    let block_bytes: u64 = summaries.iter().map(|s| s.bytes).sum();
    let tree = disk.tree();

    rule(Frame::Banner, Edge::Top, None);
    centered(Frame::Banner, "QUARRY INDEX");
    rule(Frame::Banner, Edge::Middle, None);
    line(Frame::Banner, &format!(
        "  {}",
        paint(Color::Gray, Style::Plain, &truncate_path(&index.display().to_string(), 76))
    ));
    line(Frame::Banner, &format!(
        "  {} documents │ {} terms │ {} blocks │ {} total",
        paint(Color::Yellow, Style::Bold, &tree.docs_num().to_string()),
        paint(Color::Yellow, Style::Bold, &tree.term_count().to_string()),
        paint(Color::Yellow, Style::Bold, &tree.blocks().len().to_string()),
        format_size(tree_bytes + block_bytes)
    ));
    rule(Frame::Banner, Edge::Bottom, None);
    println!();

    rule(Frame::Section, Edge::Top, Some("BLOCKS"));
    line(Frame::Section, &paint(
        Color::Gray,
        Style::Dim,
        &format!(
            "  {}  {}  {}  {}",
            pad_right("BLOCK", 16),
            pad_left("TERMS", 10),
            pad_left("POSTINGS", 12),
            pad_left("SIZE", 12)
        ),
    ));
    for summary in &summaries {
        line(Frame::Section, &format!(
            "  {}  {}  {}  {}",
            pad_right(&summary.name, 16),
            pad_left(&summary.terms.to_string(), 10),
            pad_left(&summary.postings.to_string(), 12),
            pad_left(&format_size(summary.bytes), 12)
        ));
    }
    rule(Frame::Section, Edge::Middle, Some("TREE"));
    line(Frame::Section, &format!(
        "  {}  {}",
        pad_right(TREE_FILE, 16),
        pad_left(&format_size(tree_bytes), 36)
    ));
    rule(Frame::Section, Edge::Bottom, None);

    eprintln!();
    eprintln!(
        "{} {} blocks verified in {} ms",
        paint(Color::Green, Style::Bold, "✓"),
        summaries.len(),
        timing_ms(elapsed_ms(started)).trim()
    );
    Ok(())
}
