// src/bin/sieve.rs

//! # Sieve Binary
//!
//! Runs the comment filter over one Parquet file of raw comments:
//!
//! 1.  **Reading Data**: comments are read from the input Parquet file.
//! 2.  **Filtering**: the filter settings (defaults, or a YAML/JSON file) decide
//!     which stages run. Texts from the blacklist store, if given, are matched
//!     by the blacklist stage.
//! 3.  **Writing Output**: retained comments go to the output file and removed
//!     ones, with their reason labels, to the excluded file.
//! 4.  **Auto-blacklisting**: with `--auto-blacklist`, every removed comment is
//!     appended to the blacklist store so the next run drops it early.
//!
//! Per-reason counts and, optionally, the most repeated phrases among the
//! retained comments are logged at the end.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanDuration;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

use comment_sieve::analysis::repeated_phrases;
use comment_sieve::config::sieve::Args;
use comment_sieve::config::{load_filter_config, FilterConfiguration, ParquetInputConfig};
use comment_sieve::pipeline::models::Capabilities;
use comment_sieve::pipeline::readers::ParquetReader;
use comment_sieve::pipeline::writers::{BaseWriter, ParquetWriter};
use comment_sieve::pipeline::CommentFilterPipeline;
use comment_sieve::store::{CommentStore, StoredComment};
use comment_sieve::utils::common::{create_progress_bar, init_tracing, write_metrics_file};

const PHRASE_MIN_WORDS: usize = 3;
const PHRASE_MAX_WORDS: usize = 8;

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_json, args.log_dir.as_deref());

    let config = match &args.config {
        Some(path) => load_filter_config(path)
            .with_context(|| format!("Loading filter settings from {}", path.display()))?,
        None => FilterConfiguration::default(),
    }
    .clamped();

    if args.validate_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let start_time = Instant::now();
    info!("Sieve started.");
    info!("Input file: {}", args.input_file.display());
    info!("Output file: {}", args.output_file.display());
    info!("Excluded file: {}", args.excluded_file.display());

    // 1. Read comments
    let read_pb = create_progress_bar(
        0,
        "Reading comments",
        "{spinner:.green} [{elapsed_precise}] {msg} {pos}",
    );
    let reader = ParquetReader::new(ParquetInputConfig::new(
        args.input_file.to_string_lossy().to_string(),
    ));
    let mut comments = Vec::new();
    for comment in reader
        .into_comments()
        .with_context(|| format!("Opening {}", args.input_file.display()))?
    {
        comments.push(comment.context("Reading comment batch")?);
        read_pb.inc(1);
    }
    read_pb.finish_with_message(format!("Read {} comments", comments.len()));

    // 2. Blacklist
    let store = args.blacklist_store.as_ref().map(CommentStore::new);
    let blacklist: HashSet<String> = match &store {
        Some(store) if config.blacklist_match => store
            .normalized_texts()
            .with_context(|| format!("Loading blacklist from {}", store.path().display()))?,
        _ => HashSet::new(),
    };
    info!(entries = blacklist.len(), "Blacklist loaded");

    // 3. Filter
    let pipeline = CommentFilterPipeline::new(config, Capabilities::default());
    let outcome = pipeline.filter(comments, &blacklist);
    for warning in &outcome.warnings {
        warn!("{}", warning);
    }

    // 4. Write results
    let mut retained_writer = ParquetWriter::new(&args.output_file)
        .with_context(|| format!("Creating {}", args.output_file.display()))?;
    retained_writer.write_batch(&outcome.retained)?;
    retained_writer.close()?;

    let mut excluded_writer = ParquetWriter::new(&args.excluded_file)
        .with_context(|| format!("Creating {}", args.excluded_file.display()))?;
    excluded_writer.write_removed(&outcome.removed)?;
    excluded_writer.close()?;

    // 5. Auto-blacklist
    if args.auto_blacklist {
        if let Some(store) = &store {
            let report_path = args.report_path.as_deref();
            let added = store
                .add_many(
                    outcome
                        .removed
                        .iter()
                        .map(|removed| StoredComment::from_removed(removed, report_path)),
                )
                .with_context(|| format!("Updating blacklist {}", store.path().display()))?;
            info!(added, "Auto-blacklisted removed comments");
        }
    }

    // Final Summary
    info!("--------------------");
    info!("Filter Summary:");
    info!("  Comments read: {}", outcome.input_len());
    info!("  Retained: {}", outcome.retained.len());
    info!("  Removed: {}", outcome.removed.len());
    for (reason, count) in outcome.reason_counts() {
        info!("    {:<20} {}", reason.label(), count);
    }

    if args.phrases > 0 {
        let texts: Vec<&str> = outcome.retained.iter().map(|c| c.text.as_str()).collect();
        let phrases = repeated_phrases(&texts, PHRASE_MIN_WORDS, PHRASE_MAX_WORDS, args.phrases);
        info!("Top repeated phrases:");
        for phrase in phrases {
            info!("  {:>4}x  {}", phrase.count, phrase.phrase);
        }
    }

    if let Some(path) = &args.metrics_file {
        write_metrics_file(path).with_context(|| format!("Writing metrics to {}", path.display()))?;
    }

    info!("Total time: {}", HumanDuration(start_time.elapsed()));
    info!("--------------------");
    Ok(())
}
