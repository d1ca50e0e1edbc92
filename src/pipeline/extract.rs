// src/pipeline/extract.rs

//! Archive-to-feature-line extraction pipeline.
//!
//! Shards are visited in the configured order and entries in listing order,
//! one document at a time. Every processed document becomes exactly one
//! output line.

use std::io::{Read, Seek};

use crate::error::Result;
use crate::models::{Config, ErrorPolicy, LabelMarker};
use crate::services::{DocumentParser, LabelTable, Shard, ShardEntry};
use crate::storage::{self, FeatureSink};

/// Counters for a run or a single shard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub shards: usize,
    pub entries_listed: usize,
    pub documents_written: usize,
    pub positive: usize,
    pub negative: usize,
    pub unlabeled: usize,
    pub directories_skipped: usize,
    pub failed_entries: usize,
}

impl RunSummary {
    fn tally(&mut self, label: LabelMarker) {
        self.documents_written += 1;
        match label {
            LabelMarker::Positive => self.positive += 1,
            LabelMarker::Negative => self.negative += 1,
            LabelMarker::Unlabeled => self.unlabeled += 1,
        }
    }

    fn absorb(&mut self, shard: &RunSummary) {
        self.shards += shard.shards;
        self.entries_listed += shard.entries_listed;
        self.documents_written += shard.documents_written;
        self.positive += shard.positive;
        self.negative += shard.negative;
        self.unlabeled += shard.unlabeled;
        self.directories_skipped += shard.directories_skipped;
        self.failed_entries += shard.failed_entries;
    }
}

/// Per-run extraction state shared across shards.
pub struct Extractor<'a> {
    parser: DocumentParser,
    labels: &'a LabelTable,
    sort_entries: bool,
    limit: Option<usize>,
    policy: ErrorPolicy,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &Config, labels: &'a LabelTable) -> Result<Self> {
        Ok(Self {
            parser: DocumentParser::new()?.strict_utf8(config.pipeline.strict_utf8),
            labels,
            sort_entries: config.input.sort_entries,
            limit: config.input.limit,
            policy: config.pipeline.on_document_error,
        })
    }

    /// Stream every document of one shard into the sink.
    pub fn process_shard<R: Read + Seek>(
        &self,
        shard: &mut Shard<R>,
        sink: &mut dyn FeatureSink,
    ) -> Result<RunSummary> {
        let entries = shard.entries(self.sort_entries, self.limit)?;
        let mut summary = RunSummary {
            shards: 1,
            entries_listed: entries.len(),
            ..RunSummary::default()
        };

        log::info!(
            "{}: {} entries ({} listed)",
            shard.path().display(),
            shard.len(),
            entries.len()
        );

        for entry in &entries {
            if entry.base_name().is_empty() {
                summary.directories_skipped += 1;
                continue;
            }

            match self.process_entry(shard, entry, sink) {
                Ok(label) => summary.tally(label),
                Err(e) if e.is_entry_fault() && self.policy == ErrorPolicy::Skip => {
                    summary.failed_entries += 1;
                    log::warn!("Skipping {} in {}: {}", entry.name, shard.path().display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        // Flush per shard.
        sink.flush()?;
        Ok(summary)
    }

    /// Read, parse, label and write one entry.
    ///
    /// Only read and decode failures are entry faults; sink failures abort.
    fn process_entry<R: Read + Seek>(
        &self,
        shard: &mut Shard<R>,
        entry: &ShardEntry,
        sink: &mut dyn FeatureSink,
    ) -> Result<LabelMarker> {
        let bytes = shard.read_entry(entry)?;
        let document_id = entry.base_name();
        let record = self
            .parser
            .parse_bytes(&entry.name, &bytes)?
            .with_document_id(document_id);

        let label = self.labels.resolve(document_id);
        sink.write_record(&record, label)?;
        Ok(label)
    }
}

/// Run extraction over every configured shard into `sink`.
pub fn run_extraction(
    config: &Config,
    labels: &LabelTable,
    sink: &mut dyn FeatureSink,
) -> Result<RunSummary> {
    let extractor = Extractor::new(config, labels)?;
    let mut total = RunSummary::default();

    for path in &config.input.shards {
        let mut shard = Shard::open(path)?;
        let summary = extractor.process_shard(&mut shard, sink)?;
        log::info!(
            "{}: wrote {} documents ({} failed, {} directories skipped)",
            path.display(),
            summary.documents_written,
            summary.failed_entries,
            summary.directories_skipped
        );
        total.absorb(&summary);
    }

    Ok(total)
}

/// Full run: check inputs, load labels, truncate the output, extract.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    config.check_inputs()?;

    let labels = LabelTable::load(&config.input.labels, &config.labels)?;
    let mut sink = storage::open_output(&config.output)?;
    let summary = run_extraction(config, &labels, sink.as_mut())?;
    sink.flush()?;

    log::info!(
        "Done: {} documents from {} shards ({} positive, {} negative, {} unlabeled, {} failed)",
        summary.documents_written,
        summary.shards,
        summary.positive,
        summary.negative,
        summary.unlabeled,
        summary.failed_entries
    );
    Ok(summary)
}
