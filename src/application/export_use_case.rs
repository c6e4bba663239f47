// ============================================================
// Layer 2: Export Use Case
// ============================================================
// Packs every `stride`-th start position and writes the result
// as JSON Lines, split into train and validation files:
//
//   Step 1: Check options
//   Step 2: Save packer_config.json next to the data
//   Step 3: Split start indices (seeded shuffle)
//   Step 4: Write train.jsonl and val.jsonl
//
// One line per example:
//   {"index":42,"input_ids":[2,...],"segment_ids":[0,...]}
//
// Any failing example aborts the export; a half-written file
// is not something a training run should pick up silently.

use anyhow::{ensure, Context, Result};
use burn::data::dataset::Dataset;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::dataset::BookCorpusDataset;
use crate::data::splitter::split_indices;
use crate::domain::{example::PackedExample, traits::TokenEncoder};
use crate::infra::config_store::ConfigStore;

pub const TRAIN_FILE: &str = "train.jsonl";
pub const VAL_FILE: &str = "val.jsonl";

/// Log a progress line every this many examples
const PROGRESS_EVERY: usize = 10_000;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir:   PathBuf,
    /// Distance between consecutive start positions
    pub stride:       usize,
    /// Share of start positions written to val.jsonl
    pub val_fraction: f64,
    pub seed:         u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir:   PathBuf::from("packed"),
            stride:       1,
            val_fraction: 0.0,
            seed:         42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub train_examples: usize,
    pub val_examples:   usize,
    pub output_dir:     PathBuf,
}

#[derive(Serialize)]
struct ExportRecord<'a> {
    index: usize,
    #[serde(flatten)]
    example: &'a PackedExample,
}

pub struct ExportUseCase<E> {
    dataset: BookCorpusDataset<E>,
    options: ExportOptions,
}

impl<E: TokenEncoder> ExportUseCase<E> {
    pub fn new(dataset: BookCorpusDataset<E>, options: ExportOptions) -> Self {
        Self { dataset, options }
    }

    pub fn execute(&self) -> Result<ExportSummary> {
        let opts = &self.options;

        // ── Step 1: Check options ─────────────────────────────────────────────
        ensure!(opts.stride >= 1, "stride must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&opts.val_fraction),
            "val_fraction must be within [0, 1] (got {})",
            opts.val_fraction
        );

        // ── Step 2: Record the config ─────────────────────────────────────────
        fs::create_dir_all(&opts.output_dir)
            .with_context(|| format!("Cannot create '{}'", opts.output_dir.display()))?;
        ConfigStore::new(&opts.output_dir).save(self.dataset.config())?;

        // ── Step 3: Split start positions ─────────────────────────────────────
        let (train, val) =
            split_indices(self.dataset.len(), opts.stride, opts.val_fraction, opts.seed);
        tracing::info!(
            "Exporting {} training and {} validation examples to '{}'",
            train.len(),
            val.len(),
            opts.output_dir.display()
        );

        // ── Step 4: Write both files ──────────────────────────────────────────
        let train_examples = self.write_jsonl(&opts.output_dir.join(TRAIN_FILE), &train)?;
        let val_examples   = self.write_jsonl(&opts.output_dir.join(VAL_FILE), &val)?;

        Ok(ExportSummary {
            train_examples,
            val_examples,
            output_dir: opts.output_dir.clone(),
        })
    }

    fn write_jsonl(&self, path: &Path, indices: &[usize]) -> Result<usize> {
        let file = File::create(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);

        for (n, &index) in indices.iter().enumerate() {
            let example = self
                .dataset
                .try_get(index)
                .with_context(|| format!("Cannot build example {index}"))?;

            serde_json::to_writer(&mut out, &ExportRecord { index, example: &example })?;
            out.write_all(b"\n")?;

            if (n + 1) % PROGRESS_EVERY == 0 {
                tracing::info!("{}: {}/{} examples", path.display(), n + 1, indices.len());
            }
        }

        out.flush()
            .with_context(|| format!("Cannot flush '{}'", path.display()))?;
        tracing::debug!("Wrote {} examples to '{}'", indices.len(), path.display());
        Ok(indices.len())
    }
}
