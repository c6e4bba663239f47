// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `inspect`, `stats` and
// `export`, plus the corpus/tokenizer flags they share.
//
// Packer settings come from an optional packer_config.json;
// any flag given on the command line overrides the file.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::export_use_case::ExportOptions;
use crate::domain::config::{OverflowPolicy, PackerConfig};
use crate::infra::config_store::ConfigStore;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print packed examples starting at a corpus index
    Inspect(InspectArgs),

    /// Print corpus and packing statistics
    Stats(StatsArgs),

    /// Write packed examples to train/val JSONL files
    Export(ExportArgs),
}

/// Where the data comes from and how it is packed.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Directory of epubtxt .txt files, one book per file
    #[arg(long, default_value = "data/epubtxt")]
    pub corpus_dir: PathBuf,

    /// tokenizer.json, or a directory containing one
    #[arg(long, default_value = "tokenizer")]
    pub tokenizer: PathBuf,

    /// packer_config.json to start from (defaults otherwise)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Width of every example, [CLS] and final [SEP] included
    #[arg(long)]
    pub seq_len: Option<usize>,

    /// Tokenizer truncation length per line
    #[arg(long)]
    pub max_raw_len: Option<usize>,

    /// What to do with a line longer than seq_len - 2:
    /// truncate, preserve or reject
    #[arg(long)]
    pub overflow: Option<OverflowPolicy>,
}

impl CorpusArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn packer_config(&self) -> Result<PackerConfig> {
        let mut cfg = match &self.config {
            Some(path) => ConfigStore::read_file(path)?,
            None => PackerConfig::default(),
        };

        if let Some(seq_len) = self.seq_len {
            cfg.seq_len = seq_len;
        }
        if let Some(max_raw_len) = self.max_raw_len {
            cfg.max_raw_len = max_raw_len;
        }
        if let Some(overflow) = self.overflow {
            cfg.overflow = overflow;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// First start index to show
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Number of consecutive examples to show
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of evenly spaced examples to pack for the fill/segment figures
    #[arg(long, default_value_t = 1000)]
    pub sample: usize,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Directory for train.jsonl, val.jsonl and packer_config.json
    #[arg(long, default_value = "packed")]
    pub output_dir: PathBuf,

    /// Export every n-th start position
    #[arg(long, default_value_t = 1)]
    pub stride: usize,

    /// Share of start positions written to val.jsonl
    #[arg(long, default_value_t = 0.0)]
    pub val_fraction: f64,

    /// Seed for the train/val shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<&ExportArgs> for ExportOptions {
    fn from(a: &ExportArgs) -> Self {
        ExportOptions {
            output_dir:   a.output_dir.clone(),
            stride:       a.stride,
            val_fraction: a.val_fraction,
            seed:         a.seed,
        }
    }
}
