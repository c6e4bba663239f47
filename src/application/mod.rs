// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// Workflows that tie the data and infra layers together for
// the CLI:
//
//   inspect_use_case.rs - render packed examples and corpus
//                         statistics for a human to read
//   export_use_case.rs  - write packed examples to JSONL files
//                         split into train and validation
//
// No printing happens here; results go back to Layer 1.
//
// Reference: Clean Architecture pattern

use anyhow::Result;
use std::path::Path;

use crate::data::dataset::BookCorpusDataset;
use crate::domain::config::PackerConfig;
use crate::infra::tokenizer_store::{HfTokenEncoder, TokenizerStore};

/// Inspection and statistics workflow
pub mod inspect_use_case;

/// JSONL export workflow
pub mod export_use_case;

/// Load the tokenizer, parse the corpus and build the dataset.
pub fn open_dataset(
    corpus_dir: &Path,
    tokenizer:  &Path,
    config:     PackerConfig,
) -> Result<BookCorpusDataset<HfTokenEncoder>> {
    config.validate()?;
    let encoder = TokenizerStore::new(tokenizer).load_encoder(&config)?;
    BookCorpusDataset::from_dir(corpus_dir, encoder, config)
}
