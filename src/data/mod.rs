// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between an epubtxt directory and one packed
// pretraining example.
//
//   epubtxt/*.txt
//       │
//       ▼
//   EpubTxtLoader      → reads files, one document per file
//       │
//       ▼
//   Preprocessor       → cleans each line
//       │
//       ▼
//   Corpus             → flat (document_id, line) list
//       │
//       ▼
//   SequencePacker     → packs lines from a start index
//       │
//       ▼
//   BookCorpusDataset  → implements burn's Dataset trait
//
// The splitter only matters for export, where start indices
// are divided into train and validation files.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads epubtxt directories into a Corpus
pub mod loader;

/// Cleans individual lines of text
pub mod preprocessor;

/// The sequence-packing algorithm and its helpers
pub mod packer;

/// Implements burn's Dataset trait over packed examples
pub mod dataset;

/// Seeded train/validation split of start indices
pub mod splitter;
