//! Packs BookCorpus-style text into fixed-length ALBERT/BERT
//! pretraining examples.
//!
//! The layers, outermost first:
//!
//! * [`cli`]         - clap commands (`inspect`, `stats`, `export`)
//! * [`application`] - workflows behind those commands
//! * [`domain`]      - corpus, example and config types plus the
//!   [`CorpusSource`](domain::traits::CorpusSource) and
//!   [`TokenEncoder`](domain::traits::TokenEncoder) traits
//! * [`data`]        - loader, [`SequencePacker`](data::packer::SequencePacker)
//!   and the burn [`BookCorpusDataset`](data::dataset::BookCorpusDataset)
//! * [`infra`]       - tokenizer.json and config file handling

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;

pub use data::dataset::BookCorpusDataset;
pub use data::packer::SequencePacker;
pub use domain::{
    config::{OverflowPolicy, PackerConfig, PackingMode},
    corpus::{Corpus, CorpusLine},
    example::PackedExample,
    tokens::SpecialTokens,
};
