use std::path::Path;

use anyhow::Result;
use burn::data::dataset::Dataset;

use crate::data::loader::EpubTxtLoader;
use crate::data::packer::SequencePacker;
use crate::domain::{
    config::PackerConfig,
    corpus::Corpus,
    example::PackedExample,
    tokens::SpecialTokens,
    traits::{CorpusSource, TokenEncoder},
};

/// BookCorpus exposed as an ALBERT/BERT pretraining dataset.
///
/// Every corpus line is a possible start position, so `len()` is the
/// corpus line count. Examples are packed on demand and never cached;
/// the corpus and the special ids are fixed at construction.
pub struct BookCorpusDataset<E> {
    corpus:  Corpus,
    encoder: E,
    config:  PackerConfig,
    special: SpecialTokens,
}

impl<E: TokenEncoder> BookCorpusDataset<E> {
    pub fn new(corpus: Corpus, encoder: E, config: PackerConfig) -> Result<Self> {
        config.validate()?;
        let special = encoder.special_tokens();

        tracing::info!(
            "Dataset ready: {} start positions over {} documents (seq_len={}, overflow={})",
            corpus.len(),
            corpus.num_documents(),
            config.seq_len,
            config.overflow
        );
        Ok(Self { corpus, encoder, config, special })
    }

    /// Parse the corpus once from `source` and wrap it.
    pub fn from_source<S>(source: &S, encoder: E, config: PackerConfig) -> Result<Self>
    where
        S: CorpusSource + ?Sized,
    {
        Self::new(source.load_corpus()?, encoder, config)
    }

    /// Parse an epubtxt directory and wrap it.
    pub fn from_dir(dir: impl AsRef<Path>, encoder: E, config: PackerConfig) -> Result<Self> {
        Self::from_source(&EpubTxtLoader::new(dir), encoder, config)
    }

    pub fn packer(&self) -> SequencePacker<'_, E> {
        SequencePacker::new(&self.corpus, &self.encoder, &self.config, self.special)
    }

    /// Build the example at `index`, propagating range and tokenizer errors.
    pub fn try_get(&self, index: usize) -> Result<PackedExample> {
        self.packer().build(index)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    pub fn special_tokens(&self) -> SpecialTokens {
        self.special
    }
}

impl<E: TokenEncoder> Dataset<PackedExample> for BookCorpusDataset<E> {
    fn get(&self, index: usize) -> Option<PackedExample> {
        if index >= self.corpus.len() {
            return None;
        }
        // burn's trait has no error channel
        match self.try_get(index) {
            Ok(example) => Some(example),
            Err(e) => {
                tracing::error!("Cannot build example {}: {:#}", index, e);
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }
}
