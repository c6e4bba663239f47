// ============================================================
// Layer 6: Tokenizer Store
// ============================================================
// Loads a pretrained HuggingFace `tokenizer.json` and adapts it
// to the packer's TokenEncoder interface.
//
// What the adapter guarantees:
//   - encode() adds the tokenizer's own markers ([CLS] ... [SEP]
//     for a BERT post-processor); the packer strips them again
//   - every encoding is truncated to `max_raw_len` ids, markers
//     included (512 by default)
//   - the four reserved ids are resolved once, by token string,
//     and a missing one is an error at load time
//
// This crate never trains a tokenizer; build one with the
// `tokenizers` library or take a published BERT/ALBERT vocab.
//
// Reference: tokenizers crate documentation

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tokenizers::{utils::truncation::TruncationParams, Tokenizer};

use crate::domain::{
    config::{PackerConfig, SpecialTokenNames},
    tokens::SpecialTokens,
    traits::TokenEncoder,
};

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    /// Point the store at a `tokenizer.json` file, or at a directory
    /// that contains one.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.is_dir() {
            path.join("tokenizer.json")
        } else {
            path.to_path_buf()
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the raw tokenizer from disk
    pub fn load(&self) -> Result<Tokenizer> {
        tracing::info!("Loading tokenizer from '{}'", self.path.display());
        Tokenizer::from_file(&self.path).map_err(|e| {
            anyhow!("Cannot load tokenizer from '{}': {}", self.path.display(), e)
        })
    }

    /// Load the tokenizer and wrap it for the packer.
    pub fn load_encoder(&self, config: &PackerConfig) -> Result<HfTokenEncoder> {
        HfTokenEncoder::new(self.load()?, &config.special_tokens, config.max_raw_len)
    }
}

/// `TokenEncoder` backed by a HuggingFace tokenizer.
pub struct HfTokenEncoder {
    tokenizer: Tokenizer,
    special:   SpecialTokens,
}

impl HfTokenEncoder {
    pub fn new(
        mut tokenizer: Tokenizer,
        names:         &SpecialTokenNames,
        max_raw_len:   usize,
    ) -> Result<Self> {
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_raw_len,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Cannot enable truncation: {e}"))?;

        let special = SpecialTokens {
            unk_id: resolve(&tokenizer, &names.unk)?,
            cls_id: resolve(&tokenizer, &names.cls)?,
            sep_id: resolve(&tokenizer, &names.sep)?,
            pad_id: resolve(&tokenizer, &names.pad)?,
        };
        tracing::debug!("Special token ids: {:?}", special);

        Ok(Self { tokenizer, special })
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

fn resolve(tokenizer: &Tokenizer, token: &str) -> Result<u32> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| anyhow!("Tokenizer vocabulary has no '{token}' token"))
}

impl TokenEncoder for HfTokenEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;
        Ok(enc.get_ids().to_vec())
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<u32>>> {
        let encs = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;
        Ok(encs.iter().map(|e| e.get_ids().to_vec()).collect())
    }

    fn special_tokens(&self) -> SpecialTokens {
        self.special
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, false)
            .map_err(|e| anyhow!("Decoding error: {e}"))
    }
}
