//! Fakes shared by the unit tests.

use anyhow::{bail, Result};

use crate::domain::corpus::Corpus;
use crate::domain::tokens::SpecialTokens;
use crate::domain::traits::TokenEncoder;

pub const PAD: u32 = 0;
pub const UNK: u32 = 1;
pub const CLS: u32 = 2;
pub const SEP: u32 = 3;

/// Whitespace "tokenizer": one id per word, wrapped in [CLS] ... [SEP]
/// the way a BERT post-processor would.
pub struct WordEncoder {
    max_raw_len: usize,
    fail_on:     Option<String>,
}

impl WordEncoder {
    pub fn new() -> Self {
        Self { max_raw_len: 512, fail_on: None }
    }

    pub fn with_max_raw_len(max_raw_len: usize) -> Self {
        Self { max_raw_len, fail_on: None }
    }

    /// Encoder that errors whenever it is asked to encode `text`.
    pub fn failing_on(text: &str) -> Self {
        Self { max_raw_len: 512, fail_on: Some(text.to_string()) }
    }
}

/// Deterministic id for a word, always above the reserved range.
pub fn word_id(word: &str) -> u32 {
    100 + word.bytes().map(u32::from).sum::<u32>()
}

impl TokenEncoder for WordEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        if self.fail_on.as_deref() == Some(text) {
            bail!("cannot encode '{text}'");
        }
        let mut ids = vec![CLS];
        ids.extend(text.split_whitespace().map(word_id));
        ids.truncate(self.max_raw_len - 1);
        ids.push(SEP);
        Ok(ids)
    }

    fn special_tokens(&self) -> SpecialTokens {
        SpecialTokens { unk_id: UNK, cls_id: CLS, sep_id: SEP, pad_id: PAD }
    }
}

pub fn corpus(pairs: &[(usize, &str)]) -> Corpus {
    Corpus::from_pairs(pairs.iter().copied())
}

/// `n` distinct words separated by spaces.
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// A minimal WordLevel tokenizer.json with a BERT post-processor
/// ([CLS] text [SEP]). Special ids: [PAD]=0 [UNK]=1 [CLS]=2 [SEP]=3,
/// vocabulary words start at 4.
pub fn tiny_tokenizer_json(vocab_words: &[&str]) -> String {
    let mut vocab = serde_json::json!({
        "[PAD]": 0,
        "[UNK]": 1,
        "[CLS]": 2,
        "[SEP]": 3,
    });
    for (i, word) in vocab_words.iter().enumerate() {
        vocab[*word] = serde_json::json!(i + 4);
    }

    let special = |id: u32, content: &str| {
        serde_json::json!({
            "id": id, "content": content, "single_word": false,
            "lstrip": false, "rstrip": false, "normalized": false, "special": true
        })
    };

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            special(0, "[PAD]"),
            special(1, "[UNK]"),
            special(2, "[CLS]"),
            special(3, "[SEP]"),
        ],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 3],
            "cls": ["[CLS]", 2]
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    })
    .to_string()
}
