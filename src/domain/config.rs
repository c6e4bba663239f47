// ============================================================
// Layer 3: Packer Configuration
// ============================================================
// Everything that decides the shape of a packed example.
// Serialisable so an export directory records exactly how its
// examples were built. Every field has a default, so `{}` is
// a valid config file.
//
// Reference: Rust Book §6 (Enums), serde derive documentation

use std::{fmt, str::FromStr};

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// How lines are grouped into an example.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Greedily pack consecutive sentences, crossing at most one
    /// document boundary per example.
    #[default]
    FullSentences,
}

/// What to do when the first line of an example alone does not fit
/// in `seq_len - 2` tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Cut the line so the example is exactly `seq_len` long
    #[default]
    Truncate,
    /// Keep the whole line; the example is longer than `seq_len`
    /// and carries no padding
    Preserve,
    /// Fail the example
    Reject,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "truncate" => Ok(Self::Truncate),
            "preserve" => Ok(Self::Preserve),
            "reject"   => Ok(Self::Reject),
            other => Err(format!(
                "unknown overflow policy '{other}' (expected truncate, preserve or reject)"
            )),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Truncate => "truncate",
            Self::Preserve => "preserve",
            Self::Reject   => "reject",
        };
        f.write_str(name)
    }
}

/// Token strings used to look up the reserved ids in the tokenizer vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialTokenNames {
    pub unk: String,
    pub cls: String,
    pub sep: String,
    pub pad: String,
}

impl Default for SpecialTokenNames {
    fn default() -> Self {
        Self {
            unk: "[UNK]".to_string(),
            cls: "[CLS]".to_string(),
            sep: "[SEP]".to_string(),
            pad: "[PAD]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Width of every example, [CLS] and final [SEP] included
    #[serde(default = "default_seq_len")]
    pub seq_len: usize,

    /// Tokenizer truncation length per line, its own markers included
    #[serde(default = "default_max_raw_len")]
    pub max_raw_len: usize,

    #[serde(default)]
    pub mode: PackingMode,

    #[serde(default)]
    pub overflow: OverflowPolicy,

    #[serde(default)]
    pub special_tokens: SpecialTokenNames,
}

fn default_seq_len() -> usize {
    512
}

fn default_max_raw_len() -> usize {
    512
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            seq_len:        default_seq_len(),
            max_raw_len:    default_max_raw_len(),
            mode:           PackingMode::default(),
            overflow:       OverflowPolicy::default(),
            special_tokens: SpecialTokenNames::default(),
        }
    }
}

impl PackerConfig {
    /// Config with the given sequence length and defaults elsewhere.
    pub fn with_seq_len(seq_len: usize) -> Self {
        Self { seq_len, ..Default::default() }
    }

    /// Tokens available for packed text: [CLS] and the final [SEP]
    /// take two of the `seq_len` slots.
    pub fn body_budget(&self) -> usize {
        self.seq_len.saturating_sub(2)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.seq_len >= 2,
            "seq_len must leave room for [CLS] and [SEP] (got {})",
            self.seq_len
        );
        ensure!(
            self.max_raw_len >= 2,
            "max_raw_len must cover the tokenizer's own markers (got {})",
            self.max_raw_len
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let cfg: PackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PackerConfig::default());
        assert_eq!(cfg.seq_len, 512);
        assert_eq!(cfg.overflow, OverflowPolicy::Truncate);
        assert_eq!(cfg.special_tokens.sep, "[SEP]");
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "seq_len": 128,
            "overflow": "reject",
            "mode": "full_sentences",
            "special_tokens": { "cls": "<s>" }
        }"#;
        let cfg: PackerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.seq_len, 128);
        assert_eq!(cfg.max_raw_len, 512);
        assert_eq!(cfg.overflow, OverflowPolicy::Reject);
        assert_eq!(cfg.special_tokens.cls, "<s>");
        // Names not given keep their BERT defaults
        assert_eq!(cfg.special_tokens.pad, "[PAD]");
    }

    #[test]
    fn test_overflow_policy_from_str() {
        assert_eq!("preserve".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Preserve));
        assert_eq!(OverflowPolicy::Reject.to_string(), "reject");
        assert!("clip".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(PackerConfig::with_seq_len(2).validate().is_ok());
        assert!(PackerConfig::with_seq_len(1).validate().is_err());

        let cfg = PackerConfig { max_raw_len: 1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_body_budget() {
        assert_eq!(PackerConfig::with_seq_len(12).body_budget(), 10);
    }
}
