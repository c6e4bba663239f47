// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The packer only needs two things from the outside world:
//
//   CorpusSource - something that yields the flat corpus
//                  (EpubTxtLoader reads an epubtxt directory)
//   TokenEncoder - something that turns a line into ids
//                  (HfTokenEncoder wraps a tokenizer.json)
//
// Both are kept narrow so tests can swap in tiny fakes.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::corpus::Corpus;
use crate::domain::tokens::SpecialTokens;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce an ordered (document_id, line) corpus.
pub trait CorpusSource {
    fn load_corpus(&self) -> Result<Corpus>;
}

// ─── TokenEncoder ─────────────────────────────────────────────────────────────
/// Narrow capability interface over a subword tokenizer.
///
/// `encode` returns ids *including* the tokenizer's own leading and
/// trailing markers, truncated to the tokenizer's maximum length.
/// The packer strips the markers itself.
///
/// Implementations must be safe to call from several dataset workers.
pub trait TokenEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// List form of [`encode`](Self::encode).
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.encode(t)).collect()
    }

    fn special_tokens(&self) -> SpecialTokens;

    /// Render ids as text for inspection. The default prints the raw ids.
    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok(ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
