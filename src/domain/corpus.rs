// ============================================================
// Layer 3: Corpus Domain Type
// ============================================================
// A corpus is every document of the dataset flattened into one
// ordered list of lines. Each line remembers which document it
// came from, so the packer can see where one book ends and the
// next one begins.
//
//   doc 0 ── line 0   "The sun rose slowly."
//         ── line 1   "Nobody was awake."
//   doc 1 ── line 2   "Chapter One"
//         ── line 3   ...
//
// Lines of one document are always contiguous and keep their
// original order. The corpus is parsed once and never mutated.

use serde::{Deserialize, Serialize};

/// One non-empty line of text tagged with its document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusLine {
    /// Index into `Corpus::documents`
    pub doc_id: usize,

    /// Cleaned line text
    pub text: String,
}

impl CorpusLine {
    pub fn new(doc_id: usize, text: impl Into<String>) -> Self {
        Self { doc_id, text: text.into() }
    }
}

/// The whole corpus as a flat list of lines.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    lines:     Vec<CorpusLine>,
    /// Source name of every document, indexed by doc_id
    documents: Vec<String>,
}

impl Corpus {
    /// Build a corpus from already-parsed lines and document names.
    pub fn new(lines: Vec<CorpusLine>, documents: Vec<String>) -> Self {
        Self { lines, documents }
    }

    /// Build an in-memory corpus from `(doc_id, text)` pairs.
    ///
    /// Documents get synthetic names (`doc-0`, `doc-1`, ...) covering
    /// every id up to the largest one seen.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let lines: Vec<CorpusLine> = pairs
            .into_iter()
            .map(|(doc_id, text)| CorpusLine::new(doc_id, text))
            .collect();

        let num_docs = lines.iter().map(|l| l.doc_id + 1).max().unwrap_or(0);
        let documents = (0..num_docs).map(|i| format!("doc-{i}")).collect();

        Self { lines, documents }
    }

    /// Number of lines (and therefore of addressable start positions)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&CorpusLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[CorpusLine] {
        &self.lines
    }

    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn document_name(&self, doc_id: usize) -> Option<&str> {
        self.documents.get(doc_id).map(String::as_str)
    }

    /// Line count of every document, indexed by doc_id.
    pub fn document_lengths(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.documents.len()];
        for line in &self.lines {
            if let Some(c) = counts.get_mut(line.doc_id) {
                *c += 1;
            }
        }
        counts
    }
}
