// ============================================================
// Layer 4: Corpus Loader (BookCorpus epubtxt)
// ============================================================
// Reads a BookCorpus-style `epubtxt` directory into the flat
// (document_id, line) corpus the packer scans.
//
//   epubtxt/
//     a-tale-of-two-cities.txt   → doc 0
//     moby-dick.txt              → doc 1
//     ...
//
// Every `.txt` file is one document. Files are visited in
// sorted order so document ids are stable across runs. Each
// line goes through the Preprocessor; blank lines are dropped.
// A file that yields no lines gets no document id at all.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading Files)

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::corpus::{Corpus, CorpusLine};
use crate::domain::traits::CorpusSource;

/// Loads every `.txt` file of a directory as one document.
pub struct EpubTxtLoader {
    dir:          PathBuf,
    preprocessor: Preprocessor,
}

impl EpubTxtLoader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir:          dir.as_ref().to_path_buf(),
            preprocessor: Preprocessor::new(),
        }
    }

    /// Sorted list of the `.txt` files in the directory.
    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("txt"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;

        Ok(text
            .lines()
            .map(|line| self.preprocessor.clean_line(line))
            .filter(|line| !line.is_empty())
            .collect())
    }
}

impl CorpusSource for EpubTxtLoader {
    fn load_corpus(&self) -> Result<Corpus> {
        if !self.dir.is_dir() {
            bail!("Corpus directory '{}' does not exist", self.dir.display());
        }

        let paths = self.document_paths()?;
        if paths.is_empty() {
            tracing::warn!(
                "No .txt files in '{}', corpus is empty",
                self.dir.display()
            );
        }

        let mut lines     = Vec::new();
        let mut documents = Vec::new();

        for path in &paths {
            match self.read_lines(path) {
                Ok(doc_lines) if doc_lines.is_empty() => {
                    tracing::debug!("Skipping empty document '{}'", path.display());
                }
                Ok(doc_lines) => {
                    let doc_id = documents.len();
                    tracing::debug!(
                        "Loaded: {} ({} lines) as doc {}",
                        path.display(),
                        doc_lines.len(),
                        doc_id
                    );
                    lines.extend(doc_lines.into_iter().map(|text| CorpusLine::new(doc_id, text)));
                    documents.push(document_name(path));
                }
                // One unreadable book should not sink the whole corpus
                Err(e) => {
                    tracing::warn!("Skipping '{}': {:#}", path.display(), e);
                }
            }
        }

        tracing::info!(
            "Parsed {} lines from {} documents in '{}'",
            lines.len(),
            documents.len(),
            self.dir.display()
        );
        Ok(Corpus::new(lines, documents))
    }
}

fn document_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}
