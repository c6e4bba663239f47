// ============================================================
// Layer 2: Inspect Use Case
// ============================================================
// Two read-only views over a dataset:
//
//   views() - a few consecutive examples with their ids,
//             segment ids and decoded segments
//   stats() - corpus size, tokens per line and how full /
//             how often two-segment the packed examples are
//
// Handy for sanity-checking a tokenizer against a corpus
// before spending GPU hours on it.

use anyhow::{ensure, Result};
use burn::data::dataset::Dataset;
use serde::Serialize;

use crate::data::dataset::BookCorpusDataset;
use crate::data::packer::encode_lines;
use crate::domain::traits::TokenEncoder;

/// Lines per tokenizer batch call when gathering statistics
const STATS_BATCH: usize = 256;

/// One example made readable.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleView {
    pub index:       usize,
    pub input_ids:   Vec<u32>,
    pub segment_ids: Vec<u32>,
    /// Non-padding positions
    pub real_tokens: usize,
    pub sep_count:   usize,
    /// Decoded text of segment A and, when present, segment B
    pub segments:    Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusStats {
    pub lines:                usize,
    pub documents:            usize,
    /// Line count of the longest document
    pub max_document_lines:   usize,
    pub total_tokens:         usize,
    pub mean_line_tokens:     f64,
    pub max_line_tokens:      usize,
    /// Lines that cannot fit in one example on their own
    pub lines_over_budget:    usize,
    pub sampled_examples:     usize,
    pub two_segment_examples: usize,
    /// Mean share of non-padding positions in sampled examples
    pub mean_fill:            f64,
}

pub struct InspectUseCase<E> {
    dataset: BookCorpusDataset<E>,
}

impl<E: TokenEncoder> InspectUseCase<E> {
    pub fn new(dataset: BookCorpusDataset<E>) -> Self {
        Self { dataset }
    }

    /// Up to `count` consecutive examples starting at `start`.
    pub fn views(&self, start: usize, count: usize) -> Result<Vec<ExampleView>> {
        let len = self.dataset.len();
        ensure!(
            start < len,
            "index {start} is out of range for a corpus of {len} lines"
        );

        let end = start.saturating_add(count).min(len);
        (start..end).map(|i| self.view(i)).collect()
    }

    pub fn view(&self, index: usize) -> Result<ExampleView> {
        let example = self.dataset.try_get(index)?;
        let special = self.dataset.special_tokens();

        let seps: Vec<usize> = example
            .input_ids
            .iter()
            .enumerate()
            .filter(|&(_, &id)| id == special.sep_id)
            .map(|(pos, _)| pos)
            .collect();

        // [CLS] A [SEP] or [CLS] A [SEP] B [SEP]
        let encoder = self.dataset.encoder();
        let mut segments = Vec::with_capacity(2);
        if let Some(&first) = seps.first() {
            segments.push(encoder.decode(&example.input_ids[1..first])?);
            if let [_, second] = seps[..] {
                segments.push(encoder.decode(&example.input_ids[first + 1..second])?);
            }
        }

        Ok(ExampleView {
            index,
            real_tokens: example.attention_mask(special.pad_id).iter().sum::<u32>() as usize,
            sep_count:   seps.len(),
            input_ids:   example.input_ids,
            segment_ids: example.segment_ids,
            segments,
        })
    }

    /// Corpus statistics; packed-example figures come from up to
    /// `sample` evenly spaced start positions.
    pub fn stats(&self, sample: usize) -> Result<CorpusStats> {
        let corpus  = self.dataset.corpus();
        let encoder = self.dataset.encoder();
        let config  = self.dataset.config();
        let budget  = config.body_budget();

        let mut stats = CorpusStats {
            lines:     corpus.len(),
            documents: corpus.num_documents(),
            max_document_lines: corpus.document_lengths().into_iter().max().unwrap_or(0),
            ..Default::default()
        };

        // ── Tokens per line ───────────────────────────────────────────────────
        for chunk in corpus.lines().chunks(STATS_BATCH) {
            let texts: Vec<&str> = chunk.iter().map(|l| l.text.as_str()).collect();
            for ids in encode_lines(encoder, &texts)? {
                stats.total_tokens    += ids.len();
                stats.max_line_tokens  = stats.max_line_tokens.max(ids.len());
                if ids.len() > budget {
                    stats.lines_over_budget += 1;
                }
            }
        }
        if stats.lines > 0 {
            stats.mean_line_tokens = stats.total_tokens as f64 / stats.lines as f64;
        }

        // ── Packed examples ───────────────────────────────────────────────────
        if sample > 0 && !corpus.is_empty() {
            let pad_id = self.dataset.special_tokens().pad_id;
            let step   = (corpus.len() / sample).max(1);
            let mut filled = 0usize;

            for index in (0..corpus.len()).step_by(step).take(sample) {
                let example = self.dataset.try_get(index)?;
                let real: u32 = example.attention_mask(pad_id).iter().sum();

                stats.sampled_examples += 1;
                filled += real as usize;
                if example.has_two_segments() {
                    stats.two_segment_examples += 1;
                }
            }
            stats.mean_fill =
                filled as f64 / (stats.sampled_examples * config.seq_len) as f64;
        }

        tracing::debug!("Corpus stats: {:?}", stats);
        Ok(stats)
    }
}
