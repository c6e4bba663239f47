// ============================================================
// Layer 4: Sequence Packer
// ============================================================
// Turns a start index into one fixed-width pretraining example
// using the "full sentences" strategy: consecutive lines are
// concatenated, across a document boundary if needed, until the
// length budget is used up.
//
//   corpus:  (0) hello world | (0) foo bar | (1) baz qux | (1) ...
//                 index ─┘
//
//   body:    hello world foo bar [SEP] baz qux
//   output:  [CLS] hello world foo bar [SEP] baz qux [SEP] [PAD]...
//   segment:   0     0     0    0   0    0    1   1    1     0
//
// Scan rules, applied line by line from the start index:
//   1. The last corpus line never enters the scan.
//   2. A line that would make the body reach seq_len - 2 ends
//      the scan (the first line is always admitted).
//   3. A document change inserts one [SEP] before the line.
//   4. A second document change ends the scan, so an example
//      never holds more than two separators.
//
// Reference: Devlin et al. (2019) BERT, Lan et al. (2020) ALBERT
//            Liu et al. (2019) RoBERTa §4.2 (FULL-SENTENCES)

use anyhow::{anyhow, bail, Result};

use crate::domain::{
    config::{OverflowPolicy, PackerConfig, PackingMode},
    corpus::Corpus,
    example::PackedExample,
    tokens::SpecialTokens,
    traits::TokenEncoder,
};

// ─── Encode helpers ───────────────────────────────────────────────────────────

/// Encode one line and drop the tokenizer's own leading/trailing markers.
pub fn encode_line<E>(encoder: &E, text: &str) -> Result<Vec<u32>>
where
    E: TokenEncoder + ?Sized,
{
    Ok(strip_markers(encoder.encode(text)?))
}

/// List form of [`encode_line`], one tokenizer batch call.
pub fn encode_lines<E>(encoder: &E, texts: &[&str]) -> Result<Vec<Vec<u32>>>
where
    E: TokenEncoder + ?Sized,
{
    Ok(encoder
        .encode_batch(texts)?
        .into_iter()
        .map(strip_markers)
        .collect())
}

fn strip_markers(ids: Vec<u32>) -> Vec<u32> {
    match ids.len() {
        0..=2 => Vec::new(),
        n     => ids[1..n - 1].to_vec(),
    }
}

// ─── Formatting helpers ───────────────────────────────────────────────────────

/// `[CLS] body [SEP]`, right-padded to `seq_len`.
///
/// A body longer than `seq_len - 2` is kept as is; padding then
/// becomes a no-op and the result is longer than `seq_len`.
pub fn to_bert_input(body: &[u32], special: &SpecialTokens, seq_len: usize) -> Vec<u32> {
    let mut ids = Vec::with_capacity(seq_len.max(body.len() + 2));
    ids.push(special.cls_id);
    ids.extend_from_slice(body);
    ids.push(special.sep_id);

    if ids.len() < seq_len {
        ids.resize(seq_len, special.pad_id);
    }
    ids
}

/// Segment ids for a formatted sequence.
///
/// All zero unless there are exactly two separators, in which case
/// the positions after the first one up to and including the second
/// one are 1.
pub fn token_ids_to_segment_ids(token_ids: &[u32], sep_id: u32) -> Vec<u32> {
    let mut segment_ids = vec![0u32; token_ids.len()];

    let seps: Vec<usize> = token_ids
        .iter()
        .enumerate()
        .filter(|&(_, &id)| id == sep_id)
        .map(|(pos, _)| pos)
        .collect();

    if let [first, second] = seps[..] {
        segment_ids[first + 1..=second].fill(1);
    }
    segment_ids
}

// ─── SequencePacker ───────────────────────────────────────────────────────────

/// Borrowed view over a corpus and a tokenizer that builds examples.
///
/// Holds no mutable state, so `build` is a pure function of the
/// corpus and the index.
pub struct SequencePacker<'a, E: ?Sized> {
    corpus:  &'a Corpus,
    encoder: &'a E,
    config:  &'a PackerConfig,
    special: SpecialTokens,
}

impl<'a, E> SequencePacker<'a, E>
where
    E: TokenEncoder + ?Sized,
{
    pub fn new(
        corpus:  &'a Corpus,
        encoder: &'a E,
        config:  &'a PackerConfig,
        special: SpecialTokens,
    ) -> Self {
        Self { corpus, encoder, config, special }
    }

    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    /// Build the example that starts at corpus line `index`.
    pub fn build(&self, index: usize) -> Result<PackedExample> {
        match self.config.mode {
            PackingMode::FullSentences => self.build_full_sentences(index),
        }
    }

    fn build_full_sentences(&self, index: usize) -> Result<PackedExample> {
        let total = self.corpus.len();
        let start = self.corpus.line(index).ok_or_else(|| {
            anyhow!("index {index} is out of range for a corpus of {total} lines")
        })?;

        let budget      = self.config.body_budget();
        let mut body    = Vec::new();
        let mut prev_doc   = start.doc_id;
        let mut boundaries = 0usize;
        let mut cursor     = index;

        loop {
            if cursor + 1 >= total {
                break;
            }

            let line    = &self.corpus.lines()[cursor];
            let crosses = line.doc_id != prev_doc;
            if crosses && boundaries == 1 {
                break;
            }

            let tokens = encode_line(self.encoder, &line.text)?;
            if cursor != index && body.len() + tokens.len() >= budget {
                break;
            }

            if crosses {
                body.push(self.special.sep_id);
                boundaries += 1;
            }
            body.extend_from_slice(&tokens);
            prev_doc = line.doc_id;
            cursor  += 1;
        }

        // Only an admitted first line can push the body past the budget
        if body.len() > budget {
            match self.config.overflow {
                OverflowPolicy::Truncate => {
                    tracing::debug!(
                        "Example {}: truncating {} tokens to {}",
                        index,
                        body.len(),
                        budget
                    );
                    body.truncate(budget);
                }
                OverflowPolicy::Preserve => {
                    tracing::debug!(
                        "Example {}: keeping {} tokens, {} over budget",
                        index,
                        body.len(),
                        body.len() - budget
                    );
                }
                OverflowPolicy::Reject => bail!(
                    "line {} encodes to {} tokens, more than the {} that fit in a {}-token example",
                    index,
                    body.len(),
                    budget,
                    self.config.seq_len
                ),
            }
        }

        let input_ids   = to_bert_input(&body, &self.special, self.config.seq_len);
        let segment_ids = token_ids_to_segment_ids(&input_ids, self.special.sep_id);
        Ok(PackedExample::new(input_ids, segment_ids))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{corpus, word_id, words, WordEncoder, CLS, PAD, SEP};

    fn build(pairs: &[(usize, &str)], config: &PackerConfig, index: usize) -> Result<PackedExample> {
        let corpus  = corpus(pairs);
        let encoder = WordEncoder::new();
        let packer  = SequencePacker::new(&corpus, &encoder, config, encoder.special_tokens());
        packer.build(index)
    }

    fn ids(text: &str) -> Vec<u32> {
        text.split_whitespace().map(word_id).collect()
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_line_strips_markers() {
        let enc = WordEncoder::new();
        assert_eq!(encode_line(&enc, "hello world").unwrap(), ids("hello world"));
        // Only [CLS] [SEP] come back for an empty line
        assert!(encode_line(&enc, "").unwrap().is_empty());
    }

    #[test]
    fn test_encode_lines_batch() {
        let enc = WordEncoder::new();
        let out = encode_lines(&enc, &["a b", "c"]).unwrap();
        assert_eq!(out, vec![ids("a b"), ids("c")]);
    }

    #[test]
    fn test_encode_line_respects_raw_truncation() {
        // 512 raw ids, two of them markers
        let enc = WordEncoder::new();
        let out = encode_line(&enc, &words(600)).unwrap();
        assert_eq!(out.len(), 510);
    }

    #[test]
    fn test_to_bert_input_pads() {
        let special = WordEncoder::new().special_tokens();
        assert_eq!(
            to_bert_input(&[7, 8], &special, 6),
            vec![CLS, 7, 8, SEP, PAD, PAD]
        );
    }

    #[test]
    fn test_to_bert_input_does_not_truncate() {
        let special = WordEncoder::new().special_tokens();
        assert_eq!(to_bert_input(&[7, 8, 9], &special, 3).len(), 5);
    }

    #[test]
    fn test_segment_ids_two_separators() {
        let seg = token_ids_to_segment_ids(&[CLS, 7, SEP, 8, 9, SEP, PAD], SEP);
        assert_eq!(seg, vec![0, 0, 0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_segment_ids_one_or_three_separators_are_zero() {
        assert_eq!(token_ids_to_segment_ids(&[CLS, 7, SEP, PAD], SEP), vec![0; 4]);
        assert_eq!(
            token_ids_to_segment_ids(&[CLS, SEP, 7, SEP, 8, SEP], SEP),
            vec![0; 6]
        );
    }

    // ── packing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_last_line_is_never_scanned() {
        // Index 2 is the last line, so the scan stops before doc 1
        let pairs  = [(0, "hello world"), (0, "foo bar"), (1, "baz qux")];
        let ex     = build(&pairs, &PackerConfig::with_seq_len(12), 0).unwrap();

        let mut expected = vec![CLS];
        expected.extend(ids("hello world foo bar"));
        expected.push(SEP);
        expected.resize(12, PAD);

        assert_eq!(ex.input_ids, expected);
        assert_eq!(ex.segment_ids, vec![0; 12]);
    }

    #[test]
    fn test_document_boundary_inserts_separator() {
        let pairs = [
            (0, "hello world"),
            (0, "foo bar"),
            (1, "baz qux"),
            (1, "quux corge"),
        ];
        let ex = build(&pairs, &PackerConfig::with_seq_len(12), 0).unwrap();

        let mut expected = vec![CLS];
        expected.extend(ids("hello world foo bar"));
        expected.push(SEP);
        expected.extend(ids("baz qux"));
        expected.push(SEP);
        expected.extend([PAD, PAD, PAD]);

        assert_eq!(ex.input_ids, expected);
        assert_eq!(ex.segment_ids, vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_last_index_gives_minimal_example() {
        let pairs = [(0, "a b"), (1, "c d")];
        let ex    = build(&pairs, &PackerConfig::with_seq_len(6), 1).unwrap();

        assert_eq!(ex.input_ids, vec![CLS, SEP, PAD, PAD, PAD, PAD]);
        assert_eq!(ex.segment_ids, vec![0; 6]);
    }

    #[test]
    fn test_out_of_range_index_fails() {
        assert!(build(&[], &PackerConfig::with_seq_len(8), 0).is_err());
        assert!(build(&[(0, "a")], &PackerConfig::with_seq_len(8), 1).is_err());
    }

    #[test]
    fn test_budget_stops_before_reaching_seq_len_minus_two() {
        // Budget 6: 2 + 2 = 4 fits, 4 + 2 = 6 reaches it and stops
        let pairs = [(0, "a b"), (0, "c d"), (0, "e f"), (0, "g h"), (0, "i j")];
        let ex    = build(&pairs, &PackerConfig::with_seq_len(8), 0).unwrap();

        let mut expected = vec![CLS];
        expected.extend(ids("a b c d"));
        expected.extend([SEP, PAD, PAD]);
        assert_eq!(ex.input_ids, expected);
    }

    #[test]
    fn test_separator_is_not_counted_against_budget() {
        // Budget 4: "a b" + "c" = 3 < 4, then [SEP] fills the last slot
        let pairs = [(0, "a b"), (1, "c"), (1, "d")];
        let ex    = build(&pairs, &PackerConfig::with_seq_len(6), 0).unwrap();

        assert_eq!(ex.len(), 6);
        assert_eq!(ex.sep_count(SEP), 2);
        assert_eq!(*ex.input_ids.last().unwrap(), SEP);
    }

    #[test]
    fn test_second_boundary_ends_scan() {
        let pairs = [(0, "a"), (1, "b"), (2, "c"), (2, "d")];
        let cfg   = PackerConfig::with_seq_len(32);

        let ex = build(&pairs, &cfg, 0).unwrap();
        assert_eq!(&ex.input_ids[..5], &[CLS, word_id("a"), SEP, word_id("b"), SEP]);
        assert_eq!(ex.sep_count(SEP), 2);

        // Starting inside doc 1 the same rule applies to doc 2
        let ex = build(&pairs, &cfg, 1).unwrap();
        assert_eq!(&ex.input_ids[..5], &[CLS, word_id("b"), SEP, word_id("c"), SEP]);
    }

    #[test]
    fn test_overflow_truncate() {
        let long  = words(20);
        let pairs = [(0, long.as_str()), (0, "x y")];
        let ex    = build(&pairs, &PackerConfig::with_seq_len(8), 0).unwrap();

        assert_eq!(ex.len(), 8);
        assert_eq!(ex.input_ids[0], CLS);
        assert_eq!(&ex.input_ids[1..7], &ids(&long)[..6]);
        assert_eq!(ex.input_ids[7], SEP);
    }

    #[test]
    fn test_overflow_preserve() {
        let long  = words(20);
        let pairs = [(0, long.as_str()), (0, "x y")];
        let cfg   = PackerConfig {
            overflow: OverflowPolicy::Preserve,
            ..PackerConfig::with_seq_len(8)
        };
        let ex = build(&pairs, &cfg, 0).unwrap();

        assert_eq!(ex.len(), 22);
        assert_eq!(ex.segment_ids.len(), 22);
        assert!(!ex.input_ids.contains(&PAD));
    }

    #[test]
    fn test_overflow_reject() {
        let long  = words(20);
        let pairs = [(0, long.as_str()), (0, "x y")];
        let cfg   = PackerConfig {
            overflow: OverflowPolicy::Reject,
            ..PackerConfig::with_seq_len(8)
        };
        let err = build(&pairs, &cfg, 0).unwrap_err();
        assert!(err.to_string().contains("20 tokens"));
    }

    #[test]
    fn test_line_exactly_at_budget_fits() {
        let line  = words(6);
        let pairs = [(0, line.as_str()), (0, "x")];
        let cfg   = PackerConfig {
            overflow: OverflowPolicy::Reject,
            ..PackerConfig::with_seq_len(8)
        };
        let ex = build(&pairs, &cfg, 0).unwrap();
        assert_eq!(ex.len(), 8);
        assert_eq!(ex.input_ids[7], SEP);
    }

    #[test]
    fn test_tokenizer_error_propagates() {
        let corpus  = corpus(&[(0, "fine"), (0, "broken"), (0, "tail")]);
        let encoder = WordEncoder::failing_on("broken");
        let config  = PackerConfig::with_seq_len(16);
        let packer  = SequencePacker::new(&corpus, &encoder, &config, encoder.special_tokens());

        let err = packer.build(0).unwrap_err();
        assert!(err.to_string().contains("broken"));
        // An example that never reaches the bad line still builds
        assert!(packer.build(2).is_ok());
    }

    #[test]
    fn test_build_is_idempotent() {
        let pairs = [(0, "a b c"), (1, "d e"), (1, "f"), (2, "g")];
        let cfg   = PackerConfig::with_seq_len(10);
        assert_eq!(build(&pairs, &cfg, 0).unwrap(), build(&pairs, &cfg, 0).unwrap());
    }

    #[test]
    fn test_invariants_hold_for_every_index() {
        let long  = words(15);
        let pairs = [
            (0, "the quick brown fox"),
            (0, "jumps"),
            (1, "over the lazy dog"),
            (2, "a"),
            (3, "b"),
            (3, long.as_str()),
            (3, "c d e"),
            (4, "f g"),
            (4, "h"),
            (5, "i j k l m"),
        ];
        let seq_len = 10;
        let cfg     = PackerConfig::with_seq_len(seq_len);

        for index in 0..pairs.len() {
            let ex = build(&pairs, &cfg, index).unwrap();

            assert_eq!(ex.input_ids.len(), seq_len, "index {index}");
            assert_eq!(ex.segment_ids.len(), seq_len, "index {index}");
            assert_eq!(ex.input_ids[0], CLS);

            // Padding is a contiguous suffix
            let real = ex.input_ids.iter().take_while(|&&id| id != PAD).count();
            assert!(ex.input_ids[real..].iter().all(|&id| id == PAD), "index {index}");

            let seps: Vec<usize> = ex
                .input_ids
                .iter()
                .enumerate()
                .filter(|&(_, &id)| id == SEP)
                .map(|(p, _)| p)
                .collect();
            assert!((1..=2).contains(&seps.len()), "index {index}");

            for (pos, &seg) in ex.segment_ids.iter().enumerate() {
                let expected = match seps[..] {
                    [first, second] => u32::from(pos > first && pos <= second),
                    _ => 0,
                };
                assert_eq!(seg, expected, "index {index} position {pos}");
            }
        }
    }
}
