// ============================================================
// Layer 3: PackedExample Domain Type
// ============================================================
// One training example produced by the sequence packer:
//
//   input_ids:   [CLS] a a a a [SEP] b b [SEP] [PAD] [PAD]
//   segment_ids:   0   0 0 0 0   0   1 1   1     0     0
//
// Segment ids are 1 only when the example holds exactly two
// separators, i.e. it spans a document boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedExample {
    pub input_ids:   Vec<u32>,
    pub segment_ids: Vec<u32>,
}

impl PackedExample {
    pub fn new(input_ids: Vec<u32>, segment_ids: Vec<u32>) -> Self {
        Self { input_ids, segment_ids }
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Number of separator tokens in the sequence (1 or 2 for packer output)
    pub fn sep_count(&self, sep_id: u32) -> usize {
        self.input_ids.iter().filter(|&&id| id == sep_id).count()
    }

    /// True when the example crosses a document boundary
    pub fn has_two_segments(&self) -> bool {
        self.segment_ids.iter().any(|&s| s == 1)
    }

    /// 1 for real tokens, 0 for padding.
    pub fn attention_mask(&self, pad_id: u32) -> Vec<u32> {
        self.input_ids
            .iter()
            .map(|&id| u32::from(id != pad_id))
            .collect()
    }
}
