use serde::{Deserialize, Serialize};

/// The four reserved ids the packer needs from a tokenizer.
///
/// They are read once when the dataset is built and treated as
/// opaque constants afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    pub unk_id: u32,
    pub cls_id: u32,
    pub sep_id: u32,
    pub pad_id: u32,
}
