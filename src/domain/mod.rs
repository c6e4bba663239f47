// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the packer
// works with. Nothing in here touches the filesystem, the
// tokenizer library or burn.
//
//   corpus.rs   - Corpus and CorpusLine (document id + text)
//   example.rs  - PackedExample (input ids + segment ids)
//   tokens.rs   - SpecialTokens ([UNK] / [CLS] / [SEP] / [PAD])
//   config.rs   - PackerConfig and its policy enums
//   traits.rs   - CorpusSource and TokenEncoder seams
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Flat, ordered (document_id, line) corpus
pub mod corpus;

/// One packed training example
pub mod example;

/// Reserved token ids supplied by the tokenizer
pub mod tokens;

/// Packing configuration
pub mod config;

/// Core abstractions other layers implement
pub mod traits;
