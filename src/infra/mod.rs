// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the outside world:
//
//   tokenizer_store.rs - Loads a pretrained tokenizer.json and
//                        adapts it to the TokenEncoder trait,
//                        resolving [UNK]/[CLS]/[SEP]/[PAD] ids.
//
//   config_store.rs    - Reads and writes packer_config.json
//                        so exported data records how it was
//                        packed.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// HuggingFace tokenizer loading and adaptation
pub mod tokenizer_store;

/// Packer config persistence
pub mod config_store;
