// ============================================================
// Layer 6: Config Store
// ============================================================
// Reads and writes PackerConfig as pretty-printed JSON.
//
// An export directory always carries the config it was built
// with, so a training run can check that its seq_len and
// special tokens match the data:
//
//   out/
//     packer_config.json
//     train.jsonl
//     val.jsonl
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::config::PackerConfig;

pub const CONFIG_FILE: &str = "packer_config.json";

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn save(&self, cfg: &PackerConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved packer config to '{}'", path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<PackerConfig> {
        Self::read_file(&self.path())
    }

    /// Read and validate a config file at an arbitrary path.
    pub fn read_file(path: &Path) -> Result<PackerConfig> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        let cfg: PackerConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
