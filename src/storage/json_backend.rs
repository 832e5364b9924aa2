//! Whole-ledger JSON file persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config;
use crate::domain::ledger::Ledger;
use crate::errors::Result;
use crate::storage::StorageBackend;

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for a single ledger file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the configured default data file.
    pub fn at_default_path() -> Self {
        Self::new(config::data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    /// Loads the ledger snapshot. A missing file is a fresh start, not an
    /// error; corrupt content is reported so the caller decides.
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no data file yet, starting a fresh ledger");
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut ledger: Ledger = serde_json::from_str(&data)?;
        ledger.normalize();
        Ok(ledger)
    }

    /// Writes atomically by staging to a temp file and renaming over the
    /// target, so a failed write never corrupts the previous snapshot.
    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = staging_path(&self.path);
        let json = serde_json::to_string_pretty(ledger)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => String::from(TMP_SUFFIX),
    };
    tmp.set_extension(ext);
    tmp
}
