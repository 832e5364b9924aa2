//! Runtime settings: data-file location and fixed display conventions.

use std::env;
use std::path::PathBuf;

pub const CURRENCY_SYMBOL: &str = "$";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row cap applied when listing transactions on screen.
pub const MAX_ROWS_DISPLAY: usize = 50;
/// Width of the widest bar in the monthly chart.
pub const CHART_BAR_WIDTH: usize = 50;

const APP_DIR: &str = "fintrack";
const DATA_FILE: &str = "ledger.json";

const ENV_DATA_FILE: &str = "FINTRACK_DATA_FILE";
const ENV_DATA_DIR: &str = "FINTRACK_DATA_DIR";

/// Resolves the ledger data file, honoring environment overrides.
///
/// Precedence: `FINTRACK_DATA_FILE`, then `FINTRACK_DATA_DIR/ledger.json`,
/// then the platform data directory, then the working directory.
pub fn data_file() -> PathBuf {
    if let Ok(file) = env::var(ENV_DATA_FILE) {
        return PathBuf::from(file);
    }
    if let Ok(dir) = env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir).join(DATA_FILE);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DATA_FILE)
}
