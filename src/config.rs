/// Runtime configuration: database location and log level
///
/// The binary feeds its command line flags through these helpers so the
/// resolution rules can be tested without spawning a process.

use std::path::{Path, PathBuf};

/// Environment variable consulted when `--database` is not given
pub const DATABASE_ENV: &str = "HEALTH_INSIGHTS_DB";

const DIR_NAME: &str = "health_insights";
const DB_FILE: &str = "health.db";

/// Log filter level for the given flags
///
/// `verbose` wins over `debug`; with neither only warnings are shown.
pub fn log_level(debug: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if debug {
        "info"
    } else {
        "warn"
    }
}

/// Resolve the database path, creating its parent directory if needed
pub fn resolve_database_path(explicit: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match explicit {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(path)
        }
        None => default_database_path(),
    }
}

/// Get the default database path with a fallback chain
///
/// Tries the home, data and config directories, then the working
/// directory, and finally the system temp directory.
pub fn default_database_path() -> std::io::Result<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(format!(".{}", DIR_NAME))),
        dirs::data_dir().map(|p| p.join(DIR_NAME)),
        dirs::config_dir().map(|p| p.join(DIR_NAME)),
        std::env::current_dir().ok().map(|p| p.join(format!(".{}", DIR_NAME))),
    ];

    for dir in candidates.iter().flatten() {
        if is_writable_dir(dir) {
            return Ok(dir.join(DB_FILE));
        }
    }

    let temp_dir = std::env::temp_dir().join(DIR_NAME);
    std::fs::create_dir_all(&temp_dir)?;

    tracing::warn!("Using temporary directory for database: {}", temp_dir.display());
    Ok(temp_dir.join(DB_FILE))
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let probe = dir.join(".write_test");
    match std::fs::write(&probe, b"ok") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
