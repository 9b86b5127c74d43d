use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "TAGDO_DIR";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("no data directory: pass -C or set TAGDO_DIR")]
    NoDataDir,
}

/// Resolve the data directory: explicit flag, then `TAGDO_DIR`, then the
/// platform data dir.
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("tagdo"))
        .ok_or(ConfigError::NoDataDir)
}

/// Read `config.toml` from the data directory. A missing file yields the
/// defaults; a malformed one is an error.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.input.trigger, '@');
    }

    #[test]
    fn reads_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[input]\nsuggestion_limit = 3\n\n[ui.colors]\nhighlight = \"#FF0000\"\n",
        )
        .unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.input.suggestion_limit, 3);
        assert_eq!(config.ui.colors["highlight"], "#FF0000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[input\ntrigger = ").unwrap();
        assert!(matches!(
            read_config(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(Some("/tmp/somewhere")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }
}
