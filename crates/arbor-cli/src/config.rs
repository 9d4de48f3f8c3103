//! Configuration file loading for the CLI
//!
//! Configuration is layered. Every file that exists is read and merged
//! table by table over the ones before it, so a later file only needs the
//! keys it changes.
//!
//! Layers, lowest precedence first:
//! 1. Platform-specific config directory (`config.toml`)
//! 2. Local project directory (`arbor/config.toml`)
//! 3. Explicit `--config` path, which must exist

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use arbor::{ArborError, config::AppConfig};

const LOCAL_CONFIG: &str = "arbor/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for ArborError {
    fn from(err: ConfigError) -> Self {
        ArborError::Io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
    }
}

/// Find, merge and load configuration.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - A config file exists but cannot be read or parsed
/// - The merged configuration does not match the expected schema
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ArborError> {
    let mut layers = Vec::new();

    if let Some(proj_dirs) = ProjectDirs::from("com", "arbor", "arbor") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            layers.push(system_config);
        } else {
            debug!(path = system_config.display().to_string(); "System configuration file not found");
        }
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        layers.push(local_config.to_path_buf());
    }

    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        layers.push(path.to_path_buf());
    }

    load_layers(&layers)
}

/// Merges the given files in order and deserializes the result.
///
/// With no layers this is the default configuration.
///
/// # Errors
///
/// Returns error if a file cannot be read or parsed, or if the merged
/// table does not deserialize into [`AppConfig`].
pub fn load_layers(layers: &[PathBuf]) -> Result<AppConfig, ArborError> {
    if layers.is_empty() {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    }

    let mut merged = toml::Table::new();
    for path in layers {
        info!(path = path.display().to_string(); "Loading configuration layer");
        let layer = read_layer(path)?;
        merge_tables(&mut merged, layer);
    }

    let config: AppConfig = toml::Value::Table(merged)
        .try_into()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
    Ok(config)
}

/// Reads one TOML file into a table.
fn read_layer(path: &Path) -> Result<toml::Table, ArborError> {
    let content = fs::read_to_string(path)?;
    let table = content
        .parse::<toml::Table>()
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(table)
}

/// Merges `overlay` into `base`. Nested tables merge key by key; any other
/// value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor::style::{Direction, Shape};
    use tempfile::tempdir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    #[test]
    fn test_no_layers_is_default() {
        let config = load_layers(&[]).expect("default config");
        assert_eq!(config.palette().colors().len(), 16);
    }

    #[test]
    fn test_later_layers_override_earlier_ones() {
        let dir = tempdir().expect("Failed to create temp directory");
        let base = write(
            dir.path(),
            "base.toml",
            "[style]\nshape = \"ellipse\"\ndirection = \"TB\"\n\n[outline]\nroot_label = \"Base\"\n",
        );
        let overlay = write(dir.path(), "overlay.toml", "[style]\ndirection = \"RL\"\n");

        let config = load_layers(&[base, overlay]).expect("merged config");
        let style = config.style().defaults();

        assert_eq!(style.shape(), Shape::Ellipse);
        assert_eq!(style.direction(), Direction::RightLeft);
        assert_eq!(config.outline().root_label(), "Base");
    }

    #[test]
    fn test_arrays_are_replaced_not_merged() {
        let dir = tempdir().expect("Failed to create temp directory");
        let base = write(
            dir.path(),
            "base.toml",
            "[palette]\ncolors = [\"#000000\", \"#FF0000\", \"#00FF00\"]\n",
        );
        let overlay = write(
            dir.path(),
            "overlay.toml",
            "[palette]\ncolors = [\"#111111\", \"#222222\"]\n",
        );

        let config = load_layers(&[base, overlay]).expect("merged config");
        assert_eq!(config.palette().colors(), ["#111111", "#222222"]);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().expect("Failed to create temp directory");
        let broken = write(dir.path(), "broken.toml", "[style\nshape = ");

        let err = load_layers(&[broken]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_schema_mismatch_is_reported() {
        let dir = tempdir().expect("Failed to create temp directory");
        let bad = write(dir.path(), "bad.toml", "[style]\nshape = \"blob\"\n");

        let err = load_layers(&[bad]).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let missing = dir.path().join("nope.toml");

        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_merge_tables_keeps_unrelated_keys() {
        let mut base: toml::Table = "a = 1\n[t]\nx = 1\ny = 2\n".parse().unwrap();
        let overlay: toml::Table = "b = 2\n[t]\ny = 3\n".parse().unwrap();
        merge_tables(&mut base, overlay);

        let expected: toml::Table = "a = 1\nb = 2\n[t]\nx = 1\ny = 3\n".parse().unwrap();
        assert_eq!(base, expected);
    }
}
