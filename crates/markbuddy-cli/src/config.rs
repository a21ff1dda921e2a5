//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level markbuddy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkbuddyConfig {
    /// Record used by `calc` when `--record` is not given.
    #[serde(default)]
    pub default_record: Option<PathBuf>,
    /// Default output format for `calc`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places shown for GPAs and CGPAs.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_precision() -> usize {
    2
}

impl Default for MarkbuddyConfig {
    fn default() -> Self {
        Self {
            default_record: None,
            format: default_format(),
            precision: default_precision(),
        }
    }
}

/// Expand a leading `~` and any `${VAR}` path components of a record path.
///
/// Unset variables are left as written so the error names them.
fn expand_record_path(path: &Path) -> PathBuf {
    let mut expanded = PathBuf::new();
    for (i, part) in path.iter().enumerate() {
        let part = part.to_string_lossy();
        let replacement = if i == 0 && part == "~" {
            std::env::var("HOME").ok()
        } else {
            part.strip_prefix("${")
                .and_then(|rest| rest.strip_suffix('}'))
                .and_then(|var| std::env::var(var).ok())
        };
        match replacement {
            Some(value) => expanded.push(value),
            None => expanded.push(&*part),
        }
    }
    expanded
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `markbuddy.toml` in the current directory
/// 2. `~/.config/markbuddy/config.toml`
///
/// `MARKBUDDY_RECORD` overrides `default_record`.
pub fn load_config_from(path: Option<&Path>) -> Result<MarkbuddyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("markbuddy.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<MarkbuddyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MarkbuddyConfig::default(),
    };

    if let Ok(record) = std::env::var("MARKBUDDY_RECORD") {
        if !record.is_empty() {
            config.default_record = Some(PathBuf::from(record));
        }
    }

    config.default_record = config.default_record.map(|p| expand_record_path(&p));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("markbuddy"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_path_variables_expand() {
        std::env::set_var("_MARKBUDDY_RECORDS_DIR", "/srv/grades");
        assert_eq!(
            expand_record_path(Path::new("${_MARKBUDDY_RECORDS_DIR}/fall.toml")),
            PathBuf::from("/srv/grades/fall.toml")
        );
        std::env::remove_var("_MARKBUDDY_RECORDS_DIR");
    }

    #[test]
    fn unset_variable_is_kept_literally() {
        let path = Path::new("${_MARKBUDDY_NEVER_SET}/fall.toml");
        assert_eq!(expand_record_path(path), path.to_path_buf());
    }

    #[test]
    fn home_prefix_expands() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                expand_record_path(Path::new("~/records/fall.toml")),
                PathBuf::from(home).join("records").join("fall.toml")
            );
        }
        assert_eq!(
            expand_record_path(Path::new("records/~/fall.toml")),
            PathBuf::from("records/~/fall.toml")
        );
    }

    #[test]
    fn default_config() {
        let config = MarkbuddyConfig::default();
        assert_eq!(config.format, "text");
        assert_eq!(config.precision, 2);
        assert!(config.default_record.is_none());
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
default_record = "records/degree.toml"
format = "markdown"
precision = 3
"#;
        let config: MarkbuddyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.default_record,
            Some(PathBuf::from("records/degree.toml"))
        );
        assert_eq!(config.format, "markdown");
        assert_eq!(config.precision, 3);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/markbuddy.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markbuddy.toml");
        std::fs::write(&path, "precision = 1\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.precision, 1);
        assert_eq!(config.format, "text");
    }
}
