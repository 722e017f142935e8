use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::ConfigError;

pub const IMAGES_KEY: &str = "images_file";
pub const ORDER_KEY: &str = "images_optics_ordered_file";
pub const REACHABILITIES_KEY: &str = "reachabilities_file";

/// The three data file locations a run of the analyzer needs.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub images_file: Option<PathBuf>,
    #[serde(default)]
    pub images_optics_ordered_file: Option<PathBuf>,
    #[serde(default)]
    pub reachabilities_file: Option<PathBuf>,
}

impl AnalyzerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&raw, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(base_dir))
    }

    pub(super) fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        if config.images_file.is_none()
            && config.images_optics_ordered_file.is_none()
            && config.reachabilities_file.is_none()
        {
            return Err(ConfigError::NoKnownKeys {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }

    fn resolved_against(self, base_dir: &Path) -> Self {
        let resolve = |value: Option<PathBuf>| {
            value.map(|path| {
                if path.is_relative() {
                    base_dir.join(path)
                } else {
                    path
                }
            })
        };

        Self {
            images_file: resolve(self.images_file),
            images_optics_ordered_file: resolve(self.images_optics_ordered_file),
            reachabilities_file: resolve(self.reachabilities_file),
        }
    }

    pub fn images_path(&self) -> Result<&Path, ConfigError> {
        require(IMAGES_KEY, self.images_file.as_deref())
    }

    pub fn order_path(&self) -> Result<&Path, ConfigError> {
        require(ORDER_KEY, self.images_optics_ordered_file.as_deref())
    }

    pub fn reachabilities_path(&self) -> Result<&Path, ConfigError> {
        require(REACHABILITIES_KEY, self.reachabilities_file.as_deref())
    }
}

fn require<'a>(key: &'static str, value: Option<&'a Path>) -> Result<&'a Path, ConfigError> {
    value.ok_or(ConfigError::MissingKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_keys_and_ignores_unknown_ones() {
        let raw = r#"{
            "images_file": "images.txt",
            "images_optics_ordered_file": "order.txt",
            "reachabilities_file": "reach.txt",
            "comment": "produced by the clusterer"
        }"#;

        let config = AnalyzerConfig::parse(raw, Path::new("run.cfg")).unwrap();
        assert_eq!(config.images_file, Some(PathBuf::from("images.txt")));
        assert_eq!(config.order_path().unwrap(), Path::new("order.txt"));
        assert_eq!(config.reachabilities_path().unwrap(), Path::new("reach.txt"));
    }

    #[test]
    fn config_without_known_keys_is_rejected() {
        let error = AnalyzerConfig::parse(r#"{"other": 1}"#, Path::new("run.cfg")).unwrap_err();
        assert!(matches!(error, ConfigError::NoKnownKeys { .. }));
    }

    #[test]
    fn single_missing_key_surfaces_on_access() {
        let config =
            AnalyzerConfig::parse(r#"{"images_file": "images.txt"}"#, Path::new("run.cfg"))
                .unwrap();
        let error = config.reachabilities_path().unwrap_err();
        assert!(matches!(
            error,
            ConfigError::MissingKey {
                key: REACHABILITIES_KEY
            }
        ));
    }

    #[test]
    fn relative_paths_resolve_against_config_directory() {
        let config = AnalyzerConfig {
            images_file: Some(PathBuf::from("images.txt")),
            images_optics_ordered_file: Some(PathBuf::from("/abs/order.txt")),
            reachabilities_file: None,
        }
        .resolved_against(Path::new("/data/run"));

        assert_eq!(config.images_path().unwrap(), Path::new("/data/run/images.txt"));
        assert_eq!(config.order_path().unwrap(), Path::new("/abs/order.txt"));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let error = AnalyzerConfig::parse("images_file = x", Path::new("run.cfg")).unwrap_err();
        assert!(matches!(error, ConfigError::Malformed { .. }));
    }
}
