//! File locations used by the level manager

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::LevelError;

/// Where the level manager finds its project and level files
///
/// Loaded from TOML; missing keys fall back to the defaults:
///
/// ```toml
/// project_file = "levels/ogmo.oep"
/// levels_dir = "levels"
/// level_extension = "oel"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub project_file: PathBuf,
    pub levels_dir: PathBuf,
    pub level_extension: String,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            project_file: PathBuf::from("levels/ogmo.oep"),
            levels_dir: PathBuf::from("levels"),
            level_extension: "oel".to_string(),
        }
    }
}

impl LevelConfig {
    /// Config rooted at `dir`, using the default file names inside it
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            project_file: dir.join("ogmo.oep"),
            levels_dir: dir.to_path_buf(),
            ..Self::default()
        }
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let content = std::fs::read_to_string(path).map_err(|e| LevelError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| LevelError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// File path of the level called `name`
    pub fn level_path(&self, name: &str) -> PathBuf {
        self.levels_dir.join(format!("{}.{}", name, self.level_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LevelConfig::default();
        assert_eq!(config.project_file, PathBuf::from("levels/ogmo.oep"));
        assert_eq!(config.level_path("level1"), PathBuf::from("levels/level1.oel"));
    }

    #[test]
    fn test_partial_toml() {
        let config = LevelConfig::from_toml_str(r#"levels_dir = "maps""#).unwrap();
        assert_eq!(config.levels_dir, PathBuf::from("maps"));
        assert_eq!(config.level_extension, "oel");
        assert_eq!(config.level_path("intro"), PathBuf::from("maps/intro.oel"));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("levels.toml");
        std::fs::write(
            &path,
            r#"
project_file = "data/project.oep"
levels_dir = "data"
level_extension = "xml"
"#,
        )
        .unwrap();

        let config = LevelConfig::load(&path).unwrap();
        assert_eq!(config.project_file, PathBuf::from("data/project.oep"));
        assert_eq!(config.level_path("a"), PathBuf::from("data/a.xml"));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = LevelConfig::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LevelError::Config { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "levels_dir = [").unwrap();
        assert!(LevelConfig::load(&path).is_err());
    }
}
