//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, Settings};
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a validated configuration from every layer.
///
/// Layers, lowest precedence first: built-in defaults, the user file, an
/// explicit file, `DRIVEPATH_*` environment variables, programmatic
/// overrides.
///
/// # Examples
///
/// ```
/// use drivepath::config::{Config, ConfigBuilder};
///
/// let settings = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { page_size: Some(50), ..Default::default() })
///     .build_settings()
///     .unwrap();
/// assert_eq!(settings.page_size, Some(50));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    skip_files: bool,
    skip_env: bool,
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// A builder reading every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Read the user config from `dir` instead of `~/.drivepath`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Also read `path`, above the user config.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Apply `config` on top of everything else.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge and validate all layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable
    /// cannot be parsed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let sources =
                ConfigLoader::load_all(self.config_file.as_deref(), self.data_dir.as_deref())?;
            for source in &sources {
                debug!("loaded configuration from {}", source.path.display());
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// [`ConfigBuilder::build`], then fill in defaults.
    ///
    /// # Errors
    ///
    /// See [`ConfigBuilder::build`].
    pub fn build_settings(self) -> Result<Settings> {
        Ok(self.build()?.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let settings = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .build_settings()
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides_beat_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.yaml"),
            "page_size: 10\nunknown_mime_type: text/plain\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_data_dir(temp_dir.path())
            .with_config(Config {
                page_size: Some(30),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.page_size, Some(30));
        assert_eq!(config.unknown_mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_explicit_file_beats_user_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.yaml"), "page_size: 10\n").unwrap();
        let explicit = temp_dir.path().join("other.yaml");
        fs::write(&explicit, "page_size: 20\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_data_dir(temp_dir.path())
            .with_config_file(&explicit)
            .build()
            .unwrap();
        assert_eq!(config.page_size, Some(20));
    }

    #[test]
    fn test_invalid_merged_result_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                upload_chunk_size: Some(1),
                ..Default::default()
            })
            .build();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
