//! Configuration system for drivepath.
//!
//! Transfer chunk sizes, listing page size and a few behaviour switches are
//! configurable through:
//! - YAML configuration files
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`DRIVEPATH_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`~/.drivepath/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use drivepath::config::ConfigBuilder;
//!
//! let settings = ConfigBuilder::new().build_settings().unwrap();
//! println!("upload chunk: {} bytes", settings.upload_chunk_size);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, Settings};
pub use validator::ConfigValidator;
