//! Layered configuration loading for ERCare Engine
//!
//! Sources are merged in the order they are added, later sources overriding
//! earlier ones: compiled-in defaults, then configuration files, then
//! environment variables.
//!
//! # Example
//!
//! ```rust
//! use config_engine::{ConfigEngine, ConfigSource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! # fn main() -> Result<(), config_engine::ConfigError> {
//! let defaults = AppConfig { host: "0.0.0.0".into(), port: 8080 };
//! let config: AppConfig = ConfigEngine::new()
//!     .with_defaults(&defaults)
//!     .add_source(ConfigSource::optional_file("ercare.yaml"))?
//!     .add_source(ConfigSource::env("ERCARE_"))?
//!     .extract()?;
//! assert!(config.port > 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod providers;
pub mod validation;

pub use error::*;
pub use providers::*;
pub use validation::ConfigValidator;

use figment::providers::Serialized;
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone)]
pub struct ConfigEngine {
    figment: Figment,
    sources: Vec<String>,
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self {
            figment: Figment::new(),
            sources: Vec::new(),
        }
    }
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<T: Serialize>(mut self, defaults: &T) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(defaults));
        self.sources.push("defaults".to_string());
        self
    }

    pub fn add_source<P: ConfigProvider>(mut self, source: P) -> Result<Self> {
        self.figment = source.merge_into(self.figment)?;
        self.sources.push(source.describe());
        Ok(self)
    }

    /// Sources in merge order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(self.figment.extract()?)
    }

    /// Extract and validate in one step.
    pub fn load<T: DeserializeOwned + ConfigValidator>(&self) -> Result<T> {
        let config: T = self.extract()?;
        config.validate()?;
        tracing::debug!(sources = ?self.sources, "Configuration loaded");
        Ok(config)
    }
}
