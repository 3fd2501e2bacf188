// Configuration sources merged by the engine, lowest priority first
use figment::providers::{Env, Format, Json, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Something that can contribute a layer of configuration.
pub trait ConfigProvider {
    fn merge_into(&self, figment: Figment) -> Result<Figment>;
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    /// Detect the format from the file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A configuration file. Missing optional files are skipped.
    File {
        path: PathBuf,
        format: FileFormat,
        required: bool,
    },
    /// Environment variables with `prefix`; `__` separates nested keys,
    /// so `ERCARE_JWT__SECRET` sets `jwt.secret`.
    Env { prefix: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        ConfigSource::File {
            path,
            format,
            required: true,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        match Self::file(path) {
            ConfigSource::File { path, format, .. } => ConfigSource::File {
                path,
                format,
                required: false,
            },
            other => other,
        }
    }

    pub fn env(prefix: impl Into<String>) -> Self {
        ConfigSource::Env {
            prefix: prefix.into(),
        }
    }
}

impl ConfigProvider for ConfigSource {
    fn merge_into(&self, figment: Figment) -> Result<Figment> {
        match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => {
                if !path.exists() {
                    if *required {
                        return Err(ConfigError::SourceNotFound(path.display().to_string()));
                    }
                    tracing::debug!(path = %path.display(), "Optional configuration file not present");
                    return Ok(figment);
                }
                Ok(match format {
                    FileFormat::Yaml => figment.merge(Yaml::file(path)),
                    FileFormat::Toml => figment.merge(Toml::file(path)),
                    FileFormat::Json => figment.merge(Json::file(path)),
                })
            }
            ConfigSource::Env { prefix } => Ok(figment.merge(Env::prefixed(prefix).split("__"))),
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfigSource::File { path, .. } => format!("file:{}", path.display()),
            ConfigSource::Env { prefix } => format!("env:{prefix}*"),
        }
    }
}
