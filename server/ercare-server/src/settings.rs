//! Server configuration
//!
//! Loaded from compiled-in defaults, then an optional YAML/TOML file, then
//! `ERCARE_`-prefixed environment variables (`ERCARE_JWT__SECRET`,
//! `ERCARE_TRIAGE__LIST_LIMIT`, ...).

use axum::http::HeaderValue;
use config_engine::validation::{require_min_len, require_non_empty, require_range};
use config_engine::{ConfigEngine, ConfigError, ConfigSource, ConfigValidator};
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "ERCARE_";

/// Upper bound on assessments returned by one list call
pub const MAX_LIST_LIMIT: usize = 1000;

const MIN_JWT_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
    pub logging: LoggerConfig,
    pub cors: CorsSettings,
    pub triage: TriageSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// HS256 secret shared with the account service
    pub secret: String,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageSettings {
    /// Default and maximum page size of `GET /api/v1/triage`
    pub list_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt: JwtSettings::default(),
            logging: LoggerConfig::default(),
            cors: CorsSettings::default(),
            triage: TriageSettings::default(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            list_limit: MAX_LIST_LIMIT,
        }
    }
}

impl ServerSettings {
    /// Load settings from defaults, `config_path` (skipped when missing) and the environment
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigEngine::new()
            .with_defaults(&Self::default())
            .add_source(ConfigSource::optional_file(config_path.as_ref()))?
            .add_source(ConfigSource::env(ENV_PREFIX))?
            .load()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigValidator for ServerSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("host", &self.host)?;
        if self.port == 0 {
            return Err(ConfigError::ValidationError("port must not be 0".to_string()));
        }
        require_min_len("jwt.secret", &self.jwt.secret, MIN_JWT_SECRET_BYTES)?;
        if let Some(issuer) = &self.jwt.issuer {
            require_non_empty("jwt.issuer", issuer)?;
        }
        require_range("triage.list_limit", self.triage.list_limit, 1, MAX_LIST_LIMIT)?;
        for origin in &self.cors.allowed_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "cors.allowed_origins contains an invalid origin: {origin}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use logger_redacted::LogFormat;

    fn valid() -> ServerSettings {
        ServerSettings {
            jwt: JwtSettings {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                issuer: None,
            },
            ..ServerSettings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.triage.list_limit, 1000);
        assert!(settings.logging.redaction_enabled);
    }

    #[test]
    fn test_validation() {
        assert!(valid().validate().is_ok());

        // Default secret is empty and must be configured
        assert!(ServerSettings::default().validate().is_err());

        let mut settings = valid();
        settings.triage.list_limit = 0;
        assert!(settings.validate().is_err());

        let mut settings = valid();
        settings.triage.list_limit = 1001;
        assert!(settings.validate().is_err());

        let mut settings = valid();
        settings.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = valid();
        settings.cors.allowed_origins = vec!["http://bad\norigin".to_string()];
        assert!(settings.validate().is_err());

        let mut settings = valid();
        settings.host = "  ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = valid();
        settings.jwt.issuer = Some(String::new());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_wildcard_origin_builds_cors_layer() {
        Jail::expect_with(|jail| {
            jail.set_env("ERCARE_JWT__SECRET", "0123456789abcdef0123456789abcdef");
            jail.set_env("ERCARE_CORS__ALLOWED_ORIGINS", r#"["*"]"#);

            let settings =
                ServerSettings::load("missing.yaml").map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(settings.cors.allowed_origins, vec!["*".to_string()]);
            let _layer = crate::middleware::create_cors_layer(&settings.cors);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ercare.yaml",
                "port: 9100\nlogging:\n  format: json\ntriage:\n  list_limit: 200\n",
            )?;
            jail.set_env("ERCARE_JWT__SECRET", "0123456789abcdef0123456789abcdef");
            jail.set_env("ERCARE_HOST", "127.0.0.1");

            let settings =
                ServerSettings::load("ercare.yaml").map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(settings.bind_address(), "127.0.0.1:9100");
            assert_eq!(settings.logging.format, LogFormat::Json);
            assert_eq!(settings.triage.list_limit, 200);
            Ok(())
        });
    }

    #[test]
    fn test_load_without_secret_fails() {
        Jail::expect_with(|_jail| {
            let result = ServerSettings::load("missing.yaml");
            assert!(matches!(result, Err(ConfigError::ValidationError(_))));
            Ok(())
        });
    }
}
