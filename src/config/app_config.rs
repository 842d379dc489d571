use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::auth::JwtConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub jwt: JwtConfig,
    /// Value for `iss`/`aud`; left empty when unset
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl AppConfig {
    /// Load `config/default`, `config/local`, then `APP__*` environment
    /// variables (e.g. `APP__JWT__SECRET`), and validate the result.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.jwt.validate()?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Pretty));
        assert_eq!(config.jwt.algorithm, "HS256");
        assert!(config.issuer.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "logging": {"format": "json"},
                "jwt": {"secret": "s3cr3t", "expiry_seconds": 600, "extra_header": {"kid": "k1"}},
                "issuer": "https://auth.example.com"
            }"#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.jwt.expiry_seconds, 600);
        assert_eq!(config.jwt.extra_header.get("kid").map(String::as_str), Some("k1"));
        assert_eq!(config.issuer.as_deref(), Some("https://auth.example.com"));
        assert!(config.jwt.validate().is_ok());
    }
}
