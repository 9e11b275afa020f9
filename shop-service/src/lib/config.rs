use std::env;

use auth::SigningSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for shop-service.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `secret` has no default. When it is missing, sign-in and every protected
/// route reject requests instead of falling back to a built-in key.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i64,
}

/// Longest accepted token lifetime, ten years.
pub const MAX_EXPIRATION_DAYS: i64 = 3650;

fn default_expiration_days() -> i64 {
    auth::DEFAULT_TOKEN_VALIDITY_DAYS
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_days: default_expiration_days(),
        }
    }
}

impl JwtConfig {
    /// The configured signing secret, if any. Blank values count as absent.
    pub fn signing_secret(&self) -> Option<SigningSecret> {
        self.secret
            .as_deref()
            .map(str::trim)
            .and_then(|secret| SigningSecret::new(secret.as_bytes().to_vec()))
    }

    /// Token lifetime must be a whole number of days in `1..=MAX_EXPIRATION_DAYS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=MAX_EXPIRATION_DAYS).contains(&self.expiration_days) {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "jwt.expiration_days must be between 1 and {}, got {}",
                MAX_EXPIRATION_DAYS, self.expiration_days
            )))
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_days", &self.expiration_days)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_sources(configuration)
    }

    fn from_sources(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Self = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_secret_counts_as_absent() {
        let config = JwtConfig {
            secret: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.signing_secret().is_none());
        assert!(JwtConfig::default().signing_secret().is_none());
    }

    #[test]
    fn test_secret_is_exposed_only_as_signing_secret() {
        let config = JwtConfig {
            secret: Some("super-secret-value".to_string()),
            expiration_days: 30,
        };

        assert!(config.signing_secret().is_some());
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }

    #[test]
    fn test_default_expiration_is_thirty_days() {
        assert_eq!(JwtConfig::default().expiration_days, 30);
        assert!(JwtConfig::default().validate().is_ok());
    }

    #[test]
    fn test_expiration_days_out_of_range_is_rejected() {
        for expiration_days in [0, -1, MAX_EXPIRATION_DAYS + 1, i64::MAX] {
            let config = JwtConfig {
                expiration_days,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Message(_))),
                "{} days should be rejected",
                expiration_days
            );
        }

        let config = JwtConfig {
            expiration_days: MAX_EXPIRATION_DAYS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_unbounded_expiration() {
        let configuration = ConfigBuilder::builder()
            .set_override("database.url", "postgres://localhost/shop")
            .and_then(|builder| builder.set_override("server.http_port", 3000))
            .and_then(|builder| builder.set_override("jwt.expiration_days", i64::MAX))
            .and_then(|builder| builder.build())
            .unwrap();

        assert!(matches!(
            Config::from_sources(configuration),
            Err(ConfigError::Message(_))
        ));
    }
}
