//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHIPWISE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use chipwise_academy::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod email;
mod error;
mod features;
mod forms;
mod payment;
mod server;

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use forms::FormsConfig;
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Payment configuration (signing secret, meeting links)
    pub payment: PaymentConfig,

    /// Email configuration (template service, deliverability)
    pub email: EmailConfig,

    /// Lead-form configuration (spreadsheet sink, brochure)
    pub forms: FormsConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present (development), then reads variables with
    /// the `CHIPWISE` prefix; `__` separates nested values, e.g.
    /// `CHIPWISE__SERVER__PORT=8080` -> `server.port = 8080`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHIPWISE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including the dummy-pay flag being set in production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.payment.validate()?;
        self.email.validate()?;
        self.forms.validate()?;

        if self.server.is_production() && self.features.enable_dummy_pay {
            return Err(ValidationError::DummyPayInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
