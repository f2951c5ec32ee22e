use std::env;
use std::path::PathBuf;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

pub const DEFAULT_ACCESS_SECRET: &str = "dev-access-secret-change-me";
pub const DEFAULT_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

/// One year, in minutes.
pub const MAX_ACCESS_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;
/// One year, in hours.
pub const MAX_REFRESH_EXPIRATION_HOURS: i64 = 365 * 24;

/// Flat environment names accepted on top of the layered sources.
const ENV_OVERRIDES: [(&str, &str); 7] = [
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("JWT_SECRET", "jwt.access_secret"),
    ("REFRESH_SECRET", "jwt.refresh_secret"),
    ("ACCESS_TOKEN_EXPIRE_MINUTES", "jwt.access_expiration_minutes"),
    ("REFRESH_TOKEN_EXPIRE_HOURS", "jwt.refresh_expiration_hours"),
    ("FRONTEND_URL", "cors.allowed_origin"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expiration_minutes: i64,
    pub refresh_expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

/// Argon2 work factor used for new password hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Flat environment variables (PORT, JWT_SECRET, REFRESH_SECRET, FRONTEND_URL, ...)
    /// 2. Prefixed environment variables (APP_SERVER__PORT, APP_JWT__ACCESS_SECRET, ...)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://users.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.access_secret", DEFAULT_ACCESS_SECRET)?
            .set_default("jwt.refresh_secret", DEFAULT_REFRESH_SECRET)?
            .set_default("jwt.access_expiration_minutes", 15)?
            .set_default("jwt.refresh_expiration_hours", 24)?
            .set_default("cors.allowed_origin", "http://localhost:5173")?
            .set_default("password.memory_cost_kib", 19456)?
            .set_default("password.iterations", 2)?
            .set_default("password.parallelism", 1)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: APP_JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (variable, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env::var(variable).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ACCESS_EXPIRATION_MINUTES).contains(&self.jwt.access_expiration_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_expiration_minutes must be between 1 and {}",
                MAX_ACCESS_EXPIRATION_MINUTES
            )));
        }
        if !(1..=MAX_REFRESH_EXPIRATION_HOURS).contains(&self.jwt.refresh_expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_expiration_hours must be between 1 and {}",
                MAX_REFRESH_EXPIRATION_HOURS
            )));
        }
        if self.jwt.access_secret.is_empty() || self.jwt.refresh_secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt secrets must not be empty".to_string(),
            ));
        }
        if self.jwt.access_secret == self.jwt.refresh_secret {
            return Err(ConfigError::Message(
                "jwt.access_secret and jwt.refresh_secret must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a `.env` file into the process environment. Variables already set win.
///
/// Returns the path of the loaded file, or `None` when there is no `.env` file.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    dotenv_found(dotenvy::dotenv())
}

fn dotenv_found(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

impl JwtConfig {
    /// True when either secret is still the built-in development value.
    pub fn uses_default_secrets(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    /// Access and refresh lifetimes as durations.
    pub fn token_lifetimes(&self) -> Result<(Duration, Duration), ConfigError> {
        let access = Duration::try_minutes(self.access_expiration_minutes).ok_or_else(|| {
            ConfigError::Message("jwt.access_expiration_minutes is out of range".to_string())
        })?;
        let refresh = Duration::try_hours(self.refresh_expiration_hours).ok_or_else(|| {
            ConfigError::Message("jwt.refresh_expiration_hours is out of range".to_string())
        })?;

        Ok((access, refresh))
    }
}
