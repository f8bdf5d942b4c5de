use std::env;
use std::path::Path;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub password: PasswordConfig,
    pub jwt: JwtConfig,
}

#[derive(Deserialize, Clone)]
pub struct PasswordConfig {
    pub pepper: String,
    pub argon2: Argon2Config,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Argon2Config {
    /// Memory cost in KiB
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt_length: u32,
    pub key_length: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub private_key_path: String,
    pub public_key_path: String,
    pub issuer: String,
    pub subject: String,
    pub audience: Vec<String>,
    pub time_to_live_secs: i64,
}

impl std::fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("pepper", &"<redacted>")
            .field("argon2", &self.argon2)
            .finish()
    }
}

impl Settings {
    /// Load configuration from `./config` with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ZEN_PASSWORD__PEPPER, ZEN_JWT__ISSUER, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same layering as `load`, rooted at an explicit directory.
    pub fn load_from(directory: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let directory = directory.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(
                File::with_name(&directory.join("default").to_string_lossy()).required(false),
            )
            .add_source(
                File::with_name(&directory.join(&run_mode).to_string_lossy()).required(false),
            )
            // ZEN_JWT__AUDIENCE=api,admin overrides jwt.audience
            .add_source(
                Environment::with_prefix("ZEN")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("jwt.audience")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;

        tracing::debug!(
            run_mode = %run_mode,
            argon2_memory = settings.password.argon2.memory,
            argon2_iterations = settings.password.argon2.iterations,
            argon2_parallelism = settings.password.argon2.parallelism,
            jwt_issuer = %settings.jwt.issuer,
            "Configuration loaded"
        );

        Ok(settings)
    }
}
