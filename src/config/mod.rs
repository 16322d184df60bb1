use crate::config::app::{EngineSettings, EngineSettingsModel, NAME_UTC_OFFSET};
use crate::config::environment::Environment;
use anyhow::{anyhow, Context};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod environment;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";
const NAME_ENVIRONMENT: &str = "APP_ENVIRONMENT";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub engine: Option<EngineSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = env::current_dir()
            .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {e}")))?;
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        settings.build()?.try_deserialize()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> anyhow::Result<Self> {
        let engine = match model.engine {
            Some(engine) => engine.to_settings()?,
            None => {
                warn!("Using default `engine` settings!");
                EngineSettings::default()
            }
        };

        Ok(Self {
            engine,
            environment: Environment::Development,
        })
    }

    fn prod() -> anyhow::Result<Self> {
        Ok(Self {
            engine: EngineSettings::from_env()?,
            environment: Environment::Production,
        })
    }
}

pub fn get_config() -> anyhow::Result<Settings> {
    let environment = match try_get_env(NAME_ENVIRONMENT) {
        Some(name) => name
            .parse::<Environment>()
            .map_err(|e| anyhow!(e))
            .context("Failed to parse APP_ENVIRONMENT")?,
        None => Environment::Development,
    };

    match environment {
        Environment::Development => match SettingsModel::parse() {
            Ok(model) => Settings::dev(model),
            Err(e) => {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}");
                warn!("Using default configuration!");
                Ok(Settings::default())
            }
        },
        Environment::Production => {
            ensure_required_env()?;
            Settings::prod()
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn get_env(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("Missing {name}"))
}

fn ensure_required_env() -> anyhow::Result<()> {
    let missing: Vec<&str> = [NAME_UTC_OFFSET]
        .into_iter()
        .filter(|name| env::var(name).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    error!("Provide missing environment variables {missing:?}");
    Err(anyhow!("Missing environment variables {missing:?}"))
}
