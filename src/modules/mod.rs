use self::store::{Records, RequestStore};
use crate::config::app::EngineSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use core::fmt::Display;
use std::sync::Arc;
use tracing::info;

pub mod store;

pub struct Modules {
    pub engine: EngineSettings,
    environment: Environment,
    store: Arc<RequestStore>,
}

impl Modules {
    pub fn load_from_settings() -> anyhow::Result<Self> {
        let settings = get_config()?;
        info!("Settings loaded");
        info!("Loading modules");
        let store = Arc::new(RequestStore::new());
        info!("Modules loaded");
        Ok(Self {
            engine: settings.engine,
            environment: settings.environment,
            store,
        })
    }

    pub fn use_custom(engine: EngineSettings, records: Records, environment: Environment) -> Self {
        Self {
            engine,
            environment,
            store: Arc::new(RequestStore::from_records(records)),
        }
    }

    pub fn store(&self) -> Arc<RequestStore> {
        self.store.clone()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl Display for Modules {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "in-memory request store, UTC offset {}, weeks starting on {}",
            self.engine.utc_offset, self.engine.week_starts_on
        )
    }
}
