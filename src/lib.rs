pub mod app_errors;
pub mod config;
pub mod modules;
pub mod utils;
pub mod validation;

use crate::app_errors::AppError;
use crate::modules::Modules;
use crate::utils::commands::scenario::{run_scenario, Scenario, ScenarioReport};
use tracing::info;

/// Replays `scenario` against the modules' store at the configured clock.
pub fn app(modules: &Modules, scenario: &Scenario) -> Result<ScenarioReport, AppError> {
    info!("Environment: {}", modules.environment());
    info!("Replaying scenario with: {modules}");

    let clock = modules.engine.clock();
    run_scenario(&modules.store(), scenario, &clock)
}
