//! Replay of a recorded command sequence against a store.
//!
//! Steps are command objects. A step may carry a `label`; later steps refer to
//! the record it produced with the string `"$label"` in place of an id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, trace};
use uuid::Uuid;

use crate::app_errors::AppError;
use crate::modules::store::{Records, RequestStore};
use crate::utils::analytics::models::{
    Booking, PromoterStats, SortKey, SortOrder, TierPerformance, Window,
};
use crate::utils::analytics::windows::AnalyticsClock;
use crate::utils::analytics::{compute_tier_performance, rank_promoters};
use crate::utils::schedule::models::Promoter;
use crate::validation::ValidateContent;

use super::apply_command;
use super::models::Command;

const LABEL_KEY: &str = "label";

fn default_window() -> Window {
    Window::All
}

fn default_sort_key() -> SortKey {
    SortKey::Revenue
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub promoters: Vec<Promoter>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default = "default_window")]
    pub window: Window,
    #[serde(default = "default_sort_key")]
    pub sort_by: SortKey,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub steps: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub step: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub window: Window,
    pub applied: usize,
    pub rejected: Vec<Rejection>,
    pub ranking: Vec<PromoterStats>,
    pub tiers: Vec<TierPerformance>,
    pub records: Records,
}

fn take_label(step: &mut Value) -> Option<String> {
    step.as_object_mut()?
        .remove(LABEL_KEY)?
        .as_str()
        .map(str::to_string)
}

fn resolve_labels(value: &mut Value, labels: &HashMap<String, Uuid>) {
    match value {
        Value::String(s) => {
            if let Some(id) = s.strip_prefix('$').and_then(|label| labels.get(label)) {
                *s = id.to_string();
            }
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|item| resolve_labels(item, labels)),
        Value::Object(fields) => fields
            .values_mut()
            .for_each(|field| resolve_labels(field, labels)),
        _ => (),
    }
}

pub fn run_scenario(
    store: &RequestStore,
    scenario: &Scenario,
    clock: &AnalyticsClock,
) -> Result<ScenarioReport, AppError> {
    scenario.validate_content()?;

    let mut labels: HashMap<String, Uuid> = HashMap::new();
    let mut applied = 0;
    let mut rejected = vec![];

    for (index, step) in scenario.steps.iter().enumerate() {
        let mut step = step.clone();
        let label = take_label(&mut step);
        resolve_labels(&mut step, &labels);

        let command: Command = match serde_json::from_value(step) {
            Ok(command) => command,
            Err(e) => {
                rejected.push(Rejection {
                    step: index,
                    message: format!("Malformed command: {e}"),
                });
                continue;
            }
        };

        match apply_command(store, command, clock.now) {
            Ok(outcome) => {
                applied += 1;
                if let (Some(label), Some(id)) = (label, outcome.record_id()) {
                    trace!("Labelled {id} as `{label}`");
                    labels.insert(label, id);
                }
            }
            Err(e) => rejected.push(Rejection {
                step: index,
                message: e.user_message(),
            }),
        }
    }

    info!(
        "Replayed {} steps: {applied} applied, {} rejected",
        scenario.steps.len(),
        rejected.len()
    );

    let records = store.snapshot()?;
    let ranking = rank_promoters(
        &scenario.promoters,
        &scenario.bookings,
        &records.guestlist,
        scenario.window,
        clock,
        scenario.sort_by,
        scenario.order,
    );
    let tiers = compute_tier_performance(&records.guestlist, None, scenario.window, clock);

    Ok(ScenarioReport {
        window: scenario.window,
        applied,
        rejected,
        ranking,
        tiers,
        records,
    })
}

#[cfg(test)]
mod scenario_tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn labels_are_taken_and_resolved() {
        let id = Uuid::new_v4();
        let labels = HashMap::from([("first".to_string(), id)]);

        let mut step = json!({
            "label": "second",
            "command": "review_guestlist_request",
            "request_id": "$first",
            "decision": "approved",
        });
        assert_eq!(take_label(&mut step), Some("second".to_string()));
        resolve_labels(&mut step, &labels);

        assert_eq!(
            step,
            json!({
                "command": "review_guestlist_request",
                "request_id": id.to_string(),
                "decision": "approved",
            })
        );
    }

    #[test]
    fn unknown_labels_are_left_alone() {
        let mut step = json!({ "ids": ["$missing", "plain"] });
        resolve_labels(&mut step, &HashMap::new());
        assert_eq!(step, json!({ "ids": ["$missing", "plain"] }));
    }
}
