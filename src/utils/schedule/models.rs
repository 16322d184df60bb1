use serde::{Deserialize, Serialize};
use time::Weekday;

use crate::utils::calendar::formats::weekday_name;
use crate::utils::ids::{EventId, PromoterId, VenueId};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleEntry {
    #[serde(with = "weekday_name")]
    pub day: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<VenueId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

impl ScheduleEntry {
    pub fn at_venue(day: Weekday, venue_id: VenueId) -> Self {
        Self {
            day,
            venue_id: Some(venue_id),
            event_id: None,
        }
    }

    pub fn for_event(day: Weekday, event_id: EventId) -> Self {
        Self {
            day,
            venue_id: None,
            event_id: Some(event_id),
        }
    }
}

/// Weekly commitments of a promoter. Several entries may share a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PromoterSchedule {
    pub entries: Vec<ScheduleEntry>,
}

impl PromoterSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Promoter {
    pub id: PromoterId,
    pub name: String,
    #[serde(default)]
    pub schedule: PromoterSchedule,
}
