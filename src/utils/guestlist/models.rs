use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::utils::calendar::formats::iso_date;
use crate::utils::ids::{PromoterId, UserId, VenueId};

/// Review state shared by guestlist requests and event invite requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Pending and approved requests occupy their slot.
    pub fn is_active(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Approved)
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for RequestStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => RequestStatus::Approved,
            ReviewDecision::Rejected => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Pending,
    Show,
    NoShow,
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Pending => write!(f, "pending"),
            AttendanceStatus::Show => write!(f, "show"),
            AttendanceStatus::NoShow => write!(f, "no-show"),
        }
    }
}

/// Outcome that may be recorded on an approved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceMark {
    Show,
    NoShow,
}

impl From<AttendanceMark> for AttendanceStatus {
    fn from(mark: AttendanceMark) -> Self {
        match mark {
            AttendanceMark::Show => AttendanceStatus::Show,
            AttendanceMark::NoShow => AttendanceStatus::NoShow,
        }
    }
}

/// The (user, promoter, venue, date) tuple a guestlist request is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct GuestlistSlot {
    pub user_id: UserId,
    pub promoter_id: PromoterId,
    pub venue_id: VenueId,
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl GuestlistSlot {
    pub fn new(user_id: UserId, promoter_id: PromoterId, venue_id: VenueId, date: Date) -> Self {
        Self {
            user_id,
            promoter_id,
            venue_id,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuestlistJoinRequest {
    pub id: Uuid,
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub promoter_id: PromoterId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub status: RequestStatus,
    pub attendance_status: AttendanceStatus,
    #[serde(default)]
    pub is_vip: bool,
}

impl GuestlistJoinRequest {
    pub fn new(slot: GuestlistSlot, is_vip: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: slot.user_id,
            venue_id: slot.venue_id,
            promoter_id: slot.promoter_id,
            date: slot.date,
            status: RequestStatus::Pending,
            attendance_status: AttendanceStatus::Pending,
            is_vip,
        }
    }

    pub fn slot(&self) -> GuestlistSlot {
        GuestlistSlot::new(self.user_id, self.promoter_id, self.venue_id, self.date)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
