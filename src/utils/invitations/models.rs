use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{serde::timestamp, OffsetDateTime};
use uuid::Uuid;

use crate::utils::guestlist::models::RequestStatus;
use crate::utils::ids::{EventId, UserId};

/// A user's request to be let into an invite-only event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventInvitationRequest {
    pub id: Uuid,
    pub user_id: UserId,
    pub event_id: EventId,
    pub status: RequestStatus,
}

impl EventInvitationRequest {
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            status: RequestStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl Display for InvitationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Accepted => write!(f, "accepted"),
            InvitationStatus::Declined => write!(f, "declined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteResponse {
    Accepted,
    Declined,
}

impl From<InviteResponse> for InvitationStatus {
    fn from(response: InviteResponse) -> Self {
        match response {
            InviteResponse::Accepted => InvitationStatus::Accepted,
            InviteResponse::Declined => InvitationStatus::Declined,
        }
    }
}

/// Invitation pushed to a user, one per (event, invitee).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventInvitation {
    pub id: Uuid,
    pub event_id: EventId,
    pub inviter_id: UserId,
    pub invitee_id: UserId,
    pub status: InvitationStatus,
    #[serde(with = "timestamp")]
    pub timestamp: OffsetDateTime,
}

impl EventInvitation {
    pub fn new(
        event_id: EventId,
        inviter_id: UserId,
        invitee_id: UserId,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            inviter_id,
            invitee_id,
            status: InvitationStatus::Pending,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyncReport {
    pub created: Vec<Uuid>,
    pub updated: Vec<Uuid>,
}

impl SyncReport {
    pub fn ids(&self) -> impl Iterator<Item = &Uuid> {
        self.created.iter().chain(self.updated.iter())
    }
}
