use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::utils::calendar::formats::iso_date;
use crate::utils::guestlist::models::{
    AttendanceMark, GuestlistJoinRequest, GuestlistSlot, ReviewDecision,
};
use crate::utils::ids::{EventId, UserId, VenueId};
use crate::utils::invitations::models::{
    EventInvitation, EventInvitationRequest, InviteResponse, SyncReport,
};

/// Mutating operation a host may invoke on the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SubmitGuestlistRequest {
        #[serde(flatten)]
        slot: GuestlistSlot,
        #[serde(default)]
        is_vip: bool,
    },
    RequestGuestlist {
        #[serde(flatten)]
        slot: GuestlistSlot,
        #[serde(default)]
        is_vip: bool,
    },
    ReviewGuestlistRequest {
        request_id: Uuid,
        decision: ReviewDecision,
    },
    SetAttendance {
        request_id: Uuid,
        status: AttendanceMark,
    },
    ToggleAttendance {
        request_id: Uuid,
    },
    CheckIn {
        user_id: UserId,
        venue_id: VenueId,
        #[serde(with = "iso_date")]
        date: Date,
    },
    CloseOutAttendance {
        #[serde(with = "iso_date")]
        date: Date,
    },
    RequestEventInvite {
        user_id: UserId,
        event_id: EventId,
    },
    ReviewInviteRequest {
        request_id: Uuid,
        decision: ReviewDecision,
    },
    SendDirectInvite {
        event_id: EventId,
        inviter_id: UserId,
        invitee_id: UserId,
    },
    SyncDirectInvites {
        event_id: EventId,
        inviter_id: UserId,
        invitee_ids: Vec<UserId>,
    },
    RespondToInvite {
        invitation_id: Uuid,
        decision: InviteResponse,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SubmitGuestlistRequest { .. } => "submit_guestlist_request",
            Command::RequestGuestlist { .. } => "request_guestlist",
            Command::ReviewGuestlistRequest { .. } => "review_guestlist_request",
            Command::SetAttendance { .. } => "set_attendance",
            Command::ToggleAttendance { .. } => "toggle_attendance",
            Command::CheckIn { .. } => "check_in",
            Command::CloseOutAttendance { .. } => "close_out_attendance",
            Command::RequestEventInvite { .. } => "request_event_invite",
            Command::ReviewInviteRequest { .. } => "review_invite_request",
            Command::SendDirectInvite { .. } => "send_direct_invite",
            Command::SyncDirectInvites { .. } => "sync_direct_invites",
            Command::RespondToInvite { .. } => "respond_to_invite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Created { id: Uuid },
    Guestlist { request: GuestlistJoinRequest },
    CheckedIn { requests: Vec<GuestlistJoinRequest> },
    ClosedOut { ids: Vec<Uuid> },
    InviteRequest { request: EventInvitationRequest },
    Invitation { invitation: EventInvitation },
    Synced { report: SyncReport },
}

impl CommandOutcome {
    /// Id of the single record the command produced or updated.
    pub fn record_id(&self) -> Option<Uuid> {
        match self {
            CommandOutcome::Created { id } => Some(*id),
            CommandOutcome::Guestlist { request } => Some(request.id),
            CommandOutcome::InviteRequest { request } => Some(request.id),
            CommandOutcome::Invitation { invitation } => Some(invitation.id),
            _ => None,
        }
    }
}
