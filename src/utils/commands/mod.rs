pub mod models;
pub mod scenario;

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::app_errors::AppError;
use crate::modules::store::RequestStore;
use crate::utils::{attendance, guestlist, invitations};

use self::models::{Command, CommandOutcome};

/// Dispatches a command to its handler. A failed command leaves the store unchanged.
pub fn apply_command(
    store: &RequestStore,
    command: Command,
    now: OffsetDateTime,
) -> Result<CommandOutcome, AppError> {
    let name = command.name();
    let res = dispatch(store, command, now);

    match &res {
        Ok(outcome) => debug!("Applied {name}: {:?}", outcome.record_id()),
        Err(e) => warn!("Rejected {name}: {e}"),
    }

    res
}

fn dispatch(
    store: &RequestStore,
    command: Command,
    now: OffsetDateTime,
) -> Result<CommandOutcome, AppError> {
    let outcome = match command {
        Command::SubmitGuestlistRequest { slot, is_vip } => CommandOutcome::Created {
            id: guestlist::submit_guestlist_request(store, slot, is_vip)?,
        },
        Command::RequestGuestlist { slot, is_vip } => CommandOutcome::Created {
            id: guestlist::request_guestlist(store, slot, is_vip)?,
        },
        Command::ReviewGuestlistRequest {
            request_id,
            decision,
        } => CommandOutcome::Guestlist {
            request: guestlist::review_guestlist_request(store, &request_id, decision)?,
        },
        Command::SetAttendance { request_id, status } => CommandOutcome::Guestlist {
            request: attendance::set_attendance(store, &request_id, status, now.date())?,
        },
        Command::ToggleAttendance { request_id } => CommandOutcome::Guestlist {
            request: attendance::toggle_attendance(store, &request_id, now.date())?,
        },
        Command::CheckIn {
            user_id,
            venue_id,
            date,
        } => CommandOutcome::CheckedIn {
            requests: attendance::check_in(store, user_id, venue_id, date, now.date())?,
        },
        Command::CloseOutAttendance { date } => CommandOutcome::ClosedOut {
            ids: attendance::close_out_attendance(store, date)?,
        },
        Command::RequestEventInvite { user_id, event_id } => CommandOutcome::Created {
            id: invitations::request_event_invite(store, user_id, event_id)?,
        },
        Command::ReviewInviteRequest {
            request_id,
            decision,
        } => CommandOutcome::InviteRequest {
            request: invitations::review_invite_request(store, &request_id, decision)?,
        },
        Command::SendDirectInvite {
            event_id,
            inviter_id,
            invitee_id,
        } => CommandOutcome::Created {
            id: invitations::send_direct_invite(store, event_id, inviter_id, invitee_id, now)?,
        },
        Command::SyncDirectInvites {
            event_id,
            inviter_id,
            invitee_ids,
        } => CommandOutcome::Synced {
            report: invitations::sync_direct_invites(store, event_id, inviter_id, invitee_ids, now)?,
        },
        Command::RespondToInvite {
            invitation_id,
            decision,
        } => CommandOutcome::Invitation {
            invitation: invitations::respond_to_invite(store, &invitation_id, decision)?,
        },
    };

    Ok(outcome)
}
