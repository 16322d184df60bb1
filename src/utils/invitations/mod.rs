pub mod errors;
pub mod models;

use std::collections::BTreeSet;

use time::OffsetDateTime;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::modules::store::{Records, RequestStore, StoreQuery};
use crate::utils::guestlist::models::{RequestStatus, ReviewDecision};
use crate::utils::ids::{EventId, UserId};

use self::errors::InvitationError;
use self::models::{
    EventInvitation, EventInvitationRequest, InvitationStatus, InviteResponse, SyncReport,
};

pub struct Invitation;

impl<'c> StoreQuery<'c, Invitation> {
    fn get_request_mut(
        &mut self,
        request_id: &Uuid,
    ) -> Result<&mut EventInvitationRequest, InvitationError> {
        self.conn
            .invite_requests
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or(InvitationError::NotFound)
    }

    fn get_direct_mut(
        &mut self,
        invitation_id: &Uuid,
    ) -> Result<&mut EventInvitation, InvitationError> {
        self.conn
            .invitations
            .iter_mut()
            .find(|inv| inv.id == *invitation_id)
            .ok_or(InvitationError::NotFound)
    }

    pub fn request(&mut self, user_id: UserId, event_id: EventId) -> Uuid {
        if let Some(existing) = active_invite_request(&self.conn.invite_requests, user_id, event_id)
        {
            trace!("Invite request already made");
            return existing.id;
        }

        let request = EventInvitationRequest::new(user_id, event_id);
        let id = request.id;
        self.conn.invite_requests.push(request);
        debug!("Created invite request {id} for user {user_id} to event {event_id}");
        id
    }

    pub fn review_request(
        &mut self,
        request_id: &Uuid,
        decision: ReviewDecision,
    ) -> Result<EventInvitationRequest, InvitationError> {
        let request = self.get_request_mut(request_id)?;
        if request.status != RequestStatus::Pending {
            return Err(InvitationError::InvalidTransition {
                from: request.status.to_string(),
                action: "review",
            });
        }

        request.status = decision.into();
        debug!("Invite request {request_id} is now {}", request.status);
        Ok(request.clone())
    }

    /// Creates the invitation or refreshes the existing one. Returns its id and
    /// whether it was created.
    pub fn upsert_direct(
        &mut self,
        event_id: EventId,
        inviter_id: UserId,
        invitee_id: UserId,
        now: OffsetDateTime,
    ) -> (Uuid, bool) {
        let existing = self
            .conn
            .invitations
            .iter_mut()
            .find(|inv| inv.event_id == event_id && inv.invitee_id == invitee_id);

        if let Some(inv) = existing {
            inv.inviter_id = inviter_id;
            inv.timestamp = now;
            if inv.status == InvitationStatus::Declined {
                inv.status = InvitationStatus::Pending;
            }
            trace!("Refreshed direct invitation {}", inv.id);
            return (inv.id, false);
        }

        let inv = EventInvitation::new(event_id, inviter_id, invitee_id, now);
        let id = inv.id;
        self.conn.invitations.push(inv);
        debug!("Created direct invitation {id} for user {invitee_id} to event {event_id}");
        (id, true)
    }

    pub fn sync_direct(
        &mut self,
        event_id: EventId,
        inviter_id: UserId,
        invitee_ids: BTreeSet<UserId>,
        now: OffsetDateTime,
    ) -> SyncReport {
        let mut report = SyncReport::default();
        for invitee_id in invitee_ids {
            match self.upsert_direct(event_id, inviter_id, invitee_id, now) {
                (id, true) => report.created.push(id),
                (id, false) => report.updated.push(id),
            }
        }

        debug!(
            "Synced invitations for event {event_id}: {} created, {} updated",
            report.created.len(),
            report.updated.len()
        );
        report
    }

    pub fn respond(
        &mut self,
        invitation_id: &Uuid,
        response: InviteResponse,
    ) -> Result<EventInvitation, InvitationError> {
        let inv = self.get_direct_mut(invitation_id)?;
        if inv.status != InvitationStatus::Pending {
            return Err(InvitationError::InvalidTransition {
                from: inv.status.to_string(),
                action: "respond to",
            });
        }

        inv.status = response.into();
        debug!("Invitation {invitation_id} was {}", inv.status);
        Ok(inv.clone())
    }
}

/// Pending or approved invite request of a user for an event.
pub fn active_invite_request(
    requests: &[EventInvitationRequest],
    user_id: UserId,
    event_id: EventId,
) -> Option<&EventInvitationRequest> {
    requests
        .iter()
        .find(|r| r.user_id == user_id && r.event_id == event_id && r.status.is_active())
}

/// Returns the id of the user's active request, creating one if needed.
pub fn request_event_invite(
    store: &RequestStore,
    user_id: UserId,
    event_id: EventId,
) -> Result<Uuid, InvitationError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Invitation, &mut transaction);
    let id = q.request(user_id, event_id);
    transaction.commit();
    Ok(id)
}

/// Approval does not issue an [`EventInvitation`]; see [`can_rsvp`].
pub fn review_invite_request(
    store: &RequestStore,
    request_id: &Uuid,
    decision: ReviewDecision,
) -> Result<EventInvitationRequest, InvitationError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Invitation, &mut transaction);
    let request = q.review_request(request_id, decision)?;
    transaction.commit();
    Ok(request)
}

pub fn send_direct_invite(
    store: &RequestStore,
    event_id: EventId,
    inviter_id: UserId,
    invitee_id: UserId,
    now: OffsetDateTime,
) -> Result<Uuid, InvitationError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Invitation, &mut transaction);
    let (id, _) = q.upsert_direct(event_id, inviter_id, invitee_id, now);
    transaction.commit();
    Ok(id)
}

/// Additive reconciliation: invitees missing an invitation get one, existing
/// invitations are refreshed, invitations of absent invitees are left as they are.
pub fn sync_direct_invites(
    store: &RequestStore,
    event_id: EventId,
    inviter_id: UserId,
    invitee_ids: impl IntoIterator<Item = UserId>,
    now: OffsetDateTime,
) -> Result<SyncReport, InvitationError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Invitation, &mut transaction);
    let report = q.sync_direct(event_id, inviter_id, invitee_ids.into_iter().collect(), now);
    transaction.commit();
    Ok(report)
}

pub fn respond_to_invite(
    store: &RequestStore,
    invitation_id: &Uuid,
    response: InviteResponse,
) -> Result<EventInvitation, InvitationError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Invitation, &mut transaction);
    let inv = q.respond(invitation_id, response)?;
    transaction.commit();
    Ok(inv)
}

pub fn invite_requests_for_event(
    requests: &[EventInvitationRequest],
    event_id: EventId,
) -> Vec<&EventInvitationRequest> {
    requests.iter().filter(|r| r.event_id == event_id).collect()
}

/// Invitations received by a user, newest first.
pub fn invitations_for_user(
    invitations: &[EventInvitation],
    invitee_id: UserId,
) -> Vec<&EventInvitation> {
    let mut res: Vec<&EventInvitation> = invitations
        .iter()
        .filter(|inv| inv.invitee_id == invitee_id)
        .collect();
    res.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    res
}

/// A user may RSVP to an invite-only event once their invite request is
/// approved or they accepted a direct invitation.
pub fn can_rsvp(records: &Records, user_id: UserId, event_id: EventId) -> bool {
    let approved_request = records.invite_requests.iter().any(|r| {
        r.user_id == user_id && r.event_id == event_id && r.status == RequestStatus::Approved
    });
    let accepted_invitation = records.invitations.iter().any(|inv| {
        inv.invitee_id == user_id
            && inv.event_id == event_id
            && inv.status == InvitationStatus::Accepted
    });

    approved_request || accepted_invitation
}
