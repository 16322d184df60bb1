use admission::modules::store::RequestStore;
use admission::utils::guestlist::models::{RequestStatus, ReviewDecision};
use admission::utils::invitations::errors::InvitationError;
use admission::utils::invitations::models::{InvitationStatus, InviteResponse};
use admission::utils::invitations::{
    can_rsvp, invitations_for_user, invite_requests_for_event, request_event_invite,
    respond_to_invite, review_invite_request, send_direct_invite, sync_direct_invites,
};
use time::macros::datetime;
use time::OffsetDateTime;
use tracing_test::traced_test;
use uuid::Uuid;

use crate::tools::*;


const ADMIN_ID: u64 = 1;
const SENT_AT: OffsetDateTime = datetime!(2025-06-10 18:00 UTC);
const RESENT_AT: OffsetDateTime = datetime!(2025-06-11 18:00 UTC);

#[traced_test]
#[test]
fn invite_request_is_idempotent_while_pending() {
    let store = RequestStore::new();
    let first = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();
    let second = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();

    assert_eq!(first, second);
    let records = store.snapshot().unwrap();
    assert_eq!(invite_requests_for_event(&records.invite_requests, EVENT_ID).len(), 1);
}

#[traced_test]
#[test]
fn rejected_invite_request_can_be_renewed() {
    let store = RequestStore::new();
    let first = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();
    review_invite_request(&store, &first, ReviewDecision::Rejected).unwrap();

    let second = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();
    assert_ne!(first, second);
}

#[traced_test]
#[test]
fn invite_request_review_transitions() {
    let store = RequestStore::new();
    let id = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();

    let request = review_invite_request(&store, &id, ReviewDecision::Approved).unwrap();
    assert_eq!(request.status, RequestStatus::Approved);

    assert!(matches!(
        review_invite_request(&store, &id, ReviewDecision::Rejected),
        Err(InvitationError::InvalidTransition { .. })
    ));
    assert!(matches!(
        review_invite_request(&store, &Uuid::new_v4(), ReviewDecision::Approved),
        Err(InvitationError::NotFound)
    ));
}

#[traced_test]
#[test]
fn approval_does_not_issue_invitation_but_allows_rsvp() {
    let store = RequestStore::new();
    let id = request_event_invite(&store, USER_ID, EVENT_ID).unwrap();
    assert!(!can_rsvp(&store.snapshot().unwrap(), USER_ID, EVENT_ID));

    review_invite_request(&store, &id, ReviewDecision::Approved).unwrap();
    let records = store.snapshot().unwrap();
    assert!(records.invitations.is_empty());
    assert!(can_rsvp(&records, USER_ID, EVENT_ID));
    assert!(!can_rsvp(&records, OTHER_USER_ID, EVENT_ID));
}

#[traced_test]
#[test]
fn resending_direct_invite_updates_existing() {
    let store = RequestStore::new();
    let first = send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, SENT_AT).unwrap();
    let second = send_direct_invite(&store, EVENT_ID, OTHER_USER_ID, USER_ID, RESENT_AT).unwrap();

    assert_eq!(first, second);
    let records = store.snapshot().unwrap();
    assert_eq!(records.invitations.len(), 1);
    assert_eq!(records.invitations[0].timestamp, RESENT_AT);
    assert_eq!(records.invitations[0].inviter_id, OTHER_USER_ID);
    assert_eq!(records.invitations[0].status, InvitationStatus::Pending);
}

#[traced_test]
#[test]
fn resending_after_decline_reopens_invitation() {
    let store = RequestStore::new();
    let id = send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, SENT_AT).unwrap();
    respond_to_invite(&store, &id, InviteResponse::Declined).unwrap();

    send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, RESENT_AT).unwrap();
    let records = store.snapshot().unwrap();
    assert_eq!(records.invitations[0].status, InvitationStatus::Pending);
}

#[traced_test]
#[test]
fn resending_after_accept_keeps_acceptance() {
    let store = RequestStore::new();
    let id = send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, SENT_AT).unwrap();
    respond_to_invite(&store, &id, InviteResponse::Accepted).unwrap();

    send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, RESENT_AT).unwrap();
    let records = store.snapshot().unwrap();
    assert_eq!(records.invitations[0].status, InvitationStatus::Accepted);
    assert!(can_rsvp(&records, USER_ID, EVENT_ID));
}

#[traced_test]
#[test]
fn sync_twice_creates_each_invitation_once() {
    let store = RequestStore::new();
    let first = sync_direct_invites(&store, EVENT_ID, ADMIN_ID, [USER_ID, OTHER_USER_ID], SENT_AT)
        .unwrap();
    let second =
        sync_direct_invites(&store, EVENT_ID, ADMIN_ID, [OTHER_USER_ID, USER_ID], RESENT_AT)
            .unwrap();

    assert_eq!(first.created.len(), 2);
    assert!(first.updated.is_empty());
    assert!(second.created.is_empty());
    assert_eq!(second.updated, first.created);
    assert_eq!(store.snapshot().unwrap().invitations.len(), 2);
}

#[traced_test]
#[test]
fn sync_never_revokes() {
    let store = RequestStore::new();
    sync_direct_invites(&store, EVENT_ID, ADMIN_ID, [USER_ID, OTHER_USER_ID], SENT_AT).unwrap();
    let report = sync_direct_invites(&store, EVENT_ID, ADMIN_ID, [USER_ID], RESENT_AT).unwrap();

    assert_eq!(report.ids().count(), 1);
    let records = store.snapshot().unwrap();
    assert_eq!(records.invitations.len(), 2);
    assert_eq!(invitations_for_user(&records.invitations, OTHER_USER_ID).len(), 1);
}

#[traced_test]
#[test]
fn sync_ignores_duplicate_invitees() {
    let store = RequestStore::new();
    let report =
        sync_direct_invites(&store, EVENT_ID, ADMIN_ID, vec![USER_ID, USER_ID], SENT_AT).unwrap();
    assert_eq!(report.created.len(), 1);
}

#[traced_test]
#[test]
fn respond_only_once() {
    let store = RequestStore::new();
    let id = send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, SENT_AT).unwrap();

    let inv = respond_to_invite(&store, &id, InviteResponse::Accepted).unwrap();
    assert_eq!(inv.status, InvitationStatus::Accepted);
    for response in [InviteResponse::Accepted, InviteResponse::Declined] {
        assert!(matches!(
            respond_to_invite(&store, &id, response),
            Err(InvitationError::InvalidTransition { .. })
        ));
    }
    assert!(matches!(
        respond_to_invite(&store, &Uuid::new_v4(), InviteResponse::Accepted),
        Err(InvitationError::NotFound)
    ));
}

#[traced_test]
#[test]
fn invitations_for_user_newest_first() {
    let store = RequestStore::new();
    let older = send_direct_invite(&store, EVENT_ID, ADMIN_ID, USER_ID, SENT_AT).unwrap();
    let newer = send_direct_invite(&store, 303, ADMIN_ID, USER_ID, RESENT_AT).unwrap();

    let records = store.snapshot().unwrap();
    let ids: Vec<Uuid> = invitations_for_user(&records.invitations, USER_ID)
        .iter()
        .map(|inv| inv.id)
        .collect();
    assert_eq!(ids, vec![newer, older]);
}
