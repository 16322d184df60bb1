pub mod errors;
pub mod models;

use time::Date;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::modules::store::{Records, RequestStore, StoreQuery};
use crate::utils::ids::{PromoterId, UserId, VenueId};
use crate::utils::schedule::models::Promoter;

use self::errors::GuestlistError;
use self::models::{GuestlistJoinRequest, GuestlistSlot, RequestStatus, ReviewDecision};

pub struct Guestlist;

impl<'c> StoreQuery<'c, Guestlist> {
    pub fn get_mut(&mut self, request_id: &Uuid) -> Result<&mut GuestlistJoinRequest, GuestlistError> {
        self.conn
            .guestlist
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or(GuestlistError::NotFound)
    }

    pub fn find_active(&self, slot: &GuestlistSlot) -> Option<&GuestlistJoinRequest> {
        find_active(&self.conn.guestlist, slot)
    }

    pub fn submit(&mut self, slot: GuestlistSlot, is_vip: bool) -> Result<Uuid, GuestlistError> {
        if let Some(existing) = self.find_active(&slot) {
            trace!("Active guestlist request {} already exists", existing.id);
            return Err(GuestlistError::DuplicateActiveRequest(existing.id));
        }

        let request = GuestlistJoinRequest::new(slot, is_vip);
        let id = request.id;
        self.conn.guestlist.push(request);
        debug!(
            "Created guestlist request {id} for user {} at venue {} on {}",
            slot.user_id, slot.venue_id, slot.date
        );

        Ok(id)
    }

    pub fn review(
        &mut self,
        request_id: &Uuid,
        decision: ReviewDecision,
    ) -> Result<GuestlistJoinRequest, GuestlistError> {
        let request = self.get_mut(request_id)?;
        if request.status != RequestStatus::Pending {
            return Err(GuestlistError::InvalidTransition {
                from: request.status.to_string(),
                action: "review",
            });
        }

        request.status = decision.into();
        debug!("Guestlist request {request_id} is now {}", request.status);

        Ok(request.clone())
    }
}

/// Active request for the exact slot, if any.
pub fn find_active<'r>(
    requests: &'r [GuestlistJoinRequest],
    slot: &GuestlistSlot,
) -> Option<&'r GuestlistJoinRequest> {
    requests
        .iter()
        .find(|r| r.is_active() && r.slot() == *slot)
}

/// Creates a pending request. Fails when the slot already holds an active one.
pub fn submit_guestlist_request(
    store: &RequestStore,
    slot: GuestlistSlot,
    is_vip: bool,
) -> Result<Uuid, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Guestlist, &mut transaction);
    let id = q.submit(slot, is_vip)?;
    transaction.commit();
    Ok(id)
}

/// Like [`submit_guestlist_request`], but a resubmission resolves to the
/// already active request instead of failing.
pub fn request_guestlist(
    store: &RequestStore,
    slot: GuestlistSlot,
    is_vip: bool,
) -> Result<Uuid, GuestlistError> {
    match submit_guestlist_request(store, slot, is_vip) {
        Err(GuestlistError::DuplicateActiveRequest(existing)) => Ok(existing),
        res => res,
    }
}

pub fn review_guestlist_request(
    store: &RequestStore,
    request_id: &Uuid,
    decision: ReviewDecision,
) -> Result<GuestlistJoinRequest, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Guestlist, &mut transaction);
    let request = q.review(request_id, decision)?;
    transaction.commit();
    Ok(request)
}

/// The single lookup every surface uses to show a user's guestlist state.
pub fn query_status_for_user(
    requests: &[GuestlistJoinRequest],
    user_id: UserId,
    promoter_id: PromoterId,
    venue_id: VenueId,
    date: Date,
) -> Option<&GuestlistJoinRequest> {
    find_active(
        requests,
        &GuestlistSlot::new(user_id, promoter_id, venue_id, date),
    )
}

/// Resolves the promoter's next open day at the venue and the user's active
/// request for it. `None` when the promoter never works that venue.
pub fn status_for_next_open_day<'r>(
    requests: &'r [GuestlistJoinRequest],
    user_id: UserId,
    promoter: &Promoter,
    venue_id: VenueId,
    reference: Date,
) -> Option<(Date, Option<&'r GuestlistJoinRequest>)> {
    let date = promoter.schedule.next_open_day(reference, venue_id)?;
    let request = query_status_for_user(requests, user_id, promoter.id, venue_id, date);
    Some((date, request))
}

/// Review queue of a promoter, ordered by date.
pub fn requests_for_promoter(
    requests: &[GuestlistJoinRequest],
    promoter_id: PromoterId,
    status: Option<RequestStatus>,
) -> Vec<&GuestlistJoinRequest> {
    let mut res: Vec<&GuestlistJoinRequest> = requests
        .iter()
        .filter(|r| r.promoter_id == promoter_id)
        .filter(|r| status.map_or(true, |status| r.status == status))
        .collect();
    res.sort_by_key(|r| r.date);
    res
}

pub fn requests_for_user(
    requests: &[GuestlistJoinRequest],
    user_id: UserId,
) -> Vec<&GuestlistJoinRequest> {
    let mut res: Vec<&GuestlistJoinRequest> =
        requests.iter().filter(|r| r.user_id == user_id).collect();
    res.sort_by_key(|r| r.date);
    res
}

impl Records {
    pub fn guestlist_request(&self, request_id: &Uuid) -> Option<&GuestlistJoinRequest> {
        self.guestlist.iter().find(|r| r.id == *request_id)
    }
}
