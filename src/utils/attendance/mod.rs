//! Attendance tracking on approved guestlist requests.

use time::Date;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::modules::store::{RequestStore, StoreQuery};
use crate::utils::guestlist::errors::GuestlistError;
use crate::utils::guestlist::models::{
    AttendanceMark, AttendanceStatus, GuestlistJoinRequest, RequestStatus,
};
use crate::utils::ids::{UserId, VenueId};

pub struct Attendance;

impl<'c> StoreQuery<'c, Attendance> {
    /// Approved request whose night is on or before `reference`.
    fn approved_mut(
        &mut self,
        request_id: &Uuid,
        reference: Date,
    ) -> Result<&mut GuestlistJoinRequest, GuestlistError> {
        let request = self
            .conn
            .guestlist
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or(GuestlistError::NotFound)?;

        if request.status != RequestStatus::Approved {
            return Err(GuestlistError::InvalidTransition {
                from: request.status.to_string(),
                action: "mark attendance on",
            });
        }
        if reference < request.date {
            return Err(GuestlistError::InvalidTransition {
                from: "future".to_string(),
                action: "mark attendance on",
            });
        }

        Ok(request)
    }

    pub fn set(
        &mut self,
        request_id: &Uuid,
        mark: AttendanceMark,
        reference: Date,
    ) -> Result<GuestlistJoinRequest, GuestlistError> {
        let request = self.approved_mut(request_id, reference)?;
        let status = AttendanceStatus::from(mark);

        if request.attendance_status == status {
            trace!("Attendance of {request_id} already {status}");
        } else {
            request.attendance_status = status;
            debug!("Marked guestlist request {request_id} as {status}");
        }

        Ok(request.clone())
    }

    pub fn toggle(
        &mut self,
        request_id: &Uuid,
        reference: Date,
    ) -> Result<GuestlistJoinRequest, GuestlistError> {
        let request = self.approved_mut(request_id, reference)?;
        request.attendance_status = match request.attendance_status {
            AttendanceStatus::Pending | AttendanceStatus::NoShow => AttendanceStatus::Show,
            AttendanceStatus::Show => AttendanceStatus::NoShow,
        };
        debug!(
            "Toggled guestlist request {request_id} to {}",
            request.attendance_status
        );

        Ok(request.clone())
    }

    pub fn check_in(
        &mut self,
        user_id: UserId,
        venue_id: VenueId,
        date: Date,
        reference: Date,
    ) -> Result<Vec<GuestlistJoinRequest>, GuestlistError> {
        if reference < date {
            return Err(GuestlistError::InvalidTransition {
                from: "future".to_string(),
                action: "check in to",
            });
        }

        let checked_in: Vec<GuestlistJoinRequest> = self
            .conn
            .guestlist
            .iter_mut()
            .filter(|r| {
                r.user_id == user_id
                    && r.venue_id == venue_id
                    && r.date == date
                    && r.status == RequestStatus::Approved
            })
            .map(|r| {
                r.attendance_status = AttendanceStatus::Show;
                r.clone()
            })
            .collect();

        if checked_in.is_empty() {
            trace!("No approved guestlist request for user {user_id} at venue {venue_id} on {date}");
            return Err(GuestlistError::NotFound);
        }

        debug!("Checked in user {user_id} at venue {venue_id} on {date}");
        Ok(checked_in)
    }

    pub fn close_out(&mut self, reference: Date) -> Vec<Uuid> {
        let closed: Vec<Uuid> = self
            .conn
            .guestlist
            .iter_mut()
            .filter(|r| {
                r.status == RequestStatus::Approved
                    && r.attendance_status == AttendanceStatus::Pending
                    && r.date < reference
            })
            .map(|r| {
                r.attendance_status = AttendanceStatus::NoShow;
                r.id
            })
            .collect();

        debug!("Closed out {} guestlist requests before {reference}", closed.len());
        closed
    }
}

/// Records show/no-show on an approved request whose night is on or before
/// `reference`. Repeating the same mark is a no-op.
pub fn set_attendance(
    store: &RequestStore,
    request_id: &Uuid,
    mark: AttendanceMark,
    reference: Date,
) -> Result<GuestlistJoinRequest, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Attendance, &mut transaction);
    let request = q.set(request_id, mark, reference)?;
    transaction.commit();
    Ok(request)
}

pub fn toggle_attendance(
    store: &RequestStore,
    request_id: &Uuid,
    reference: Date,
) -> Result<GuestlistJoinRequest, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Attendance, &mut transaction);
    let request = q.toggle(request_id, reference)?;
    transaction.commit();
    Ok(request)
}

/// Door check-in: marks `show` on the user's approved request(s) for the venue and date.
pub fn check_in(
    store: &RequestStore,
    user_id: UserId,
    venue_id: VenueId,
    date: Date,
    reference: Date,
) -> Result<Vec<GuestlistJoinRequest>, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Attendance, &mut transaction);
    let requests = q.check_in(user_id, venue_id, date, reference)?;
    transaction.commit();
    Ok(requests)
}

/// Marks every approved request dated before `reference` that still has no
/// attendance as a no-show.
pub fn close_out_attendance(
    store: &RequestStore,
    reference: Date,
) -> Result<Vec<Uuid>, GuestlistError> {
    let mut transaction = store.begin()?;
    let mut q = StoreQuery::new(Attendance, &mut transaction);
    let closed = q.close_out(reference);
    transaction.commit();
    Ok(closed)
}
