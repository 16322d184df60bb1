//! Identifiers of entities owned by the host application.
//!
//! Users, promoters, venues and events live outside the engine and are
//! referenced by their numeric ids. Records created by the engine use `Uuid`.

pub type UserId = u64;
pub type PromoterId = u64;
pub type VenueId = u64;
pub type EventId = u64;
pub type BookingId = u64;
