pub mod analytics;
pub mod attendance;
pub mod calendar;
pub mod commands;
pub mod guestlist;
pub mod ids;
pub mod invitations;
pub mod schedule;
