use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::utils::guestlist::models::GuestlistJoinRequest;
use crate::utils::invitations::models::{EventInvitation, EventInvitationRequest};

/// Every record the engine transitions, in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Records {
    #[serde(default)]
    pub guestlist: Vec<GuestlistJoinRequest>,
    #[serde(default)]
    pub invite_requests: Vec<EventInvitationRequest>,
    #[serde(default)]
    pub invitations: Vec<EventInvitation>,
}

/// In-memory request store.
///
/// Mutations run inside a [`Transaction`], which holds the lock for the whole
/// read-modify-write and only publishes its working copy on commit.
#[derive(Debug, Default)]
pub struct RequestStore {
    records: Mutex<Records>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Records) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn acquire(&self) -> anyhow::Result<MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("Request store lock poisoned"))
    }

    pub fn begin(&self) -> anyhow::Result<Transaction<'_>> {
        let guard = self.acquire()?;
        let working = guard.clone();
        Ok(Transaction { guard, working })
    }

    pub fn snapshot(&self) -> anyhow::Result<Records> {
        Ok(self.acquire()?.clone())
    }
}

pub struct Transaction<'s> {
    guard: MutexGuard<'s, Records>,
    working: Records,
}

impl Transaction<'_> {
    pub fn commit(self) {
        let Transaction { mut guard, working } = self;
        *guard = working;
        trace!("Committed request store transaction");
    }
}

impl Deref for Transaction<'_> {
    type Target = Records;

    fn deref(&self) -> &Self::Target {
        &self.working
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.working
    }
}

/// Domain marker `T` paired with the records it operates on.
pub struct StoreQuery<'c, T> {
    pub payload: T,
    pub conn: &'c mut Records,
}

impl<'c, T> StoreQuery<'c, T> {
    pub fn new(payload: T, conn: &'c mut Records) -> Self {
        Self { payload, conn }
    }
}
