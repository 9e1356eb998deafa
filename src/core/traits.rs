//! Core traits for ticket storage and time
//!
//! This module defines the seams that let the issuer and settler run against
//! any storage backend and any clock.

use crate::types::{ParkingError, Settlement, Ticket, TicketId};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Keyed ticket storage
///
/// A plain keyed store with last-write-wins `put`, plus one conditional
/// update used to close tickets. Implementations own no business logic.
///
/// Storage calls are the only points where an operation awaits I/O. A failed
/// call must not leave a partially written record visible to callers.
pub trait TicketStore: Send + Sync {
    /// Insert or overwrite the record at `ticket.id`
    ///
    /// Fails with `PersistenceFailure` on any I/O or encoding error.
    fn put(&self, ticket: &Ticket) -> impl Future<Output = Result<(), ParkingError>> + Send;

    /// Look up the record for `id`
    ///
    /// Returns `Ok(None)` when no record exists. I/O failures are
    /// `PersistenceFailure`; undecodable records are `InternalFormat`.
    fn get(
        &self,
        id: &TicketId,
    ) -> impl Future<Output = Result<Option<Ticket>, ParkingError>> + Send;

    /// Close the ticket with `settlement` only if it is still open
    ///
    /// Atomic with respect to other calls for the same id: exactly one caller
    /// closes an open ticket, every other caller receives the record it
    /// closed. Returns the stored record after the call, or `Ok(None)` if no
    /// record exists.
    fn close_if_open(
        &self,
        id: &TicketId,
        settlement: Settlement,
    ) -> impl Future<Output = Result<Option<Ticket>, ParkingError>> + Send;
}

/// Source of wall-clock time
pub trait Clock: Send + Sync {
    /// Current time; successive calls never go backwards
    fn now(&self) -> DateTime<Utc>;
}
