//! Ticket-related types for the parking ticket engine
//!
//! This module defines the ticket record, its identifiers, and the values
//! produced when a ticket is settled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Parking lot identifier
///
/// Any integer the caller supplies is accepted, including negative values.
pub type LotId = i64;

/// Opaque ticket identifier
///
/// Minted tickets carry a random (v4) UUID in its hyphenated form. Lookups
/// accept any string, since callers hand identifiers back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(String);

impl TicketId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        TicketId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TicketId {
    fn from(id: String) -> Self {
        TicketId(id)
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        TicketId(id.to_string())
    }
}

/// Final values fixed when a ticket is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Time between entry and the first successful exit
    pub parked_duration: Duration,

    /// Amount charged for the parked duration
    pub charge: Decimal,
}

/// A vehicle's parking session, from entry to exit
///
/// `id`, `license`, `lot` and `entry_time` are fixed at creation.
/// `parked_duration` and `charge` stay zero until the ticket is closed and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Unique identifier assigned at creation
    pub id: TicketId,

    /// Free-text vehicle identifier (may be empty)
    pub license: String,

    /// Lot the vehicle entered
    pub lot: LotId,

    /// Wall-clock time the ticket was minted
    pub entry_time: DateTime<Utc>,

    /// Elapsed time at settlement (zero while open)
    pub parked_duration: Duration,

    /// Charge at settlement (zero while open)
    pub charge: Decimal,

    /// Whether the ticket has been settled
    ///
    /// Monotonic: once true, never reverts.
    pub closed: bool,
}

impl Ticket {
    /// Create an open ticket with zero duration and charge
    pub fn open(id: TicketId, license: String, lot: LotId, entry_time: DateTime<Utc>) -> Self {
        Ticket {
            id,
            license,
            lot,
            entry_time,
            parked_duration: Duration::ZERO,
            charge: Decimal::ZERO,
            closed: false,
        }
    }

    /// Apply a settlement if the ticket is still open
    ///
    /// Returns `true` if the ticket transitioned to closed, `false` if it was
    /// already closed (in which case nothing changes).
    pub fn close(&mut self, settlement: Settlement) -> bool {
        if self.closed {
            return false;
        }
        self.parked_duration = settlement.parked_duration;
        self.charge = settlement.charge;
        self.closed = true;
        true
    }
}

/// Result of settling a ticket, as handed back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ExitReceipt {
    pub license: String,
    pub lot: LotId,
    pub parked_duration: Duration,
    pub charge: Decimal,
}

impl From<&Ticket> for ExitReceipt {
    fn from(ticket: &Ticket) -> Self {
        ExitReceipt {
            license: ticket.license.clone(),
            lot: ticket.lot,
            parked_duration: ticket.parked_duration,
            charge: ticket.charge,
        }
    }
}
