//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `ticket`: Ticket records, identifiers and settlement values
//! - `error`: Error types for the parking ticket engine

pub mod error;
pub mod ticket;

pub use error::ParkingError;
pub use ticket::{ExitReceipt, LotId, Settlement, Ticket, TicketId};
