//! Parking Ticket Engine Library
//! # Overview
//!
//! This library issues and settles parking tickets: one operation records a
//! vehicle's entry and mints a ticket, the other records its exit, computes
//! the charge and closes the ticket.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Ticket, TicketId, ParkingError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::issuer`] - Ticket creation
//!   - [`core::settler`] - Exactly-once closing and charging
//!   - [`core::billing`] - Quantization of parked time into billing segments
//!   - [`core::engine`] - Issue/settle orchestration
//! - [`store`] - Pluggable ticket storage (durable files or in-memory)
//! - [`handler`] - Transport-agnostic request routing and error mapping
//!
//! # Ticket Lifecycle
//!
//! - **Issue**: validate the lot id, mint a random id, persist an open ticket
//! - **Settle**: on the first call compute the parked duration and charge and
//!   close the ticket; on every later call return the stored values
//!
//! # Billing
//!
//! Parked time is rounded up to whole billing units (15 minutes by default)
//! and each unit costs its share of the hourly rate (10.00 by default, so
//! 2.50 per unit). Zero time costs nothing.

// Module declarations
pub mod cli;
pub mod core;
pub mod handler;
pub mod store;
pub mod types;

pub use core::{BillingConfig, ParkingEngine, TicketIssuer, TicketSettler, TicketStore};
pub use store::{FileTicketStore, InMemoryTicketStore, StoreBackend, StoreConfig, StoreType};
pub use types::{ExitReceipt, LotId, ParkingError, Settlement, Ticket, TicketId};
