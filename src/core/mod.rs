//! Core business logic module
//!
//! This module contains the ticket lifecycle and billing components:
//! - `traits` - Storage and clock abstractions
//! - `clock` - System and manual clocks
//! - `billing` - Quantization of parked time and charge computation
//! - `issuer` - Ticket creation
//! - `settler` - Ticket closing and charging
//! - `engine` - Issue/settle orchestration over a shared store

pub mod billing;
pub mod clock;
pub mod engine;
pub mod issuer;
pub mod settler;
pub mod traits;

pub use billing::BillingConfig;
pub use clock::{ManualClock, SystemClock};
pub use engine::ParkingEngine;
pub use issuer::TicketIssuer;
pub use settler::TicketSettler;
pub use traits::{Clock, TicketStore};
