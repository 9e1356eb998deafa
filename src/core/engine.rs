//! Parking engine
//!
//! This module provides the ParkingEngine that wires the TicketIssuer and
//! TicketSettler onto one shared store, clock and billing configuration.

use crate::core::billing::BillingConfig;
use crate::core::clock::SystemClock;
use crate::core::issuer::TicketIssuer;
use crate::core::settler::TicketSettler;
use crate::core::traits::{Clock, TicketStore};
use crate::types::{ExitReceipt, ParkingError, TicketId};
use std::sync::Arc;

/// Entry and exit operations over a shared ticket store
///
/// Cheap to share: wrap it in an `Arc` and hand it to every request.
pub struct ParkingEngine<S, C = SystemClock> {
    issuer: TicketIssuer<S, C>,
    settler: TicketSettler<S, C>,
}

impl<S> ParkingEngine<S, SystemClock>
where
    S: TicketStore,
{
    /// Create an engine reading the system clock
    pub fn new(store: S, billing: BillingConfig) -> Self {
        Self::with_clock(Arc::new(store), Arc::new(SystemClock::new()), billing)
    }
}

impl<S, C> ParkingEngine<S, C>
where
    S: TicketStore,
    C: Clock,
{
    /// Create an engine with an explicit clock
    pub fn with_clock(store: Arc<S>, clock: Arc<C>, billing: BillingConfig) -> Self {
        ParkingEngine {
            issuer: TicketIssuer::new(Arc::clone(&store), Arc::clone(&clock)),
            settler: TicketSettler::new(store, clock, billing),
        }
    }

    /// Record a vehicle entering `lot` and return its new ticket id
    pub async fn issue(&self, license: &str, lot: &str) -> Result<TicketId, ParkingError> {
        self.issuer.issue(license, lot).await
    }

    /// Record a vehicle leaving and return the frozen charge
    pub async fn settle(&self, id: &TicketId) -> Result<ExitReceipt, ParkingError> {
        self.settler.settle(id).await
    }

    pub fn billing(&self) -> &BillingConfig {
        self.settler.billing()
    }
}
