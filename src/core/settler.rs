//! Ticket settlement
//!
//! The settler closes a ticket and fixes its charge. The first successful
//! call computes the parked duration and charge and persists them; every
//! later call returns the stored values untouched.
//!
//! Two concurrent calls for the same open ticket may both compute a
//! settlement, but the store's conditional close lets only one of them land.
//! The loser returns the winner's values, so every caller sees the same
//! result.

use crate::core::billing::BillingConfig;
use crate::core::traits::{Clock, TicketStore};
use crate::types::{ExitReceipt, ParkingError, TicketId};
use std::sync::Arc;

/// Closes tickets and computes their charge
pub struct TicketSettler<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    billing: BillingConfig,
}

impl<S, C> TicketSettler<S, C>
where
    S: TicketStore,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>, billing: BillingConfig) -> Self {
        TicketSettler {
            store,
            clock,
            billing,
        }
    }

    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }

    /// Settle the ticket `id`
    ///
    /// # Returns
    ///
    /// * `Ok(ExitReceipt)` - The license, lot, parked duration and charge as stored
    /// * `Err(ParkingError::NotFound)` - If no ticket exists for `id`
    /// * `Err(ParkingError::PersistenceFailure)` - If reading or closing the ticket failed;
    ///   no computed values are returned in that case
    /// * `Err(ParkingError::InternalFormat)` - If the stored record is corrupt
    pub async fn settle(&self, id: &TicketId) -> Result<ExitReceipt, ParkingError> {
        let ticket = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| ParkingError::not_found(id.as_str()))?;

        if ticket.closed {
            return Ok(ExitReceipt::from(&ticket));
        }

        let settlement = self.billing.settle(ticket.entry_time, self.clock.now());

        // A concurrent settle may have closed the ticket since the read above;
        // the store hands back whichever settlement actually landed.
        let closed = self
            .store
            .close_if_open(id, settlement)
            .await?
            .ok_or_else(|| ParkingError::not_found(id.as_str()))?;

        Ok(ExitReceipt::from(&closed))
    }
}
