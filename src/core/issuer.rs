//! Ticket issuance
//!
//! The issuer validates entry input, mints a fresh identifier, stamps the
//! entry time and persists an open ticket. It is the only component that
//! creates tickets.

use crate::core::traits::{Clock, TicketStore};
use crate::types::{LotId, ParkingError, Ticket, TicketId};
use std::sync::Arc;

/// Mints open tickets for vehicles entering a lot
pub struct TicketIssuer<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TicketIssuer<S, C>
where
    S: TicketStore,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        TicketIssuer { store, clock }
    }

    /// Issue a ticket for `license` entering lot `lot`
    ///
    /// # Arguments
    ///
    /// * `license` - Vehicle identifier; any string, including empty
    /// * `lot` - Lot identifier as supplied by the caller; must parse as an integer
    ///
    /// # Returns
    ///
    /// * `Ok(TicketId)` - The identifier of the newly persisted ticket
    /// * `Err(ParkingError::InvalidInput)` - If `lot` is not an integer (nothing is written)
    /// * `Err(ParkingError::PersistenceFailure)` - If the ticket could not be stored;
    ///   the identifier is withheld since the record may or may not exist
    pub async fn issue(&self, license: &str, lot: &str) -> Result<TicketId, ParkingError> {
        let lot = parse_lot(lot)?;

        let ticket = Ticket::open(
            TicketId::generate(),
            license.to_string(),
            lot,
            self.clock.now(),
        );
        self.store.put(&ticket).await?;

        Ok(ticket.id)
    }
}

/// Parse a caller-supplied lot identifier
pub fn parse_lot(lot: &str) -> Result<LotId, ParkingError> {
    lot.parse::<LotId>()
        .map_err(|e| ParkingError::invalid_input("lot", lot, &e.to_string()))
}
