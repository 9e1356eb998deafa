//! Thread-safe in-memory ticket storage
//!
//! This module provides the `InMemoryTicketStore` struct, which keeps tickets
//! in a concurrent map for single-process deployments and tests.
//!
//! # Design
//!
//! `DashMap` shards the map internally, so operations on different tickets do
//! not contend. `close_if_open` runs its check and update while holding the
//! entry's lock, which makes the close transition atomic per ticket.
//!
//! Nothing survives a restart.

use crate::core::traits::TicketStore;
use crate::types::{ParkingError, Settlement, Ticket, TicketId};
use dashmap::DashMap;

/// Concurrent in-memory ticket store
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: DashMap<TicketId, Ticket>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    /// Number of stored tickets
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl TicketStore for InMemoryTicketStore {
    async fn put(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        self.tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, ParkingError> {
        Ok(self.tickets.get(id).map(|entry| entry.value().clone()))
    }

    async fn close_if_open(
        &self,
        id: &TicketId,
        settlement: Settlement,
    ) -> Result<Option<Ticket>, ParkingError> {
        Ok(self.tickets.get_mut(id).map(|mut entry| {
            entry.value_mut().close(settlement);
            entry.value().clone()
        }))
    }
}
