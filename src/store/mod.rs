//! Ticket storage backends
//!
//! - `memory` - Concurrent in-memory store (single process, not durable)
//! - `file` - Durable store writing one JSON record per ticket
//! - `record` - The persisted record layout shared by durable backends
//!
//! The backend is chosen at startup from a `StoreConfig`; `StoreBackend`
//! dispatches to whichever variant was opened.

use crate::core::traits::TicketStore;
use crate::types::{ParkingError, Settlement, Ticket, TicketId};
use clap::ValueEnum;
use std::path::PathBuf;

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileTicketStore;
pub use memory::InMemoryTicketStore;
pub use record::TicketRecord;

/// Available storage backends
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreType {
    /// One JSON file per ticket under the data directory
    File,
    /// Process-local map; lost on exit
    Memory,
}

/// Storage configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub store_type: StoreType,
    /// Root directory for the file backend (ignored by the memory backend)
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::File,
            data_dir: PathBuf::from("tickets"),
        }
    }
}

/// A storage backend selected by configuration
#[derive(Debug)]
pub enum StoreBackend {
    Durable(FileTicketStore),
    InMemory(InMemoryTicketStore),
}

impl StoreBackend {
    /// Open the backend described by `config`
    pub async fn open(config: &StoreConfig) -> Result<Self, ParkingError> {
        match config.store_type {
            StoreType::File => Ok(StoreBackend::Durable(
                FileTicketStore::open(&config.data_dir).await?,
            )),
            StoreType::Memory => Ok(StoreBackend::InMemory(InMemoryTicketStore::new())),
        }
    }
}

impl TicketStore for StoreBackend {
    async fn put(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        match self {
            StoreBackend::Durable(store) => store.put(ticket).await,
            StoreBackend::InMemory(store) => store.put(ticket).await,
        }
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, ParkingError> {
        match self {
            StoreBackend::Durable(store) => store.get(id).await,
            StoreBackend::InMemory(store) => store.get(id).await,
        }
    }

    async fn close_if_open(
        &self,
        id: &TicketId,
        settlement: Settlement,
    ) -> Result<Option<Ticket>, ParkingError> {
        match self {
            StoreBackend::Durable(store) => store.close_if_open(id, settlement).await,
            StoreBackend::InMemory(store) => store.close_if_open(id, settlement).await,
        }
    }
}
