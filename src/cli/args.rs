use crate::core::BillingConfig;
use crate::handler::{Request, ENTRY_PATH, EXIT_PATH, LOT_PARAM, PLATE_PARAM, TICKET_PARAM};
use crate::store::{StoreConfig, StoreType};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Issue and settle parking tickets
#[derive(Parser, Debug)]
#[command(name = "parking-tickets")]
#[command(about = "Issue and settle parking tickets", long_about = None)]
pub struct CliArgs {
    /// Directory holding ticket records
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "tickets",
        help = "Directory holding one record file per ticket"
    )]
    pub data_dir: PathBuf,

    /// Storage backend
    #[arg(
        long = "store",
        value_name = "STORE",
        default_value = "file",
        help = "Storage backend: 'file' for durable records or 'memory' for a throwaway session"
    )]
    pub store: StoreType,

    /// Charge per hour of parking
    #[arg(
        long = "hourly-rate",
        value_name = "AMOUNT",
        help = "Charge per hour of parking (default: 10.00)"
    )]
    pub hourly_rate: Option<Decimal>,

    /// Billing unit in minutes
    #[arg(
        long = "billing-unit-minutes",
        value_name = "MINUTES",
        help = "Parked time is rounded up to this many minutes (default: 15)"
    )]
    pub billing_unit_minutes: Option<u64>,

    /// Runtime worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Ticket operations
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a vehicle entering a lot and print its ticket id
    Entry {
        /// Vehicle license plate
        #[arg(long = "plate", default_value = "")]
        plate: String,

        /// Parking lot identifier
        #[arg(long = "parking-lot", value_name = "LOT")]
        parking_lot: String,
    },

    /// Record a vehicle leaving and print its charge
    Exit {
        /// Ticket id returned on entry
        #[arg(long = "ticket-id", value_name = "ID")]
        ticket_id: String,
    },
}

impl CliArgs {
    /// Create a BillingConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; invalid ones are replaced
    /// by `BillingConfig::new`.
    pub fn to_billing_config(&self) -> BillingConfig {
        if self.hourly_rate.is_some() || self.billing_unit_minutes.is_some() {
            let default = BillingConfig::default();
            BillingConfig::new(
                self.hourly_rate.unwrap_or(default.hourly_rate),
                self.billing_unit_minutes
                    .map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
                    .unwrap_or(default.billing_unit),
            )
        } else {
            BillingConfig::default()
        }
    }

    /// Create a StoreConfig from CLI arguments
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            store_type: self.store,
            data_dir: self.data_dir.clone(),
        }
    }

    /// Worker thread count, falling back to the CPU count for zero or unset
    pub fn worker_threads(&self) -> usize {
        match self.workers {
            Some(workers) if workers > 0 => workers,
            _ => num_cpus::get(),
        }
    }

    /// The request this invocation stands for
    pub fn to_request(&self) -> Request {
        match &self.command {
            Command::Entry { plate, parking_lot } => Request::post(ENTRY_PATH)
                .with_param(PLATE_PARAM, plate)
                .with_param(LOT_PARAM, parking_lot),
            Command::Exit { ticket_id } => {
                Request::post(EXIT_PATH).with_param(TICKET_PARAM, ticket_id)
            }
        }
    }
}
