//! Response bodies for the entry and exit routes
//!
//! All functions here are pure (no I/O) for easy testing.

use crate::types::{ExitReceipt, LotId, TicketId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body returned on entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketIdResponse {
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
}

impl From<&TicketId> for TicketIdResponse {
    fn from(id: &TicketId) -> Self {
        TicketIdResponse {
            ticket_id: id.to_string(),
        }
    }
}

/// Body returned on exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitDetails {
    pub license: String,
    #[serde(rename = "parkedTime")]
    pub parked_time: String,
    #[serde(rename = "parkingLot")]
    pub parking_lot: LotId,
    /// Charge with exactly two decimal places
    pub charge: String,
}

impl From<&ExitReceipt> for ExitDetails {
    fn from(receipt: &ExitReceipt) -> Self {
        ExitDetails {
            license: receipt.license.clone(),
            parked_time: format_parked_time(receipt.parked_duration),
            parking_lot: receipt.lot,
            charge: format!("{:.2}", receipt.charge),
        }
    }
}

/// Render a parked duration rounded to the nearest second
///
/// Halfway values round up. Units are dropped from the left while zero:
/// `0s`, `45s`, `1m5s`, `2h0m30s`.
pub fn format_parked_time(parked: Duration) -> String {
    let mut secs = parked.as_secs();
    if parked.subsec_nanos() >= 500_000_000 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
