//! Persisted ticket record layout
//!
//! One JSON object per ticket:
//!
//! ```text
//! {
//!   "TicketID": "0b6f...",
//!   "License": "123",
//!   "ParkingLot": 1,
//!   "EntryTime": "2024-03-01T08:00:00Z",
//!   "ParkedTime": 960000000000,
//!   "Charge": "5.00",
//!   "Closed": true
//! }
//! ```
//!
//! `ParkedTime` is whole nanoseconds. `Charge` is a decimal string so the
//! amount round-trips exactly.

use crate::types::{LotId, ParkingError, Ticket, TicketId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    #[serde(rename = "TicketID")]
    pub ticket_id: String,
    #[serde(rename = "License")]
    pub license: String,
    #[serde(rename = "ParkingLot")]
    pub parking_lot: LotId,
    #[serde(rename = "EntryTime")]
    pub entry_time: DateTime<Utc>,
    #[serde(rename = "ParkedTime")]
    pub parked_time: u64,
    #[serde(rename = "Charge")]
    pub charge: Decimal,
    #[serde(rename = "Closed")]
    pub closed: bool,
}

impl TryFrom<&Ticket> for TicketRecord {
    type Error = ParkingError;

    fn try_from(ticket: &Ticket) -> Result<Self, Self::Error> {
        let parked_time = u64::try_from(ticket.parked_duration.as_nanos()).map_err(|_| {
            ParkingError::persistence("encode", "parked duration exceeds the record range")
        })?;

        Ok(TicketRecord {
            ticket_id: ticket.id.to_string(),
            license: ticket.license.clone(),
            parking_lot: ticket.lot,
            entry_time: ticket.entry_time,
            parked_time,
            charge: ticket.charge,
            closed: ticket.closed,
        })
    }
}

impl From<TicketRecord> for Ticket {
    fn from(record: TicketRecord) -> Self {
        Ticket {
            id: TicketId::from(record.ticket_id),
            license: record.license,
            lot: record.parking_lot,
            entry_time: record.entry_time,
            parked_duration: Duration::from_nanos(record.parked_time),
            charge: record.charge,
            closed: record.closed,
        }
    }
}

/// Serialize a ticket into its stored bytes
pub fn encode(ticket: &Ticket) -> Result<Vec<u8>, ParkingError> {
    let record = TicketRecord::try_from(ticket)?;
    serde_json::to_vec_pretty(&record).map_err(|e| ParkingError::persistence("encode", e))
}

/// Decode stored bytes for ticket `id`
///
/// A record whose embedded id disagrees with the key it was stored under is
/// treated as corrupt.
pub fn decode(id: &TicketId, bytes: &[u8]) -> Result<Ticket, ParkingError> {
    let record: TicketRecord = serde_json::from_slice(bytes)
        .map_err(|e| ParkingError::internal_format(id.as_str(), e))?;

    if record.ticket_id != id.as_str() {
        return Err(ParkingError::internal_format(
            id.as_str(),
            format!("record is keyed as {}", record.ticket_id),
        ));
    }

    Ok(Ticket::from(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Settlement;
    use chrono::TimeZone;

    fn closed_ticket() -> Ticket {
        let entry = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut ticket = Ticket::open(TicketId::from("abc"), "123".to_string(), 1, entry);
        ticket.close(Settlement {
            parked_duration: Duration::new(16 * 60, 123_456_789),
            charge: Decimal::new(500, 2),
        });
        ticket
    }

    #[test]
    fn test_encode_decode_preserves_every_field() {
        let ticket = closed_ticket();
        let bytes = encode(&ticket).unwrap();
        assert_eq!(decode(&ticket.id, &bytes).unwrap(), ticket);
    }

    #[test]
    fn test_encoded_field_names() {
        let bytes = encode(&closed_ticket()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["TicketID"], "abc");
        assert_eq!(value["License"], "123");
        assert_eq!(value["ParkingLot"], 1);
        assert_eq!(value["EntryTime"], "2024-03-01T08:00:00Z");
        assert_eq!(value["ParkedTime"], 960_123_456_789u64);
        assert_eq!(value["Charge"], "5.00");
        assert_eq!(value["Closed"], true);
    }

    #[test]
    fn test_decode_garbage_is_internal_format() {
        let result = decode(&TicketId::from("abc"), b"{not json");
        assert!(matches!(result, Err(ParkingError::InternalFormat { .. })));
    }

    #[test]
    fn test_decode_negative_parked_time_is_internal_format() {
        let json = br#"{"TicketID":"abc","License":"1","ParkingLot":1,"EntryTime":"2024-03-01T08:00:00Z","ParkedTime":-5,"Charge":"0","Closed":false}"#;
        let result = decode(&TicketId::from("abc"), json);
        assert!(matches!(result, Err(ParkingError::InternalFormat { .. })));
    }

    #[test]
    fn test_decode_mismatched_id_is_internal_format() {
        let bytes = encode(&closed_ticket()).unwrap();
        let result = decode(&TicketId::from("other"), &bytes);
        assert!(matches!(result, Err(ParkingError::InternalFormat { .. })));
    }
}
