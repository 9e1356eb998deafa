//! Request boundary
//!
//! Routes transport-agnostic requests onto the parking engine and maps each
//! error kind to a response status. Any transport (HTTP server, function
//! runtime, CLI) builds a `Request`, calls `handle`, and renders the
//! `Response`.
//!
//! # Routes
//!
//! - `POST /entry?plate=<license>&parkingLot=<lot>` → `{"ticketId": ...}`
//! - `POST /exit?ticketId=<id>` → `{"license", "parkedTime", "parkingLot", "charge"}`

use crate::core::traits::{Clock, TicketStore};
use crate::core::ParkingEngine;
use crate::types::{ParkingError, TicketId};
use serde::Serialize;
use std::collections::HashMap;

pub mod responses;

pub use responses::{format_parked_time, ExitDetails, TicketIdResponse};

pub const ENTRY_PATH: &str = "/entry";
pub const EXIT_PATH: &str = "/exit";

pub const PLATE_PARAM: &str = "plate";
pub const LOT_PARAM: &str = "parkingLot";
pub const TICKET_PARAM: &str = "ticketId";

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    /// Numeric HTTP status code
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Ok
    }
}

/// An incoming request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
}

impl Request {
    /// Start a POST request to `path`
    pub fn post(path: &str) -> Self {
        Request {
            method: "POST".to_string(),
            path: path.to_string(),
            query: HashMap::new(),
        }
    }

    /// Add a query parameter
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    fn param(&self, key: &str) -> &str {
        self.query.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// The outcome of a request
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: Status,
    /// JSON on success, a plain message otherwise
    pub body: String,
}

impl Response {
    fn new(status: Status, body: impl Into<String>) -> Self {
        Response {
            status,
            body: body.into(),
        }
    }

    fn json<T: Serialize>(body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(json) => Response::new(Status::Ok, json),
            Err(e) => {
                tracing::error!(error = %e, "failed to format response");
                Response::new(Status::InternalServerError, "Failed to format response")
            }
        }
    }
}

/// Dispatch `request` to the matching route
pub async fn handle<S, C>(engine: &ParkingEngine<S, C>, request: &Request) -> Response
where
    S: TicketStore,
    C: Clock,
{
    if !request.method.eq_ignore_ascii_case("POST") {
        return Response::new(Status::MethodNotAllowed, "Method not allowed");
    }

    match request.path.as_str() {
        ENTRY_PATH => entry(engine, request).await,
        EXIT_PATH => exit(engine, request).await,
        _ => Response::new(Status::NotFound, "Not found"),
    }
}

/// Issue a ticket for a vehicle entering a lot
async fn entry<S, C>(engine: &ParkingEngine<S, C>, request: &Request) -> Response
where
    S: TicketStore,
    C: Clock,
{
    let license = request.param(PLATE_PARAM);
    let lot = request.param(LOT_PARAM);

    match engine.issue(license, lot).await {
        Ok(id) => {
            tracing::info!(ticket_id = %id, license, lot, "new ticket generated");
            Response::json(&TicketIdResponse::from(&id))
        }
        Err(e) => {
            tracing::warn!(error = %e, license, lot, "entry rejected");
            error_response(&e, "Failed to store ticket")
        }
    }
}

/// Settle the ticket named in the request
async fn exit<S, C>(engine: &ParkingEngine<S, C>, request: &Request) -> Response
where
    S: TicketStore,
    C: Clock,
{
    let ticket_id = TicketId::from(request.param(TICKET_PARAM));

    match engine.settle(&ticket_id).await {
        Ok(receipt) => {
            let details = ExitDetails::from(&receipt);
            tracing::info!(
                %ticket_id,
                parked_time = %details.parked_time,
                charge = %details.charge,
                "exit ticket details generated"
            );
            Response::json(&details)
        }
        Err(e) => {
            tracing::warn!(error = %e, %ticket_id, "exit rejected");
            error_response(&e, "Failed to settle ticket")
        }
    }
}

/// Map an error kind to its response
fn error_response(error: &ParkingError, persistence_message: &str) -> Response {
    match error {
        ParkingError::InvalidInput { .. } => {
            Response::new(Status::BadRequest, "Invalid parking lot ID")
        }
        ParkingError::NotFound { .. } => Response::new(Status::NotFound, "Ticket ID not found"),
        ParkingError::PersistenceFailure { .. } => {
            Response::new(Status::InternalServerError, persistence_message)
        }
        ParkingError::InternalFormat { .. } => {
            Response::new(Status::InternalServerError, "Ticket record is unreadable")
        }
    }
}
