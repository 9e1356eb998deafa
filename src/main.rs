//! Parking ticket CLI
//!
//! Command-line front end for issuing and settling parking tickets against a
//! durable ticket directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- entry --plate 123 --parking-lot 1
//! cargo run -- exit --ticket-id 0b6f6a4e-...
//! cargo run -- --data-dir /var/lib/parking --hourly-rate 12 exit --ticket-id 0b6f6a4e-...
//! ```
//!
//! On success the JSON response body is printed to stdout. Logs go to stderr
//! and are filtered with `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid lot, unknown ticket, storage failure, etc.)

use parking_ticket_engine::cli;
use parking_ticket_engine::core::ParkingEngine;
use parking_ticket_engine::handler;
use parking_ticket_engine::store::StoreBackend;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    cli::init_tracing();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to create runtime");
            process::exit(1);
        }
    };

    let response = runtime.block_on(async {
        let store = StoreBackend::open(&args.to_store_config()).await?;
        let engine = ParkingEngine::new(store, args.to_billing_config());
        Ok::<_, parking_ticket_engine::ParkingError>(
            handler::handle(&engine, &args.to_request()).await,
        )
    });

    match response {
        Ok(response) if response.status.is_success() => println!("{}", response.body),
        Ok(response) => {
            eprintln!("Error ({}): {}", response.status.code(), response.body);
            process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to open ticket store");
            process::exit(1);
        }
    }
}
