//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber once, at startup.
//!
//! - **Filtering** through `RUST_LOG`, falling back to `info`
//! - **Compact** output hides module paths (`with_target(false)`); actor events carry an
//!   `entity_type` field instead
//! - **JSON** output for log shippers
//!
//! ## What Gets Traced
//!
//! Actor start and shutdown with their size, every create/update/action at `info` (payloads at
//! `debug`), refused reservations and storage failures at `warn`. Client calls open an
//! `#[instrument]` span. Actors run in their own tasks and log outside it, keyed by
//! `entity_type` and `id`, so an order shows up as:
//!
//! ```text
//! INFO Action ok entity_type="Product" id=W-1
//! INFO Stock reserved order_id=1 product_id=W-1 total=5.0
//! INFO Created entity_type="Order" id=1 size=1
//! INFO create_order{product_id=W-1 quantity=2}: Order placed order_id=1 total=5.0
//! ```
//!
//! ```bash
//! RUST_LOG=debug stockroom --log-format json
//! ```

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
