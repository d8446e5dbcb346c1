//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every transaction opens a `transaction` span (request_id, method, uri)
//!     → handler events (preflight, forwarding, upstream status, errors)
//!     → tower_http TraceLayer (request/response/failure events)
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
