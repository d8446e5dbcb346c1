//! CORS relay library.
//!
//! A development-time HTTP relay: every request is forwarded to one fixed
//! upstream and every response is made readable from any browser origin.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
