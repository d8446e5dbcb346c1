//! HTTP relay subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one tokio task per connection, axum/hyper)
//!     → cors.rs (five cross-origin headers on every response)
//!     → server.rs (preflight short-circuit, per-transaction span)
//!     → forward.rs (collect body, build outbound request)
//!     → hyper client → upstream
//!     → upstream status + headers copied, body streamed back
//!     → error.rs (502 / 500 JSON payloads when dispatch fails)
//! ```
//!
//! Transaction states:
//!     Received → PreflightAnswered
//!     Received → BodyCollected → Dispatched → Relayed | GatewayFailed | ServerFailed

pub mod cors;
pub mod error;
pub mod forward;
pub mod server;

pub use error::RelayError;
pub use server::RelayServer;
