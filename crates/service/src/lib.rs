//! Service layer for the resume/job client.
//! - `backend`: the API contract, its simulated and HTTP implementations.
//! - `session`: the client-side holder of the authenticated identity.
//! - `auth`, `storage`: identity store and persistence port behind them.
//! - `scoring`, `catalog`, `random`, `latency`: the simulated behaviour.

pub mod errors;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod latency;
pub mod random;
pub mod scoring;
pub mod session;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use backend::{Backend, HttpBackend, MockBackend};
pub use errors::BackendError;
pub use session::{AuthSession, SessionState};
