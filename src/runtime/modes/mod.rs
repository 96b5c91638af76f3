//! Mode routing
//!
//! Only the HTTP server mode exists; `generate-config` is handled in `main`
//! before any runtime state is built.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;
