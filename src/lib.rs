//! Desktop software activation client
//!
//! Derives a stable machine fingerprint from local hardware signals and runs
//! the two-step authorization handshake against the licensing service:
//! check whether this machine needs an authorization code, and validate a
//! user-supplied code.

pub mod client;
pub mod config;
pub mod fingerprint;
pub mod launcher;
pub mod utils;
