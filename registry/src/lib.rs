//! Schema registry and data-access services for the booking platform.
//!
//! The crate is organised hexagonally:
//! - [`domain`] holds the table catalog, typed shapes, ports, and the
//!   services behind the remote procedures.
//! - [`outbound`] holds the Diesel/PostgreSQL adapters implementing those
//!   ports.
//! - [`config`] loads database settings from the environment.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::DatabaseSettings;
