//! Database layer for Roster
//!
//! SQLite persistence for teams, users, pull requests and reviewer slots,
//! exposed to the services through [`SqliteStore`].

pub mod connection;
pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use connection::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use store::SqliteStore;
