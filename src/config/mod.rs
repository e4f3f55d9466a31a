//! Application-level configuration.
//!
//! Most settings live in the `jobboard-config` crate; this module holds the
//! pieces that need the database driver.
//!
//! - [`database`]: PostgreSQL pool initialization and migrations

pub mod database;
