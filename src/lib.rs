//! travel-records - an in-memory travel log service
//!
//! The record store and schema validator are the core; the HTTP server,
//! weather client, configuration and CLI sit around them.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod records;
pub mod schema;
pub mod weather;
