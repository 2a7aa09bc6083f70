//! vehicle-registry - CRUD request handler for a vehicle collection
//!
//! A request event (method + JSON body) is routed to create, read, update
//! or delete against a single-key record store, and answered with a
//! status/body/headers envelope. Updates are partial: only the supplied
//! attributes are assigned, through one combined SET mutation.

pub mod cli;
pub mod config;
pub mod handler;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod schema;
pub mod store;
pub mod update;
