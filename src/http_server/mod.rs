//! # HTTP Server Module
//!
//! Serves the record handler over plain HTTP for local use. Each HTTP
//! request becomes one request event; the handler's envelope becomes the
//! HTTP response unchanged.

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{event_from_parts, HttpServer};
