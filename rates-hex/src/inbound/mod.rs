//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod server;

pub use handlers::{CONVERSION_CACHE_CONTROL, LISTING_CACHE_CONTROL};
pub use server::HttpServer;
