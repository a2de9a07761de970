//! # Middleware
//!
//! - [`cors`]: open CORS policy for the browser dashboard.
//! - [`metrics`]: request and error counters plus the `/metrics` renderer.
//! - [`tracing_layer`]: per-request tracing spans.

pub mod cors;
pub mod metrics;
pub mod tracing_layer;
