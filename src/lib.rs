//! MathHub backend library: remote problem sheet repository, filter engine,
//! HTML fragment renderer, durable progress store, and the HTTP controller
//! that wires them together.

pub mod config;
pub mod domain;
pub mod filter;
pub mod progress;
pub mod protocol;
pub mod render;
pub mod repository;
pub mod routes;
pub mod state;
pub mod telemetry;
