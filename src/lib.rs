//! Infrastructure pricing calculator.
//!
//! The library holds everything the `quoter` binary and the local web
//! console share: the calculator data model, the pure pricing logic
//! (tier resolution, aggregation, currency lookup, local estimates), the
//! `/multi-quote` payload emitter and a thin client for the backend API.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;
pub mod wizard;

pub use error::CalculatorError;
