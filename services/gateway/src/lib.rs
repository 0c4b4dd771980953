//! Event Gateway
//!
//! Accepts event registrations over HTTP, admits at most `capacity` of them
//! concurrently, persists accepted events, and serves per-category counts
//! over a trailing window.
//!
//! # Routes
//! - `GET /{category}`: register one event
//!   (200 / 400 undefined category / 509 gate exhausted / 500 store failure)
//! - `GET /stat?time={hours}`: counts for the last `hours` (default 1)
//!   (200 JSON / 400 bad `time` / 500 store failure)

pub mod admission;
pub mod aggregation;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ingestion;
pub mod models;
pub mod router;
pub mod state;

pub use admission::{AdmissionGate, AdmissionPermit};
pub use aggregation::AggregationService;
pub use config::GatewayConfig;
pub use error::AppError;
pub use ingestion::IngestionService;
pub use router::create_router;
pub use state::AppState;
