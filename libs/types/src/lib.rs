//! Types library for the event registration gateway
//!
//! Shared by the store and the gateway so that both sides agree on what a
//! category is, what an event carries, and how a statistics window is
//! expressed.
//!
//! # Modules
//! - `category`: Category names and the fixed allow-list
//! - `event`: The immutable event record
//! - `window`: Trailing look-back window for statistics
//! - `stats`: Zero-filled per-category counts
//! - `errors`: Validation error taxonomy

// Public modules
pub mod category;
pub mod event;
pub mod window;
pub mod stats;
pub mod errors;

