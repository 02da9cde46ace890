//! Schema sampling and relationship detection for AI-assisted form
//! generation.
//!
//! Given a document store reached through the surrounding application's
//! sampling endpoints, formscout infers a per-field schema from a bounded
//! document sample, guesses which fields reference other collections, and
//! drives the sample → detect → generate → apply wizard that turns the result
//! into a form definition with lookup fields for confirmed references.

pub mod config;
pub mod error;
pub mod inference;
pub mod llm;
pub mod models;
pub mod store;
pub mod wizard;

pub use config::Config;
pub use error::{Result, ScoutError};
