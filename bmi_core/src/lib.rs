#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI calculator.
//!
//! This crate provides:
//! - Domain types (unit systems, categories, results, history records)
//! - The BMI engine (unit conversion, rounding, classification)
//! - Input bounds and the calculator form state machine
//! - Persistence (key-value backends, bounded history store, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod storage;
pub mod history;
pub mod form;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{calculate, classify, round1};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use history::{HistoryStore, HISTORY_KEY, MAX_HISTORY};
pub use form::{Calculator, Field, FormEvent, FormState, InputBounds};
pub use export::export_csv;
