#![forbid(unsafe_code)]

//! Core domain model and business logic for the Legday training system.
//!
//! This crate provides:
//! - Domain types (exercises, timer settings, advice exchanges)
//! - The exercise catalog
//! - The interval-timer state machine and its wall-clock driver
//! - Calorie estimation
//! - The trainer-advice relay client
//! - Incidental persistence of the session clock

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod timer;
pub mod session;
pub mod calories;
pub mod advice;
pub mod sink;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use timer::{TickOutcome, TimerState};
pub use session::{SessionStore, TickerGuard};
pub use calories::estimate_kcal;
pub use advice::{
    AdviceClient, AdviceTransport, HttpRelay, FALLBACK_MESSAGE, QUICK_QUESTIONS, TRAINER_PREAMBLE,
};
pub use sink::{ElapsedSink, JsonFileSink, NoopSink};
