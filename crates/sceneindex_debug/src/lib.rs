//! Consistency checking and drift reports for the scene index.
//!
//! This crate provides:
//! - [`ConsistencyChecker`] - Compares a [`SceneIndex`](sceneindex_engine::SceneIndex)
//!   against its store and produces a [`ConsistencyReport`]
//! - [`PeriodicCheck`] - Re-runs the checker on an interval and applies a
//!   [`DriftPolicy`] when drift is found
//! - [`CheckerConfig`] - Interval, drift policy, and log limits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checker;
pub mod config;
pub mod periodic;
pub mod report;

pub use checker::ConsistencyChecker;
pub use config::{CheckerConfig, DriftPolicy};
pub use periodic::PeriodicCheck;
pub use report::{ConsistencyReport, ReportStats};
