// src/lib.rs
//! Reconstructs which stimulation and test case each event of an HTML
//! test-run report belongs to, then aggregates passes, warnings, errors and
//! failures per run and across runs.

pub mod aggregate;
pub mod campaign;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod document;
pub mod error;
pub mod exit;
pub mod multirun;
pub mod reporting;
pub mod resolve;
pub mod rows;
pub mod summary;
pub mod telemetry;
