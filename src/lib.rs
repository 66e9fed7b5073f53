//! `rent-heatmap` library crate.
//!
//! The binary (`rentmap`) is a thin wrapper around this library so that:
//!
//! - the full pipeline is testable without spawning processes
//! - individual stages (aggregate, publish, post) are reusable from tests
//!   and from partial-run subcommands

pub mod agg;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod geo;
pub mod io;
pub mod logging;
pub mod publish;
pub mod release;
pub mod report;
pub mod stats;
