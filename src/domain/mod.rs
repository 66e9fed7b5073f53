//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw listing records as the scraper emits them (`Listing`)
//! - aggregated outputs (`GridPoint`, `RegionStat`, `Summary`)
//! - scenario definitions (`Scenario`, `Population`, `Statistic`)
//! - the resolved run configuration (`RunConfig`)

pub mod types;

pub use types::*;
