//! Input/output helpers.
//!
//! - listing JSON ingest with skip accounting (`listings`)
//! - JS point-array fragment rendering and writing (`fragments`)

pub mod fragments;
pub mod listings;

pub use fragments::*;
pub use listings::*;
