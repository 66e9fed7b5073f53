//! Run summary computation and formatted output.
//!
//! The `Summary` struct is the in-memory contract between the aggregator and
//! the publisher/notifier; the text report rendered here is a log and
//! inspection artifact, not a stage input.

pub mod format;
pub mod post;

pub use format::*;
pub use post::*;
