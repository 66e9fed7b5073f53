//! Listing acquisition.
//!
//! The scraper is an external collaborator; the pipeline only depends on the
//! `ListingSource` capability, so offline runs and tests can swap in the
//! file-backed source.

pub mod source;

pub use source::*;
