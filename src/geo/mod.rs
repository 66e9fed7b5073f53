//! Geographic helpers.
//!
//! - borough (region) assignment from neighborhood names with a coordinate
//!   fallback (`borough`)
//! - adaptive grid-cell sizing and binning keys (`grid`)

pub mod borough;
pub mod grid;

pub use borough::*;
pub use grid::*;
