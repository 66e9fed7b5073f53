//! Aggregation: turning raw listings into grid points.
//!
//! - population selection + cleaning + rent-stabilized filtering (`filter`)
//! - grid binning and per-cell statistics (`grid`)
//! - optional smoothing / clamping passes (`smooth`)

pub mod filter;
pub mod grid;
pub mod smooth;

pub use filter::*;
pub use grid::*;
pub use smooth::*;
