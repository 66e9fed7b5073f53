//! Point-array fragment rendering.
//!
//! A fragment is the small JS source file the published page loads (or, for
//! the primary scenario, has spliced into it):
//!
//! ```text
//! const HEAT_POINTS = [
//!   {lat:40.75,lng:-73.99,rent:3200,n:12},
//! ];
//! ```
//!
//! The literal syntax is part of the published page's contract, so rendering
//! lives in one place and is covered by tests.

use std::fs;
use std::path::Path;

use crate::domain::GridPoint;
use crate::error::AppError;

/// Render a named point-array declaration.
pub fn render_fragment(const_name: &str, points: &[GridPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("const {const_name} = [\n"));
    for p in points {
        out.push_str(&format!(
            "  {{lat:{},lng:{},rent:{},n:{}}},\n",
            p.lat, p.lng, p.rent, p.n
        ));
    }
    out.push_str("];\n");
    out
}

/// Render just the array literal (no declaration), for embedding.
pub fn render_array_literal(points: &[GridPoint]) -> String {
    let mut out = String::new();
    out.push_str("[\n");
    for p in points {
        out.push_str(&format!(
            "  {{lat:{},lng:{},rent:{},n:{}}},\n",
            p.lat, p.lng, p.rent, p.n
        ));
    }
    out.push(']');
    out
}

/// Write a fragment file.
pub fn write_fragment(path: &Path, const_name: &str, points: &[GridPoint]) -> Result<(), AppError> {
    fs::write(path, render_fragment(const_name, points)).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write fragment '{}': {e}", path.display()),
        )
    })
}
