//! Error types for wind grid construction.

use thiserror::Error;

/// Errors that can occur when building a wind grid from response data.
#[derive(Error, Debug)]
pub enum WindGridError {
    /// The coordinate axes are empty.
    #[error("empty grid axes: {lons} longitudes, {lats} latitudes")]
    EmptyAxes { lons: usize, lats: usize },

    /// Component array length does not match the axes.
    #[error("{component} component has {actual} values, expected {expected}")]
    LengthMismatch {
        component: &'static str,
        actual: usize,
        expected: usize,
    },

    /// A 2-D component array is ragged or has the wrong row count.
    #[error("{component} component row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        component: &'static str,
        row: usize,
        actual: usize,
        expected: usize,
    },
}
