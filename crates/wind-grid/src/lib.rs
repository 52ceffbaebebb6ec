//! Wind vector field snapshots.
//!
//! A [`WindGrid`] is an immutable snapshot of a gridded (u, v) wind field
//! over a rectilinear lon/lat grid, built from the backend's wind-data
//! response. Sampling is nearest-neighbor with a deterministic tie-break;
//! there is no interpolation.

pub mod components;
pub mod error;
pub mod grid;

pub use components::{find_wind_components, WindComponents};
pub use error::WindGridError;
pub use grid::{WindGrid, WindSample};
