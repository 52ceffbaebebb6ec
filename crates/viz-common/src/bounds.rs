//! Geographic bounds types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 degrees.
///
/// Matches the backend's upload-response `bounds` object: named edges
/// rather than corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    /// Create a new bounds value from edge coordinates.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Parse an edge list string: "west,south,east,north"
    pub fn from_edge_string(s: &str) -> Result<Self, BoundsParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BoundsParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(part.to_string()))?;
        }

        let bounds = Self::new(values[0], values[1], values[2], values[3]);
        if !bounds.is_valid() {
            return Err(BoundsParseError::Degenerate(s.to_string()));
        }
        Ok(bounds)
    }

    /// Width of the bounds in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the bounds in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Check that the bounds span a non-empty area.
    pub fn is_valid(&self) -> bool {
        self.east > self.west && self.north > self.south
    }

    /// Check if a point is contained within these bounds (edges inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Center point of the bounds as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    /// Clamp a point onto the bounds.
    pub fn clamp(&self, lon: f64, lat: f64) -> (f64, f64) {
        (
            lon.max(self.west).min(self.east),
            lat.max(self.south).min(self.north),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsParseError {
    #[error("Invalid bounds format: {0}. Expected 'west,south,east,north'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),

    #[error("Degenerate bounds (zero or negative extent): {0}")]
    Degenerate(String),
}
