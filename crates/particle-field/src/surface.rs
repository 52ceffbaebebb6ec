//! RGBA canvas with trail fade and PNG frame encoding.

use std::io::Write;

use thiserror::Error;
use viz_common::GeoBounds;

use crate::color::Color;

/// Errors from frame encoding.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("IDAT compression failed: {0}")]
    Compression(String),
}

/// An RGBA pixel buffer (4 bytes per pixel, row-major).
///
/// Frames are composited rather than cleared: [`Canvas::fade`] dims the
/// previous frame so moving particles leave decaying trails.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Dim the previous frame instead of clearing it.
    ///
    /// Every pixel's alpha is scaled by `keep` (0.0..=1.0); once a trail
    /// fades below visibility its color channels are zeroed so the
    /// buffer converges back to fully transparent.
    pub fn fade(&mut self, keep: f32) {
        let keep = keep.clamp(0.0, 1.0);
        for pixel in self.pixels.chunks_exact_mut(4) {
            let alpha = (pixel[3] as f32 * keep) as u8;
            pixel[3] = alpha;
            if alpha < 4 {
                pixel[0] = 0;
                pixel[1] = 0;
                pixel[2] = 0;
                pixel[3] = 0;
            }
        }
    }

    /// Map a geographic position into pixel coordinates.
    ///
    /// North maps to the top row. Positions outside `bounds` land outside
    /// the canvas and are clipped at draw time.
    pub fn to_pixel(&self, bounds: &GeoBounds, lon: f64, lat: f64) -> (i64, i64) {
        let x = (lon - bounds.west) / bounds.width() * (self.width.saturating_sub(1)) as f64;
        let y = (bounds.north - lat) / bounds.height() * (self.height.saturating_sub(1)) as f64;
        (x.round() as i64, y.round() as i64)
    }

    /// Draw a filled square of `size` pixels centered at (cx, cy),
    /// clipped to the canvas.
    pub fn fill_square(&mut self, cx: i64, cy: i64, size: u32, color: Color) {
        let half = (size / 2) as i64;
        for y in (cy - half)..=(cy + half) {
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for x in (cx - half)..=(cx + half) {
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let idx = (y as usize * self.width + x as usize) * 4;
                self.pixels[idx] = color.r;
                self.pixels[idx + 1] = color.g;
                self.pixels[idx + 2] = color.b;
                self.pixels[idx + 3] = color.a;
            }
        }
    }

    /// Encode the current frame as an RGBA PNG (color type 6).
    pub fn to_png(&self) -> Result<Vec<u8>, CanvasError> {
        let mut png = Vec::new();

        // PNG signature
        png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

        // IHDR chunk
        let mut ihdr_data = Vec::with_capacity(13);
        ihdr_data.extend_from_slice(&(self.width as u32).to_be_bytes());
        ihdr_data.extend_from_slice(&(self.height as u32).to_be_bytes());
        ihdr_data.push(8); // bit depth
        ihdr_data.push(6); // color type (RGBA)
        ihdr_data.push(0); // compression method
        ihdr_data.push(0); // filter method
        ihdr_data.push(0); // interlace method
        write_chunk(&mut png, b"IHDR", &ihdr_data);

        // IDAT chunk: filter byte 0 per scanline, zlib-compressed
        let mut uncompressed = Vec::with_capacity(self.height * (1 + self.width * 4));
        for y in 0..self.height {
            uncompressed.push(0); // filter type: none
            let row_start = y * self.width * 4;
            let row_end = row_start + self.width * 4;
            uncompressed.extend_from_slice(&self.pixels[row_start..row_end]);
        }

        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder
            .write_all(&uncompressed)
            .map_err(|e| CanvasError::Compression(e.to_string()))?;
        let compressed = encoder
            .finish()
            .map_err(|e| CanvasError::Compression(e.to_string()))?;
        write_chunk(&mut png, b"IDAT", &compressed);

        // IEND chunk
        write_chunk(&mut png, b"IEND", &[]);

        Ok(png)
    }
}

/// Write a PNG chunk: length, type, data, CRC.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
