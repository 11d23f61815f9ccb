//! Paired RGB/HSV representation of one capture.
//!
//! The HSV plane follows the byte convention of the capture stack: hue in
//! `0..180` (degrees halved), saturation and value in `0..256`.  Calibration
//! ranges are expressed in the same scale, so a profile written against
//! previously captured material stays valid.

use cubescan_hal::Frame;
use cubescan_types::{Coordinate, CubeError};
use tracing::debug;

/// One capture in both raw RGB and HSV form.  Built on demand from a raw
/// [`Frame`], never mutated, dropped after sampling.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    hsv: Vec<[f32; 3]>,
}

impl Image {
    /// Convert a raw frame into the paired representation.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] when the frame buffer does not match
    /// its declared dimensions (a driver fault).
    pub fn from_frame(frame: Frame) -> Result<Self, CubeError> {
        if frame.data.len() != frame.expected_len() {
            return Err(CubeError::HardwareIo {
                component: "camera".to_string(),
                details: format!(
                    "frame buffer is {} bytes, expected {}",
                    frame.data.len(),
                    frame.expected_len()
                ),
            });
        }
        let hsv = frame
            .data
            .chunks_exact(3)
            .map(|px| rgb_to_hsv([px[0], px[1], px[2]]))
            .collect();
        Ok(Self {
            width: frame.width,
            height: frame.height,
            rgb: frame.data,
            hsv,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGB plane, row-major, 3 bytes per pixel.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Mean HSV over the half-open square window `[c - radius, c + radius)`
    /// around `center`, clamped at the image borders.
    ///
    /// A window that falls entirely outside the image yields a zero triple;
    /// the classifier still resolves it to a nearest color, so a miscalibrated
    /// coordinate degrades to a wrong reading rather than an abort.
    pub fn mean_hsv(&self, center: Coordinate, radius: u32) -> [f32; 3] {
        let x0 = center.x.saturating_sub(radius);
        let x1 = (center.x + radius).min(self.width);
        let y0 = center.y.saturating_sub(radius);
        let y1 = (center.y + radius).min(self.height);

        let mut sum = [0.0f32; 3];
        let mut count = 0u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let px = self.hsv[(y * self.width + x) as usize];
                for i in 0..3 {
                    sum[i] += px[i];
                }
                count += 1;
            }
        }
        if count == 0 {
            debug!(x = center.x, y = center.y, "sample window outside image");
            return [0.0; 3];
        }
        sum.map(|s| s / count as f32)
    }
}

/// Per-pixel RGB → HSV in the byte convention (H in 0..180, S/V in 0..256).
fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [f32; 3] {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * delta / v };
    let h = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };
    [h / 2.0, s, v]
}
