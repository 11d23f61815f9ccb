//! Generic `Camera` trait and the raw frame type.

use std::time::Duration;

use cubescan_types::CubeError;

/// A raw RGB24 frame returned by a camera driver.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Packed RGB pixel data, row-major, 3 bytes per pixel.
    pub data: Vec<u8>,
}

impl Frame {
    /// Expected byte length of `data` for the declared dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// An image-capture device at one mount position.
///
/// Drivers implement this trait and are handed to the
/// [`CaptureAdapter`][crate::adapter::CaptureAdapter], which owns them for
/// its lifetime and releases the underlying handles when dropped.
pub trait Camera: Send + Sync {
    /// Stable identifier for this camera, e.g. `"cam:lower"`.
    fn id(&self) -> &str;

    /// Capture and return the next available frame, waiting at most
    /// `timeout` for the device.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] if no frame arrives within the
    /// budget or the device fails.
    fn capture(&mut self, timeout: Duration) -> Result<Frame, CubeError>;
}
