//! [`CaptureAdapter`] – owns the rig's drivers and orchestrates captures.
//!
//! The adapter is the single owner of both cameras, the light bank, and the
//! turn actuator.  Dropping it drops the boxed drivers, releasing device
//! handles deterministically on both the success and error paths.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use cubescan_types::{CubeError, FaceTurn, Position};

use crate::actuator::TurnActuator;
use crate::camera::{Camera, Frame};
use crate::light::LightBank;

/// Timeout and settling budgets for hardware round-trips.
///
/// "No response within budget" is a [`CubeError::HardwareIo`], never an
/// unbounded wait.
#[derive(Debug, Clone, Copy)]
pub struct AdapterConfig {
    /// Budget for one frame capture.
    pub capture_timeout: Duration,
    /// Budget for one rotate-and-confirm round-trip.
    pub rotate_timeout: Duration,
    /// Budget for the firmware readiness handshake at startup.
    pub ready_timeout: Duration,
    /// Pause between switching a light on and capturing, letting exposure
    /// adapt to the new illumination.
    pub settle: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            capture_timeout: Duration::from_secs(5),
            rotate_timeout: Duration::from_secs(10),
            ready_timeout: Duration::from_secs(30),
            settle: Duration::from_millis(500),
        }
    }
}

/// Owns one camera per mount position plus the light bank and actuator, and
/// exposes the three orchestrated operations the pipeline needs: readiness
/// handshake, lit capture, and confirmed rotation.
pub struct CaptureAdapter {
    lower_camera: Box<dyn Camera>,
    upper_camera: Box<dyn Camera>,
    lights: Box<dyn LightBank>,
    actuator: Box<dyn TurnActuator>,
    config: AdapterConfig,
}

impl CaptureAdapter {
    /// Assemble an adapter from its drivers.
    pub fn new(
        lower_camera: Box<dyn Camera>,
        upper_camera: Box<dyn Camera>,
        lights: Box<dyn LightBank>,
        actuator: Box<dyn TurnActuator>,
        config: AdapterConfig,
    ) -> Self {
        Self {
            lower_camera,
            upper_camera,
            lights,
            actuator,
            config,
        }
    }

    /// Block until the actuator firmware reports readiness.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] when the handshake does not complete
    /// within the configured budget.
    pub fn wait_ready(&mut self) -> Result<(), CubeError> {
        info!(actuator = self.actuator.id(), "waiting for firmware readiness");
        self.actuator.wait_ready(self.config.ready_timeout)
    }

    /// Capture one frame at `position` under controlled light.
    ///
    /// Switches the position's light on, waits the configured settle time,
    /// captures, then switches the light off, including when the capture
    /// itself failed.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] on light, capture, or timeout
    /// failure, or when the driver returns a frame whose buffer does not
    /// match its declared dimensions.
    pub fn capture_image(&mut self, position: Position) -> Result<Frame, CubeError> {
        self.lights.set_lit(position, true)?;
        if !self.config.settle.is_zero() {
            thread::sleep(self.config.settle);
        }

        let camera = match position {
            Position::Lower => &mut self.lower_camera,
            Position::Upper => &mut self.upper_camera,
        };
        let captured = camera.capture(self.config.capture_timeout);
        let camera_id = camera.id().to_string();

        // The light goes off no matter how the capture went; a capture
        // failure takes precedence over a light failure in the report.
        let light_off = self.lights.set_lit(position, false);
        let frame = captured?;
        light_off?;

        if frame.data.len() != frame.expected_len() {
            return Err(CubeError::HardwareIo {
                component: camera_id,
                details: format!(
                    "frame buffer is {} bytes, expected {} for {}x{}",
                    frame.data.len(),
                    frame.expected_len(),
                    frame.width,
                    frame.height
                ),
            });
        }

        debug!(
            position = %position,
            width = frame.width,
            height = frame.height,
            "captured frame"
        );
        Ok(frame)
    }

    /// Execute `turn` and block until the firmware confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] on firmware failure or timeout.
    pub fn rotate(&mut self, turn: FaceTurn) -> Result<(), CubeError> {
        info!(turn = %turn, "rotating face");
        self.actuator.rotate(turn, self.config.rotate_timeout)
    }
}
