//! `cubescan-hal` – hardware seams for the cube rig.
//!
//! The rest of the pipeline only ever talks to the traits defined here, so
//! drivers can be swapped (or simulated) without touching perception logic.
//!
//! # Modules
//!
//! - [`camera`] – [`Camera`][camera::Camera]: one raw RGB frame per capture
//!   request, bounded by a timeout.
//! - [`light`] – [`LightBank`][light::LightBank]: the per-position
//!   illumination switches.
//! - [`actuator`] – [`TurnActuator`][actuator::TurnActuator]: the
//!   "rotate face and confirm" primitive plus the firmware readiness
//!   handshake.
//! - [`adapter`] – [`CaptureAdapter`][adapter::CaptureAdapter]: owns one
//!   camera per mount position, the light bank, and the actuator, and
//!   orchestrates light-on → capture → light-off round-trips.
//! - [`sim`] – stub drivers that record commands, for headless tests and CI.
//!
//! All calls block until hardware acknowledgment, failure, or timeout; a
//! blown budget surfaces as [`CubeError::HardwareIo`][cubescan_types::CubeError],
//! never as an indefinite hang.

pub mod actuator;
pub mod adapter;
pub mod camera;
pub mod light;
pub mod sim;

pub use actuator::TurnActuator;
pub use adapter::{AdapterConfig, CaptureAdapter};
pub use camera::{Camera, Frame};
pub use light::LightBank;
pub use sim::{SimCamera, SimLightBank, SimTurnActuator};
