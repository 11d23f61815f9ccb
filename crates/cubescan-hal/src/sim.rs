//! In-process stub drivers for headless tests and CI.
//!
//! Each stub records the commands it receives behind an `Arc<Mutex<_>>` so a
//! test can keep a handle to the log after the boxed driver has moved into a
//! [`CaptureAdapter`][crate::adapter::CaptureAdapter].
//!
//! # Stub behaviour
//!
//! | Driver | Behaviour |
//! |---|---|
//! | [`SimCamera`] | Yields a scripted queue of frames; fails once exhausted. |
//! | [`SimLightBank`] | Records every switch event; always succeeds. |
//! | [`SimTurnActuator`] | Records every turn; can be scripted to fail on the n-th rotation. |

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cubescan_types::{CubeError, FaceTurn, Position};

use crate::actuator::TurnActuator;
use crate::camera::{Camera, Frame};
use crate::light::LightBank;

// ────────────────────────────────────────────────────────────────────────────
// Stub camera
// ────────────────────────────────────────────────────────────────────────────

/// A simulated camera that plays back a scripted queue of frames.
///
/// Capturing past the end of the script returns [`CubeError::HardwareIo`],
/// which doubles as the "device stopped responding" case in tests.
pub struct SimCamera {
    id: String,
    frames: VecDeque<Frame>,
}

impl SimCamera {
    /// Create a camera that will yield `frames` in order.
    pub fn new(id: impl Into<String>, frames: Vec<Frame>) -> Box<Self> {
        Box::new(Self {
            id: id.into(),
            frames: frames.into(),
        })
    }
}

impl Camera for SimCamera {
    fn id(&self) -> &str {
        &self.id
    }

    fn capture(&mut self, _timeout: Duration) -> Result<Frame, CubeError> {
        self.frames.pop_front().ok_or_else(|| CubeError::HardwareIo {
            component: self.id.clone(),
            details: "no frame available".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stub light bank
// ────────────────────────────────────────────────────────────────────────────

/// A simulated light bank that records every switch event.  Always succeeds.
pub struct SimLightBank {
    id: String,
    upper: bool,
    lower: bool,
    events: Arc<Mutex<Vec<(Position, bool)>>>,
}

impl SimLightBank {
    /// Create a bank with both lights off.
    pub fn new(id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            id: id.into(),
            upper: false,
            lower: false,
            events: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Shared handle to the recorded `(position, lit)` switch events.
    pub fn events_handle(&self) -> Arc<Mutex<Vec<(Position, bool)>>> {
        Arc::clone(&self.events)
    }
}

impl LightBank for SimLightBank {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_lit(&mut self, position: Position, lit: bool) -> Result<(), CubeError> {
        match position {
            Position::Upper => self.upper = lit,
            Position::Lower => self.lower = lit,
        }
        if let Ok(mut events) = self.events.lock() {
            events.push((position, lit));
        }
        Ok(())
    }

    fn is_lit(&self, position: Position) -> bool {
        match position {
            Position::Upper => self.upper,
            Position::Lower => self.lower,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stub actuator
// ────────────────────────────────────────────────────────────────────────────

/// A simulated turn actuator that records every executed turn.
///
/// `failing_at` scripts a failure on the n-th (0-based) `rotate` call, which
/// tests use to exercise the inconsistent-orientation path.
pub struct SimTurnActuator {
    id: String,
    executed: Arc<Mutex<Vec<FaceTurn>>>,
    fail_at: Option<usize>,
    calls: usize,
}

impl SimTurnActuator {
    /// Create an actuator that confirms every rotation.
    pub fn new(id: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            id: id.into(),
            executed: Arc::new(Mutex::new(Vec::new())),
            fail_at: None,
            calls: 0,
        })
    }

    /// Create an actuator whose `nth` (0-based) rotation fails.
    pub fn failing_at(id: impl Into<String>, nth: usize) -> Box<Self> {
        Box::new(Self {
            id: id.into(),
            executed: Arc::new(Mutex::new(Vec::new())),
            fail_at: Some(nth),
            calls: 0,
        })
    }

    /// Shared handle to the log of confirmed turns.
    pub fn log_handle(&self) -> Arc<Mutex<Vec<FaceTurn>>> {
        Arc::clone(&self.executed)
    }
}

impl TurnActuator for SimTurnActuator {
    fn id(&self) -> &str {
        &self.id
    }

    fn wait_ready(&mut self, _timeout: Duration) -> Result<(), CubeError> {
        Ok(())
    }

    fn rotate(&mut self, turn: FaceTurn, _timeout: Duration) -> Result<(), CubeError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(CubeError::HardwareIo {
                component: self.id.clone(),
                details: format!("rotation {turn} not confirmed"),
            });
        }
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(turn);
        }
        Ok(())
    }
}
