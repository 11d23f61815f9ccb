//! [`Acquisition`] – the single-threaded scan state machine.
//!
//! One acquisition drives both camera positions through capture, sampling,
//! and occlusion resolution, then assembles the canonical state:
//!
//! ```text
//! Idle → CapturingPosition(p) → Sampling → OcclusionCheck(face) ⟲
//!      → Assembling → Done
//! ```
//!
//! Any hardware or calibration failure transitions to `Failed` from whatever
//! phase was active.  There is no retry and no resume: the caller restarts a
//! failed acquisition from `Idle` with a fresh call to [`Acquisition::run`].

use std::collections::HashMap;

use tracing::info;

use cubescan_calib::{CalibrationProfile, FACELETS_PER_FACE};
use cubescan_hal::CaptureAdapter;
use cubescan_types::{Color, CubeError, CubeState, Face, Position};
use cubescan_vision::{ColorClassifier, FaceletSampler, Image, OcclusionResolver};

use crate::assembler::assemble;

/// Phase of one acquisition, observable for diagnostics after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    CapturingPosition(Position),
    Sampling,
    OcclusionCheck(Face),
    Assembling,
    Done,
    Failed,
}

/// Owns the hardware adapter for the lifetime of the scan and borrows the
/// immutable calibration profile.
///
/// # Example
///
/// ```rust,no_run
/// use cubescan_calib::CalibrationProfile;
/// use cubescan_hal::CaptureAdapter;
/// use cubescan_runtime::Acquisition;
/// # fn drivers() -> CaptureAdapter { unimplemented!() }
///
/// let profile = CalibrationProfile::load(
///     "data/colors.json".as_ref(),
///     "data/faces.json".as_ref(),
/// )?;
/// let mut acquisition = Acquisition::new(&profile, drivers());
/// let state = acquisition.run()?;
/// println!("{state}");
/// # Ok::<(), cubescan_types::CubeError>(())
/// ```
pub struct Acquisition<'p> {
    profile: &'p CalibrationProfile,
    adapter: CaptureAdapter,
    phase: ScanPhase,
}

impl<'p> Acquisition<'p> {
    pub fn new(profile: &'p CalibrationProfile, adapter: CaptureAdapter) -> Self {
        Self {
            profile,
            adapter,
            phase: ScanPhase::Idle,
        }
    }

    /// The phase the machine last reached.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Run one full acquisition: handshake, both positions, all six faces,
    /// assembly.
    ///
    /// # Errors
    ///
    /// Any [`CubeError`] aborts the scan and leaves the machine in
    /// [`ScanPhase::Failed`]; the physical cube may additionally be diverged
    /// when the error is [`CubeError::InconsistentOrientation`].
    pub fn run(&mut self) -> Result<CubeState, CubeError> {
        self.phase = ScanPhase::Idle;
        let result = self.scan();
        match &result {
            Ok(_) => self.transition(ScanPhase::Done),
            Err(e) => {
                tracing::error!(error = %e, "acquisition failed");
                self.transition(ScanPhase::Failed);
            }
        }
        result
    }

    fn scan(&mut self) -> Result<CubeState, CubeError> {
        self.adapter.wait_ready()?;

        let classifier = ColorClassifier::new(self.profile);
        let sampler = FaceletSampler::new(self.profile, classifier);

        let mut readings: HashMap<Face, [Color; FACELETS_PER_FACE]> = HashMap::new();
        for position in Position::ALL {
            self.transition(ScanPhase::CapturingPosition(position));
            let image = Image::from_frame(self.adapter.capture_image(position)?)?;

            self.transition(ScanPhase::Sampling);
            let mut resolver = OcclusionResolver::new(&mut self.adapter, &sampler)?;
            for face in position.visible_faces() {
                // Phase updates go through the field directly: the resolver
                // holds the adapter borrow until the position is finished.
                info!(phase = ?ScanPhase::OcclusionCheck(face), "acquisition phase");
                self.phase = ScanPhase::OcclusionCheck(face);
                let colors = resolver.resolve(face, position, &image)?;
                readings.insert(face, colors);
            }
        }

        self.transition(ScanPhase::Assembling);
        assemble(&readings)
    }

    fn transition(&mut self, next: ScanPhase) {
        info!(phase = ?next, "acquisition phase");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescan_calib::CalibrationProfile;
    use cubescan_hal::{AdapterConfig, Frame, SimCamera, SimLightBank, SimTurnActuator};
    use std::time::Duration;

    // The same synthetic rig as the vision tests: disjoint HSV boxes around
    // pure RGB renderings, one shared 8-coordinate template on 64x64 frames.
    fn profile() -> CalibrationProfile {
        let colors = r#"{
            "R": {"min": [0, 200, 200], "max": [5, 255, 255]},
            "G": {"min": [55, 200, 200], "max": [65, 255, 255]},
            "O": {"min": [10, 200, 200], "max": [20, 255, 255]},
            "Y": {"min": [25, 200, 200], "max": [35, 255, 255]},
            "W": {"min": [0, 0, 200], "max": [180, 60, 255]},
            "B": {"min": [115, 200, 200], "max": [125, 255, 255]}
        }"#;
        let coords: Vec<String> = [
            (8, 8),
            (24, 8),
            (40, 8),
            (8, 24),
            (40, 24),
            (8, 40),
            (24, 40),
            (40, 40),
        ]
        .iter()
        .map(|(x, y)| format!("{{\"x\": {x}, \"y\": {y}}}"))
        .collect();
        let faces: Vec<String> = Face::ALL
            .into_iter()
            .map(|face| format!("\"{}\": [{}]", face.code(), coords.join(", ")))
            .collect();
        CalibrationProfile::from_documents(colors, &format!("{{{}}}", faces.join(", ")))
            .unwrap()
    }

    fn solid_frame(rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity(64 * 64 * 3);
        for _ in 0..64 * 64 {
            data.extend_from_slice(&rgb);
        }
        Frame {
            width: 64,
            height: 64,
            data,
        }
    }

    fn instant_config() -> AdapterConfig {
        AdapterConfig {
            settle: Duration::ZERO,
            ..AdapterConfig::default()
        }
    }

    /// Frames for one position: the static capture plus one rotated capture
    /// per visible face, all showing the same solid color.
    fn position_frames(rgb: [u8; 3]) -> Vec<Frame> {
        (0..4).map(|_| solid_frame(rgb)).collect()
    }

    #[test]
    fn full_scan_of_a_solved_cube() {
        // Painting a position's captures a single color makes every face
        // seen from it read as that color: white for the lower faces, red
        // for the upper ones.
        let lower = SimCamera::new("cam:lower", position_frames([255, 255, 255]));
        let upper = SimCamera::new("cam:upper", position_frames([255, 0, 0]));
        let adapter = CaptureAdapter::new(
            lower,
            upper,
            SimLightBank::new("lights"),
            SimTurnActuator::new("turner"),
            instant_config(),
        );

        let profile = profile();
        let mut acquisition = Acquisition::new(&profile, adapter);
        let state = acquisition.run().unwrap();
        assert_eq!(acquisition.phase(), ScanPhase::Done);

        let rendered = state.to_string();
        assert_eq!(rendered.len(), 54);
        // White translates to Front, red to Left; centers keep their own
        // symbol at slot 4 of each block.
        for (block, face) in Face::ALL.into_iter().enumerate() {
            let expected = match face.position() {
                Position::Lower => Face::Front,
                Position::Upper => Face::Left,
            };
            for slot in 0..9 {
                let symbol = state.symbol(block * 9 + slot);
                if slot == 4 {
                    assert_eq!(symbol, face);
                } else {
                    assert_eq!(symbol, expected);
                }
            }
        }
    }

    #[test]
    fn capture_failure_lands_in_failed_phase() {
        // The lower camera yields nothing at all.
        let adapter = CaptureAdapter::new(
            SimCamera::new("cam:lower", Vec::new()),
            SimCamera::new("cam:upper", Vec::new()),
            SimLightBank::new("lights"),
            SimTurnActuator::new("turner"),
            instant_config(),
        );
        let profile = profile();
        let mut acquisition = Acquisition::new(&profile, adapter);
        let err = acquisition.run().unwrap_err();
        assert!(matches!(err, CubeError::HardwareIo { .. }), "{err}");
        assert_eq!(acquisition.phase(), ScanPhase::Failed);
    }

    #[test]
    fn inverse_rotation_failure_lands_in_failed_phase() {
        // Rotation 0 (forward, Right face) succeeds, rotation 1 (inverse)
        // fails: the scan must abort with InconsistentOrientation.
        let adapter = CaptureAdapter::new(
            SimCamera::new("cam:lower", position_frames([255, 0, 0])),
            SimCamera::new("cam:upper", Vec::new()),
            SimLightBank::new("lights"),
            SimTurnActuator::failing_at("turner", 1),
            instant_config(),
        );
        let profile = profile();
        let mut acquisition = Acquisition::new(&profile, adapter);
        let err = acquisition.run().unwrap_err();
        assert_eq!(
            err,
            CubeError::InconsistentOrientation { face: Face::Right }
        );
        assert_eq!(acquisition.phase(), ScanPhase::Failed);
    }

    #[test]
    fn each_position_rotates_only_its_visible_faces() {
        let actuator = SimTurnActuator::new("turner");
        let turns = actuator.log_handle();
        let adapter = CaptureAdapter::new(
            SimCamera::new("cam:lower", position_frames([0, 0, 255])),
            SimCamera::new("cam:upper", position_frames([0, 255, 0])),
            SimLightBank::new("lights"),
            actuator,
            instant_config(),
        );
        let profile = profile();
        Acquisition::new(&profile, adapter).run().unwrap();

        let tokens: Vec<String> = turns.lock().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(
            tokens,
            ["R2", "R2'", "B2", "B2'", "D2", "D2'", "U2", "U2'", "L2", "L2'", "F2", "F2'"]
        );
    }
}
