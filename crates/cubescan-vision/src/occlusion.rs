//! [`OcclusionResolver`] – rotation-assisted disambiguation of hidden facelets.
//!
//! The gripping mechanism blocks three facelets of every face from its
//! camera's static pose.  The resolver compensates by rotating the face 180°,
//! recapturing, sampling again, and overwriting the blocked slots from the
//! rotated reading through a static per-face remap table, then restoring the
//! cube with the inverse rotation.
//!
//! The physical protocol is strictly ordered and never retried.  A failed
//! inverse rotation leaves the physical cube diverged from the logical
//! orientation model; that is fatal ([`CubeError::InconsistentOrientation`])
//! and visible through [`OcclusionResolver::is_settled`].

use std::collections::HashMap;

use cubescan_calib::FACELETS_PER_FACE;
use cubescan_hal::CaptureAdapter;
use cubescan_types::{Color, CubeError, Face, FaceTurn, Position};

use crate::image::Image;
use crate::sampler::FaceletSampler;

// ────────────────────────────────────────────────────────────────────────────
// Remap table
// ────────────────────────────────────────────────────────────────────────────

/// Per-face `(facelet index → rotated coordinate index)` pairs: after the
/// 180° rotation, facelet `i` of the face is visible at template coordinate
/// `j` of the rotated capture.
pub struct RemapTable {
    by_face: [&'static [(usize, usize)]; 6],
}

/// The rig's remap table.  Indexed by [`Face::index`] (solver block order).
static BUILTIN: RemapTable = RemapTable {
    by_face: [
        &[(1, 6), (2, 5), (4, 3)], // Up
        &[(0, 7), (1, 6), (3, 4)], // Right
        &[(4, 3), (6, 1), (7, 0)], // Front
        &[(0, 7), (1, 6), (3, 4)], // Down
        &[(3, 4), (5, 2), (6, 1)], // Left
        &[(1, 6), (2, 5), (4, 3)], // Back
    ],
};

impl RemapTable {
    /// The built-in table, validated once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::InvalidCalibration`] if any face names a facelet
    /// index more than once or an index is out of range.
    pub fn builtin() -> Result<&'static RemapTable, CubeError> {
        BUILTIN.validate()?;
        Ok(&BUILTIN)
    }

    /// The remap pairs for `face`.  An empty slice means the face needs no
    /// disambiguation and the resolver skips the rotation entirely.
    pub fn remap(&self, face: Face) -> &[(usize, usize)] {
        self.by_face[face.index()]
    }

    fn validate(&self) -> Result<(), CubeError> {
        for face in Face::ALL {
            let mut seen = [false; FACELETS_PER_FACE];
            for &(facelet, rotated) in self.remap(face) {
                if facelet >= FACELETS_PER_FACE || rotated >= FACELETS_PER_FACE {
                    return Err(CubeError::InvalidCalibration {
                        details: format!(
                            "face {face} remap entry ({facelet}, {rotated}) is out of range"
                        ),
                    });
                }
                if seen[facelet] {
                    return Err(CubeError::InvalidCalibration {
                        details: format!("face {face} remaps facelet {facelet} twice"),
                    });
                }
                seen[facelet] = true;
            }
        }
        Ok(())
    }
}

/// Overwrite `baseline` entries from `rotated` according to `remap`.
pub fn merge_rotated(
    mut baseline: [Color; FACELETS_PER_FACE],
    rotated: &[Color; FACELETS_PER_FACE],
    remap: &[(usize, usize)],
) -> [Color; FACELETS_PER_FACE] {
    for &(facelet, rotated_idx) in remap {
        baseline[facelet] = rotated[rotated_idx];
    }
    baseline
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

/// Drives the rotate–recapture–merge protocol for one acquisition.
///
/// Keeps a per-face half-turn parity ledger: a forward 180° flips the face's
/// bit, the inverse clears it.  When every bit is clear the logical model
/// says the physical cube is back in its pre-protocol orientation.
pub struct OcclusionResolver<'a, 'p> {
    adapter: &'a mut CaptureAdapter,
    sampler: &'a FaceletSampler<'p>,
    table: &'static RemapTable,
    half_turned: HashMap<Face, bool>,
}

impl<'a, 'p> OcclusionResolver<'a, 'p> {
    /// Build a resolver over the validated built-in remap table.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::InvalidCalibration`] if the table fails
    /// validation.
    pub fn new(
        adapter: &'a mut CaptureAdapter,
        sampler: &'a FaceletSampler<'p>,
    ) -> Result<Self, CubeError> {
        Ok(Self {
            adapter,
            sampler,
            table: RemapTable::builtin()?,
            half_turned: HashMap::new(),
        })
    }

    /// Produce the corrected 8-color reading for `face`, as seen from
    /// `position`, starting from the already-captured `image`.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] on rotation or capture failure, and
    /// [`CubeError::InconsistentOrientation`] when the restoring inverse
    /// rotation fails after a successful forward rotation.
    pub fn resolve(
        &mut self,
        face: Face,
        position: Position,
        image: &Image,
    ) -> Result<[Color; FACELETS_PER_FACE], CubeError> {
        let baseline = self.sampler.sample(face, image);
        let remap = self.table.remap(face);
        if remap.is_empty() {
            return Ok(baseline);
        }

        let forward = FaceTurn::half(face);
        self.adapter.rotate(forward)?;
        self.flip(face);

        let rotated_image = Image::from_frame(self.adapter.capture_image(position)?)?;
        let rotated = self.sampler.sample(face, &rotated_image);

        self.adapter
            .rotate(forward.invert())
            .map_err(|_| CubeError::InconsistentOrientation { face })?;
        self.flip(face);

        Ok(merge_rotated(baseline, &rotated, remap))
    }

    /// True when the logical orientation model says every face is back in
    /// its original orientation.
    pub fn is_settled(&self) -> bool {
        self.half_turned.values().all(|turned| !turned)
    }

    fn flip(&mut self, face: Face) {
        *self.half_turned.entry(face).or_insert(false) ^= true;
    }
}
