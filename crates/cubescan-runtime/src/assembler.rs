//! Cube-state assembly: per-face color readings → the 54-symbol state.

use std::collections::HashMap;

use cubescan_calib::FACELETS_PER_FACE;
use cubescan_types::{Color, CubeError, CubeState, Face};

/// Assemble the canonical state from all six corrected face readings.
///
/// For each face in solver block order (U, R, F, D, L, B): every observed
/// color is translated to its face symbol through the color↔face bijection,
/// and the face's own symbol is inserted at slot 4 between the 4th and 5th
/// translated symbols.  This exact ordering is the contract with the external
/// solver and must not change.
///
/// # Errors
///
/// Returns [`CubeError::HardwareIo`] when a face has no reading, which can
/// only arise from an acquisition aborted mid-way.
pub fn assemble(
    readings: &HashMap<Face, [Color; FACELETS_PER_FACE]>,
) -> Result<CubeState, CubeError> {
    let mut symbols = [Face::Up; 54];
    let mut cursor = 0;
    for face in Face::ALL {
        let colors = readings.get(&face).ok_or_else(|| CubeError::HardwareIo {
            component: "assembler".to_string(),
            details: format!("no facelet reading for face {face}"),
        })?;
        for (slot, color) in colors.iter().enumerate() {
            // The center is not observed; its symbol goes in between the
            // 4th and 5th translated facelets.
            if slot == 4 {
                symbols[cursor] = face;
                cursor += 1;
            }
            symbols[cursor] = color.face();
            cursor += 1;
        }
    }
    Ok(CubeState::new(symbols))
}
