//! `cubescan-calib` – calibration documents and the immutable profile.
//!
//! Two JSON documents are persisted by the calibration tooling (which lives
//! outside this workspace):
//!
//! - **colors**: map of one-letter color code → `{ "min": [h,s,v], "max": [h,s,v] }`
//! - **faces**: map of one-letter face code → list of exactly 8 `{ "x": .., "y": .. }`
//!   pixel coordinates, in canonical facelet order (slots 0–8 skipping the
//!   center at 4)
//!
//! [`CalibrationProfile::load`] reads both, validates them, and returns an
//! immutable value that is passed by reference to every consumer for the rest
//! of the run.  Validation fails fast with
//! [`CubeError::InvalidCalibration`]: a missing or unknown code, a face
//! template with the wrong coordinate count, or a degenerate range (min > max
//! in any channel) all abort the load.
//!
//! HSV values follow the byte convention of the capture stack: hue in
//! `0..180`, saturation and value in `0..256`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use cubescan_types::{Color, Coordinate, CubeError, Face};

/// Number of calibrated (non-center) facelets per face.
pub const FACELETS_PER_FACE: usize = 8;

// ────────────────────────────────────────────────────────────────────────────
// HsvRange
// ────────────────────────────────────────────────────────────────────────────

/// Inclusive elementwise HSV acceptance box for one color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HsvRange {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl HsvRange {
    /// Elementwise containment test (min ≤ v ≤ max on all three channels).
    pub fn contains(&self, hsv: [f32; 3]) -> bool {
        (0..3).all(|i| self.min[i] <= hsv[i] && hsv[i] <= self.max[i])
    }

    /// True when min exceeds max in any channel, making the box empty.
    fn is_degenerate(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CalibrationProfile
// ────────────────────────────────────────────────────────────────────────────

/// Validated, immutable calibration state for one rig.
///
/// Ranges are stored as an explicit ordered list in [`Color`] declaration
/// order so that classifier iteration (and therefore tie-breaking) is
/// deterministic regardless of document key order.
#[derive(Debug, Clone)]
pub struct CalibrationProfile {
    ranges: Vec<(Color, HsvRange)>,
    templates: HashMap<Face, [Coordinate; FACELETS_PER_FACE]>,
}

impl CalibrationProfile {
    /// Load and validate a profile from the two persisted documents.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::InvalidCalibration`] when either file cannot be
    /// read or parsed, or when the documents fail validation.
    pub fn load(colors_path: &Path, faces_path: &Path) -> Result<Self, CubeError> {
        let colors = read_document(colors_path)?;
        let faces = read_document(faces_path)?;
        let profile = Self::from_documents(&colors, &faces)?;
        info!(
            colors = %colors_path.display(),
            faces = %faces_path.display(),
            "calibration profile loaded"
        );
        Ok(profile)
    }

    /// Build a profile from in-memory JSON documents.
    ///
    /// Extracted from [`CalibrationProfile::load`] so tests can exercise
    /// validation without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::InvalidCalibration`] on malformed JSON, unknown
    /// or missing codes, wrong template length, or a degenerate range.
    pub fn from_documents(colors_json: &str, faces_json: &str) -> Result<Self, CubeError> {
        let color_doc: HashMap<String, HsvRange> =
            serde_json::from_str(colors_json).map_err(|e| invalid(format!("colors: {e}")))?;
        let face_doc: HashMap<String, Vec<Coordinate>> =
            serde_json::from_str(faces_json).map_err(|e| invalid(format!("faces: {e}")))?;

        let mut by_color: HashMap<Color, HsvRange> = HashMap::new();
        for (code, range) in color_doc {
            let color = parse_code(&code, Color::from_code, "color")?;
            if range.is_degenerate() {
                return Err(invalid(format!(
                    "color {color} has a degenerate range (min exceeds max)"
                )));
            }
            by_color.insert(color, range);
        }

        // Re-order into declaration order; classifier iteration depends on it.
        let mut ranges = Vec::with_capacity(Color::ALL.len());
        for color in Color::ALL {
            let range = by_color
                .remove(&color)
                .ok_or_else(|| invalid(format!("color {color} has no range")))?;
            ranges.push((color, range));
        }

        let mut templates = HashMap::new();
        for (code, coords) in face_doc {
            let face = parse_code(&code, Face::from_code, "face")?;
            let coords: [Coordinate; FACELETS_PER_FACE] =
                coords.try_into().map_err(|v: Vec<Coordinate>| {
                    invalid(format!(
                        "face {face} has {} template coordinates, expected {FACELETS_PER_FACE}",
                        v.len()
                    ))
                })?;
            templates.insert(face, coords);
        }
        for face in Face::ALL {
            if !templates.contains_key(&face) {
                return Err(invalid(format!("face {face} has no facet template")));
            }
        }

        Ok(Self { ranges, templates })
    }

    /// The acceptance range for `color`.
    pub fn range(&self, color: Color) -> &HsvRange {
        // Position in the ordered list equals declaration index; both are
        // derived from Color::ALL at construction.
        &self.ranges[Color::ALL.iter().position(|c| *c == color).unwrap_or(0)].1
    }

    /// All `(color, range)` pairs in declaration order.
    pub fn ranges(&self) -> impl Iterator<Item = (Color, &HsvRange)> {
        self.ranges.iter().map(|(c, r)| (*c, r))
    }

    /// The 8 calibrated facelet coordinates for `face`, in canonical order.
    pub fn template(&self, face: Face) -> &[Coordinate; FACELETS_PER_FACE] {
        // Validation guarantees all six faces are present.
        &self.templates[&face]
    }
}

fn read_document(path: &Path) -> Result<String, CubeError> {
    fs::read_to_string(path)
        .map_err(|e| invalid(format!("cannot read {}: {e}", path.display())))
}

fn parse_code<T>(code: &str, parse: impl Fn(char) -> Option<T>, kind: &str) -> Result<T, CubeError> {
    let mut chars = code.chars();
    match (chars.next().and_then(&parse), chars.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(invalid(format!("unknown {kind} code '{code}'"))),
    }
}

fn invalid(details: String) -> CubeError {
    CubeError::InvalidCalibration { details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Disjoint single-channel boxes for the given colors, keyed by code.
    fn colors_doc_for(colors: &[Color]) -> String {
        let entries: Vec<String> = colors
            .iter()
            .map(|color| {
                let i = Color::ALL.iter().position(|c| c == color).unwrap();
                let lo = (i * 30) as f32;
                format!(
                    "\"{}\": {{\"min\": [{lo}, 50.0, 50.0], \"max\": [{}, 255.0, 255.0]}}",
                    color.code(),
                    lo + 20.0
                )
            })
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    /// Six disjoint single-channel boxes, one per color.
    pub(crate) fn colors_doc() -> String {
        colors_doc_for(&Color::ALL)
    }

    pub(crate) fn faces_doc() -> String {
        let mut entries = Vec::new();
        for face in Face::ALL {
            let coords: Vec<String> = (0..8)
                .map(|i| format!("{{\"x\": {}, \"y\": {}}}", 10 + i * 5, 20))
                .collect();
            entries.push(format!("\"{}\": [{}]", face.code(), coords.join(", ")));
        }
        format!("{{{}}}", entries.join(", "))
    }

    #[test]
    fn load_valid_documents() {
        let profile = CalibrationProfile::from_documents(&colors_doc(), &faces_doc()).unwrap();
        assert_eq!(profile.ranges().count(), 6);
        for face in Face::ALL {
            assert_eq!(profile.template(face).len(), 8);
        }
        assert!(profile.range(Color::Red).contains([10.0, 100.0, 100.0]));
    }

    #[test]
    fn ranges_iterate_in_declaration_order() {
        let profile = CalibrationProfile::from_documents(&colors_doc(), &faces_doc()).unwrap();
        let order: Vec<Color> = profile.ranges().map(|(c, _)| c).collect();
        assert_eq!(order, Color::ALL.to_vec());
    }

    #[test]
    fn rejects_template_with_seven_coordinates() {
        let faces = faces_doc().replacen("{\"x\": 10, \"y\": 20}, ", "", 1);
        let err = CalibrationProfile::from_documents(&colors_doc(), &faces).unwrap_err();
        assert!(matches!(err, CubeError::InvalidCalibration { .. }), "{err}");
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn rejects_template_with_nine_coordinates() {
        let faces = faces_doc().replacen(
            "{\"x\": 10, \"y\": 20}",
            "{\"x\": 10, \"y\": 20}, {\"x\": 11, \"y\": 20}",
            1,
        );
        let err = CalibrationProfile::from_documents(&colors_doc(), &faces).unwrap_err();
        assert!(matches!(err, CubeError::InvalidCalibration { .. }), "{err}");
    }

    #[test]
    fn rejects_missing_color_range() {
        // All colors except Red.
        let colors = colors_doc_for(&Color::ALL[1..]);
        let err = CalibrationProfile::from_documents(&colors, &faces_doc()).unwrap_err();
        assert!(err.to_string().contains("R has no range"), "{err}");
    }

    #[test]
    fn rejects_unknown_color_code() {
        let colors = colors_doc().replacen("\"R\"", "\"Z\"", 1);
        let err = CalibrationProfile::from_documents(&colors, &faces_doc()).unwrap_err();
        assert!(err.to_string().contains("'Z'"), "{err}");
    }

    #[test]
    fn rejects_unknown_face_code() {
        let faces = faces_doc().replacen("\"U\"", "\"Z\"", 1);
        let err = CalibrationProfile::from_documents(&colors_doc(), &faces).unwrap_err();
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn rejects_degenerate_range() {
        let colors = colors_doc().replacen(
            "\"min\": [0, 50.0, 50.0]",
            "\"min\": [30, 50.0, 50.0]",
            1,
        );
        let err = CalibrationProfile::from_documents(&colors, &faces_doc()).unwrap_err();
        assert!(err.to_string().contains("degenerate"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CalibrationProfile::from_documents("not json", &faces_doc()).unwrap_err();
        assert!(matches!(err, CubeError::InvalidCalibration { .. }), "{err}");
    }

    #[test]
    fn load_reads_documents_from_disk() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let colors_path = dir.path().join("colors.json");
        let faces_path = dir.path().join("faces.json");
        fs::File::create(&colors_path)
            .and_then(|mut f| f.write_all(colors_doc().as_bytes()))
            .expect("write colors");
        fs::File::create(&faces_path)
            .and_then(|mut f| f.write_all(faces_doc().as_bytes()))
            .expect("write faces");

        let profile = CalibrationProfile::load(&colors_path, &faces_path).unwrap();
        assert_eq!(profile.template(Face::Back)[0], Coordinate::new(10, 20));
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let err = CalibrationProfile::load(
            &dir.path().join("absent.json"),
            &dir.path().join("absent2.json"),
        )
        .unwrap_err();
        assert!(matches!(err, CubeError::InvalidCalibration { .. }), "{err}");
    }
}
