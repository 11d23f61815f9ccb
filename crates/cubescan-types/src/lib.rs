//! `cubescan-types` – shared vocabulary for the cube perception pipeline.
//!
//! Defines the symbolic alphabet every other crate speaks: sticker [`Color`]s,
//! cube [`Face`]s, camera mount [`Position`]s, pixel [`Coordinate`]s, the
//! [`FaceTurn`] move token understood by both the actuator firmware and the
//! external solver, the canonical 54-symbol [`CubeState`], and the global
//! error type [`CubeError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

/// A sticker pigment.
///
/// Declaration order is the deterministic tie-break order used by the color
/// classifier: when two calibration ranges are equally close to a pixel, the
/// earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "O")]
    Orange,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "W")]
    White,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    /// All colors in declaration order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Orange,
        Color::Yellow,
        Color::White,
        Color::Blue,
    ];

    /// One-letter code used in calibration documents and logs.
    pub fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::White => 'W',
            Color::Blue => 'B',
        }
    }

    /// Parse a one-letter color code.
    pub fn from_code(code: char) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.code() == code)
    }

    /// The face whose center sticker carries this color.
    ///
    /// This bijection is fixed by the physical cube's sticker scheme; the
    /// assembler uses it to translate observed pigment into face identity.
    pub fn face(self) -> Face {
        match self {
            Color::Green => Face::Up,
            Color::Orange => Face::Right,
            Color::White => Face::Front,
            Color::Blue => Face::Down,
            Color::Red => Face::Left,
            Color::Yellow => Face::Back,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Face
// ────────────────────────────────────────────────────────────────────────────

/// One of the six cube faces.
///
/// Declaration order is the solver's block order (U, R, F, D, L, B).  Each
/// face has a canonical 9-slot row-major layout; slot 4 is the center whose
/// color defines the face's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "F")]
    Front,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "B")]
    Back,
}

impl Face {
    /// All faces in solver block order.
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Right,
        Face::Front,
        Face::Down,
        Face::Left,
        Face::Back,
    ];

    /// Zero-based position of this face in solver block order.
    pub fn index(self) -> usize {
        match self {
            Face::Up => 0,
            Face::Right => 1,
            Face::Front => 2,
            Face::Down => 3,
            Face::Left => 4,
            Face::Back => 5,
        }
    }

    /// One-letter code used in calibration documents, move tokens, and the
    /// assembled state string.
    pub fn code(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    /// Parse a one-letter face code.
    pub fn from_code(code: char) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.code() == code)
    }

    /// The color of this face's center sticker (inverse of [`Color::face`]).
    pub fn center_color(self) -> Color {
        match self {
            Face::Up => Color::Green,
            Face::Right => Color::Orange,
            Face::Front => Color::White,
            Face::Down => Color::Blue,
            Face::Left => Color::Red,
            Face::Back => Color::Yellow,
        }
    }

    /// The camera mount this face is visible from.
    pub fn position(self) -> Position {
        match self {
            Face::Up | Face::Left | Face::Front => Position::Upper,
            Face::Right | Face::Back | Face::Down => Position::Lower,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Position
// ────────────────────────────────────────────────────────────────────────────

/// A camera mount site.  Each position sees a fixed subset of three faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Upper,
    Lower,
}

impl Position {
    /// Both positions in capture order (lower rig first, matching the
    /// acquisition loop).
    pub const ALL: [Position; 2] = [Position::Lower, Position::Upper];

    /// The three faces observable from this mount.
    pub fn visible_faces(self) -> [Face; 3] {
        match self {
            Position::Upper => [Face::Up, Face::Left, Face::Front],
            Position::Lower => [Face::Right, Face::Back, Face::Down],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Upper => write!(f, "upper"),
            Position::Lower => write!(f, "lower"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Coordinate
// ────────────────────────────────────────────────────────────────────────────

/// An (x, y) pixel location in a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FaceTurn
// ────────────────────────────────────────────────────────────────────────────

/// A single face rotation, in the token grammar shared by the actuator
/// firmware and the solver: `<face>[2][']`, e.g. `F`, `F'`, `F2`, `F2'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceTurn {
    pub face: Face,
    /// Number of quarter turns: 1 or 2.
    pub quarter_turns: u8,
    /// Counter-clockwise when `true`.
    pub inverted: bool,
}

impl FaceTurn {
    /// A clockwise quarter turn.
    pub fn quarter(face: Face) -> Self {
        Self {
            face,
            quarter_turns: 1,
            inverted: false,
        }
    }

    /// A half (180°) turn, as issued by the occlusion resolver.
    pub fn half(face: Face) -> Self {
        Self {
            face,
            quarter_turns: 2,
            inverted: false,
        }
    }

    /// The turn that undoes this one.
    pub fn invert(self) -> Self {
        Self {
            inverted: !self.inverted,
            ..self
        }
    }
}

impl fmt::Display for FaceTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.code())?;
        if self.quarter_turns == 2 {
            write!(f, "2")?;
        }
        if self.inverted {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for FaceTurn {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bad = || CubeError::UnsolvableState {
            details: format!("unrecognized move token '{token}'"),
        };
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_code).ok_or_else(bad)?;
        let mut turn = FaceTurn::quarter(face);
        match (chars.next(), chars.next(), chars.next()) {
            (None, _, _) => {}
            (Some('2'), None, _) => turn.quarter_turns = 2,
            (Some('\''), None, _) => turn.inverted = true,
            (Some('2'), Some('\''), None) => {
                turn.quarter_turns = 2;
                turn.inverted = true;
            }
            _ => return Err(bad()),
        }
        Ok(turn)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CubeState
// ────────────────────────────────────────────────────────────────────────────

/// The canonical 54-symbol cube state consumed by the external solver.
///
/// Face blocks appear in the fixed order U, R, F, D, L, B, nine symbols each,
/// with slot 4 of every block equal to that block's own face code.  Only the
/// assembler produces values of this type, from a complete set of facelet
/// readings; the length is enforced by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState {
    symbols: [Face; 54],
}

impl CubeState {
    /// Wrap a full symbol sequence.
    pub fn new(symbols: [Face; 54]) -> Self {
        Self { symbols }
    }

    /// The symbol at `index` (0..54).
    pub fn symbol(&self, index: usize) -> Face {
        self.symbols[index]
    }

    /// All 54 symbols in solver order.
    pub fn symbols(&self) -> &[Face; 54] {
        &self.symbols
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.symbols {
            write!(f, "{}", s.code())?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CubeError
// ────────────────────────────────────────────────────────────────────────────

/// Global error type spanning calibration, hardware, and solver failures.
///
/// Classification ambiguity is deliberately not represented: the classifier
/// always resolves to a nearest color and never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubeError {
    /// Malformed or missing calibration entries.  Fatal at load.
    #[error("invalid calibration: {details}")]
    InvalidCalibration { details: String },

    /// Capture, light, or actuator failure, including a blown timeout budget.
    /// Fatal; the pipeline never retries.
    #[error("hardware I/O failure on {component}: {details}")]
    HardwareIo { component: String, details: String },

    /// The inverse rotation after a forward rotation failed, so the physical
    /// cube no longer matches the logical orientation model.  Fatal.
    #[error("face {face} did not return to its pre-rotation orientation")]
    InconsistentOrientation { face: Face },

    /// The external solver rejected the state (or produced output this
    /// subsystem cannot parse).  Not repairable here.
    #[error("solver rejected state: {details}")]
    UnsolvableState { details: String },
}
