//! [`Solver`] – seam to the external two-phase solving algorithm.
//!
//! The solver is an opaque collaborator: it consumes the 54-symbol state and
//! produces a space-delimited sequence of move tokens.  This subsystem does
//! not pre-validate state well-formedness before the call; an invalid or
//! unsolvable state comes back as [`CubeError::UnsolvableState`].

use cubescan_types::{CubeError, CubeState, FaceTurn};

/// External solving algorithm.
pub trait Solver {
    /// Solve `state`, returning the move sequence that brings the physical
    /// cube to the solved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::UnsolvableState`] when the state is rejected as
    /// invalid or unsolvable.
    fn solve(&self, state: &CubeState) -> Result<Vec<FaceTurn>, CubeError>;
}

/// Parse a solver's space-delimited token output (e.g. `"R2 U' F"`).
///
/// # Errors
///
/// Returns [`CubeError::UnsolvableState`] on any token outside the
/// `<face>[2][']` grammar; garbled output is treated the same as a rejected
/// state, since both are solver-contract violations this subsystem cannot
/// repair.
pub fn parse_solution(output: &str) -> Result<Vec<FaceTurn>, CubeError> {
    output
        .split_whitespace()
        .map(str::parse)
        .collect()
}
