//! `cubescan-runtime` – acquisition orchestration and external seams.
//!
//! # Modules
//!
//! - [`acquisition`] – [`Acquisition`][acquisition::Acquisition]: the
//!   single-threaded state machine that drives both camera positions through
//!   capture, sampling, and occlusion resolution, and lands in `Done` with a
//!   [`CubeState`][cubescan_types::CubeState] or `Failed` with the error.
//! - [`assembler`] – [`assemble`][assembler::assemble]: orders per-face
//!   facelet colors into the canonical 54-symbol state, inserting center
//!   symbols.  The block order is an external contract with the solver.
//! - [`solver`] – [`Solver`][solver::Solver]: the seam to the external
//!   two-phase solving algorithm, plus move-token parsing for its output.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]: wires up the
//!   global `tracing` subscriber (console or JSON lines).

pub mod acquisition;
pub mod assembler;
pub mod solver;
pub mod telemetry;

pub use acquisition::{Acquisition, ScanPhase};
pub use assembler::assemble;
pub use solver::{Solver, parse_solution};
pub use telemetry::init_tracing;
