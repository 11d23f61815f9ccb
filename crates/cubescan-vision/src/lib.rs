//! `cubescan-vision` – perception: from raw frames to per-face color readings.
//!
//! # Modules
//!
//! - [`image`](self::image) – [`Image`][self::image::Image]: paired RGB/HSV
//!   representation of one capture, plus fixed-radius neighborhood averaging.
//! - [`classify`] – [`ColorClassifier`][classify::ColorClassifier]: averaged
//!   HSV triple → discrete [`Color`][cubescan_types::Color], with a pluggable
//!   [`DistanceStrategy`][classify::DistanceStrategy] for the
//!   nearest-neighbor fallback.
//! - [`sampler`] – [`FaceletSampler`][sampler::FaceletSampler]: applies the
//!   classifier to all 8 calibrated coordinates of one face, with an optional
//!   annotated-image debug dump.
//! - [`occlusion`] – [`OcclusionResolver`][occlusion::OcclusionResolver]:
//!   corrects facelets hidden by the gripping mechanism by commanding a 180°
//!   rotation, recapturing, and merging through a static remap table.

pub mod classify;
pub mod image;
pub mod occlusion;
pub mod sampler;

pub use self::classify::{
    ColorClassifier, DistanceStrategy, Euclidean, MeanAbsolute, SquaredEuclidean,
};
pub use self::image::Image;
pub use self::occlusion::{OcclusionResolver, RemapTable, merge_rotated};
pub use self::sampler::{DebugSink, FaceletSampler};
