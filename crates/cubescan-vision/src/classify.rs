//! [`ColorClassifier`] – averaged HSV triple → discrete sticker color.
//!
//! Classification is a pure function of the triple, the calibration profile,
//! and the configured distance strategy.  It never fails and never returns
//! "unknown": a triple outside every acceptance box falls back to the color
//! whose box boundary is nearest.

use cubescan_calib::{CalibrationProfile, HsvRange};
use cubescan_types::Color;
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Distance strategies
// ────────────────────────────────────────────────────────────────────────────

/// Distance measure used by the nearest-neighbor fallback.
///
/// The system's history disagrees on the metric, so it is an explicit choice
/// rather than a constant.  All three historical variants are provided; the
/// classifier defaults to [`SquaredEuclidean`].
pub trait DistanceStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Distance between a triple and one corner of an acceptance box.
    fn corner_distance(&self, hsv: [f32; 3], corner: [f32; 3]) -> f32;
}

/// Sum of squared channel differences.
pub struct SquaredEuclidean;

impl DistanceStrategy for SquaredEuclidean {
    fn name(&self) -> &str {
        "squared_euclidean"
    }

    fn corner_distance(&self, hsv: [f32; 3], corner: [f32; 3]) -> f32 {
        (0..3).map(|i| (hsv[i] - corner[i]).powi(2)).sum()
    }
}

/// Mean absolute channel difference.
pub struct MeanAbsolute;

impl DistanceStrategy for MeanAbsolute {
    fn name(&self) -> &str {
        "mean_absolute"
    }

    fn corner_distance(&self, hsv: [f32; 3], corner: [f32; 3]) -> f32 {
        (0..3).map(|i| (hsv[i] - corner[i]).abs()).sum::<f32>() / 3.0
    }
}

/// Plain Euclidean (L2) distance.
pub struct Euclidean;

impl DistanceStrategy for Euclidean {
    fn name(&self) -> &str {
        "euclidean"
    }

    fn corner_distance(&self, hsv: [f32; 3], corner: [f32; 3]) -> f32 {
        (0..3)
            .map(|i| (hsv[i] - corner[i]).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────────────────────────────────────

/// Classifies averaged HSV triples against a calibration profile.
///
/// The exact-match pass and the fallback both iterate the profile's ranges in
/// [`Color`] declaration order, so results are deterministic and ties resolve
/// to the earliest-declared color.
pub struct ColorClassifier<'p> {
    profile: &'p CalibrationProfile,
    strategy: Box<dyn DistanceStrategy>,
}

impl<'p> ColorClassifier<'p> {
    /// A classifier with the default [`SquaredEuclidean`] fallback metric.
    pub fn new(profile: &'p CalibrationProfile) -> Self {
        Self::with_strategy(profile, Box::new(SquaredEuclidean))
    }

    /// A classifier with an explicit fallback metric.
    pub fn with_strategy(
        profile: &'p CalibrationProfile,
        strategy: Box<dyn DistanceStrategy>,
    ) -> Self {
        Self { profile, strategy }
    }

    /// Resolve a triple to the best-matching color.
    pub fn classify(&self, hsv: [f32; 3]) -> Color {
        for (color, range) in self.profile.ranges() {
            if range.contains(hsv) {
                return color;
            }
        }

        debug!(
            h = hsv[0],
            s = hsv[1],
            v = hsv[2],
            strategy = self.strategy.name(),
            "no exact range match, falling back to nearest"
        );

        let mut best = Color::ALL[0];
        let mut best_distance = f32::INFINITY;
        for (color, range) in self.profile.ranges() {
            let distance = self.range_distance(hsv, range);
            if distance < best_distance {
                best = color;
                best_distance = distance;
            }
        }
        best
    }

    /// Distance to the nearest of the box's two corners.
    fn range_distance(&self, hsv: [f32; 3], range: &HsvRange) -> f32 {
        self.strategy
            .corner_distance(hsv, range.min)
            .min(self.strategy.corner_distance(hsv, range.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use cubescan_calib::CalibrationProfile;

    #[test]
    fn triple_inside_a_box_classifies_to_that_color() {
        let profile = testutil::profile();
        let classifier = ColorClassifier::new(&profile);
        assert_eq!(classifier.classify([2.0, 230.0, 230.0]), Color::Red);
        assert_eq!(classifier.classify([60.0, 255.0, 255.0]), Color::Green);
        assert_eq!(classifier.classify([90.0, 30.0, 250.0]), Color::White);
    }

    #[test]
    fn classification_is_deterministic_across_invocations() {
        let profile = testutil::profile();
        let classifier = ColorClassifier::new(&profile);
        let triple = [17.0, 240.0, 240.0];
        let first = classifier.classify(triple);
        for _ in 0..10 {
            assert_eq!(classifier.classify(triple), first);
        }
    }

    #[test]
    fn outside_all_boxes_falls_back_to_nearest_boundary() {
        let profile = testutil::profile();
        let classifier = ColorClassifier::new(&profile);
        // Hue 7 sits between the Red box (ends at 5) and the Orange box
        // (starts at 10); it is nearer to Red's max corner.
        assert_eq!(classifier.classify([7.0, 255.0, 255.0]), Color::Red);
        // Hue 22 just past the Orange box is nearer to Orange's max corner.
        assert_eq!(classifier.classify([22.0, 255.0, 255.0]), Color::Orange);
    }

    #[test]
    fn fallback_tie_resolves_to_declaration_order() {
        // Two colors with identical ranges: every distance ties, so the
        // earliest-declared of the pair must win.  Red and Green share a box.
        let colors = r#"{
            "R": {"min": [0, 0, 0], "max": [10, 10, 10]},
            "G": {"min": [0, 0, 0], "max": [10, 10, 10]},
            "O": {"min": [50, 50, 50], "max": [60, 60, 60]},
            "Y": {"min": [70, 70, 70], "max": [80, 80, 80]},
            "W": {"min": [90, 90, 90], "max": [100, 100, 100]},
            "B": {"min": [110, 110, 110], "max": [120, 120, 120]}
        }"#;
        let profile =
            CalibrationProfile::from_documents(colors, &testutil::faces_doc()).unwrap();
        let classifier = ColorClassifier::new(&profile);
        // Outside every box, equidistant from R and G, far from the rest.
        assert_eq!(classifier.classify([20.0, 20.0, 20.0]), Color::Red);
    }

    #[test]
    fn all_strategies_agree_on_clear_cases() {
        let profile = testutil::profile();
        for strategy in [
            Box::new(SquaredEuclidean) as Box<dyn DistanceStrategy>,
            Box::new(MeanAbsolute),
            Box::new(Euclidean),
        ] {
            let classifier = ColorClassifier::with_strategy(&profile, strategy);
            // Slightly off the Blue box in hue only.
            assert_eq!(classifier.classify([128.0, 255.0, 255.0]), Color::Blue);
        }
    }

    #[test]
    fn strategies_compute_expected_distances() {
        let triple = [1.0, 2.0, 3.0];
        let corner = [4.0, 6.0, 3.0];
        assert_eq!(SquaredEuclidean.corner_distance(triple, corner), 25.0);
        assert_eq!(Euclidean.corner_distance(triple, corner), 5.0);
        assert!((MeanAbsolute.corner_distance(triple, corner) - 7.0 / 3.0).abs() < 1e-6);
    }
}
