//! [`FaceletSampler`] – applies the classifier to one face of one capture.

use std::path::PathBuf;

use tracing::{debug, warn};

use cubescan_calib::{CalibrationProfile, FACELETS_PER_FACE};
use cubescan_types::{Color, Coordinate, Face};

use crate::classify::ColorClassifier;
use crate::image::Image;

/// Default half-width of the averaging window around each template
/// coordinate, in pixels.
pub const DEFAULT_NEIGHBORHOOD_RADIUS: u32 = 2;

/// Samples all 8 calibrated coordinates of a face and classifies each one.
pub struct FaceletSampler<'p> {
    profile: &'p CalibrationProfile,
    classifier: ColorClassifier<'p>,
    radius: u32,
    debug_sink: Option<DebugSink>,
}

impl<'p> FaceletSampler<'p> {
    pub fn new(profile: &'p CalibrationProfile, classifier: ColorClassifier<'p>) -> Self {
        Self {
            profile,
            classifier,
            radius: DEFAULT_NEIGHBORHOOD_RADIUS,
            debug_sink: None,
        }
    }

    /// Override the averaging window radius.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Attach a diagnostic sink that persists an annotated copy of every
    /// sampled face.  Sampling results never depend on the sink.
    pub fn with_debug_sink(mut self, sink: DebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    /// Classify the 8 non-center facelets of `face` in `image`, in canonical
    /// template order.
    pub fn sample(&self, face: Face, image: &Image) -> [Color; FACELETS_PER_FACE] {
        let template = self.profile.template(face);
        let mut colors = [Color::Red; FACELETS_PER_FACE];
        for (slot, coordinate) in template.iter().enumerate() {
            let hsv = image.mean_hsv(*coordinate, self.radius);
            let color = self.classifier.classify(hsv);
            debug!(
                face = %face,
                slot,
                x = coordinate.x,
                y = coordinate.y,
                h = hsv[0],
                s = hsv[1],
                v = hsv[2],
                color = %color,
                "facelet classified"
            );
            colors[slot] = color;
        }

        if let Some(sink) = &self.debug_sink {
            sink.dump(face, image, template, self.radius, &colors);
        }
        colors
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Debug sink
// ────────────────────────────────────────────────────────────────────────────

/// Writes `face_<code>.png` next to each sampled face: the RGB plane with
/// every sampled window blacked out, so a misplaced template is visible at a
/// glance.  Failures are logged and swallowed; diagnostics never abort a run.
pub struct DebugSink {
    dir: PathBuf,
}

impl DebugSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn dump(
        &self,
        face: Face,
        image: &Image,
        template: &[Coordinate; FACELETS_PER_FACE],
        radius: u32,
        colors: &[Color; FACELETS_PER_FACE],
    ) {
        let Some(mut canvas) =
            ::image::RgbImage::from_raw(image.width(), image.height(), image.rgb().to_vec())
        else {
            warn!(face = %face, "debug dump skipped: RGB plane size mismatch");
            return;
        };

        for (coordinate, color) in template.iter().zip(colors) {
            let x0 = coordinate.x.saturating_sub(radius);
            let x1 = (coordinate.x + radius).min(image.width());
            let y0 = coordinate.y.saturating_sub(radius);
            let y1 = (coordinate.y + radius).min(image.height());
            for y in y0..y1 {
                for x in x0..x1 {
                    canvas.put_pixel(x, y, ::image::Rgb([0, 0, 0]));
                }
            }
            debug!(face = %face, x = coordinate.x, y = coordinate.y, color = %color, "annotated sample window");
        }

        let path = self.dir.join(format!("face_{}.png", face.code()));
        if let Err(e) = canvas.save(&path) {
            warn!(face = %face, path = %path.display(), "debug dump failed: {e}");
        }
    }
}
