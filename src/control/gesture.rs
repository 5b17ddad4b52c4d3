//! Two-finger touch disambiguation: pinch (zoom) versus drag (rotate).

use crate::io::config::GestureConfig;
use nalgebra::{Point2, Vector2};

/// Finger spread and centre for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSample {
    pub distance: f32,
    pub midpoint: Point2<f32>,
}

impl PinchSample {
    pub fn from_touches(a: &Point2<f32>, b: &Point2<f32>) -> Self {
        Self {
            distance: (b - a).norm(),
            midpoint: nalgebra::center(a, b),
        }
    }
}

/// What one two-finger frame asks the camera to do.
///
/// The two contributions are gated independently; either, both or neither
/// may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TwoFingerDelta {
    /// Scaled change in finger spread. Positive when fingers move apart.
    pub zoom: Option<f32>,
    /// Midpoint travel in pixels, applied as an orbit.
    pub rotate: Option<Vector2<f32>>,
}

impl TwoFingerDelta {
    pub fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.rotate.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct TwoFingerTracker {
    config: GestureConfig,
    last: Option<PinchSample>,
}

impl TwoFingerTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, last: None }
    }

    /// Captures a fresh baseline; the next update measures against it.
    pub fn begin(&mut self, a: &Point2<f32>, b: &Point2<f32>) {
        self.last = Some(PinchSample::from_touches(a, b));
    }

    /// Forgets the baseline so a later gesture cannot inherit stale values.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn baseline(&self) -> Option<&PinchSample> {
        self.last.as_ref()
    }

    /// Compares this frame against the previous one and moves the baseline.
    ///
    /// Without a baseline the frame only seeds one and yields nothing.
    pub fn update(&mut self, a: &Point2<f32>, b: &Point2<f32>) -> TwoFingerDelta {
        let current = PinchSample::from_touches(a, b);
        let Some(last) = self.last.replace(current) else {
            return TwoFingerDelta::default();
        };

        let distance_change = current.distance - last.distance;
        let scaled = distance_change * self.config.distance_scale;
        let zoom = (scaled.abs() > self.config.zoom_threshold).then_some(scaled);

        // Midpoint travel must beat both the noise floor and the concurrent
        // pinch motion, strictly; a tie is not a rotate.
        let midpoint_delta = current.midpoint - last.midpoint;
        let movement = midpoint_delta.norm();
        let dominant = movement > distance_change.abs() * self.config.dominance_factor;
        let rotate = (movement > self.config.rotate_threshold && dominant).then_some(midpoint_delta);

        TwoFingerDelta { zoom, rotate }
    }
}
