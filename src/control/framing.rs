//! Auto-framing: choose a camera distance so loaded objects fill the view.

use crate::core::math::bounds::BoundingBox;
use crate::io::config::FramingConfig;
use crate::scene::camera::Camera;
use crate::scene::capability::Placeable;
use clap::ValueEnum;
use log::info;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// How objects and camera are placed once a distance is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Shift objects so the bounds centre sits at the origin; camera on +Z.
    #[default]
    Recenter,
    /// Leave objects where they are; camera backs off from the bounds centre.
    PreservePlacement,
}

/// Inclusive range the camera-to-target distance must stay in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, distance: f32) -> f32 {
        distance.clamp(self.min, self.max)
    }
}

/// Result of the framing computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub center: Point3<f32>,
    /// Bounds size after the zero-size fallback.
    pub size: Vector3<f32>,
    pub max_dim: f32,
    /// Distance at which `max_dim` exactly fills the vertical field of view.
    pub distance: f32,
    /// `distance` with margin and minimum applied, before zoom clamping.
    pub framed_distance: f32,
    /// Distance actually used, inside the zoom limits.
    pub final_distance: f32,
}

impl Framing {
    /// Translation that moves the bounds centre to the origin.
    pub fn object_offset(&self) -> Vector3<f32> {
        -self.center.coords
    }
}

/// Computes camera distance for `bounds` seen through a `fov_deg` lens.
pub fn fit_view(
    bounds: &BoundingBox,
    fov_deg: f32,
    config: &FramingConfig,
    limits: &ZoomLimits,
) -> Framing {
    let mut size = bounds.size();
    if size == Vector3::zeros() {
        size = Vector3::new(1.0, 1.0, 1.0);
    }
    let max_dim = size.x.max(size.y).max(size.z);

    let fov_rad = fov_deg.to_radians();
    let distance = (max_dim / (2.0 * (fov_rad / 2.0).tan())).max(1.0);
    let framed_distance = (distance * config.margin_factor).max(config.minimum_distance);
    let final_distance = limits.clamp(framed_distance);

    Framing {
        center: bounds.center(),
        size,
        max_dim,
        distance,
        framed_distance,
        final_distance,
    }
}

/// Places `objects` and `camera` according to `framing` and `mode`.
pub fn apply_framing<O: Placeable>(
    framing: &Framing,
    mode: FitMode,
    camera: &mut Camera,
    objects: &mut [O],
) {
    let target = match mode {
        FitMode::Recenter => {
            let offset = framing.object_offset();
            for object in objects.iter_mut() {
                let moved = object.position() + offset;
                object.set_position(moved);
            }
            Point3::origin()
        }
        FitMode::PreservePlacement => framing.center,
    };

    camera.set_position(target + Vector3::new(0.0, 0.0, framing.final_distance));
    camera.look_at(target);
    camera.update_projection_matrix();

    info!(
        "Framed {} object(s): max dimension {:.3}, camera distance {:.3} ({:?})",
        objects.len(),
        framing.max_dim,
        framing.final_distance,
        mode
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::node::SceneNode;
    use approx::assert_relative_eq;

    fn wide_limits() -> ZoomLimits {
        ZoomLimits::new(0.1, 10_000.0)
    }

    #[test]
    fn unit_cube_at_75_degrees_is_floored_at_minimum_distance() {
        let bounds = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let framing = fit_view(&bounds, 75.0, &FramingConfig::default(), &wide_limits());

        assert_relative_eq!(framing.max_dim, 2.0);
        let expected = 2.0 / (2.0 * 37.5f32.to_radians().tan());
        assert_relative_eq!(framing.distance, expected, epsilon = 1e-5);
        assert_relative_eq!(framing.distance, 1.303, epsilon = 1e-3);
        assert_relative_eq!(framing.final_distance, 5.0);
    }

    #[test]
    fn zero_size_box_frames_like_unit_size() {
        let point = BoundingBox::from_points(&[Point3::new(3.0, 3.0, 3.0)]);
        let unit = BoundingBox::new(Point3::new(2.5, 2.5, 2.5), Point3::new(3.5, 3.5, 3.5));
        let config = FramingConfig::default();

        let a = fit_view(&point, 60.0, &config, &wide_limits());
        let b = fit_view(&unit, 60.0, &config, &wide_limits());
        assert_eq!(a.size, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(a.final_distance, b.final_distance);
        assert_eq!(a.center, b.center);
    }

    #[test]
    fn large_objects_get_margin_above_raw_distance() {
        let config = FramingConfig::default();
        for extent in [0.01f32, 0.5, 3.0, 40.0, 900.0] {
            let bounds = BoundingBox::new(Point3::origin(), Point3::new(extent, extent * 0.5, 1.0));
            let framing = fit_view(&bounds, 50.0, &config, &wide_limits());
            assert!(framing.distance >= 1.0);
            assert!(framing.final_distance >= config.minimum_distance);
            assert!(framing.final_distance >= framing.distance);
        }
    }

    #[test]
    fn final_distance_respects_zoom_limits() {
        let bounds = BoundingBox::new(Point3::origin(), Point3::new(500.0, 1.0, 1.0));
        let limits = ZoomLimits::new(1.0, 100.0);
        let framing = fit_view(&bounds, 75.0, &FramingConfig::default(), &limits);
        assert!(framing.framed_distance > 100.0);
        assert_eq!(framing.final_distance, 100.0);
    }

    #[test]
    fn recenter_moves_objects_and_camera_looks_at_origin() {
        let bounds = BoundingBox::new(Point3::new(2.0, 0.0, 0.0), Point3::new(4.0, 2.0, 2.0));
        let framing = fit_view(&bounds, 75.0, &FramingConfig::default(), &wide_limits());
        let mut camera = Camera::default();
        let mut objects = vec![SceneNode::new("a")];

        apply_framing(&framing, FitMode::Recenter, &mut camera, &mut objects);

        assert_eq!(objects[0].position(), Vector3::new(-3.0, -1.0, -1.0));
        assert_eq!(camera.target, Point3::origin());
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, framing.final_distance));
    }

    #[test]
    fn preserve_placement_backs_camera_off_the_centre() {
        let bounds = BoundingBox::new(Point3::new(2.0, 0.0, 0.0), Point3::new(4.0, 2.0, 2.0));
        let framing = fit_view(&bounds, 75.0, &FramingConfig::default(), &wide_limits());
        let mut camera = Camera::default();
        let mut objects = vec![SceneNode::new("a")];

        apply_framing(&framing, FitMode::PreservePlacement, &mut camera, &mut objects);

        assert_eq!(objects[0].position(), Vector3::zeros());
        assert_eq!(camera.target, Point3::new(3.0, 1.0, 1.0));
        assert_relative_eq!(
            camera.position,
            Point3::new(3.0, 1.0, 1.0 + framing.final_distance),
            epsilon = 1e-5
        );
    }

    #[test]
    fn fit_mode_parses_from_command_line_names() {
        assert_eq!(FitMode::from_str("recenter", false), Ok(FitMode::Recenter));
        assert_eq!(
            FitMode::from_str("preserve-placement", false),
            Ok(FitMode::PreservePlacement)
        );
        assert!(FitMode::from_str("sideways", false).is_err());
    }
}
