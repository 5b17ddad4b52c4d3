use crate::control::framing::FitMode;
use crate::control::interaction::GestureKind;
use crate::error::{Error, Result};
use log::info;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            target: [0.0, 0.0, 0.0],
            fov: default_fov(),
            aspect: default_aspect(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 5.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_aspect() -> f32 {
    16.0 / 9.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlsConfig {
    // --- Sensitivities ---
    #[serde(default = "default_pan_sensitivity")]
    pub pan_sensitivity: f32,
    #[serde(default = "default_rotation_sensitivity")]
    pub rotation_sensitivity: f32,
    #[serde(default = "default_zoom_sensitivity")]
    pub zoom_sensitivity: f32,

    // --- Wheel ---
    #[serde(default = "default_one")]
    pub wheel_zoom_scale: f32,
    /// When false, a positive wheel delta (scrolling down) zooms out.
    #[serde(default)]
    pub invert_wheel: bool,

    // --- Zoom range (distance from target) ---
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,

    // --- Bindings ---
    #[serde(default = "default_primary_button")]
    pub primary_button: GestureKind,
    #[serde(default = "default_secondary_button")]
    pub secondary_button: GestureKind,
    #[serde(default = "default_single_touch")]
    pub single_touch: GestureKind,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            pan_sensitivity: default_pan_sensitivity(),
            rotation_sensitivity: default_rotation_sensitivity(),
            zoom_sensitivity: default_zoom_sensitivity(),
            wheel_zoom_scale: default_one(),
            invert_wheel: false,
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            primary_button: default_primary_button(),
            secondary_button: default_secondary_button(),
            single_touch: default_single_touch(),
        }
    }
}

fn default_pan_sensitivity() -> f32 {
    0.01
}
fn default_rotation_sensitivity() -> f32 {
    0.005
}
fn default_zoom_sensitivity() -> f32 {
    0.01
}
fn default_one() -> f32 {
    1.0
}
fn default_min_zoom() -> f32 {
    1.0
}
fn default_max_zoom() -> f32 {
    1000.0
}
fn default_primary_button() -> GestureKind {
    GestureKind::Pan
}
fn default_secondary_button() -> GestureKind {
    GestureKind::Rotate
}
fn default_single_touch() -> GestureKind {
    GestureKind::Pan
}

#[derive(Debug, Clone, Deserialize)]
pub struct FramingConfig {
    #[serde(default = "default_margin_factor")]
    pub margin_factor: f32,
    #[serde(default = "default_minimum_distance")]
    pub minimum_distance: f32,
    #[serde(default)]
    pub mode: FitMode,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            margin_factor: default_margin_factor(),
            minimum_distance: default_minimum_distance(),
            mode: FitMode::default(),
        }
    }
}

fn default_margin_factor() -> f32 {
    2.0
}
fn default_minimum_distance() -> f32 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct GestureConfig {
    /// Multiplier turning a change in finger distance (px) into zoom units.
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f32,
    #[serde(default = "default_zoom_threshold")]
    pub zoom_threshold: f32,
    /// Minimum midpoint travel (px) before a frame counts as a rotate.
    #[serde(default = "default_rotate_threshold")]
    pub rotate_threshold: f32,
    #[serde(default = "default_dominance_factor")]
    pub dominance_factor: f32,
    #[serde(default = "default_pinch_zoom_scale")]
    pub pinch_zoom_scale: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_scale: default_distance_scale(),
            zoom_threshold: default_zoom_threshold(),
            rotate_threshold: default_rotate_threshold(),
            dominance_factor: default_dominance_factor(),
            pinch_zoom_scale: default_pinch_zoom_scale(),
        }
    }
}

fn default_distance_scale() -> f32 {
    0.1
}
fn default_zoom_threshold() -> f32 {
    0.5
}
fn default_rotate_threshold() -> f32 {
    5.0
}
fn default_dominance_factor() -> f32 {
    0.5
}
fn default_pinch_zoom_scale() -> f32 {
    10.0
}

impl ViewerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading viewer config from '{}'", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the camera math cannot honour. NaN and infinities
    /// fail every check.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if !(cam.fov > 0.0 && cam.fov < 180.0) {
            return Err(invalid(format!("camera.fov must be in (0, 180), got {}", cam.fov)));
        }
        positive("camera.aspect", cam.aspect)?;
        if !(cam.near > 0.0 && cam.far > cam.near && cam.far.is_finite()) {
            return Err(invalid(format!(
                "camera clip range must satisfy 0 < near < far, got {}..{}",
                cam.near, cam.far
            )));
        }
        let position = Vector3::from(cam.position);
        let target = Vector3::from(cam.target);
        if !position.iter().chain(target.iter()).all(|c| c.is_finite()) {
            return Err(invalid("camera position and target must be finite".to_string()));
        }
        if (position - target).norm() <= f32::EPSILON {
            return Err(invalid(format!(
                "camera.position must differ from camera.target, both are {:?}",
                cam.position
            )));
        }

        let ctl = &self.controls;
        positive("controls.pan_sensitivity", ctl.pan_sensitivity)?;
        positive("controls.rotation_sensitivity", ctl.rotation_sensitivity)?;
        positive("controls.zoom_sensitivity", ctl.zoom_sensitivity)?;
        positive("controls.wheel_zoom_scale", ctl.wheel_zoom_scale)?;
        if !(ctl.min_zoom > 0.0 && ctl.max_zoom >= ctl.min_zoom && ctl.max_zoom.is_finite()) {
            return Err(invalid(format!(
                "zoom range must satisfy 0 < min_zoom <= max_zoom, got {}..{}",
                ctl.min_zoom, ctl.max_zoom
            )));
        }

        positive("framing.margin_factor", self.framing.margin_factor)?;
        non_negative("framing.minimum_distance", self.framing.minimum_distance)?;

        let g = &self.gesture;
        positive("gesture.distance_scale", g.distance_scale)?;
        positive("gesture.pinch_zoom_scale", g.pinch_zoom_scale)?;
        non_negative("gesture.zoom_threshold", g.zoom_threshold)?;
        non_negative("gesture.rotate_threshold", g.rotate_threshold)?;
        non_negative("gesture.dominance_factor", g.dominance_factor)?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive and finite, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative and finite, got {value}")))
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.framing.margin_factor, 2.0);
        assert_eq!(config.framing.minimum_distance, 5.0);
        assert_eq!(config.framing.mode, FitMode::Recenter);
        assert_eq!(config.controls.primary_button, GestureKind::Pan);
        assert_eq!(config.controls.secondary_button, GestureKind::Rotate);
        assert_eq!(config.gesture.rotate_threshold, 5.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [controls]
            single_touch = "zoom"
            max_zoom = 50.0

            [framing]
            mode = "preserve_placement"
            margin_factor = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.controls.single_touch, GestureKind::Zoom);
        assert_eq!(config.controls.max_zoom, 50.0);
        assert_eq!(config.controls.min_zoom, 1.0);
        assert_eq!(config.framing.mode, FitMode::PreservePlacement);
        assert_eq!(config.framing.margin_factor, 1.5);
        assert_eq!(config.framing.minimum_distance, 5.0);
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let err = ViewerConfig::from_toml_str("[controls]\nmin_zoom = 10.0\nmax_zoom = 2.0\n")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn bad_fov_is_rejected() {
        let err = ViewerConfig::from_toml_str("[camera]\nfov = 180.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn nan_and_infinite_values_are_rejected() {
        for doc in [
            "[controls]\nzoom_sensitivity = nan\n",
            "[controls]\nmax_zoom = inf\n",
            "[camera]\naspect = nan\n",
            "[framing]\nmargin_factor = nan\n",
            "[gesture]\nrotate_threshold = nan\n",
            "[gesture]\ndominance_factor = -inf\n",
        ] {
            let err = ViewerConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{doc}");
        }
    }

    #[test]
    fn camera_on_its_target_is_rejected() {
        let err = ViewerConfig::from_toml_str("[camera]\nposition = [0.0, 0.0, 0.0]\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = ViewerConfig::from_toml_str(
            "[camera]\nposition = [1.0, 2.0, 3.0]\ntarget = [1.0, 2.0, 3.0]\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ViewerConfig::from_toml_str("[camera\nfov = 1").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn sample_config_parses() {
        let config = ViewerConfig::from_toml_str(include_str!("../../viewer.toml")).unwrap();
        assert_eq!(config.controls.max_zoom, 1000.0);
        assert_eq!(config.gesture.pinch_zoom_scale, 10.0);
    }
}
