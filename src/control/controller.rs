use crate::control::framing::ZoomLimits;
use crate::control::interaction::ControlAction;
use crate::core::math::spherical::Spherical;
use crate::io::config::ControlsConfig;
use crate::scene::camera::Camera;
use nalgebra::Vector3;

/// Turns pointer deltas into camera motion around the look-at target.
#[derive(Debug, Clone)]
pub struct CameraController {
    // Sensitivities per pixel / per zoom unit
    pub pan_sensitivity: f32,
    pub rotation_sensitivity: f32,
    pub zoom_sensitivity: f32,

    // Allowed camera-to-target distance
    pub limits: ZoomLimits,
}

impl CameraController {
    pub fn new(
        pan_sensitivity: f32,
        rotation_sensitivity: f32,
        zoom_sensitivity: f32,
        limits: ZoomLimits,
    ) -> Self {
        Self {
            pan_sensitivity,
            rotation_sensitivity,
            zoom_sensitivity,
            limits,
        }
    }

    pub fn from_config(config: &ControlsConfig) -> Self {
        Self::new(
            config.pan_sensitivity,
            config.rotation_sensitivity,
            config.zoom_sensitivity,
            ZoomLimits::new(config.min_zoom, config.max_zoom),
        )
    }

    pub fn apply(&self, camera: &mut Camera, action: &ControlAction) {
        match *action {
            ControlAction::Pan { dx, dy } => self.pan(camera, dx, dy),
            ControlAction::Orbit { dx, dy } => self.orbit(camera, dx, dy),
            ControlAction::Zoom { delta, scale } => self.zoom(camera, delta, scale),
        }
    }

    /// Slides camera and target along the camera's right/up axes.
    /// Dragging right moves the scene right, so the camera goes left.
    pub fn pan(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let offset = camera.right() * (-dx * self.pan_sensitivity)
            + camera.up_axis() * (dy * self.pan_sensitivity);
        camera.translate(&offset);
    }

    /// Rotates the camera around its target at constant radius.
    pub fn orbit(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let target = camera.target;
        let mut spherical = Spherical::from_offset(&(camera.position - target));

        spherical.theta -= dx * self.rotation_sensitivity;
        spherical.phi += dy * self.rotation_sensitivity;
        // Clamp polar angle to avoid flipping over the poles
        spherical.clamp_phi();

        camera.set_position(target + spherical.to_offset());
        camera.look_at(target);
    }

    /// Dollies along the view direction, then pulls the distance back into
    /// the zoom limits. Positive `delta` moves towards the target.
    pub fn zoom(&self, camera: &mut Camera, delta: f32, scale: f32) {
        let before = camera.position - camera.target;
        let step = camera.world_direction() * (delta * self.zoom_sensitivity * scale);
        let mut offset = before + step;

        // Dollying through the target would flip the view; stop at the near limit.
        if offset.dot(&before) <= 0.0 {
            offset = Self::offset_direction(camera, &before) * self.limits.min;
        }

        camera.set_position(camera.target + offset);
        self.clamp_distance(camera);
    }

    /// Renormalises the camera offset so its length lies in the zoom limits.
    /// A camera sitting on its target is backed off along its view axis.
    pub fn clamp_distance(&self, camera: &mut Camera) {
        let offset = camera.position - camera.target;
        let distance = offset.norm();
        let clamped = self.limits.clamp(distance);
        if clamped != distance {
            let direction = Self::offset_direction(camera, &offset);
            camera.set_position(camera.target + direction * clamped);
        }
    }

    /// Unit target-to-camera direction, or the reversed view direction when
    /// the offset is too short to normalise.
    fn offset_direction(camera: &Camera, offset: &Vector3<f32>) -> Vector3<f32> {
        offset
            .try_normalize(1e-6)
            .unwrap_or_else(|| -camera.world_direction())
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}
