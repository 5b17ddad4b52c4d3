use crate::core::math::transform::TransformFactory;
use crate::io::config::CameraConfig;
use nalgebra::{Matrix4, Point3, Vector3};

/// Position, aim and field of view: everything reset needs to restore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

/// Perspective camera with a look-at target and fixed world-up.
///
/// Matrices are cached; anything that moves the camera goes through
/// `look_at` or `update_projection_matrix` to refresh them.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up: Vector3::y(),
            fov,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_view_matrix();
        cam.update_projection_matrix();
        cam
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            Point3::from(config.position),
            Point3::from(config.target),
            config.fov,
            config.aspect,
            config.near,
            config.far,
        )
    }

    /// Aims the camera at `target` and refreshes the view matrix.
    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
        self.update_view_matrix();
    }

    /// Moves camera and target together, keeping the view direction.
    pub fn translate(&mut self, offset: &Vector3<f32>) {
        self.position += offset;
        self.target += offset;
        self.update_view_matrix();
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.update_view_matrix();
    }

    pub fn set_aspect(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov.to_radians(), self.near, self.far);
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);
    }

    /// Unit vector the camera looks along.
    pub fn world_direction(&self) -> Vector3<f32> {
        -self.view_row(2)
    }

    /// Camera-local right axis in world space.
    pub fn right(&self) -> Vector3<f32> {
        self.view_row(0)
    }

    /// Camera-local up axis in world space.
    pub fn up_axis(&self) -> Vector3<f32> {
        self.view_row(1)
    }

    fn view_row(&self, row: usize) -> Vector3<f32> {
        let m = &self.view_matrix;
        Vector3::new(m[(row, 0)], m[(row, 1)], m[(row, 2)])
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).norm()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
            fov: self.fov,
        }
    }

    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.fov = pose.fov;
        self.look_at(pose.target);
        self.update_projection_matrix();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
