use nalgebra::{Matrix4, Point3, Vector3};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the handful of matrices the viewer needs.
/// Right-handed, Y-up, camera looking down -Z.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation applied in XYZ order (X outermost), the usual order
    /// for object rotations in web scene graphs.
    pub fn euler_xyz(angles: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_x(angles.x) * Self::rotation_y(angles.y) * Self::rotation_z(angles.z)
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Local object matrix: translate * rotate * scale.
    pub fn compose(
        position: &Vector3<f32>,
        rotation: &Vector3<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation(position) * Self::euler_xyz(rotation) * Self::scaling(scale)
    }

    /// Look-at view matrix. Rows 0 and 1 hold the camera's right and up axes.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let (x_axis, y_axis, z_axis) = look_at_basis(eye, target, up);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection mapping the view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }
}

/// Orthonormal camera basis `(right, up, back)` for an eye looking at `target`.
///
/// Degenerate inputs (eye on the target, or view direction parallel to `up`)
/// fall back to the canonical basis instead of producing NaNs.
pub fn look_at_basis(
    eye: &Point3<f32>,
    target: &Point3<f32>,
    up: &Vector3<f32>,
) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let Some(z_axis) = (eye - target).try_normalize(1e-6) else {
        return (Vector3::x(), Vector3::y(), Vector3::z());
    };
    let x_axis = up
        .cross(&z_axis)
        .try_normalize(1e-6)
        .unwrap_or_else(Vector3::x);
    let y_axis = z_axis.cross(&x_axis);
    (x_axis, y_axis, z_axis)
}
