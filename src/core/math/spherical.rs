use nalgebra::Vector3;
use std::f32::consts::PI;

/// Margin kept between the polar angle and either pole.
pub const POLE_MARGIN: f32 = 0.1;

/// Spherical coordinates of an offset from an orbit target.
///
/// `theta` is the azimuth around +Y measured from +Z towards +X, `phi` the
/// polar angle measured from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn new(radius: f32, theta: f32, phi: f32) -> Self {
        Self { radius, theta, phi }
    }

    pub fn from_offset(offset: &Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        Self { radius, theta, phi }
    }

    pub fn to_offset(&self) -> Vector3<f32> {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }

    /// Keeps `phi` inside `[POLE_MARGIN, PI - POLE_MARGIN]` so the camera
    /// never reaches a pole where look-at would flip.
    pub fn clamp_phi(&mut self) {
        self.phi = self.phi.clamp(POLE_MARGIN, PI - POLE_MARGIN);
    }
}
