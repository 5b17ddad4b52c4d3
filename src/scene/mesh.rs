use crate::core::math::bounds::BoundingBox;
use nalgebra::Point3;

/// Triangle geometry in local object space.
///
/// Only positions are kept: the viewer core needs extents, not shading data.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    /// Triangle list, 3 indices per face.
    pub indices: Vec<u32>,
    local_bounds: BoundingBox,
}

impl Mesh {
    pub fn new(positions: Vec<Point3<f32>>, indices: Vec<u32>) -> Self {
        let local_bounds = BoundingBox::from_points(&positions);
        Self {
            positions,
            indices,
            local_bounds,
        }
    }

    /// Builds a mesh from a flat `[x, y, z, x, y, z, ...]` buffer.
    pub fn from_flat(positions: &[f32], indices: Vec<u32>) -> Self {
        let points = positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        Self::new(points, indices)
    }

    /// Axis-aligned box of the 8 corners spanning `min`..`max`, 12 triangles.
    pub fn cuboid(min: Point3<f32>, max: Point3<f32>) -> Self {
        let positions = vec![
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 6, 2, 3, 7, 6, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Self::new(positions, indices)
    }

    pub fn local_bounds(&self) -> &BoundingBox {
        &self.local_bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Releases the vertex and index buffers.
    pub fn release(&mut self) {
        self.positions = Vec::new();
        self.indices = Vec::new();
        self.local_bounds = BoundingBox::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn flat_buffer_is_split_into_points() {
        let mesh = Mesh::from_flat(&[0.0, 0.0, 0.0, 1.0, 2.0, 3.0, -1.0, 0.5, 0.0], vec![0, 1, 2]);
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.local_bounds().size(), Vector3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn release_drops_geometry() {
        let mut mesh = Mesh::cuboid(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.triangle_count(), 12);
        mesh.release();
        assert!(mesh.is_empty());
        assert!(mesh.local_bounds().is_empty());
    }
}
