use nalgebra::{Matrix4, Point3, Vector3};

/// Axis-aligned bounding box.
///
/// The default box is empty (`min > max` on every axis) so that expanding it
/// by the first point yields a box around that point alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Point3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    /// Unit cube centred at the origin, used when an object yields no geometry.
    pub fn unit() -> Self {
        Self {
            min: Point3::new(-0.5, -0.5, -0.5),
            max: Point3::new(0.5, 0.5, 0.5),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_by_point(p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    #[inline]
    pub fn expand_by_point(&mut self, point: &Point3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grows this box to enclose `other`. Empty boxes contribute nothing.
    #[inline]
    pub fn expand_by_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.expand_by_point(&other.min);
        self.expand_by_point(&other.max);
    }

    pub fn union(mut self, other: &BoundingBox) -> Self {
        self.expand_by_box(other);
        self
    }

    /// Centre point; the origin for an empty box.
    pub fn center(&self) -> Point3<f32> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Component-wise extent; zero for an empty box.
    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Box enclosing the eight corners of this box after `matrix`.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        if self.is_empty() {
            return *self;
        }
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, hi.z),
        ];
        let moved: Vec<Point3<f32>> = corners.iter().map(|c| matrix.transform_point(c)).collect();
        Self::from_points(&moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use approx::assert_relative_eq;

    #[test]
    fn empty_box_has_zero_size_and_origin_center() {
        let bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        assert_eq!(bbox.size(), Vector3::zeros());
        assert_eq!(bbox.center(), Point3::origin());
    }

    #[test]
    fn single_point_box_is_not_empty() {
        let bbox = BoundingBox::from_points(&[Point3::new(2.0, 3.0, 4.0)]);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.size(), Vector3::zeros());
        assert_eq!(bbox.center(), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn union_ignores_empty_boxes() {
        let a = BoundingBox::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 1.0));
        let merged = BoundingBox::empty().union(&a).union(&BoundingBox::empty());
        assert_eq!(merged, a);

        let b = BoundingBox::new(Point3::new(3.0, -1.0, 0.0), Point3::new(4.0, 0.0, 0.5));
        let merged = a.union(&b);
        assert_eq!(merged.min, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(merged.max, Point3::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn transformed_box_follows_rotation() {
        let bbox = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        let rotated = bbox.transformed(&TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2));
        assert_relative_eq!(rotated.size(), Vector3::new(1.0, 1.0, 2.0), epsilon = 1e-5);
    }
}
