//! Narrow capabilities the viewer core needs from whatever scene graph backs it.
//!
//! The framing and interaction code only ever talks to objects through these
//! traits, so a different rendering backend just needs an adapter.

use crate::core::math::bounds::BoundingBox;
use nalgebra::Vector3;

/// Depth-first walk over an object hierarchy, parent before children.
pub trait Traversable {
    fn traverse(&self, visit: &mut dyn FnMut(&Self));
}

/// World-space extents of an object and its whole subtree.
pub trait Bounded {
    /// Box enclosing every mesh in the subtree under the current world
    /// matrices. Nodes whose world matrix was never computed contribute
    /// nothing, so a freshly built hierarchy may report an empty box.
    fn world_bounds(&self) -> BoundingBox;

    /// Recomputes world matrices for the whole subtree.
    fn update_world_matrix(&mut self);
}

/// Direct access to an object's placement.
pub trait Placeable {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    /// Euler angles in radians, XYZ order.
    fn rotation(&self) -> Vector3<f32>;
    fn set_rotation(&mut self, rotation: Vector3<f32>);
}

/// Deterministic release of GPU-side or heap resources.
pub trait Disposable {
    fn dispose(&mut self);
    fn is_disposed(&self) -> bool;
}

/// Everything a viewer session needs from a displayed object.
pub trait SceneObject: Bounded + Placeable + Disposable {}

impl<T: Bounded + Placeable + Disposable> SceneObject for T {}
