use crate::core::math::bounds::BoundingBox;
use crate::scene::capability::Bounded;
use log::{debug, warn};

/// World bounding box of `object`, never empty.
///
/// An object that has not been attached yet reports no geometry, so an empty
/// first pass forces a world-matrix update and measures again. If that still
/// finds nothing the unit box stands in.
pub fn compute_bounds<O: Bounded + ?Sized>(object: &mut O) -> BoundingBox {
    let bbox = object.world_bounds();
    if !bbox.is_empty() {
        return bbox;
    }

    debug!("Bounding box empty, forcing world matrix update");
    object.update_world_matrix();
    let bbox = object.world_bounds();
    if !bbox.is_empty() {
        return bbox;
    }

    warn!("Object has no measurable geometry, using unit bounding box");
    BoundingBox::unit()
}

/// Union of the bounds of every object, each measured with `compute_bounds`.
///
/// Returns `None` when there is nothing to measure.
pub fn union_bounds<O: Bounded>(objects: &mut [O]) -> Option<BoundingBox> {
    if objects.is_empty() {
        return None;
    }
    let bbox = objects
        .iter_mut()
        .fold(BoundingBox::empty(), |acc, object| acc.union(&compute_bounds(object)));
    Some(bbox)
}
