pub mod bounds;
pub mod spherical;
pub mod transform;
