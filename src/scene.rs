pub mod camera;
pub mod capability;
pub mod mesh;
pub mod node;
pub mod utils;
