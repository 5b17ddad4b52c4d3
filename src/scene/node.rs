use crate::core::math::bounds::BoundingBox;
use crate::core::math::transform::TransformFactory;
use crate::scene::capability::{Bounded, Disposable, Placeable, Traversable};
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};

/// A node in the displayed hierarchy: optional geometry plus children.
///
/// World matrices are computed lazily. A node that was built or re-parented
/// but never updated has no world matrix and is invisible to `world_bounds`.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub mesh: Option<Mesh>,
    pub children: Vec<SceneNode>,

    // --- Transform ---
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,

    parent_world: Matrix4<f32>,
    world_matrix: Option<Matrix4<f32>>,
    disposed: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            children: Vec::new(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            parent_world: Matrix4::identity(),
            world_matrix: None,
            disposed: false,
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut node = Self::new(name);
        node.mesh = Some(mesh);
        node
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Attaches `child`. Its world matrix stays unset until the next update.
    pub fn add_child(&mut self, mut child: SceneNode) {
        child.detach_world();
        self.children.push(child);
    }

    pub fn local_matrix(&self) -> Matrix4<f32> {
        TransformFactory::compose(&self.position, &self.rotation, &self.scale)
    }

    pub fn world_matrix(&self) -> Option<&Matrix4<f32>> {
        self.world_matrix.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.world_matrix.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                count += mesh.positions.len();
            }
        });
        count
    }

    pub fn triangle_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                count += mesh.triangle_count();
            }
        });
        count
    }

    fn update_world_from(&mut self, parent_world: Matrix4<f32>) {
        self.parent_world = parent_world;
        let world = parent_world * self.local_matrix();
        self.world_matrix = Some(world);
        for child in &mut self.children {
            child.update_world_from(world);
        }
    }

    fn detach_world(&mut self) {
        self.world_matrix = None;
        for child in &mut self.children {
            child.detach_world();
        }
    }

    /// Keeps cached matrices in step with a transform edit.
    fn refresh_world(&mut self) {
        if self.world_matrix.is_some() {
            let parent = self.parent_world;
            self.update_world_from(parent);
        }
    }
}

impl Traversable for SceneNode {
    fn traverse(&self, visit: &mut dyn FnMut(&Self)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }
}

impl Bounded for SceneNode {
    fn world_bounds(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        self.traverse(&mut |node| {
            if let (Some(world), Some(mesh)) = (&node.world_matrix, &node.mesh) {
                bbox.expand_by_box(&mesh.local_bounds().transformed(world));
            }
        });
        bbox
    }

    fn update_world_matrix(&mut self) {
        let parent = self.parent_world;
        self.update_world_from(parent);
    }
}

impl Placeable for SceneNode {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.refresh_world();
    }

    fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.rotation = rotation;
        self.refresh_world();
    }
}

impl Disposable for SceneNode {
    fn dispose(&mut self) {
        if let Some(mesh) = &mut self.mesh {
            mesh.release();
        }
        self.mesh = None;
        for child in &mut self.children {
            child.dispose();
        }
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
