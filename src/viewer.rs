//! Viewer session: the camera, displayed objects and navigation state for
//! one viewport. Independent sessions share nothing.

use crate::control::controller::CameraController;
use crate::control::framing::{Framing, apply_framing, fit_view};
use crate::control::interaction::{ControlAction, GestureKind, InputEvent, InteractionState};
use crate::io::config::ViewerConfig;
use crate::scene::camera::{Camera, CameraPose};
use crate::scene::capability::SceneObject;
use crate::scene::node::SceneNode;
use crate::scene::utils::union_bounds;
use log::{debug, info};
use nalgebra::Vector3;

/// Camera pose recorded by the last auto-fit; target of `reset_view`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedView {
    pub pose: CameraPose,
}

pub struct ViewerSession<O: SceneObject = SceneNode> {
    config: ViewerConfig,
    camera: Camera,
    controller: CameraController,
    interaction: InteractionState,
    objects: Vec<O>,
    saved_view: Option<SavedView>,
    last_framing: Option<Framing>,
}

impl<O: SceneObject> ViewerSession<O> {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            camera: Camera::from_config(&config.camera),
            controller: CameraController::from_config(&config.controls),
            interaction: InteractionState::new(&config.controls, &config.gesture),
            objects: Vec::new(),
            saved_view: None,
            last_framing: None,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn objects(&self) -> &[O] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [O] {
        &mut self.objects
    }

    pub fn saved_view(&self) -> Option<&SavedView> {
        self.saved_view.as_ref()
    }

    pub fn last_framing(&self) -> Option<&Framing> {
        self.last_framing.as_ref()
    }

    /// Adds a freshly loaded object and reframes over everything displayed.
    pub fn add_object(&mut self, object: O) -> Option<Framing> {
        self.objects.push(object);
        self.fit_to_view()
    }

    /// Disposes what is displayed, shows `objects` instead and reframes.
    pub fn replace_objects(&mut self, objects: Vec<O>) -> Option<Framing> {
        self.dispose_objects();
        self.objects = objects;
        self.fit_to_view()
    }

    /// Frames every displayed object and records the result as the reset
    /// view. Returns `None` when nothing is displayed.
    pub fn fit_to_view(&mut self) -> Option<Framing> {
        let bounds = union_bounds(&mut self.objects)?;
        let framing = fit_view(
            &bounds,
            self.camera.fov,
            &self.config.framing,
            &self.controller.limits,
        );
        apply_framing(
            &framing,
            self.config.framing.mode,
            &mut self.camera,
            &mut self.objects,
        );

        self.saved_view = Some(SavedView {
            pose: self.camera.pose(),
        });
        self.last_framing = Some(framing);
        Some(framing)
    }

    /// Restores the saved view and, separately, clears object rotation.
    /// Returns false when no view has been saved yet.
    pub fn reset_view(&mut self) -> bool {
        for object in &mut self.objects {
            object.set_rotation(Vector3::zeros());
        }
        match self.saved_view {
            Some(saved) => {
                self.camera.apply_pose(&saved.pose);
                self.interaction.reset();
                info!("View reset to saved pose");
                true
            }
            None => false,
        }
    }

    /// Feeds one input event through the gesture state machine and applies
    /// the resulting camera changes. Returns the actions applied.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<ControlAction> {
        let actions = self.interaction.handle(event);
        for action in &actions {
            self.controller.apply(&mut self.camera, action);
        }
        if !actions.is_empty() {
            debug!("Applied {:?}", actions);
        }
        actions
    }

    /// Turns displayed objects in place, independent of the camera.
    pub fn rotate_objects(&mut self, delta: Vector3<f32>) {
        for object in &mut self.objects {
            let rotation = object.rotation() + delta;
            object.set_rotation(rotation);
        }
    }

    pub fn set_touch_binding(&mut self, kind: GestureKind) {
        info!("Single-finger touch now drives {:?}", kind);
        self.interaction.set_single_touch(kind);
    }

    /// Viewport resize; only the projection changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect(width as f32 / height as f32);
    }

    /// Disposes every object and forgets the saved view and any gesture.
    pub fn clear(&mut self) {
        self.dispose_objects();
        self.saved_view = None;
        self.last_framing = None;
        self.interaction.reset();
    }

    fn dispose_objects(&mut self) {
        if self.objects.is_empty() {
            return;
        }
        info!("Disposing {} object(s)", self.objects.len());
        for mut object in self.objects.drain(..) {
            object.dispose();
        }
    }
}

impl Default for ViewerSession<SceneNode> {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::interaction::PointerButton;
    use crate::scene::capability::Placeable;
    use crate::scene::mesh::Mesh;
    use approx::assert_relative_eq;
    use nalgebra::{Point2, Point3};

    fn session() -> ViewerSession {
        ViewerSession::default()
    }

    fn cube(min: [f32; 3], max: [f32; 3]) -> SceneNode {
        SceneNode::with_mesh("cube", Mesh::cuboid(Point3::from(min), Point3::from(max)))
    }

    #[test]
    fn empty_session_has_nothing_to_fit_or_reset() {
        let mut session = session();
        assert!(session.fit_to_view().is_none());
        assert!(!session.reset_view());
    }

    #[test]
    fn adding_objects_refits_over_their_union() {
        let mut session = session();
        let first = session.add_object(cube([-1.0; 3], [1.0; 3])).unwrap();
        assert_relative_eq!(first.final_distance, 5.0);

        let second = session.add_object(cube([20.0, -1.0, -1.0], [30.0, 1.0, 1.0])).unwrap();
        assert!(second.max_dim > first.max_dim);
        assert_eq!(session.saved_view().unwrap().pose, session.camera().pose());
    }

    #[test]
    fn reset_zeroes_object_rotation_and_restores_pose() {
        let mut session = session();
        session.add_object(cube([-1.0; 3], [1.0; 3]));
        let saved = session.saved_view().unwrap().pose;

        session.rotate_objects(Vector3::new(0.3, 0.2, 0.0));
        session.handle_event(&InputEvent::Wheel { delta_y: -120.0 });
        assert_ne!(session.camera().pose(), saved);

        assert!(session.reset_view());
        assert_eq!(session.camera().pose(), saved);
        assert_eq!(session.objects()[0].rotation(), Vector3::zeros());
    }

    #[test]
    fn clear_disposes_objects_and_drops_saved_view() {
        let mut session = session();
        session.add_object(cube([-1.0; 3], [1.0; 3]));
        session.handle_event(&InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point2::new(0.0, 0.0),
        });

        session.clear();
        assert!(session.objects().is_empty());
        assert!(session.saved_view().is_none());
        assert_eq!(
            session.interaction().mode(),
            crate::control::interaction::GestureMode::Idle
        );
    }

    #[test]
    fn resize_updates_aspect_only() {
        let mut session = session();
        let pose = session.camera().pose();
        session.resize(800, 400);
        assert_relative_eq!(session.camera().aspect_ratio, 2.0);
        assert_eq!(session.camera().pose(), pose);

        session.resize(0, 400);
        assert_relative_eq!(session.camera().aspect_ratio, 2.0);
    }

    #[test]
    fn replace_objects_disposes_previous_model() {
        let mut session = session();
        session.add_object(cube([-1.0; 3], [1.0; 3]));
        let framing = session
            .replace_objects(vec![cube([0.0; 3], [8.0, 2.0, 2.0])])
            .unwrap();
        assert_eq!(session.objects().len(), 1);
        assert_relative_eq!(framing.max_dim, 8.0);
        // Recentred onto the origin.
        assert_eq!(session.objects()[0].position(), Vector3::new(-4.0, -1.0, -1.0));
    }

    #[test]
    fn refit_after_moving_an_object_recentres_it() {
        let mut session = session();
        session.add_object(cube([-1.0; 3], [1.0; 3]));

        session.objects_mut()[0].set_position(Vector3::new(7.0, 0.0, 0.0));
        session.fit_to_view().unwrap();

        assert_relative_eq!(
            session.objects()[0].position(),
            Vector3::zeros(),
            epsilon = 1e-5
        );
        assert_eq!(session.camera().target, Point3::origin());
    }
}
