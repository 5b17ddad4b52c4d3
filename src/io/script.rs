//! Scripted input replay.
//!
//! A script is a TOML file with a `[[steps]]` array; each step carries a
//! `type` tag and the fields of one input event or session command:
//!
//! ```toml
//! [[steps]]
//! type = "pointer_down"
//! button = "primary"
//! position = [100.0, 100.0]
//!
//! [[steps]]
//! type = "wheel"
//! delta_y = -120.0
//! ```

use crate::control::interaction::{GestureKind, InputEvent, PointerButton};
use crate::error::Result;
use crate::scene::capability::SceneObject;
use crate::viewer::ViewerSession;
use log::{debug, info};
use nalgebra::{Point2, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    Primary,
    Secondary,
    Auxiliary,
}

impl From<ScriptButton> for PointerButton {
    fn from(button: ScriptButton) -> Self {
        match button {
            ScriptButton::Primary => PointerButton::Primary,
            ScriptButton::Secondary => PointerButton::Secondary,
            ScriptButton::Auxiliary => PointerButton::Auxiliary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown { button: ScriptButton, position: [f32; 2] },
    PointerMove { position: [f32; 2] },
    PointerUp { button: ScriptButton },
    Wheel { delta_y: f32 },
    TouchStart { touches: Vec<[f32; 2]> },
    TouchMove { touches: Vec<[f32; 2]> },
    TouchEnd { touches: Vec<[f32; 2]> },
    Fit,
    Reset,
    /// Euler delta in radians.
    RotateObject { delta: [f32; 3] },
    SetTouchBinding { kind: GestureKind },
    Resize { width: u32, height: u32 },
}

fn points(touches: &[[f32; 2]]) -> Vec<Point2<f32>> {
    touches.iter().map(|&p| Point2::from(p)).collect()
}

impl ScriptStep {
    /// The raw input event this step stands for, if it is one.
    pub fn to_event(&self) -> Option<InputEvent> {
        let event = match self {
            ScriptStep::PointerDown { button, position } => InputEvent::PointerDown {
                button: (*button).into(),
                position: Point2::from(*position),
            },
            ScriptStep::PointerMove { position } => InputEvent::PointerMove {
                position: Point2::from(*position),
            },
            ScriptStep::PointerUp { button } => InputEvent::PointerUp {
                button: (*button).into(),
            },
            ScriptStep::Wheel { delta_y } => InputEvent::Wheel { delta_y: *delta_y },
            ScriptStep::TouchStart { touches } => InputEvent::TouchStart {
                touches: points(touches),
            },
            ScriptStep::TouchMove { touches } => InputEvent::TouchMove {
                touches: points(touches),
            },
            ScriptStep::TouchEnd { touches } => InputEvent::TouchEnd {
                touches: points(touches),
            },
            _ => return None,
        };
        Some(event)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventScript {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl EventScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading input script: {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Replays every step in order against `session`.
    pub fn replay<O: SceneObject>(&self, session: &mut ViewerSession<O>) {
        for (i, step) in self.steps.iter().enumerate() {
            debug!("Step {}: {:?}", i, step);
            if let Some(event) = step.to_event() {
                session.handle_event(&event);
                continue;
            }
            match *step {
                ScriptStep::Fit => {
                    session.fit_to_view();
                }
                ScriptStep::Reset => {
                    session.reset_view();
                }
                ScriptStep::RotateObject { delta } => session.rotate_objects(Vector3::from(delta)),
                ScriptStep::SetTouchBinding { kind } => session.set_touch_binding(kind),
                ScriptStep::Resize { width, height } => session.resize(width, height),
                _ => {}
            }
        }
        info!("Replayed {} step(s)", self.steps.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::interaction::GestureMode;
    use crate::scene::capability::Placeable;
    use crate::scene::mesh::Mesh;
    use crate::scene::node::SceneNode;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn framed_session() -> ViewerSession {
        let mut session = ViewerSession::default();
        session.add_object(SceneNode::with_mesh(
            "cube",
            Mesh::cuboid(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
        ));
        session
    }

    #[test]
    fn parses_tagged_steps() {
        let script = EventScript::from_toml_str(
            r#"
            [[steps]]
            type = "pointer_down"
            button = "secondary"
            position = [1.0, 2.0]

            [[steps]]
            type = "touch_start"
            touches = [[0.0, 0.0], [100.0, 0.0]]

            [[steps]]
            type = "set_touch_binding"
            kind = "rotate"

            [[steps]]
            type = "fit"
            "#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 4);
        assert_eq!(
            script.steps[0],
            ScriptStep::PointerDown {
                button: ScriptButton::Secondary,
                position: [1.0, 2.0]
            }
        );
        assert_eq!(script.steps[2], ScriptStep::SetTouchBinding { kind: GestureKind::Rotate });
        assert_eq!(script.steps[3], ScriptStep::Fit);
        assert!(script.steps[3].to_event().is_none());
    }

    #[test]
    fn unknown_step_type_is_rejected() {
        let err = EventScript::from_toml_str("[[steps]]\ntype = \"teleport\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn replayed_wheel_zooms_and_reset_restores() {
        let mut session = framed_session();
        let saved = session.saved_view().unwrap().pose;

        let script = EventScript::from_toml_str(
            r#"
            [[steps]]
            type = "wheel"
            delta_y = 200.0

            [[steps]]
            type = "rotate_object"
            delta = [0.0, 1.0, 0.0]
            "#,
        )
        .unwrap();
        script.replay(&mut session);
        assert_relative_eq!(session.camera().distance_to_target(), 7.0, epsilon = 1e-4);
        assert_eq!(session.objects()[0].rotation(), Vector3::new(0.0, 1.0, 0.0));

        EventScript {
            steps: vec![ScriptStep::Reset],
        }
        .replay(&mut session);
        assert_eq!(session.camera().pose(), saved);
        assert_eq!(session.objects()[0].rotation(), Vector3::zeros());
    }

    #[test]
    fn replayed_drag_leaves_state_idle() {
        let mut session = framed_session();
        let script = EventScript {
            steps: vec![
                ScriptStep::PointerDown {
                    button: ScriptButton::Primary,
                    position: [0.0, 0.0],
                },
                ScriptStep::PointerMove { position: [100.0, 0.0] },
                ScriptStep::PointerUp {
                    button: ScriptButton::Primary,
                },
            ],
        };
        script.replay(&mut session);
        assert_eq!(session.interaction().mode(), GestureMode::Idle);
        assert_relative_eq!(session.camera().target, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn demo_script_parses() {
        let script = EventScript::from_toml_str(include_str!("../../demos/navigate.toml")).unwrap();
        assert_eq!(script.steps.last(), Some(&ScriptStep::Reset));
    }
}
