//! Pointer and touch state machine.
//!
//! Raw input events go in, camera-agnostic [`ControlAction`]s come out. The
//! machine never touches the camera; the session applies the actions.

use crate::control::gesture::TwoFingerTracker;
use crate::io::config::{ControlsConfig, GestureConfig};
use log::debug;
use nalgebra::Point2;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left mouse button.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Middle button or anything else; ignored.
    Auxiliary,
}

/// Navigation a single pointer drag can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Pan,
    Rotate,
    Zoom,
}

/// Raw input in canvas pixel coordinates (y grows downwards).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        position: Point2<f32>,
    },
    PointerMove {
        position: Point2<f32>,
    },
    PointerUp {
        button: PointerButton,
    },
    /// Positive `delta_y` is scrolling down.
    Wheel {
        delta_y: f32,
    },
    /// `touches` lists every finger currently down.
    TouchStart {
        touches: Vec<Point2<f32>>,
    },
    TouchMove {
        touches: Vec<Point2<f32>>,
    },
    /// `touches` lists the fingers still down after the release.
    TouchEnd {
        touches: Vec<Point2<f32>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Panning,
    Orbiting,
    Zooming,
    TwoFinger,
}

impl From<GestureKind> for GestureMode {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Pan => GestureMode::Panning,
            GestureKind::Rotate => GestureMode::Orbiting,
            GestureKind::Zoom => GestureMode::Zooming,
        }
    }
}

/// A camera change requested by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Screen-space drag in pixels.
    Pan { dx: f32, dy: f32 },
    /// Screen-space drag in pixels.
    Orbit { dx: f32, dy: f32 },
    /// Positive `delta` moves towards the target.
    Zoom { delta: f32, scale: f32 },
}

/// Which gesture each input source starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub primary_button: GestureKind,
    pub secondary_button: GestureKind,
    pub single_touch: GestureKind,
}

#[derive(Debug, Clone)]
pub struct InteractionState {
    mode: GestureMode,
    last_pointer: Option<Point2<f32>>,
    two_finger: TwoFingerTracker,
    bindings: Bindings,
    wheel_sign: f32,
    wheel_scale: f32,
    pinch_zoom_scale: f32,
}

impl InteractionState {
    pub fn new(controls: &ControlsConfig, gesture: &GestureConfig) -> Self {
        Self {
            mode: GestureMode::Idle,
            last_pointer: None,
            two_finger: TwoFingerTracker::new(gesture.clone()),
            bindings: Bindings {
                primary_button: controls.primary_button,
                secondary_button: controls.secondary_button,
                single_touch: controls.single_touch,
            },
            // Scrolling down (positive delta) zooms out unless inverted.
            wheel_sign: if controls.invert_wheel { 1.0 } else { -1.0 },
            wheel_scale: controls.wheel_zoom_scale,
            pinch_zoom_scale: gesture.pinch_zoom_scale,
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    pub fn last_pointer(&self) -> Option<Point2<f32>> {
        self.last_pointer
    }

    pub fn two_finger(&self) -> &TwoFingerTracker {
        &self.two_finger
    }

    /// Rebinds single-finger touch. Takes effect on the next touch-start.
    pub fn set_single_touch(&mut self, kind: GestureKind) {
        self.bindings.single_touch = kind;
    }

    /// Drops any gesture in progress.
    pub fn reset(&mut self) {
        self.enter(GestureMode::Idle);
        self.last_pointer = None;
        self.two_finger.reset();
    }

    pub fn handle(&mut self, event: &InputEvent) -> Vec<ControlAction> {
        match event {
            InputEvent::PointerDown { button, position } => {
                self.pointer_down(*button, *position);
                Vec::new()
            }
            InputEvent::PointerMove { position } => self.single_move(*position).into_iter().collect(),
            InputEvent::PointerUp { .. } => {
                self.reset();
                Vec::new()
            }
            InputEvent::Wheel { delta_y } => vec![ControlAction::Zoom {
                delta: delta_y * self.wheel_sign,
                scale: self.wheel_scale,
            }],
            InputEvent::TouchStart { touches } => {
                self.touch_start(touches);
                Vec::new()
            }
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { touches } => {
                self.touch_end(touches);
                Vec::new()
            }
        }
    }

    fn pointer_down(&mut self, button: PointerButton, position: Point2<f32>) {
        if self.mode != GestureMode::Idle {
            return;
        }
        let kind = match button {
            PointerButton::Primary => self.bindings.primary_button,
            PointerButton::Secondary => self.bindings.secondary_button,
            PointerButton::Auxiliary => return,
        };
        self.enter(kind.into());
        self.last_pointer = Some(position);
    }

    fn single_move(&mut self, position: Point2<f32>) -> Option<ControlAction> {
        if !matches!(
            self.mode,
            GestureMode::Panning | GestureMode::Orbiting | GestureMode::Zooming
        ) {
            return None;
        }
        let last = self.last_pointer.replace(position)?;
        let delta = position - last;
        let (dx, dy) = (delta.x, delta.y);

        match self.mode {
            GestureMode::Panning => Some(ControlAction::Pan { dx, dy }),
            GestureMode::Orbiting => Some(ControlAction::Orbit { dx, dy }),
            // Dragging up zooms in.
            GestureMode::Zooming => Some(ControlAction::Zoom {
                delta: -dy,
                scale: 1.0,
            }),
            GestureMode::Idle | GestureMode::TwoFinger => None,
        }
    }

    fn touch_start(&mut self, touches: &[Point2<f32>]) {
        match touches {
            [] => self.reset(),
            [only] => self.begin_single_touch(*only),
            [a, b, ..] => {
                self.last_pointer = None;
                self.two_finger.begin(a, b);
                self.enter(GestureMode::TwoFinger);
            }
        }
    }

    fn touch_move(&mut self, touches: &[Point2<f32>]) -> Vec<ControlAction> {
        match (self.mode, touches) {
            (GestureMode::TwoFinger, [a, b, ..]) => {
                let delta = self.two_finger.update(a, b);
                let mut actions = Vec::with_capacity(2);
                if let Some(zoom) = delta.zoom {
                    // Spreading the fingers backs the camera away.
                    actions.push(ControlAction::Zoom {
                        delta: -zoom,
                        scale: self.pinch_zoom_scale,
                    });
                }
                if let Some(rotate) = delta.rotate {
                    actions.push(ControlAction::Orbit {
                        dx: rotate.x,
                        dy: rotate.y,
                    });
                }
                actions
            }
            (GestureMode::TwoFinger, _) => Vec::new(),
            (_, [first, ..]) => self.single_move(*first).into_iter().collect(),
            (_, []) => Vec::new(),
        }
    }

    fn touch_end(&mut self, remaining: &[Point2<f32>]) {
        match remaining {
            [] => self.reset(),
            [only] => {
                // Continue with the finger left down, measured from where it is now.
                self.two_finger.reset();
                self.begin_single_touch(*only);
            }
            [a, b, ..] => {
                self.two_finger.begin(a, b);
                self.enter(GestureMode::TwoFinger);
            }
        }
    }

    fn begin_single_touch(&mut self, position: Point2<f32>) {
        self.two_finger.reset();
        self.enter(self.bindings.single_touch.into());
        self.last_pointer = Some(position);
    }

    fn enter(&mut self, mode: GestureMode) {
        if self.mode != mode {
            debug!("Gesture {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(&ControlsConfig::default(), &GestureConfig::default())
    }
}
