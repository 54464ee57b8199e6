//! Drag and wheel-rotate handling as an explicit state machine.
//!
//! `Idle --pointer down on a tooth--> Dragging --pointer up--> Idle`
//!
//! Pointer coordinates are percent of the displayed image; use
//! [`pointer_to_percent`] to convert from screen pixels first.

use crate::models::position::{clamp_origin, normalize_rotation};
use crate::models::{CanvasSize, Coordinate, Point, ToothPosition};

use super::ToothLayout;

/// Degrees applied per wheel notch
pub const DEFAULT_ROTATION_STEP: f32 = 5.0;

/// Current interaction state
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress
    Idle,
    /// A tooth follows the pointer
    Dragging {
        /// Id of the grabbed position
        id: String,
        /// Pointer minus the tooth's top-left corner at grab time
        grab_offset: (f32, f32),
    },
}

/// Pointer input, in percent of the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Down(Point),
    /// Pointer moved
    Move(Point),
    /// Button released
    Up,
    /// Wheel turned over `at`; positive delta rotates clockwise
    Wheel {
        /// Pointer location
        at: Point,
        /// Wheel delta, only the sign is used
        delta: f32,
    },
}

/// Drives drag and rotate edits against a [`ToothLayout`]
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    rotation_step: f32,
}

impl InteractionController {
    /// Idle controller with the default rotation step
    pub fn new() -> Self {
        Self::with_rotation_step(DEFAULT_ROTATION_STEP)
    }

    /// Idle controller rotating `step` degrees per wheel notch
    pub fn with_rotation_step(step: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            rotation_step: step,
        }
    }

    /// Current state
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// True while a tooth is grabbed
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Dispatch one event. Returns the id of the position it changed or grabbed.
    pub fn handle(&mut self, layout: &mut ToothLayout, event: PointerEvent) -> Option<String> {
        match event {
            PointerEvent::Down(p) => self.pointer_down(layout, p),
            PointerEvent::Move(p) => self.pointer_move(layout, p),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Wheel { at, delta } => self.wheel(layout, at, delta),
        }
    }

    /// Grab the topmost tooth under the pointer
    pub fn pointer_down(&mut self, layout: &ToothLayout, pointer: Point) -> Option<String> {
        let id = layout.hit_test(pointer)?.to_string();
        let position = layout.get(&id)?;
        let grab_offset = pointer.offset_from(&Point::new(position.x, position.y));
        log::debug!("grab {} at ({:.1}, {:.1})", id, pointer.x, pointer.y);
        self.state = InteractionState::Dragging {
            id: id.clone(),
            grab_offset,
        };
        Some(id)
    }

    /// Move the grabbed tooth so it keeps its grab offset, clamped inside the image
    pub fn pointer_move(&mut self, layout: &mut ToothLayout, pointer: Point) -> Option<String> {
        let InteractionState::Dragging { id, grab_offset } = &self.state else {
            return None;
        };
        let Some(position) = layout.get_mut(id) else {
            // Removed mid-gesture.
            self.state = InteractionState::Idle;
            return None;
        };
        position.move_to(pointer.x - grab_offset.0, pointer.y - grab_offset.1);
        Some(position.id.clone())
    }

    /// Release the grabbed tooth
    pub fn pointer_up(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Dragging { id, .. } => Some(id),
            InteractionState::Idle => None,
        }
    }

    /// Rotate the tooth under the pointer by one step in the wheel's direction
    pub fn wheel(&mut self, layout: &mut ToothLayout, at: Point, delta: f32) -> Option<String> {
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        let id = layout.hit_test(at)?.to_string();
        let position = layout.get_mut(&id)?;
        let step = self.rotation_step.copysign(delta);
        position.set_rotation(position.rotation + step);
        Some(id)
    }

    /// Abandon any gesture
    pub fn cancel(&mut self) {
        self.state = InteractionState::Idle;
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-left corner after dragging `position` by (dx, dy), clamped inside the image
pub fn drag_by(position: &ToothPosition, dx: f32, dy: f32) -> (f32, f32) {
    clamp_origin(position.x + dx, position.y + dy, position.width, position.height)
}

/// Rotation after `notches` wheel steps of `step` degrees
pub fn rotate_by(rotation: f32, notches: i32, step: f32) -> f32 {
    normalize_rotation(rotation + notches as f32 * step)
}

/// Convert a pointer in pixels of the displayed image into percent
pub fn pointer_to_percent(pointer: Point, displayed: CanvasSize) -> Point {
    Coordinate::AbsolutePixels(pointer).to_percent(displayed)
}
