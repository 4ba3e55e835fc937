//! Drag-to-orbit controller.
//!
//! [`OrbitController`] converts pointer-drag deltas into camera rotation
//! angles. A vertical drag tilts the lattice about the X axis, a horizontal
//! drag spins it about the Y axis.
//!
//! # Usage
//!
//! 1. Forward winit events via [`on_button`](OrbitController::on_button) and
//!    [`on_cursor_moved`](OrbitController::on_cursor_moved).
//! 2. Read the accumulated angles with
//!    [`rotation_x`](OrbitController::rotation_x) /
//!    [`rotation_y`](OrbitController::rotation_y) each frame.

use glam::Vec2;
use winit::event::{ElementState, MouseButton};

/// Accumulates pointer-drag deltas into orbit rotation angles (degrees).
///
/// Angles grow without bound; the rotation transform they feed is periodic,
/// so no wrapping or clamping is applied.
#[derive(Debug, Clone)]
pub struct OrbitController {
    rotation_x: f32,
    rotation_y: f32,
    sensitivity: f32,
    last_position: Option<Vec2>,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl OrbitController {
    /// Create a controller with the given drag sensitivity (degrees per pixel).
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            sensitivity,
            last_position: None,
        }
    }

    // ── Drag protocol ───────────────────────────────────────────────

    /// Begin a drag at the given pointer position.
    pub fn on_drag_start(&mut self, position: Vec2) {
        self.last_position = Some(position);
    }

    /// Advance an active drag to a new pointer position.
    ///
    /// Returns the rotation delta `(Δx_rotation, Δy_rotation) = (Δy, -Δx)`
    /// applied to the accumulated angles, or `None` if no drag is active.
    pub fn on_drag_move(&mut self, position: Vec2) -> Option<(f32, f32)> {
        let last = self.last_position?;
        let delta = position - last;
        self.last_position = Some(position);

        let delta_rx = delta.y * self.sensitivity;
        let delta_ry = -delta.x * self.sensitivity;
        self.rotation_x += delta_rx;
        self.rotation_y += delta_ry;
        Some((delta_rx, delta_ry))
    }

    /// End the active drag, if any.
    pub fn on_drag_end(&mut self) {
        self.last_position = None;
    }

    // ── winit adapters ──────────────────────────────────────────────

    /// Process a `MouseInput` event; the left button drives the drag.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState, position: Vec2) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => self.on_drag_start(position),
            ElementState::Released => self.on_drag_end(),
        }
    }

    /// Process a `CursorMoved` event. Moves outside a drag are ignored.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.on_drag_move(Vec2::new(x as f32, y as f32));
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Accumulated rotation about the X axis, in degrees.
    #[must_use]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Accumulated rotation about the Y axis, in degrees.
    #[must_use]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut orbit = OrbitController::default();
        assert!(orbit.on_drag_move(Vec2::new(100.0, 100.0)).is_none());
        assert_eq!(orbit.rotation_x(), 0.0);
        assert_eq!(orbit.rotation_y(), 0.0);
    }

    #[test]
    fn test_single_drag_delta() {
        let mut orbit = OrbitController::default();
        orbit.on_drag_start(Vec2::new(10.0, 10.0));
        let (drx, dry) = orbit.on_drag_move(Vec2::new(14.0, 13.0)).unwrap();
        // (Δy, -Δx) = (3, -4)
        assert_eq!(drx, 3.0);
        assert_eq!(dry, -4.0);
        assert_eq!(orbit.rotation_x(), 3.0);
        assert_eq!(orbit.rotation_y(), -4.0);
    }

    #[test]
    fn test_deltas_accumulate_additively() {
        let mut orbit = OrbitController::default();
        orbit.on_drag_start(Vec2::ZERO);
        let moves = [
            Vec2::new(5.0, 2.0),
            Vec2::new(8.0, -1.0),
            Vec2::new(3.0, 4.0),
        ];
        for m in moves {
            orbit.on_drag_move(m);
        }
        // rotation_x = Σdy = final y (moves are absolute positions from 0)
        assert_eq!(orbit.rotation_x(), 4.0);
        // rotation_y = -Σdx = -final x
        assert_eq!(orbit.rotation_y(), -3.0);
    }

    #[test]
    fn test_drag_end_stops_accumulation() {
        let mut orbit = OrbitController::default();
        orbit.on_drag_start(Vec2::ZERO);
        orbit.on_drag_move(Vec2::new(0.0, 10.0));
        orbit.on_drag_end();
        assert!(orbit.on_drag_move(Vec2::new(0.0, 50.0)).is_none());
        assert_eq!(orbit.rotation_x(), 10.0);
    }

    #[test]
    fn test_restarted_drag_does_not_jump() {
        let mut orbit = OrbitController::default();
        orbit.on_drag_start(Vec2::ZERO);
        orbit.on_drag_move(Vec2::new(0.0, 10.0));
        orbit.on_drag_end();
        // New drag starting far away must not apply the gap as a delta.
        orbit.on_drag_start(Vec2::new(500.0, 500.0));
        orbit.on_drag_move(Vec2::new(500.0, 501.0));
        assert_eq!(orbit.rotation_x(), 11.0);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut orbit = OrbitController::default();
        orbit.on_drag_start(Vec2::ZERO);
        for i in 1..=100 {
            orbit.on_drag_move(Vec2::new(0.0, i as f32 * 10.0));
        }
        assert_eq!(orbit.rotation_x(), 1000.0);
    }

    #[test]
    fn test_sensitivity_scales_deltas() {
        let mut orbit = OrbitController::new(0.5);
        orbit.on_drag_start(Vec2::ZERO);
        orbit.on_drag_move(Vec2::new(-8.0, 6.0));
        assert_eq!(orbit.rotation_x(), 3.0);
        assert_eq!(orbit.rotation_y(), 4.0);
    }

    #[test]
    fn test_left_button_drives_drag() {
        let mut orbit = OrbitController::default();
        orbit.on_button(MouseButton::Right, ElementState::Pressed, Vec2::ZERO);
        assert!(!orbit.is_dragging());
        orbit.on_button(MouseButton::Left, ElementState::Pressed, Vec2::ZERO);
        assert!(orbit.is_dragging());
        orbit.on_button(MouseButton::Left, ElementState::Released, Vec2::ZERO);
        assert!(!orbit.is_dragging());
    }
}
