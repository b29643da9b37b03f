//! Pointer input state

use firework_core::Vec2;
use std::collections::HashSet;
use winit::event::MouseButton;

/// A shell launch requested by a click, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchRequest {
    pub position: Vec2,
}

/// Tracks the cursor and mouse buttons, queuing a launch per left click
pub struct InputState {
    /// Mouse buttons currently held
    mouse_buttons_down: HashSet<MouseButton>,

    /// Current cursor position in window pixels
    pub mouse_position: (f64, f64),

    /// Launches requested since the last drain
    pending_launches: Vec<LaunchRequest>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            pending_launches: Vec::new(),
        }
    }

    /// Process cursor movement (window pixels)
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// Process mouse button press. A left press queues a launch at the cursor.
    pub fn process_mouse_button_down(&mut self, button: MouseButton) {
        let newly_pressed = self.mouse_buttons_down.insert(button);
        if newly_pressed && button == MouseButton::Left {
            let (x, y) = self.mouse_position;
            self.pending_launches.push(LaunchRequest {
                position: Vec2::new(x as f32, y as f32),
            });
        }
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Take all launch requests queued since the last call
    pub fn drain_launches(&mut self) -> Vec<LaunchRequest> {
        std::mem::take(&mut self.pending_launches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_click_queues_launch_at_cursor() {
        let mut input = InputState::new();
        input.process_mouse_move(100.0, 250.5);
        input.process_mouse_button_down(MouseButton::Left);

        let launches = input.drain_launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].position, Vec2::new(100.0, 250.5));
        assert!(input.drain_launches().is_empty());
    }

    #[test]
    fn test_other_buttons_do_not_launch() {
        let mut input = InputState::new();
        input.process_mouse_button_down(MouseButton::Right);
        input.process_mouse_button_down(MouseButton::Middle);
        assert!(input.drain_launches().is_empty());

        // Holding right does not block a left click
        input.process_mouse_button_down(MouseButton::Left);
        assert_eq!(input.drain_launches().len(), 1);
    }

    #[test]
    fn test_held_button_launches_once() {
        let mut input = InputState::new();
        input.process_mouse_button_down(MouseButton::Left);
        // Repeated press without a release (e.g. duplicated event) is not a new click
        input.process_mouse_button_down(MouseButton::Left);
        assert_eq!(input.drain_launches().len(), 1);

        input.process_mouse_button_up(MouseButton::Left);
        input.process_mouse_button_down(MouseButton::Left);
        assert_eq!(input.drain_launches().len(), 1);
    }

    #[test]
    fn test_launch_uses_latest_cursor_position() {
        let mut input = InputState::new();
        input.process_mouse_move(10.0, 10.0);
        input.process_mouse_move(320.0, 40.0);
        input.process_mouse_button_down(MouseButton::Left);
        input.process_mouse_button_up(MouseButton::Left);
        input.process_mouse_move(5.0, 5.0);
        input.process_mouse_button_down(MouseButton::Left);

        let launches = input.drain_launches();
        assert_eq!(launches[0].position, Vec2::new(320.0, 40.0));
        assert_eq!(launches[1].position, Vec2::new(5.0, 5.0));
    }
}
