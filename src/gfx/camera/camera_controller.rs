use std::collections::HashSet;

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::{
    bindings::{parse_key, Action, KeyBindings, Trigger},
    camera_utils::CameraPose,
};

/// Rotation per pixel of pointer drag, in radians.
pub const DEFAULT_ROTATE_SENSITIVITY: f32 = 0.002;
pub const DEFAULT_ZOOM_STEP: f32 = 0.05;
pub const DEFAULT_ZOOM_FLOOR: f32 = 0.1;
/// World units moved per frame while a strafe key is held.
pub const DEFAULT_PAN_SPEED: f32 = 10.0;

/// Raw input state rebuilt from events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub is_dragging: bool,
    pub last_pointer_position: (f64, f64),
    pub active_pointer_buttons: HashSet<MouseButton>,
}

/// Translates key, pointer and wheel events into camera pose changes.
///
/// Event handlers only record state or apply instantaneous deltas (drag,
/// wheel). Held keys and buttons are turned into motion once per frame by
/// [`CameraInputController::apply_held_keys`].
#[derive(Debug, Clone)]
pub struct CameraInputController {
    pub rotate_sensitivity: f32,
    pub zoom_step: f32,
    pub zoom_floor: f32,
    pub pan_speed: f32,
    bindings: KeyBindings,
    input: InputState,
    pose: CameraPose,
    initial_pose: CameraPose,
}

impl CameraInputController {
    pub fn new(pose: CameraPose, bindings: KeyBindings) -> Self {
        Self {
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
            zoom_step: DEFAULT_ZOOM_STEP,
            zoom_floor: DEFAULT_ZOOM_FLOOR,
            pan_speed: DEFAULT_PAN_SPEED,
            bindings,
            input: InputState::default(),
            pose,
            initial_pose: pose,
        }
    }

    pub fn with_zoom_floor(mut self, floor: f32) -> Self {
        self.zoom_floor = floor;
        self.pose.zoom = self.pose.zoom.max(floor);
        self.initial_pose.zoom = self.initial_pose.zoom.max(floor);
        self
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn key_down(&mut self, key: KeyCode) {
        let newly_pressed = self.input.keys_held.insert(key);
        if newly_pressed {
            self.fire_press_actions(Trigger::Key(key));
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.input.keys_held.remove(&key);
    }

    /// Key down by identifier ("a", "A", "ArrowUp"). Unknown names are ignored.
    pub fn key_down_named(&mut self, name: &str) {
        if let Some(key) = parse_key(name) {
            self.key_down(key);
        }
    }

    pub fn key_up_named(&mut self, name: &str) {
        if let Some(key) = parse_key(name) {
            self.key_up(key);
        }
    }

    /// Starts a drag on the primary or secondary button; other buttons are ignored.
    ///
    /// A button bound to a zoom action is held for zooming and does not drag.
    pub fn pointer_down(&mut self, button: MouseButton, x: f64, y: f64) {
        if !matches!(button, MouseButton::Left | MouseButton::Right) {
            return;
        }

        self.input.active_pointer_buttons.insert(button);
        if self.drags(button) {
            self.input.is_dragging = true;
        }
        self.input.last_pointer_position = (x, y);
        self.fire_press_actions(Trigger::Mouse(button));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.input.is_dragging {
            return;
        }

        let (last_x, last_y) = self.input.last_pointer_position;
        self.pose.rotation_y -= (x - last_x) as f32 * self.rotate_sensitivity;
        self.pose.rotation_x -= (y - last_y) as f32 * self.rotate_sensitivity;
        self.input.last_pointer_position = (x, y);
    }

    pub fn pointer_up(&mut self, button: MouseButton) {
        self.input.active_pointer_buttons.remove(&button);
        self.input.is_dragging = self
            .input
            .active_pointer_buttons
            .iter()
            .any(|held| self.drags(*held));
    }

    /// Wheel input in page convention: negative scrolls up and zooms in.
    pub fn wheel_scroll(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.zoom_by(self.zoom_step);
        } else if delta_y > 0.0 {
            self.zoom_by(-self.zoom_step);
        }
    }

    /// Applies one frame of motion for every held trigger.
    pub fn apply_held_keys(&mut self) {
        let held: Vec<Action> = self
            .bindings
            .pairs()
            .iter()
            .filter(|(_, trigger)| self.is_held(*trigger))
            .map(|(action, _)| *action)
            .collect();

        for action in held {
            match action {
                Action::StrafeLeft => self.pose.position.x -= self.pan_speed,
                Action::StrafeRight => self.pose.position.x += self.pan_speed,
                Action::StrafeUp => self.pose.position.y += self.pan_speed,
                Action::StrafeDown => self.pose.position.y -= self.pan_speed,
                Action::ZoomIn => self.zoom_by(self.zoom_step),
                Action::ZoomOut => self.zoom_by(-self.zoom_step),
                Action::ResetCamera => {}
            }
        }
    }

    /// Returns the camera to the pose it was created with.
    pub fn reset_pose(&mut self) {
        log::info!("Resetting camera to initial pose");
        self.pose = self.initial_pose;
    }

    /// Drops all held keys and buttons, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.input = InputState::default();
    }

    /// Routes a winit window event. Returns true if the event was camera input.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_keyed_event(event);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.input.last_pointer_position;
                match state {
                    ElementState::Pressed => self.pointer_down(*button, x, y),
                    ElementState::Released => self.pointer_up(*button),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.input.is_dragging {
                    self.pointer_move(position.x, position.y);
                } else {
                    // Remember where a drag would start, MouseInput carries no position
                    self.input.last_pointer_position = (position.x, position.y);
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive; flip to page convention
                let delta_y = -match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
                };
                self.wheel_scroll(delta_y);
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    pub fn process_keyed_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.key_down(code),
                ElementState::Released => self.key_up(code),
            }
        }
    }

    fn is_held(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Key(key) => self.input.keys_held.contains(&key),
            Trigger::Mouse(button) => self.input.active_pointer_buttons.contains(&button),
        }
    }

    fn drags(&self, button: MouseButton) -> bool {
        !self
            .bindings
            .actions_for(Trigger::Mouse(button))
            .any(|action| matches!(action, Action::ZoomIn | Action::ZoomOut))
    }

    fn fire_press_actions(&mut self, trigger: Trigger) {
        let reset = self
            .bindings
            .actions_for(trigger)
            .any(|action| action == Action::ResetCamera);
        if reset {
            self.reset_pose();
        }
    }

    fn zoom_by(&mut self, step: f32) {
        self.pose.zoom = (self.pose.zoom + step).max(self.zoom_floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn controller() -> CameraInputController {
        CameraInputController::new(
            CameraPose::new(Vector3::new(0.0, -2500.0, 1200.0), 1.0, 0.0, 1.0),
            KeyBindings::canonical(),
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_drag_rotates_by_sensitivity() {
        let mut c = controller();
        let before = *c.pose();

        c.pointer_down(MouseButton::Left, 100.0, 100.0);
        c.pointer_move(150.0, 130.0);

        assert!(approx(c.pose().rotation_y, before.rotation_y - 0.1));
        assert!(approx(c.pose().rotation_x, before.rotation_x - 0.06));
        assert_eq!(c.input().last_pointer_position, (150.0, 130.0));
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut c = controller();
        let before = *c.pose();
        c.pointer_move(500.0, 500.0);
        assert_eq!(*c.pose(), before);
    }

    #[test]
    fn test_drag_ends_when_last_button_released() {
        let mut c = controller();
        c.pointer_down(MouseButton::Left, 0.0, 0.0);
        c.pointer_down(MouseButton::Right, 0.0, 0.0);

        c.pointer_up(MouseButton::Left);
        assert!(c.input().is_dragging);

        c.pointer_up(MouseButton::Right);
        assert!(!c.input().is_dragging);
    }

    #[test]
    fn test_middle_button_ignored() {
        let mut c = controller();
        c.pointer_down(MouseButton::Middle, 10.0, 10.0);
        assert!(!c.input().is_dragging);
        assert!(c.input().active_pointer_buttons.is_empty());
    }

    #[test]
    fn test_wheel_zoom_never_below_floor() {
        let mut c = controller();
        c.wheel_scroll(-1.0);
        assert!(approx(c.pose().zoom, 1.05));

        for _ in 0..1000 {
            c.wheel_scroll(120.0);
            assert!(c.pose().zoom >= c.zoom_floor);
        }
        assert!(approx(c.pose().zoom, DEFAULT_ZOOM_FLOOR));

        c.wheel_scroll(0.0);
        assert!(approx(c.pose().zoom, DEFAULT_ZOOM_FLOOR));
    }

    #[test]
    fn test_held_keys_move_once_per_frame() {
        let mut c = controller();
        // Repeated key-down events while held must not add extra motion
        c.key_down(KeyCode::KeyD);
        c.key_down(KeyCode::KeyD);
        c.key_down(KeyCode::KeyQ);

        c.apply_held_keys();
        assert!(approx(c.pose().position.x, 10.0));
        assert!(approx(c.pose().position.y, -2490.0));

        c.apply_held_keys();
        assert!(approx(c.pose().position.x, 20.0));

        c.key_up(KeyCode::KeyD);
        c.apply_held_keys();
        assert!(approx(c.pose().position.x, 20.0));
    }

    #[test]
    fn test_key_zoom_respects_floor() {
        let mut c = controller();
        c.key_down(KeyCode::KeyS);
        for _ in 0..100 {
            c.apply_held_keys();
        }
        assert!(approx(c.pose().zoom, DEFAULT_ZOOM_FLOOR));
    }

    #[test]
    fn test_named_keys_are_case_insensitive() {
        let mut c = controller();
        c.key_down_named("A");
        assert!(c.input().keys_held.contains(&KeyCode::KeyA));

        c.key_up_named("a");
        assert!(c.input().keys_held.is_empty());

        c.key_down_named("Hyper");
        assert!(c.input().keys_held.is_empty());
    }

    #[test]
    fn test_unbound_key_is_harmless() {
        let mut c = controller();
        let before = *c.pose();
        c.key_down(KeyCode::KeyZ);
        c.apply_held_keys();
        assert_eq!(*c.pose(), before);
    }

    #[test]
    fn test_bindings_are_configurable() {
        let mut c = CameraInputController::new(CameraPose::default(), KeyBindings::strafe_only());
        c.key_down(KeyCode::KeyW);
        c.apply_held_keys();

        assert!(approx(c.pose().position.y, DEFAULT_PAN_SPEED));
        assert!(approx(c.pose().zoom, 1.0));
    }

    #[test]
    fn test_mouse_buttons_as_zoom() {
        let mut c = CameraInputController::new(CameraPose::default(), KeyBindings::with_mouse_zoom());
        c.pointer_down(MouseButton::Left, 0.0, 0.0);
        c.apply_held_keys();
        assert!(approx(c.pose().zoom, 1.05));

        c.pointer_up(MouseButton::Left);
        c.pointer_down(MouseButton::Right, 0.0, 0.0);
        c.apply_held_keys();
        c.apply_held_keys();
        assert!(approx(c.pose().zoom, 0.95));
    }

    #[test]
    fn test_zoom_buttons_do_not_rotate() {
        let mut c = CameraInputController::new(CameraPose::default(), KeyBindings::with_mouse_zoom());
        let before = *c.pose();

        c.pointer_down(MouseButton::Left, 100.0, 100.0);
        assert!(!c.input().is_dragging);
        c.pointer_move(180.0, 40.0);
        c.apply_held_keys();

        assert_eq!(c.pose().rotation_x, before.rotation_x);
        assert_eq!(c.pose().rotation_y, before.rotation_y);
        assert!(approx(c.pose().zoom, 1.05));
    }

    #[test]
    fn test_drag_button_still_rotates_beside_zoom_button() {
        let mut bindings = KeyBindings::canonical();
        bindings.bind(Action::ZoomIn, Trigger::Mouse(MouseButton::Right));
        let mut c = CameraInputController::new(CameraPose::default(), bindings);

        c.pointer_down(MouseButton::Left, 0.0, 0.0);
        c.pointer_down(MouseButton::Right, 0.0, 0.0);
        c.pointer_up(MouseButton::Left);
        // Only the zoom button is left, so the drag is over
        assert!(!c.input().is_dragging);

        c.pointer_down(MouseButton::Left, 0.0, 0.0);
        c.pointer_move(50.0, 0.0);
        assert!(approx(c.pose().rotation_y, -0.1));
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let mut c = controller();
        let initial = *c.pose();

        c.key_down(KeyCode::KeyA);
        c.apply_held_keys();
        c.wheel_scroll(-1.0);
        assert_ne!(*c.pose(), initial);

        c.key_down(KeyCode::KeyR);
        assert_eq!(*c.pose(), initial);
    }

    #[test]
    fn test_release_all() {
        let mut c = controller();
        c.key_down(KeyCode::KeyA);
        c.pointer_down(MouseButton::Left, 1.0, 1.0);
        c.release_all();

        assert_eq!(*c.input(), InputState::default());
    }

    #[test]
    fn test_zoom_floor_builder_lifts_pose() {
        let c = CameraInputController::new(
            CameraPose::new(Vector3::new(0.0, 0.0, 0.0), 0.0, 0.0, 0.05),
            KeyBindings::canonical(),
        )
        .with_zoom_floor(0.1);
        assert!(approx(c.pose().zoom, 0.1));
    }
}
