//! Per-frame orchestration
//!
//! Owns the clock, the bodies, the pause state and the camera controller, and
//! turns one host frame callback into one batch of output for a [`FrameSink`].

use std::time::Instant;

use cgmath::Vector3;

use super::{
    clock::SimulationClock,
    path::DEFAULT_OUTLINE_SEGMENTS,
    pause::{PauseController, PauseState},
    registry::{BodyId, BodyRegistry},
    speed::{SpeedControl, SpeedRegistry},
    traits::{BodyTransform, FrameSink},
};
use crate::{
    config::SystemConfig,
    error::Result,
    gfx::camera::{CameraInputController, CameraPose},
    ui::UiEvent,
};

/// Drives the whole simulation one frame at a time.
pub struct FrameDriver {
    clock: SimulationClock,
    bodies: BodyRegistry,
    pause: PauseController,
    speeds: SpeedRegistry,
    camera: CameraInputController,
    frame_count: u64,
}

impl FrameDriver {
    /// Validates `config` and builds every component from it.
    pub fn new(config: &SystemConfig) -> Result<Self> {
        config.validate()?;

        let bodies = BodyRegistry::from_configs(&config.bodies)?;
        let speeds = SpeedRegistry::new(&bodies);
        let camera = config.camera.build_controller(config.bindings.clone());

        Ok(Self {
            clock: SimulationClock::new(config.clock.max_frame_delta),
            bodies,
            pause: PauseController::new(),
            speeds,
            camera,
            frame_count: 0,
        })
    }

    /// Runs one frame using wall-clock time.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, sink: &mut S) {
        let delta = self.clock.next_delta();
        self.step(delta, sink);
    }

    /// Runs one frame as if the host called back at `now`.
    pub fn tick_at<S: FrameSink + ?Sized>(&mut self, now: Instant, sink: &mut S) {
        let delta = self.clock.next_delta_at(now);
        self.step(delta, sink);
    }

    /// Advances every body by `delta`, applies held camera input and emits
    /// the results. `delta` is used as given, without clamping.
    pub fn step<S: FrameSink + ?Sized>(&mut self, delta: f32, sink: &mut S) {
        for (_, entry) in self.bodies.iter_mut() {
            entry.body.advance(delta);
        }

        // All bodies are updated before anything reaches the renderer
        for (id, entry) in self.bodies.iter() {
            let p = entry.body.position();
            let transform = BodyTransform {
                position: Vector3::new(p.x, p.y, 0.0),
                self_rotation: entry.body.self_rotation(),
                axial_tilt: entry.axial_tilt(),
            };
            sink.set_body_transform(id, &transform);
        }

        self.camera.apply_held_keys();
        sink.set_camera_pose(self.camera.pose());
        sink.end_frame();

        self.frame_count += 1;
        log::trace!("Frame {} advanced by {:.4}", self.frame_count, delta);
    }

    /// Sends every body's orbit line to `sink`. Paths never change, so hosts
    /// call this once at startup.
    pub fn emit_orbit_outlines<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        for (id, entry) in self.bodies.iter() {
            let points = entry.body.path().outline(DEFAULT_OUTLINE_SEGMENTS);
            sink.set_orbit_outline(id, &points);
        }
        log::debug!("Sent {} orbit outlines", self.bodies.len());
    }

    /// Flips pause state for all bodies and returns the new state.
    pub fn toggle_pause(&mut self) -> PauseState {
        let state = self.pause.toggle(&mut self.bodies);
        // Don't let time spent paused count as one long frame on resume
        self.clock.reset();
        state
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    /// Resolves a body name to its speed control. Do this once during wiring.
    pub fn speed_control(&self, name: &str) -> Option<SpeedControl> {
        self.speeds.control(name)
    }

    pub fn set_body_speed(&mut self, id: BodyId, value: f32) -> bool {
        self.speeds
            .set_body_speed(&mut self.bodies, self.pause.state(), id, value)
    }

    /// Applies raw control text; non-numeric input sets the speed to 0.
    pub fn set_body_speed_raw(&mut self, id: BodyId, raw: &str) -> bool {
        self.speeds
            .set_body_speed_raw(&mut self.bodies, self.pause.state(), id, raw)
    }

    /// Routes an event from the UI collaborator.
    pub fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::SpeedChanged { control, raw } => {
                self.set_body_speed_raw(control.body(), &raw);
            }
            UiEvent::PauseToggleClicked => {
                self.toggle_pause();
            }
        }
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn camera(&self) -> &CameraInputController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraInputController {
        &mut self.camera
    }

    pub fn camera_pose(&self) -> &CameraPose {
        self.camera.pose()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyConfig;
    use std::time::Duration;
    use winit::{event::MouseButton, keyboard::KeyCode};

    #[derive(Default)]
    struct RecordingSink {
        transforms: Vec<(BodyId, BodyTransform)>,
        poses: Vec<CameraPose>,
        outlines: Vec<(BodyId, Vec<cgmath::Vector2<f32>>)>,
        frames: usize,
        // Set if a body arrives after the camera pose of the same frame
        out_of_order: bool,
    }

    impl FrameSink for RecordingSink {
        fn set_body_transform(&mut self, id: BodyId, transform: &BodyTransform) {
            if self.poses.len() > self.frames {
                self.out_of_order = true;
            }
            self.transforms.push((id, *transform));
        }

        fn set_orbit_outline(&mut self, id: BodyId, points: &[cgmath::Vector2<f32>]) {
            self.outlines.push((id, points.to_vec()));
        }

        fn set_camera_pose(&mut self, pose: &CameraPose) {
            self.poses.push(*pose);
        }

        fn end_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn two_body_config() -> SystemConfig {
        SystemConfig {
            bodies: vec![
                BodyConfig::new("a", 100.0, 99.0, 0xff0000, 5.0, 1.0, 0.0, 1.0),
                BodyConfig::new("b", 200.0, 190.0, 0x00ff00, 5.0, 0.5, 10.0, 1.0),
            ],
            ..SystemConfig::default()
        }
    }

    fn phase(driver: &FrameDriver, id: BodyId) -> f32 {
        driver.bodies().get(id).unwrap().body.phase()
    }

    #[test]
    fn test_emits_every_body_then_camera() {
        let mut driver = FrameDriver::new(&SystemConfig::default()).unwrap();
        let mut sink = RecordingSink::default();

        driver.step(0.016, &mut sink);
        driver.step(0.016, &mut sink);

        assert_eq!(sink.frames, 2);
        assert_eq!(sink.transforms.len(), 16);
        assert_eq!(sink.poses.len(), 2);
        assert!(!sink.out_of_order);
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn test_positions_follow_orbit() {
        let mut driver = FrameDriver::new(&two_body_config()).unwrap();
        let mut sink = RecordingSink::default();

        driver.step(0.25, &mut sink);

        let (id, a) = sink.transforms[0];
        assert_eq!(id, BodyId(0));
        assert!(a.position.x.abs() < 1e-3);
        assert!((a.position.y - 99.0).abs() < 1e-3);
        assert_eq!(a.position.z, 0.0);

        let (_, b) = sink.transforms[1];
        assert!((b.axial_tilt - 10f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_pause_preserves_speed_ratio() {
        let mut driver = FrameDriver::new(&two_body_config()).unwrap();
        let mut sink = RecordingSink::default();
        let (a, b) = (BodyId(0), BodyId(1));

        driver.toggle_pause();
        driver.step(1.0, &mut sink);
        assert_eq!(phase(&driver, a), 0.0);
        assert_eq!(phase(&driver, b), 0.0);

        driver.toggle_pause();
        driver.step(0.5, &mut sink);
        assert!((phase(&driver, a) - 0.5).abs() < 1e-6);
        assert!((phase(&driver, b) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_clock_clamps_stalled_frame() {
        let mut driver = FrameDriver::new(&two_body_config()).unwrap();
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        driver.tick_at(t0, &mut sink);
        driver.tick_at(t0 + Duration::from_secs(5), &mut sink);

        // Body "a" has speed 1, so phase == clamped delta
        assert!((phase(&driver, BodyId(0)) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_ui_events_are_routed() {
        let mut driver = FrameDriver::new(&SystemConfig::default()).unwrap();
        let earth = driver.speed_control("earth").unwrap();

        driver.handle_ui_event(UiEvent::SpeedChanged {
            control: earth,
            raw: "abc".to_string(),
        });
        assert_eq!(driver.bodies().get(earth.body()).unwrap().body.current_speed(), 0.0);

        driver.handle_ui_event(UiEvent::PauseToggleClicked);
        assert_eq!(driver.pause_state(), PauseState::Paused);

        driver.handle_ui_event(UiEvent::SpeedChanged {
            control: earth,
            raw: "2.5".to_string(),
        });
        driver.handle_ui_event(UiEvent::PauseToggleClicked);
        assert_eq!(driver.bodies().get(earth.body()).unwrap().body.current_speed(), 2.5);
    }

    #[test]
    fn test_held_keys_apply_once_per_frame() {
        let mut driver = FrameDriver::new(&SystemConfig::default()).unwrap();
        let mut sink = RecordingSink::default();
        let start = driver.camera_pose().position.x;

        driver.camera_mut().key_down(KeyCode::KeyD);
        driver.step(0.0, &mut sink);
        driver.step(0.0, &mut sink);

        assert_eq!(sink.poses[0].position.x, start + 10.0);
        assert_eq!(sink.poses[1].position.x, start + 20.0);
    }

    #[test]
    fn test_drag_shows_up_in_emitted_pose() {
        let mut driver = FrameDriver::new(&SystemConfig::default()).unwrap();
        let mut sink = RecordingSink::default();
        let before = *driver.camera_pose();

        let camera = driver.camera_mut();
        camera.pointer_down(MouseButton::Left, 100.0, 100.0);
        camera.pointer_move(150.0, 130.0);
        camera.pointer_up(MouseButton::Left);
        driver.step(0.0, &mut sink);

        let pose = sink.poses[0];
        assert!((pose.rotation_y - (before.rotation_y - 0.1)).abs() < 1e-5);
        assert!((pose.rotation_x - (before.rotation_x - 0.06)).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = two_body_config();
        config.bodies[1].semi_major = -1.0;
        assert!(FrameDriver::new(&config).is_err());
    }

    #[test]
    fn test_bad_speed_edits_leave_body_recoverable() {
        let mut driver = FrameDriver::new(&two_body_config()).unwrap();
        let mut sink = RecordingSink::default();
        let a = BodyId(0);

        driver.set_body_speed(a, f32::NAN);
        driver.step(0.016, &mut sink);
        driver.set_body_speed(a, 1.0);
        driver.step(0.016, &mut sink);
        assert!((phase(&driver, a) - 0.016).abs() < 1e-6);

        driver.set_body_speed_raw(a, "1e38");
        driver.step(0.05, &mut sink);
        driver.set_body_speed_raw(a, "1");
        driver.step(0.05, &mut sink);

        let spin = driver.bodies().get(a).unwrap().body.self_rotation();
        assert!((0.0..std::f32::consts::TAU).contains(&spin));
        assert!((0.0..1.0).contains(&phase(&driver, a)));
        for (_, transform) in &sink.transforms {
            assert!(transform.position.x.is_finite() && transform.position.y.is_finite());
        }
    }

    #[test]
    fn test_orbit_outlines_sent_once_per_body() {
        let mut driver = FrameDriver::new(&two_body_config()).unwrap();
        let mut sink = RecordingSink::default();

        driver.emit_orbit_outlines(&mut sink);
        driver.step(0.016, &mut sink);

        assert_eq!(sink.outlines.len(), 2);
        let (id, points) = &sink.outlines[1];
        assert_eq!(*id, BodyId(1));
        assert_eq!(points.len(), DEFAULT_OUTLINE_SEGMENTS + 1);
        assert_eq!(points.first(), points.last());
        assert!((points[0].x - 200.0).abs() < 1e-3);
    }
}
