use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::SystemConfig,
    error::Result,
    simulation::{FrameDriver, FrameSink, PauseState},
    ui::UiEvent,
};

pub struct OrreryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    driver: FrameDriver,
    sink: Box<dyn FrameSink>,
}

impl OrreryApp {
    /// Builds the simulation from `config`; `sink` receives every frame's output.
    pub fn new(config: &SystemConfig, sink: Box<dyn FrameSink>) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let driver = FrameDriver::new(config)?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                driver,
                sink,
            },
        })
    }

    /// Access to the driver for wiring UI controls before the loop starts.
    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.app_state.driver
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

fn window_title(state: PauseState) -> String {
    format!("Orrery ({}) [Space: {}]", state, state.button_label())
}

impl AppState {
    fn refresh_title(&self) {
        if let Some(window) = self.window.as_ref() {
            window.set_title(&window_title(self.driver.pause_state()));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(
            WindowAttributes::default()
                .with_title(window_title(self.driver.pause_state()))
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => {
                log::info!("Window created");
                self.window = Some(Arc::new(window));
                self.driver.emit_orbit_outlines(self.sink.as_mut());
            }
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                // Stand-in for the on-screen pause/play button. Config rejects
                // camera bindings on this key, see RESERVED_KEYS.
                self.driver.handle_ui_event(UiEvent::PauseToggleClicked);
                self.refresh_title();
            }
            WindowEvent::RedrawRequested => {
                self.driver.tick(self.sink.as_mut());
            }
            other => {
                self.driver.camera_mut().process_window_event(&other);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
