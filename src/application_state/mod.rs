//! # Application State Management
//!
//! The winit shell around the engine:
//! - Window creation on `resumed`
//! - Input collection and pointer lock
//! - The frame clock, which paces redraws to the configured frame rate
//!
//! Left click captures the pointer, Escape releases it. Physics and mouse look
//! only run while the pointer is captured; the frame clock keeps ticking either
//! way so releasing and re-capturing never produces a huge time step.

pub mod frame_clock;
pub mod input_manager;
pub mod input_state;
pub mod pointer_lock;

use std::sync::Arc;

use frame_clock::FrameClock;
use input_manager::InputManager;
use pointer_lock::PointerLock;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{config::SandboxConfig, engine_state::EngineState, engine_state::rendering::HeadlessSurface};

const WINDOW_TITLE: &str = "Voxel Sandbox";

/// Top-level application state handed to the winit event loop.
pub struct ApplicationState {
    /// Settings used to build the engine once a window exists
    pub config: SandboxConfig,
    /// The running state, created on the first `resumed`
    pub state: Option<InitializedApplicationState>,
}

/// Everything that exists once the window is up.
pub struct InitializedApplicationState {
    pub engine_state: EngineState<HeadlessSurface>,
    pub window: Arc<Window>,
    pub input_manager: InputManager,
    /// Present while the cursor is captured
    pub pointer_lock: Option<PointerLock>,
    /// Paces frames and measures the time between them
    pub frame_clock: FrameClock,
}

impl ApplicationState {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config, state: None }
    }
}

impl InitializedApplicationState {
    fn engage_pointer_lock(&mut self) {
        if self.pointer_lock.is_some() {
            return;
        }
        match PointerLock::engage(self.window.clone()) {
            Ok(lock) => {
                self.pointer_lock = Some(lock);
                self.engine_state.set_captured(true);
            }
            Err(e) => log::warn!("could not capture the pointer: {}", e),
        }
    }

    fn release_pointer_lock(&mut self) {
        // Dropping the guard ungrabs and shows the cursor.
        self.pointer_lock = None;
        self.input_manager.release_all();
        self.engine_state.set_captured(false);
    }
}

impl ApplicationHandler for ApplicationState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes().with_title(WINDOW_TITLE);
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.state = Some(InitializedApplicationState {
            engine_state: EngineState::new(&self.config, HeadlessSurface::new()),
            window,
            input_manager: InputManager::new(),
            pointer_lock: None,
            frame_clock: FrameClock::new(self.config.display.frame_rate, web_time::Instant::now()),
        });
        log::info!("window created, click to capture the pointer");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            if let WindowEvent::CloseRequested = event {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(false) => state.release_pointer_lock(),
            WindowEvent::RedrawRequested => state.engine_state.render(),
            // The click that captures the pointer is not passed on as a game click.
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if state.pointer_lock.is_none() => state.engage_pointer_lock(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => state.release_pointer_lock(),
            _ => state.input_manager.intake_input(&event),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                if state.pointer_lock.is_some() {
                    state.input_manager.intake_mouse_motion(delta);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            if let Some(wait_dt) = state.frame_clock.tick(web_time::Instant::now()) {
                let processed_input = state.input_manager.get_and_reset_processed_input();
                state.engine_state.set_input_commands(processed_input);
                state.engine_state.process_input(wait_dt);

                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.frame_clock.next_frame()));
        }
    }
}
