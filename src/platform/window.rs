//! Native window for the interactive render mode
//!
//! The environment is driven step by step by the caller, so the winit event
//! loop is never handed control. Each presented frame pumps pending platform
//! events without blocking, draws, then sleeps out the rest of the frame.
//!
//! winit allows a single event loop per process, so the loop lives in a
//! thread-local slot and outlives every `Display`. Closing a display drops
//! only its window and GPU state; the next display reuses the loop.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::time::FrameClock;
use crate::error::EnvError;
use crate::renderer::{RenderState, Scene};

thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
}

/// Drain pending platform events into `handler` without blocking, creating
/// the event loop on first use
fn pump_events(handler: &mut WindowHandler) -> Result<(), EnvError> {
    EVENT_LOOP.with_borrow_mut(|slot| {
        if slot.is_none() {
            let event_loop = EventLoop::new()
                .map_err(|e| EnvError::Display(format!("failed to create event loop: {e}")))?;
            log::debug!("Created event loop");
            *slot = Some(event_loop);
        }
        let Some(event_loop) = slot.as_mut() else {
            return Err(EnvError::Display("event loop unavailable".into()));
        };
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), handler) {
            log::warn!("Event loop exited with code {code}");
        }
        Ok(())
    })
}

/// Receives winit callbacks while events are pumped
struct WindowHandler {
    field_size: u32,
    window: Option<Arc<Window>>,
    resized: Option<PhysicalSize<u32>>,
    create_error: Option<String>,
}

impl WindowHandler {
    fn new(field_size: u32) -> Self {
        Self {
            field_size,
            window: None,
            resized: None,
            create_error: None,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.create_error.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Catcher")
            .with_inner_size(PhysicalSize::new(self.field_size, self.field_size))
            .with_resizable(false);
        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Created {}x{} window", self.field_size, self.field_size);
                self.window = Some(Arc::new(window));
            }
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }

    fn owns(&self, id: WindowId) -> bool {
        self.window.as_ref().is_some_and(|w| w.id() == id)
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.ensure_window(event_loop);
    }

    // `resumed` fires once per event loop, so windows for later displays are
    // created here
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.ensure_window(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        // Events for windows of earlier displays may still be queued
        if !self.owns(id) {
            return;
        }
        match event {
            WindowEvent::Resized(size) => self.resized = Some(size),
            WindowEvent::CloseRequested => {
                log::info!("Window close requested; call close() on the environment to release it");
            }
            _ => {}
        }
    }
}

/// Window, GPU surface and frame clock, acquired on first present
pub struct Display {
    render_state: Option<RenderState>,
    handler: WindowHandler,
    clock: FrameClock,
    fps: u32,
}

impl Display {
    /// Platform resources are not touched until the first `present`
    pub fn new(field_size: u32, fps: u32) -> Self {
        Self {
            render_state: None,
            handler: WindowHandler::new(field_size),
            clock: FrameClock::new(),
            fps,
        }
    }

    /// True once a window exists for this display
    pub fn has_window(&self) -> bool {
        self.handler.window.is_some()
    }

    /// Create the GPU surface once the window exists
    fn init_surface(&mut self) -> Result<(), EnvError> {
        if let Some(e) = self.handler.create_error.take() {
            return Err(EnvError::Display(format!("failed to create window: {e}")));
        }
        let Some(window) = self.handler.window.clone() else {
            return Ok(());
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| EnvError::Display(format!("failed to create surface: {e}")))?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| EnvError::Display(format!("failed to get adapter: {e}")))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
            self.handler.field_size,
        ))?;
        self.render_state = Some(render_state);
        Ok(())
    }

    /// Draw one frame and wait out the rest of the frame budget
    pub fn present(&mut self, scene: &Scene) -> Result<(), EnvError> {
        pump_events(&mut self.handler)?;
        if self.render_state.is_none() {
            self.init_surface()?;
        }
        let Some(render_state) = self.render_state.as_mut() else {
            // Window not delivered yet; pace anyway so the driver keeps its rate
            self.clock.tick(self.fps);
            return Ok(());
        };

        if let Some(size) = self.handler.resized.take() {
            render_state.resize(size.width, size.height);
        }

        match render_state.render(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost; reconfiguring");
                render_state.resize(render_state.size.0, render_state.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(EnvError::Display("out of GPU memory".into()));
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.clock.tick(self.fps);
        Ok(())
    }
}
