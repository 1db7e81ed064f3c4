//! Simulation builder and window glue.
//!
//! [`Simulation`] is the whole public surface: configure declaratively,
//! call [`run`], and the decoration takes care of itself until the window
//! closes. No events come back out.
//!
//! ```ignore
//! use driftdeck::prelude::*;
//!
//! Simulation::new()
//!     .with_texture("sunset", TextureConfig::gradient(64, [240, 120, 60, 255], [90, 30, 90, 255]))
//!     .with_textures(["assets/decks/classic.png", "assets/decks/street.png"])
//!     .with_surface_size(1280.0, 720.0)
//!     .run()
//!     .unwrap();
//! ```
//!
//! [`run`]: Simulation::run

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::SimulationError;
use crate::lifecycle::{reduced_motion_preferred, WorldLifecycleManager};
use crate::textures::{TextureConfig, TextureRegistry};
use crate::viewport::ViewportClassifier;
use crate::visibility::VisibilityGate;

const DEFAULT_SURFACE: (f32, f32) = (1280.0, 720.0);

/// Declarative configuration for one decoration instance.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Simulation {
    texture_ids: Vec<String>,
    registry: TextureRegistry,
    surface_size: (f32, f32),
    reduced_motion: Option<bool>,
    title: String,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            texture_ids: Vec::new(),
            registry: TextureRegistry::new(),
            surface_size: DEFAULT_SURFACE,
            reduced_motion: None,
            title: "driftdeck".to_string(),
        }
    }

    /// Append texture identifiers, in display order.
    ///
    /// Ids the registry does not know are treated as image paths at
    /// activation time; unresolvable ids get the placeholder face.
    pub fn with_textures<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texture_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Register pixel data for an id and append it to the board list.
    pub fn with_texture(mut self, id: impl Into<String>, config: TextureConfig) -> Self {
        let id = id.into();
        self.registry.add(id.clone(), config);
        self.texture_ids.push(id);
        self
    }

    /// Logical size of the host surface.
    pub fn with_surface_size(mut self, width: f32, height: f32) -> Self {
        self.surface_size = (width, height);
        self
    }

    /// Force the reduced-motion preference instead of reading the
    /// environment.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = Some(reduced);
        self
    }

    /// Window title for the demo binary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Run the decoration. Blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: Simulation,
    window: Option<Arc<Window>>,
    classifier: ViewportClassifier,
    gate: VisibilityGate,
    lifecycle: WorldLifecycleManager,
    scale_factor: f64,
    fatal: Option<SimulationError>,
}

impl App {
    fn new(config: Simulation) -> Self {
        let (width, height) = config.surface_size;
        Self {
            classifier: ViewportClassifier::new(width),
            gate: VisibilityGate::new(),
            lifecycle: WorldLifecycleManager::new(width, height),
            config,
            window: None,
            scale_factor: 1.0,
            fatal: None,
        }
    }

    /// The reduced-motion preference, resolved fresh for this attempt.
    fn reduced_motion(&self) -> bool {
        self.config
            .reduced_motion
            .unwrap_or_else(reduced_motion_preferred)
    }

    /// Reconcile the lifecycle with the gate: start when visible, stop
    /// when not. Construction failures log and leave the manager Idle; the
    /// next visibility change may try again.
    fn reconcile(&mut self) {
        if self.gate.is_active() {
            if !self.lifecycle.is_running() {
                let reduced_motion = self.reduced_motion();
                let result = self.lifecycle.activate(
                    self.window.as_ref(),
                    &self.config.texture_ids,
                    self.classifier.class(),
                    &self.config.registry,
                    reduced_motion,
                );
                if let Err(e) = result {
                    log::error!("activation failed, decoration stays off: {}", e);
                }
            }
        } else {
            self.lifecycle.deactivate();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.surface_size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width as f64, height as f64))
            .with_transparent(true);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.scale_factor = window.scale_factor();
                self.window = Some(window);
                self.reconcile();
            }
            Err(e) => {
                self.fatal = Some(SimulationError::Window(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                // Unmount: tear down synchronously, then drop the gate's
                // registration so nothing can reactivate.
                self.lifecycle.deactivate();
                self.gate.detach();
                event_loop.exit();
            }
            WindowEvent::Resized(physical) => {
                let logical = physical.to_logical::<f32>(self.scale_factor);
                let class_changed = self.classifier.reclassify(logical.width);
                self.lifecycle
                    .handle_resize(logical.width, logical.height, Some(physical));
                if class_changed {
                    self.lifecycle
                        .sync_textures(&self.config.texture_ids, self.classifier.class());
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
            }
            WindowEvent::Occluded(occluded) => {
                // The closest a window gets to an intersection signal:
                // fully covered counts as off-screen, anything else as
                // fully visible.
                self.gate.observe_ratio(if occluded { 0.0 } else { 1.0 });
                self.reconcile();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.lifecycle
                    .cursor_moved(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.lifecycle.mouse_pressed(),
                        ElementState::Released => self.lifecycle.mouse_released(),
                    }
                }
            }
            // Wheel input is deliberately untouched: scrolling belongs to
            // the host, never to the drag constraint.
            WindowEvent::MouseWheel { .. } => {}
            WindowEvent::RedrawRequested => {
                self.lifecycle.tick();
                self.lifecycle.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
