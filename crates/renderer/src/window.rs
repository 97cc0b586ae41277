use std::sync::Arc;

use viewstate::{Effect, ImageCatalog, ImageSlot, ViewController};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowBuilder};

use crate::compile::load_sources;
use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::keys::{scroll_amount, translate_button, translate_key, translate_state};
use crate::types::RendererConfig;

/// Everything the event loop closure owns: the window, its GPU resources and
/// the interaction controller.
pub(crate) struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    controller: ViewController,
    catalog: ImageCatalog,
}

/// What the loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl WindowState {
    pub(crate) fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self, ViewerError> {
        let sources = load_sources(
            config.vertex_shader.as_deref(),
            config.fragment_shader.as_deref(),
        )?;
        let gpu = GpuState::new(
            window.as_ref(),
            window.inner_size(),
            config.color_space,
            config.gpu_power,
            &sources,
        )?;
        let adapter = gpu.adapter();
        tracing::debug!(
            adapter = %adapter.name,
            backend = ?adapter.backend,
            device_type = ?adapter.device_type,
            "renderer ready"
        );

        let mut state = Self {
            window,
            gpu,
            controller: ViewController::new(config.controller, config.initial_image),
            catalog: config.catalog.clone(),
        };

        let initial = state.catalog.path(config.initial_image);
        if let Err(err) = state.gpu.load_image(&initial) {
            tracing::warn!(error = %err, "initial image unavailable; showing placeholder");
        }
        state.push_parameters();
        Ok(state)
    }

    pub(crate) fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.window.request_redraw();
    }

    fn handle_key(&mut self, event: &KeyEvent) -> Flow {
        if event.repeat {
            return Flow::Continue;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return Flow::Continue;
        };
        let Some(key) = translate_key(code) else {
            return Flow::Continue;
        };
        match event.state {
            ElementState::Pressed => {
                let effect = self.controller.on_key_press(key);
                self.apply(effect)
            }
            ElementState::Released => {
                self.controller.on_key_release(key);
                Flow::Continue
            }
        }
    }

    fn handle_scroll(&mut self, amount: f32) -> Flow {
        let effect = self.controller.scroll(amount);
        self.apply(effect)
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f64>(self.window.scale_factor());
        self.controller.on_cursor_move(logical.x, logical.y);
    }

    /// Carries out a controller effect, then uploads whatever changed.
    fn apply(&mut self, effect: Option<Effect>) -> Flow {
        match effect {
            Some(Effect::Close) => return Flow::Exit,
            Some(Effect::LoadImage { slot, previous }) => self.load_image(slot, previous),
            Some(Effect::RebuildGeometry) => self.gpu.rebuild_geometry(),
            None => {}
        }
        Flow::Continue
    }

    fn load_image(&mut self, slot: ImageSlot, previous: ImageSlot) {
        let path = self.catalog.path(slot);
        match self.gpu.load_image(&path) {
            Ok(()) => self.window.request_redraw(),
            Err(err) => {
                tracing::error!(image = %slot, error = %err, "failed to load image; keeping current one");
                self.controller.restore_image(previous);
            }
        }
    }

    /// Drains the controller's dirty slots into the uniform buffer and
    /// schedules a redraw when anything changed.
    fn push_parameters(&mut self) {
        if !self.controller.is_dirty() {
            return;
        }
        let dirty = self.controller.take_dirty();
        let params = self.controller.current_parameters();
        self.gpu.push_parameters(&params, dirty);
        self.window.request_redraw();
    }

    fn render_frame(&mut self) -> Flow {
        match self.gpu.render() {
            Ok(()) => Flow::Continue,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.size());
                Flow::Continue
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory; exiting");
                Flow::Exit
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timeout; retrying next frame");
                Flow::Continue
            }
            Err(other) => {
                tracing::warn!(error = ?other, "surface error; retrying next frame");
                Flow::Continue
            }
        }
    }
}

/// Opens the viewer window and runs the event loop until the user closes it.
pub(crate) fn run(config: &RendererConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()
        .map_err(|err| ViewerError::platform(format!("failed to create event loop: {err}")))?;
    let (width, height) = config.window_size;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(width, height))
        .build(&event_loop)
        .map_err(|err| ViewerError::platform(format!("failed to create window: {err}")))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window, config)?;
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            let Event::WindowEvent { window_id, event } = event else {
                return;
            };
            if window_id != state.window().id() {
                return;
            }

            let flow = match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => Flow::Exit,
                WindowEvent::KeyboardInput { event, .. } => state.handle_key(&event),
                WindowEvent::MouseWheel { delta, .. } => state.handle_scroll(scroll_amount(delta)),
                WindowEvent::CursorMoved { position, .. } => {
                    state.handle_cursor_moved(position);
                    Flow::Continue
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button,
                    ..
                } => {
                    state
                        .controller
                        .on_mouse_button(translate_button(button), translate_state(button_state));
                    Flow::Continue
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                    Flow::Continue
                }
                WindowEvent::RedrawRequested => state.render_frame(),
                _ => Flow::Continue,
            };

            if flow == Flow::Exit {
                tracing::debug!("closing viewer window");
                elwt.exit();
                return;
            }
            state.push_parameters();
        })
        .map_err(|err| ViewerError::platform(format!("event loop error: {err}")))
}
