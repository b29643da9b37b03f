//! Player application implementing winit ApplicationHandler
//!
//! Turns left clicks into shells, ticks the simulation at a fixed rate,
//! and presents the canvas every redraw.

use crate::{log_events, run_fixed_steps};
use anyhow::{Context, Result};
use firework_core::Color;
use firework_particles::FireworkSystem;
use firework_render::{Canvas, FireworkRenderer, PresentPipeline, RenderContext, Surface};
use firework_runtime::{GameClock, InputState, RuntimeSystem};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Initial window settings
#[derive(Debug, Clone, Copy)]
pub struct WindowOptions {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

pub struct PlayerApp {
    // Systems
    pub clock: GameClock,
    pub input: InputState,
    pub fireworks: FireworkSystem,

    // Rendering
    renderer: FireworkRenderer,
    canvas: Canvas,
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    present: Option<PresentPipeline>,

    pub options: WindowOptions,
}

impl PlayerApp {
    pub fn new(fireworks: FireworkSystem, options: WindowOptions) -> Self {
        let renderer = FireworkRenderer::from_config(fireworks.sim.config());
        Self {
            clock: GameClock::new(),
            input: InputState::new(),
            fireworks,
            renderer,
            canvas: Canvas::new(options.width, options.height, Color::BLACK),
            window: None,
            render_context: None,
            present: None,
            options,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Fireworks")
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.options.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to create render context")?;
        let size = render_context.size;
        tracing::info!(
            target: "render",
            width = size.width,
            height = size.height,
            format = ?render_context.format(),
            "Render context ready"
        );

        self.canvas.resize(size.width, size.height);
        self.present = Some(PresentPipeline::new(
            &render_context.device,
            render_context.format(),
            size.width,
            size.height,
        ));
        self.render_context = Some(render_context);

        self.fireworks
            .initialize()
            .context("Failed to initialize particle system")?;
        Ok(())
    }

    fn render(&mut self) {
        let Some(context) = &mut self.render_context else {
            return;
        };
        let Some(present) = &mut self.present else {
            return;
        };

        present.upload(&context.device, &context.queue, &self.canvas);

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return;
            }
            Err(e) => {
                tracing::warn!(target: "render", error = %e, "Surface error");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });
        present.draw(&mut encoder, &view);
        context.queue.submit(std::iter::once(encoder.finish()));

        output.present();
    }

    fn tick(&mut self) {
        self.clock.tick();

        for request in self.input.drain_launches() {
            self.fireworks.sim.launch(request.position);
        }

        // Simulate and draw at the fixed rate; presenting happens every redraw
        if let Err(e) = run_fixed_steps(
            &mut self.clock,
            &mut self.fireworks,
            &self.renderer,
            &mut self.canvas,
        ) {
            tracing::error!(
                target: "particles",
                system = self.fireworks.name(),
                error = %e,
                "Simulation step failed"
            );
        }

        log_events(self.fireworks.sim.drain_events());
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                tracing::error!(target: "player", error = ?e, "Startup failed");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    if context.resize(new_size) {
                        self.canvas.resize(new_size.width, new_size.height);
                        if let Some(present) = &mut self.present {
                            present.resize(&context.device, new_size.width, new_size.height);
                        }
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::F11) => self.toggle_fullscreen(),
                    _ => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_mouse_move(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.input.process_mouse_button_down(button),
                ElementState::Released => self.input.process_mouse_button_up(button),
            },

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Err(e) = self.fireworks.shutdown() {
            tracing::warn!(target: "player", error = %e, "Shutdown failed");
        }
    }
}
