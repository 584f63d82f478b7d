use std::{fmt, time::Duration};

use egui::{ClippedPrimitive, Context, TexturesDelta, ViewportId};
use egui_wgpu::{Renderer, ScreenDescriptor};
use egui_winit::State;
use winit::{event::WindowEvent, window::Window};

pub(crate) struct EguiState {
    context: Context,
    state: State,
    renderer: Renderer,
    primitives: Vec<ClippedPrimitive>,
    textures_delta: TexturesDelta,
    screen_descriptor: Option<ScreenDescriptor>,
}

impl EguiState {
    pub(crate) fn new(
        window: &Window,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
    ) -> Self {
        let context = Context::default();
        let state = State::new(
            context.clone(),
            ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        EguiState {
            context,
            state,
            renderer: Renderer::new(device, output_format, None, 1),
            primitives: Vec::new(),
            textures_delta: TexturesDelta::default(),
            screen_descriptor: None,
        }
    }

    /// Returns (consumed, repaint).
    pub(crate) fn window_event(&mut self, window: &Window, event: &WindowEvent) -> (bool, bool) {
        let response = self.state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }

    /// Runs the UI and returns how long egui is willing to wait before the
    /// next repaint.
    pub(crate) fn run(&mut self, window: &Window, run_ui: impl FnOnce(&Context)) -> Duration {
        let raw_input = self.state.take_egui_input(window);
        let egui_output = self.context.run(raw_input, run_ui);
        self.state
            .handle_platform_output(window, egui_output.platform_output);
        self.primitives = self
            .context
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);
        self.textures_delta = egui_output.textures_delta;

        egui_output
            .viewport_output
            .get(&ViewportId::ROOT)
            .map_or(Duration::MAX, |output| output.repaint_delay)
    }

    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_size: [u32; 2],
        scale_factor: f32,
    ) {
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: output_size,
            pixels_per_point: scale_factor,
        };

        for (id, image_delta) in &self.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &self.primitives, &screen_descriptor);

        self.screen_descriptor = Some(screen_descriptor);
    }

    pub(crate) fn render<'rp>(&'rp mut self, rp: &mut wgpu::RenderPass<'rp>) {
        if let Some(screen_descriptor) = self.screen_descriptor.as_ref() {
            self.renderer
                .render(rp, &self.primitives, screen_descriptor);
        }
    }

    /// Frees textures that egui no longer needs. Call after the frame has been
    /// submitted.
    pub(crate) fn end_frame(&mut self) {
        for id in self.textures_delta.free.drain(..) {
            self.renderer.free_texture(&id);
        }
    }
}

impl fmt::Debug for EguiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EguiState").finish_non_exhaustive()
    }
}
