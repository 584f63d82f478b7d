use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

use winit::{event::WindowEvent, window::Window};

use crate::{egui_state::EguiState, fps_counter::FpsCounter, Input, WindowConfig, WindowEnv};

#[derive(Debug)]
struct WindowEnvImpl<'a> {
    config: &'a WindowConfig,
    fps: f32,
    mspf: f32,
    input: &'a Input,
    egui_ctx: egui::Context,
    redraw_at: Mutex<Option<Instant>>,
    close_requested: AtomicBool,
}

static_assertions::assert_impl_all!(WindowEnvImpl<'_>: Send, Sync);

impl WindowEnv for WindowEnvImpl<'_> {
    fn config(&self) -> &WindowConfig {
        self.config
    }

    fn fps(&self) -> f32 {
        self.fps
    }

    fn mspf(&self) -> f32 {
        self.mspf
    }

    fn input(&self) -> &Input {
        self.input
    }

    fn egui_ctx(&self) -> &egui::Context {
        &self.egui_ctx
    }

    fn request_redraw_at(&self, at: Instant) {
        let mut redraw_at = self.redraw_at.lock().unwrap_or_else(|e| e.into_inner());
        *redraw_at = Some(redraw_at.map_or(at, |prev| prev.min(at)));
    }

    fn request_close(&self) {
        self.close_requested.store(true, Ordering::Relaxed);
    }
}

/// Owns the per-window state and runs the draw callback.
pub(crate) struct Container<D> {
    config: WindowConfig,
    draw: D,
    egui_state: EguiState,
    input: Input,
    fps_counter: FpsCounter,
    redraw_at: Option<Instant>,
    close_requested: bool,
}

impl<D: FnMut(&dyn WindowEnv)> Container<D> {
    pub(crate) fn new(
        config: &WindowConfig,
        draw: D,
        window: &Window,
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            config: config.clone(),
            draw,
            egui_state: EguiState::new(window, device, output_format),
            input: Input::new(),
            fps_counter: FpsCounter::new(Instant::now()),
            // Draw once as soon as the window is shown.
            redraw_at: Some(Instant::now()),
            close_requested: false,
        }
    }

    pub(crate) fn window_event(&mut self, window: &Window, event: &WindowEvent) {
        let (consumed, repaint) = self.egui_state.window_event(window, event);
        self.input.handle_event(event, consumed);
        if repaint || !consumed {
            self.request_redraw_at(Instant::now());
        }
    }

    /// The time at which the next frame should be drawn, if any.
    pub(crate) fn redraw_at(&self) -> Option<Instant> {
        self.redraw_at
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub(crate) fn request_redraw_now(&mut self) {
        self.request_redraw_at(Instant::now());
    }

    fn request_redraw_at(&mut self, at: Instant) {
        self.redraw_at = Some(self.redraw_at.map_or(at, |prev| prev.min(at)));
    }

    pub(crate) fn update(&mut self, window: &Window) {
        self.redraw_at = None;

        let mut requested_redraw = None;
        let mut close_requested = false;
        let repaint_delay = self.egui_state.run(window, |ctx| {
            let env = WindowEnvImpl {
                config: &self.config,
                fps: self.fps_counter.fps(),
                mspf: self.fps_counter.mspf(),
                input: &self.input,
                egui_ctx: ctx.clone(),
                redraw_at: Mutex::new(None),
                close_requested: AtomicBool::new(false),
            };

            (self.draw)(&env);

            requested_redraw = env.redraw_at.into_inner().unwrap_or_else(|e| e.into_inner());
            close_requested = env.close_requested.into_inner();
        });

        self.input.end_frame();
        if let Some(at) = requested_redraw {
            self.request_redraw_at(at);
        }
        if repaint_delay < Duration::from_secs(3600) {
            self.request_redraw_at(Instant::now() + repaint_delay);
        }
        if close_requested {
            tracing::info!("Window close requested by application");
            self.close_requested = true;
        }
    }

    pub(crate) fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output_view: &wgpu::TextureView,
        output_size: [u32; 2],
        scale_factor: f32,
    ) {
        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        self.egui_state
            .prepare(device, queue, &mut encoder, output_size, scale_factor);

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_state.render(&mut rp);
        }

        queue.submit([encoder.finish()]);
        self.egui_state.end_frame();
        self.fps_counter.end_frame(Instant::now());
    }
}

impl<D> fmt::Debug for Container<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("config", &self.config)
            .field("redraw_at", &self.redraw_at)
            .finish_non_exhaustive()
    }
}
