//! Sets up the main application window and event loop.

use std::{sync::Arc, time::Instant};

use winit::{
    dpi::LogicalSize,
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{WindowBuilder, WindowLevel},
};

use crate::{container::Container, WindowConfig, WindowEnv, WindowError};

/// Opens a window and runs the application until it is closed.
///
/// The event loop sleeps until either an input event arrives or the time
/// requested through [WindowEnv::request_redraw_at] is reached, so the draw
/// callback never has to block to pace itself.
pub(crate) fn open_window_and_run(
    config: &WindowConfig,
    draw: impl FnMut(&dyn WindowEnv) + 'static,
) -> Result<(), WindowError> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });

    let event_loop = EventLoop::new()?;

    let [width, height] = config.inner_size();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title())
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(config.resizable())
            .with_visible(false)
            .build(&event_loop)?,
    );

    if config.always_on_top() {
        window.set_window_level(WindowLevel::AlwaysOnTop);
    }

    let surface = instance.create_surface(Arc::clone(&window))?;
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .ok_or(WindowError::NoCompatibleAdapter)?;
    let adapter_info = adapter.get_info();
    tracing::info!(
        "GPU: {}, {:?}, {:?}",
        adapter_info.name,
        adapter_info.device_type,
        adapter_info.backend
    );

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
        },
        None,
    ))?;
    device.on_uncaptured_error(Box::new(|error| {
        tracing::error!("wgpu error: {}", error);
    }));

    let surface_capabilities = surface.get_capabilities(&adapter);
    // egui expects to write to a non-sRGB target.
    let output_format = surface_capabilities
        .formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| surface_capabilities.formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);

    let present_mode = if surface_capabilities
        .present_modes
        .contains(&wgpu::PresentMode::Mailbox)
    {
        wgpu::PresentMode::Mailbox
    } else {
        wgpu::PresentMode::AutoVsync
    };

    let mut surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: output_format,
        width: window.inner_size().width,
        height: window.inner_size().height,
        present_mode,
        desired_maximum_frame_latency: 2,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: Vec::new(),
    };
    if surface_config.width > 0 && surface_config.height > 0 {
        surface.configure(&device, &surface_config);
    }

    let mut container = Container::new(config, draw, &window, &device, output_format);

    window.set_visible(true);
    window.request_redraw();

    event_loop.run(move |event, elwt| {
        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                window.request_redraw();
            }
            Event::WindowEvent { event, .. } => {
                if !matches!(event, WindowEvent::RedrawRequested) {
                    container.window_event(&window, &event);
                }
                match event {
                    WindowEvent::Resized(size) => {
                        surface_config.width = size.width;
                        surface_config.height = size.height;
                        if surface_config.width > 0 && surface_config.height > 0 {
                            surface.configure(&device, &surface_config);
                        }
                    }
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        container.update(&window);
                        if container.close_requested() {
                            elwt.exit();
                            return;
                        }

                        if surface_config.width == 0 || surface_config.height == 0 {
                            return;
                        }
                        let surface_texture = match surface.get_current_texture() {
                            Ok(surface_texture) => surface_texture,
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                surface.configure(&device, &surface_config);
                                container.request_redraw_now();
                                return;
                            }
                            Err(error) => {
                                tracing::warn!("Skipping frame: {}", error);
                                container.request_redraw_now();
                                return;
                            }
                        };
                        let output_view = surface_texture
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());

                        container.render(
                            &device,
                            &queue,
                            &output_view,
                            [surface_config.width, surface_config.height],
                            window.scale_factor() as f32,
                        );

                        window.pre_present_notify();
                        surface_texture.present();
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => match container.redraw_at() {
                Some(at) if at <= Instant::now() => {
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                }
                Some(at) => elwt.set_control_flow(ControlFlow::WaitUntil(at)),
                None => elwt.set_control_flow(ControlFlow::Wait),
            },
            Event::LoopExiting => {
                // The adapter and instance must outlive the surface.
                let _ = (&instance, &adapter);
                tracing::info!("Closing window");
            }
            _ => {}
        }
    })?;

    Ok(())
}
