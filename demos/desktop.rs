use std::sync::Arc;
use std::time::Instant;

use blink_eyes::{Canvas, CanvasPresenter, EyeConfig, EyeEngine, RenderSurface};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

struct App {
    config: EyeConfig,
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    presenter: CanvasPresenter,
    canvas: Canvas,
    engine: EyeEngine,
    last_frame: Instant,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let (width, height) = (self.config.display.width, self.config.display.height);
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Eyes")
                        .with_inner_size(winit::dpi::LogicalSize::new(width * 3, height * 3)),
                )
                .unwrap(),
        );

        let mut engine = EyeEngine::from_config(&self.config).unwrap();
        let mut canvas = Canvas::new(width, height).unwrap();
        engine.prepare(&mut canvas).unwrap();
        // render the first frame so there is something to show immediately
        engine.tick(&mut canvas).unwrap();

        let state = pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let surface = instance.create_surface(window.clone()).unwrap();

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .unwrap();

            let (device, queue) = adapter
                .request_device(
                    &wgpu::DeviceDescriptor {
                        label: Some("eyes_device"),
                        ..Default::default()
                    },
                    None,
                )
                .await
                .unwrap();

            let size = window.inner_size();
            let caps = surface.get_capabilities(&adapter);
            let format = caps.formats[0];

            let surface_config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: size.width.max(1),
                height: size.height.max(1),
                present_mode: wgpu::PresentMode::AutoVsync,
                alpha_mode: caps.alpha_modes[0],
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            };
            surface.configure(&device, &surface_config);

            let presenter = CanvasPresenter::new(&device, format, canvas.size());

            AppState {
                window,
                device,
                queue,
                surface,
                surface_config,
                presenter,
                canvas,
                engine,
                last_frame: Instant::now(),
            }
        });

        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.surface_config.width = new_size.width.max(1);
                state.surface_config.height = new_size.height.max(1);
                state
                    .surface
                    .configure(&state.device, &state.surface_config);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if state.last_frame.elapsed() >= state.engine.frame_delay() {
                    // A failed frame is skipped; the same frame is retried next time.
                    if let Err(e) = state.engine.tick(&mut state.canvas) {
                        log::warn!("eye frame failed: {e}");
                    }
                    state.last_frame = Instant::now();
                }

                let output = match state.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state
                            .surface
                            .configure(&state.device, &state.surface_config);
                        state.window.request_redraw();
                        return;
                    }
                    Err(e) => {
                        log::error!("surface error: {e:?}");
                        return;
                    }
                };

                state.presenter.upload(&state.queue, &state.canvas);

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder =
                    state
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("eyes_encoder"),
                        });
                state.presenter.render(
                    &mut encoder,
                    &view,
                    &state.queue,
                    (state.surface_config.width, state.surface_config.height),
                );
                state.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn load_config() -> EyeConfig {
    let Some(path) = std::env::args().nth(1) else {
        return EyeConfig::default();
    };
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read config {path}: {e}"));
    EyeConfig::load(&json).unwrap_or_else(|e| panic!("bad config {path}: {e}"))
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();
    let mut app = App {
        config: load_config(),
        state: None,
    };
    event_loop.run_app(&mut app).unwrap();
}
