//! Opens a window, wires its input into a viewport and logs what the camera
//! does. Nothing is drawn; watch the log (`RUST_LOG=debug`).
//!
//! Keys: `F` fit the world, `C` recenter, `S` snap to the origin, `Esc` quit.

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use vista_engine::coords::Vec2;
use vista_engine::input::InputState;
use vista_engine::input::platform::winit::translate_window_event;
use vista_engine::logging::{LoggingConfig, init_logging};
use vista_engine::time::FrameClock;
use vista_viewport::prelude::*;

const WORLD: (f32, f32) = (4000.0, 3000.0);
const INITIAL_SIZE: (f64, f64) = (1024.0, 768.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut studio = Studio::default();
    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;
    Ok(())
}

#[derive(Default)]
struct Studio {
    session: Option<Session>,
}

/// Everything tied to the open window.
struct Session {
    window: Window,
    input: InputState,
    clock: FrameClock,
    viewport: Viewport,
    last_logged: (Vec2, Vec2),
}

impl Session {
    fn open(event_loop: &ActiveEventLoop) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Vista Studio")
            .with_inner_size(LogicalSize::new(INITIAL_SIZE.0, INITIAL_SIZE.1));
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        let size = window.inner_size().to_logical::<f32>(window.scale_factor());
        let config = ViewportConfig::new(size.width, size.height).world(WORLD.0, WORLD.1);
        let mut viewport = Viewport::new(config);
        viewport
            .drag(DragOptions::default())
            .pinch(PinchOptions::default())
            .wheel(WheelOptions::default())
            .decelerate(DecelerateOptions::default())
            .bounce(BounceOptions::default())
            .set_zoom_limits(ZoomLimits {
                min_width: Some(200.0),
                max_width: Some(WORLD.0 * 2.0),
                ..Default::default()
            });
        viewport.fit_world(true);

        log::info!(
            "studio: {}x{} screen over a {}x{} world",
            size.width,
            size.height,
            WORLD.0,
            WORLD.1
        );

        Ok(Self {
            window,
            input: InputState::default(),
            clock: FrameClock::new(),
            last_logged: (viewport.position(), viewport.scale()),
            viewport,
        })
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Escape => return false,
            KeyCode::KeyF => {
                self.viewport.fit_world(true);
            }
            KeyCode::KeyC => {
                self.viewport.move_center(WORLD.0 / 2.0, WORLD.1 / 2.0);
            }
            KeyCode::KeyS => {
                self.viewport.snap(0.0, 0.0, SnapOptions { remove_on_complete: true, ..Default::default() });
            }
            _ => {}
        }
        true
    }

    fn frame(&mut self) {
        let ft = self.clock.tick();
        self.viewport.tick(ft.elapsed_ms);

        for event in self.viewport.drain_events() {
            match event {
                ViewportEvent::Moved { .. } | ViewportEvent::Zoomed { .. } => {}
                other => log::info!("studio: {other:?}"),
            }
        }

        let now = (self.viewport.position(), self.viewport.scale());
        if now != self.last_logged {
            log::debug!(
                "studio: frame {} position {:?} scale {:?} center {:?}",
                ft.frame_index,
                now.0,
                now.1,
                self.viewport.center()
            );
            self.last_logged = now;
        }
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match Session::open(event_loop) {
            Ok(session) => {
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window.id() != window_id {
            return;
        }

        let scale_factor = session.window.scale_factor();
        if let Some(input) = translate_window_event(scale_factor, &mut session.input, &event) {
            session.viewport.dispatch(input);
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.session = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f32>(scale_factor);
                session.viewport.resize(logical.width, logical.height, None, None);
            }

            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state == ElementState::Pressed && !key.repeat {
                    if let PhysicalKey::Code(code) = key.physical_key {
                        if !session.handle_key(code) {
                            self.session = None;
                            event_loop.exit();
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => session.frame(),

            _ => {}
        }
    }
}
