use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use super::{EngineHooks, Platform};
use crate::coords::Vec2i;
use crate::input::{Key, MouseButton};
use crate::render::{DeviceTarget, Renderer, WindowSurface};

/// Wheel units reported per line of scrolling.
const WHEEL_STEP: f32 = 120.0;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub position: Vec2i,
    pub size: Vec2i,
    pub full_screen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "alo-engine".to_string(),
            position: Vec2i::new(30, 30),
            size: Vec2i::new(1280, 720),
            full_screen: false,
        }
    }
}

#[derive(Debug)]
enum PlatformEvent {
    Exit,
}

#[derive(Default)]
struct Shared {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<PlatformEvent>>,
    /// The event loop could not produce a window.
    failed: bool,
    exit_requested: bool,
}

/// Desktop platform backed by winit.
///
/// The event loop runs on the thread that calls [`Platform::start_system_event_loop`]; the
/// window is created once the loop resumes and handed to the engine thread from there.
#[derive(Default)]
pub struct WinitPlatform {
    shared: Mutex<Shared>,
    window_ready: Condvar,
}

impl WinitPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WindowConfig) -> Self {
        Self {
            shared: Mutex::new(Shared {
                config,
                ..Shared::default()
            }),
            window_ready: Condvar::new(),
        }
    }

    fn shared(&self) -> Result<MutexGuard<'_, Shared>> {
        self.shared
            .lock()
            .map_err(|_| anyhow::anyhow!("winit platform state poisoned"))
    }

    /// Blocks until the event loop has created the window.
    fn wait_for_window(&self) -> Result<Arc<Window>> {
        let mut s = self.shared()?;
        loop {
            if let Some(w) = s.window.as_ref() {
                return Ok(Arc::clone(w));
            }
            anyhow::ensure!(!s.failed, "window creation failed");
            anyhow::ensure!(!s.exit_requested, "platform shut down before the window opened");
            s = self
                .window_ready
                .wait(s)
                .map_err(|_| anyhow::anyhow!("winit platform state poisoned"))?;
        }
    }

    fn mark_failed(&self) {
        if let Ok(mut s) = self.shared.lock() {
            s.failed = true;
        }
        self.window_ready.notify_all();
    }
}

impl Platform for WinitPlatform {
    fn thread_cleanup(&self) -> Result<()> {
        let mut s = self.shared()?;
        s.exit_requested = true;
        if let Some(proxy) = s.proxy.as_ref() {
            // A closed loop has already exited.
            let _ = proxy.send_event(PlatformEvent::Exit);
        }
        self.window_ready.notify_all();
        Ok(())
    }

    fn create_graphics(
        &self,
        renderer: &mut dyn Renderer,
        full_screen: bool,
        vsync: bool,
        view_pos: Vec2i,
        view_size: Vec2i,
    ) -> Result<()> {
        let window = self.wait_for_window()?;
        let (w, h) = window.surface_size();
        let surface: Arc<dyn WindowSurface> = window;
        let target = DeviceTarget {
            surface: Some(surface),
            size: Vec2i::new(w as i32, h as i32),
        };
        renderer
            .create_device(target, full_screen, vsync)
            .context("failed to create graphics device")?;
        renderer.update_viewport(view_pos, view_size);
        Ok(())
    }

    fn create_window_pane(
        &self,
        hooks: &EngineHooks,
        pos: Vec2i,
        size: Vec2i,
        full_screen: bool,
    ) -> Result<Vec2i> {
        let mut s = self.shared()?;
        s.config.position = pos;
        s.config.size = size;
        s.config.full_screen = full_screen;
        hooks.update_window_size(size.x, size.y);
        Ok(size)
    }

    fn set_window_title(&self, title: &str) -> Result<()> {
        let mut s = self.shared()?;
        s.config.title = title.to_string();
        if let Some(w) = s.window.as_ref() {
            w.set_title(title);
        }
        Ok(())
    }

    fn start_system_event_loop(&self, hooks: EngineHooks) -> Result<()> {
        let event_loop = match EventLoop::<PlatformEvent>::with_user_event().build() {
            Ok(el) => el,
            Err(e) => {
                self.mark_failed();
                return Err(e).context("failed to create winit EventLoop");
            }
        };
        self.shared()?.proxy = Some(event_loop.create_proxy());

        let mut handler = Handler {
            platform: self,
            hooks,
        };
        let result = event_loop.run_app(&mut handler);

        // Anyone still waiting for a window will not get one.
        self.mark_failed();
        if let Ok(mut s) = self.shared.lock() {
            s.window = None;
            s.proxy = None;
        }
        result.context("winit event loop terminated with error")
    }
}

struct Handler<'p> {
    platform: &'p WinitPlatform,
    hooks: EngineHooks,
}

impl Handler<'_> {
    fn exit_requested(&self) -> bool {
        self.platform
            .shared
            .lock()
            .map(|s| s.exit_requested)
            .unwrap_or(true)
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = self.platform.shared()?.config.clone();

        let mut attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(PhysicalSize::new(config.size.x.max(1) as u32, config.size.y.max(1) as u32))
            .with_position(PhysicalPosition::new(config.position.x, config.position.y));
        if config.full_screen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let size = window.inner_size();
        log::info!("window created: {}x{}", size.width, size.height);

        self.platform.shared()?.window = Some(Arc::new(window));
        self.platform.window_ready.notify_all();
        self.hooks
            .update_window_size(size.width as i32, size.height as i32);
        Ok(())
    }
}

impl ApplicationHandler<PlatformEvent> for Handler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested() {
            event_loop.exit();
            return;
        }
        let has_window = self
            .platform
            .shared
            .lock()
            .map(|s| s.window.is_some())
            .unwrap_or(false);
        if has_window {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            self.platform.mark_failed();
            self.hooks.terminate();
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: PlatformEvent) {
        match event {
            PlatformEvent::Exit => event_loop.exit(),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested() {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let hooks = &self.hooks;
        match event {
            // The engine thread finishes its frame, runs the destroy callback and then ends
            // the loop through `thread_cleanup`.
            WindowEvent::CloseRequested => hooks.terminate(),

            WindowEvent::Resized(size) => {
                hooks.update_window_size(size.width as i32, size.height as i32)
            }

            WindowEvent::CursorMoved { position, .. } => {
                hooks.update_mouse(position.x as i32, position.y as i32)
            }
            WindowEvent::CursorEntered { .. } => hooks.update_mouse_focus(true),
            WindowEvent::CursorLeft { .. } => hooks.update_mouse_focus(false),
            WindowEvent::Focused(f) => hooks.update_key_focus(f),

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(b) = map_mouse_button(button) {
                    hooks.update_mouse_state(b, state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let d = match delta {
                    MouseScrollDelta::LineDelta(_, y) => (y * WHEEL_STEP) as i32,
                    MouseScrollDelta::PixelDelta(p) => p.y as i32,
                };
                if d != 0 {
                    hooks.update_mouse_wheel(d);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = map_key(event.physical_key) {
                    hooks.update_key_state(key, event.state == ElementState::Pressed);
                }
            }

            _ => {}
        }
    }
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

fn map_key(pk: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = pk else { return None };
    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::Backspace => Key::Backspace,
        KeyCode::Escape => Key::Escape,
        KeyCode::NumpadEnter => Key::Return,
        KeyCode::Enter => Key::Enter,
        KeyCode::Pause => Key::Pause,
        KeyCode::ScrollLock => Key::ScrollLock,

        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,

        KeyCode::Period => Key::Period,
        KeyCode::Equal => Key::Equals,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,

        KeyCode::Semicolon => Key::Oem1,
        KeyCode::Slash => Key::Oem2,
        KeyCode::Quote => Key::Oem3,
        KeyCode::BracketLeft => Key::Oem4,
        KeyCode::IntlBackslash => Key::Oem5,
        KeyCode::BracketRight => Key::Oem6,
        KeyCode::Backslash => Key::Oem7,
        KeyCode::Backquote => Key::Oem8,

        KeyCode::CapsLock => Key::CapsLock,

        _ => return None,
    };
    Some(key)
}
