use std::sync::{Condvar, Mutex};

use anyhow::Result;

use super::{EngineHooks, Platform};
use crate::coords::Vec2i;
use crate::render::{DeviceTarget, Renderer};

#[derive(Debug, Default)]
struct State {
    finished: bool,
    title: String,
}

/// Platform without a window. Its event loop just waits for the engine thread to finish.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    state: Mutex<State>,
    finished: Condvar,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last title the engine set.
    pub fn title(&self) -> String {
        self.state.lock().map(|s| s.title.clone()).unwrap_or_default()
    }
}

impl Platform for HeadlessPlatform {
    fn thread_cleanup(&self) -> Result<()> {
        let mut s = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("headless platform state poisoned"))?;
        s.finished = true;
        self.finished.notify_all();
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
        let target = DeviceTarget {
            surface: None,
            size: view_size,
        };
        renderer.create_device(target, full_screen, vsync)?;
        renderer.update_viewport(view_pos, view_size);
        Ok(())
    }

    fn create_window_pane(
        &self,
        hooks: &EngineHooks,
        _pos: Vec2i,
        size: Vec2i,
        _full_screen: bool,
    ) -> Result<Vec2i> {
        hooks.update_window_size(size.x, size.y);
        Ok(size)
    }

    fn set_window_title(&self, title: &str) -> Result<()> {
        if let Ok(mut s) = self.state.lock() {
            s.title = title.to_string();
        }
        Ok(())
    }

    fn start_system_event_loop(&self, _hooks: EngineHooks) -> Result<()> {
        let mut s = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("headless platform state poisoned"))?;
        while !s.finished {
            s = self
                .finished
                .wait(s)
                .map_err(|_| anyhow::anyhow!("headless platform state poisoned"))?;
        }
        Ok(())
    }
}
