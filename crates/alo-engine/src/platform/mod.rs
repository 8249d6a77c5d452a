//! OS integration.
//!
//! A [`Platform`] owns the window and the system event pump. It runs on the thread that
//! started the engine and reports events through [`EngineHooks`]; the engine thread only calls
//! back into it to create graphics, retitle the window and signal shutdown.

mod headless;
mod hooks;
mod desktop;

use anyhow::Result;

use crate::coords::Vec2i;
use crate::render::Renderer;

pub use desktop::{WindowConfig, WinitPlatform};
pub use headless::HeadlessPlatform;
pub use hooks::EngineHooks;

pub trait Platform: Send + Sync {
    fn application_startup(&self) -> Result<()> {
        Ok(())
    }

    fn application_cleanup(&self) -> Result<()> {
        Ok(())
    }

    /// Runs on the engine thread before anything else.
    fn thread_startup(&self) -> Result<()> {
        Ok(())
    }

    /// Runs on the engine thread as it exits. Must let the system event loop return.
    fn thread_cleanup(&self) -> Result<()>;

    /// Creates the renderer's device for this platform's window and sets the initial viewport.
    fn create_graphics(
        &self,
        renderer: &mut dyn Renderer,
        full_screen: bool,
        vsync: bool,
        view_pos: Vec2i,
        view_size: Vec2i,
    ) -> Result<()>;

    /// Describes the window to open. Returns the window size that will be used.
    fn create_window_pane(
        &self,
        hooks: &EngineHooks,
        pos: Vec2i,
        size: Vec2i,
        full_screen: bool,
    ) -> Result<Vec2i>;

    fn set_window_title(&self, title: &str) -> Result<()>;

    /// Pumps system events until the engine thread has finished.
    fn start_system_event_loop(&self, hooks: EngineHooks) -> Result<()>;

    /// Per-frame poll for platforms without a dedicated event thread.
    fn handle_system_event(&self) -> Result<()> {
        Ok(())
    }
}
