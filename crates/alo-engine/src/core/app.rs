use super::Engine;

/// Application contract driven by the engine thread.
pub trait App: Send {
    /// Called once after the device and layer 0 exist. Returning `false` stops the engine.
    fn on_user_create(&mut self, engine: &mut Engine) -> bool {
        let _ = engine;
        true
    }

    /// Called once per frame with the elapsed seconds. Returning `false` stops the engine.
    fn on_user_update(&mut self, engine: &mut Engine, elapsed: f32) -> bool;

    /// Called when the engine is stopping. Returning `false` keeps it running.
    fn on_user_destroy(&mut self, engine: &mut Engine) -> bool {
        let _ = engine;
        true
    }

    /// Called when text entry finishes with Enter.
    fn on_text_entry_complete(&mut self, engine: &mut Engine, text: &str) {
        let _ = (engine, text);
    }
}

/// Hooks around the application callbacks. Registered extensions run in registration order.
pub trait Extension: Send {
    fn on_before_user_create(&mut self, engine: &mut Engine) {
        let _ = engine;
    }

    fn on_after_user_create(&mut self, engine: &mut Engine) {
        let _ = engine;
    }

    /// May adjust the elapsed time. Returning `true` skips the application update this frame.
    fn on_before_user_update(&mut self, engine: &mut Engine, elapsed: &mut f32) -> bool {
        let _ = (engine, elapsed);
        false
    }

    fn on_after_user_update(&mut self, engine: &mut Engine, elapsed: f32) {
        let _ = (engine, elapsed);
    }
}
