use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use super::config::check_area;
use super::{App, EngineConfig, Extension, LayerDesc, LayerHook, TextEntry};
use crate::coords::{Vec2, Vec2i, Viewport};
use crate::decal::{Decal, DecalMode, DecalStructure, Renderable};
use crate::draw::Canvas;
use crate::font;
use crate::input::{scan_buttons, HwButton, InputHandoff, Key, MouseButton, KEY_SLOTS, MOUSE_BUTTONS};
use crate::loader::{ImageCrateLoader, ImageLoader, LoadError};
use crate::paint::{Pixel, PixelMode, BLACK};
use crate::platform::{EngineHooks, HeadlessPlatform, Platform, WindowConfig, WinitPlatform};
use crate::render::{Graphics, HeadlessRenderer, Renderer, WgpuRenderer};
use crate::sprite::Sprite;
use crate::time::{FpsCounter, FrameClock};

/// Releases the platform event loop when the engine thread ends, including by panic.
struct ThreadCleanup(Option<Arc<dyn Platform>>);

impl ThreadCleanup {
    fn finish(mut self) -> Result<()> {
        match self.0.take() {
            Some(platform) => platform.thread_cleanup(),
            None => Ok(()),
        }
    }
}

impl Drop for ThreadCleanup {
    fn drop(&mut self) {
        if let Some(platform) = self.0.take() {
            log::error!("engine thread unwinding");
            if let Err(e) = platform.thread_cleanup() {
                log::error!("platform thread cleanup failed: {e:#}");
            }
        }
    }
}

/// Window position requested from the platform.
const WINDOW_POS: Vec2i = Vec2i::new(30, 30);

/// The engine context: bound renderer, platform and loader plus all per-frame state.
///
/// Owned by the engine thread once [`Engine::start`] runs; the platform thread reaches it
/// only through [`EngineHooks`].
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) gfx: Graphics,
    platform: Arc<dyn Platform>,
    loader: Box<dyn ImageLoader>,
    input: Arc<InputHandoff>,
    pub(super) running: Arc<AtomicBool>,

    pub(crate) screen_size: Vec2i,
    pub(crate) inv_screen_size: Vec2,
    pub(crate) pixel_size: Vec2i,
    window_size: Vec2i,
    pub(crate) viewport: Viewport,

    pub(crate) layers: Vec<LayerDesc>,
    pub(crate) target_layer: usize,
    pub(crate) sprite_target: Option<Sprite>,
    pub(crate) pixel_mode: PixelMode,
    pub(crate) blend_factor: f32,
    pub(crate) decal_mode: DecalMode,
    pub(crate) decal_structure: DecalStructure,
    pub(crate) font: Renderable,
    suspend_texture_transfer: bool,

    text_entry: TextEntry,
    extensions: Vec<Box<dyn Extension>>,
    clock: FrameClock,
    last_elapsed: f32,
    fps: FpsCounter,

    keyboard: [HwButton; KEY_SLOTS],
    key_old: [bool; KEY_SLOTS],
    mouse: [HwButton; MOUSE_BUTTONS],
    mouse_old: [bool; MOUSE_BUTTONS],
    mouse_pos: Vec2i,
    mouse_window_pos: Vec2i,
    wheel: i32,
    mouse_focus: bool,
    key_focus: bool,
}

impl Engine {
    /// Validates `config` and binds the renderer, platform and loader for the engine's life.
    pub fn construct(
        config: EngineConfig,
        renderer: Box<dyn Renderer>,
        platform: Arc<dyn Platform>,
        loader: Box<dyn ImageLoader>,
    ) -> Result<Self> {
        config.validate().context("invalid engine configuration")?;

        let screen_size = config.screen_size;
        let pixel_size = config.pixel_size;
        let window_size = screen_size * pixel_size;
        let (viewport, _) = Viewport::fit(window_size, screen_size, pixel_size, config.cohesion);

        log::info!(
            "constructed '{}': screen {}x{}, pixel {}x{}",
            config.app_name,
            screen_size.x,
            screen_size.y,
            pixel_size.x,
            pixel_size.y
        );

        Ok(Self {
            gfx: Graphics::new(renderer),
            platform,
            loader,
            input: Arc::new(InputHandoff::new()),
            running: Arc::new(AtomicBool::new(false)),
            screen_size,
            inv_screen_size: inverse(screen_size),
            pixel_size,
            window_size,
            viewport,
            layers: Vec::new(),
            target_layer: 0,
            sprite_target: None,
            pixel_mode: PixelMode::Normal,
            blend_factor: 1.0,
            decal_mode: DecalMode::Normal,
            decal_structure: DecalStructure::Fan,
            font: Renderable::new(),
            suspend_texture_transfer: false,
            text_entry: TextEntry::new(),
            extensions: Vec::new(),
            clock: FrameClock::new(),
            last_elapsed: 0.0,
            fps: FpsCounter::new(),
            keyboard: [HwButton::default(); KEY_SLOTS],
            key_old: [false; KEY_SLOTS],
            mouse: [HwButton::default(); MOUSE_BUTTONS],
            mouse_old: [false; MOUSE_BUTTONS],
            mouse_pos: Vec2i::zero(),
            mouse_window_pos: Vec2i::zero(),
            wheel: 0,
            mouse_focus: false,
            key_focus: false,
            config,
        })
    }

    /// Desktop build: winit window, wgpu renderer, `image` crate decoding.
    pub fn windowed(config: EngineConfig) -> Result<Self> {
        let platform = WinitPlatform::with_config(WindowConfig {
            title: config.app_name.clone(),
            full_screen: config.full_screen,
            ..WindowConfig::default()
        });
        Self::construct(
            config,
            Box::new(WgpuRenderer::default()),
            Arc::new(platform),
            Box::new(ImageCrateLoader),
        )
    }

    /// No window and no GPU. Frames are recorded by a [`HeadlessRenderer`].
    pub fn headless(config: EngineConfig) -> Result<Self> {
        Self::construct(
            config,
            Box::new(HeadlessRenderer::new()),
            Arc::new(HeadlessPlatform::new()),
            Box::new(ImageCrateLoader),
        )
    }

    /// Hooks the platform uses to feed this engine.
    pub fn hooks(&self) -> EngineHooks {
        EngineHooks::new(Arc::clone(&self.input), Arc::clone(&self.running))
    }

    // ── lifecycle ──

    /// Opens the window, runs `app` on a dedicated engine thread and pumps system events on
    /// the calling thread until the engine thread finishes.
    pub fn start<A: App + 'static>(mut self, app: A) -> Result<()> {
        let platform = Arc::clone(&self.platform);
        platform
            .application_startup()
            .context("platform startup failed")?;

        let hooks = self.hooks();
        let requested = self.screen_size * self.pixel_size;
        let window = platform
            .create_window_pane(&hooks, WINDOW_POS, requested, self.config.full_screen)
            .context("failed to create window pane")?;
        self.update_window_size(window);
        platform.set_window_title(&self.config.app_name)?;

        self.running.store(true, Ordering::SeqCst);
        let engine_thread = std::thread::Builder::new()
            .name("alo-engine".to_string())
            .spawn(move || self.engine_thread(app))
            .context("failed to spawn engine thread")?;

        let pumped = platform.start_system_event_loop(hooks.clone());
        if pumped.is_err() {
            hooks.terminate();
        }

        let finished = engine_thread
            .join()
            .map_err(|_| anyhow::anyhow!("engine thread panicked"))?;
        platform
            .application_cleanup()
            .context("platform cleanup failed")?;

        pumped?;
        finished
    }

    fn engine_thread<A: App>(mut self, mut app: A) -> Result<()> {
        let cleanup = ThreadCleanup(Some(Arc::clone(&self.platform)));
        let result = self.run(&mut app);
        if let Err(e) = &result {
            log::error!("engine thread failed: {e:#}");
        }
        self.shutdown();
        result.and(cleanup.finish())
    }

    pub(super) fn run(&mut self, app: &mut dyn App) -> Result<()> {
        self.platform
            .thread_startup()
            .context("platform thread startup failed")?;
        self.prepare()?;
        self.create(app);

        while self.is_running() {
            while self.is_running() {
                self.core_update(app);
            }
            if !app.on_user_destroy(self) {
                log::info!("shutdown vetoed by application");
                self.running.store(true, Ordering::SeqCst);
            }
        }
        Ok(())
    }

    /// Creates the graphics device, the font and layer 0, and resets the clock.
    pub fn prepare(&mut self) -> Result<()> {
        self.platform
            .create_graphics(
                self.gfx.renderer(),
                self.config.full_screen,
                self.config.vsync,
                self.viewport.pos,
                self.viewport.size,
            )
            .context("failed to create graphics")?;
        log::info!("graphics device created");

        self.font = Renderable::from_sprite(&mut self.gfx, font::font_sheet(), false, true);

        self.layers.clear();
        self.create_layer();
        if let Some(base) = self.layers.first_mut() {
            base.update = true;
            base.show = true;
        }
        self.set_draw_target(None);
        self.clock.reset();
        Ok(())
    }

    fn create(&mut self, app: &mut dyn App) {
        self.with_extensions(|engine, ext| ext.on_before_user_create(engine));
        if !app.on_user_create(self) {
            self.running.store(false, Ordering::SeqCst);
        }
        self.with_extensions(|engine, ext| ext.on_after_user_create(engine));
    }

    fn shutdown(&mut self) {
        self.layers.clear();
        self.sprite_target = None;
        self.font = Renderable::new();
        self.gfx.collect_released();
        if let Err(e) = self.gfx.renderer().destroy_device() {
            log::error!("failed to destroy graphics device: {e:#}");
        }
        log::info!("engine shut down");
    }

    /// Runs one frame: timing, input, application update, compositing and present.
    pub fn core_update(&mut self, app: &mut dyn App) {
        let dt = self.clock.tick().dt;
        self.run_frame(app, dt);
    }

    /// One frame with an explicit elapsed time.
    pub fn run_frame(&mut self, app: &mut dyn App, elapsed: f32) {
        let mut elapsed = elapsed;
        self.last_elapsed = elapsed;
        if let Err(e) = self.platform.handle_system_event() {
            log::warn!("system event handling failed: {e:#}");
        }
        self.scan_input();

        if let Some(text) = self.text_entry.update(&self.keyboard) {
            app.on_text_entry_complete(self, &text);
        }

        let mut blocked = false;
        self.with_extensions(|engine, ext| blocked |= ext.on_before_user_update(engine, &mut elapsed));
        if !blocked && !app.on_user_update(self, elapsed) {
            self.running.store(false, Ordering::SeqCst);
        }
        self.with_extensions(|engine, ext| ext.on_after_user_update(engine, elapsed));

        self.composite_frame();

        if let Some(fps) = self.fps.frame(elapsed) {
            let title = format!("{} - FPS: {fps}", self.config.app_name);
            if let Err(e) = self.platform.set_window_title(&title) {
                log::warn!("failed to set window title: {e:#}");
            }
        }
    }

    /// Runs `f` for every extension in registration order.
    fn with_extensions(&mut self, mut f: impl FnMut(&mut Engine, &mut dyn Extension)) {
        let mut exts = std::mem::take(&mut self.extensions);
        for ext in exts.iter_mut() {
            f(self, ext.as_mut());
        }
        // Extensions registered from inside a callback go after the existing ones.
        exts.append(&mut self.extensions);
        self.extensions = exts;
    }

    fn scan_input(&mut self) {
        let raw = self.input.latch();
        if let Some(size) = raw.window_size {
            self.update_window_size(size);
        }
        scan_buttons(&mut self.keyboard, &mut self.key_old, &raw.keys);
        scan_buttons(&mut self.mouse, &mut self.mouse_old, &raw.mouse);

        self.mouse_window_pos = raw.mouse_window_pos;
        self.mouse_pos =
            self.viewport
                .window_to_screen(raw.mouse_window_pos, self.window_size, self.screen_size);
        self.wheel = raw.wheel;
        self.mouse_focus = raw.mouse_focus;
        self.key_focus = raw.key_focus;
    }

    /// Draws every visible layer back to front, then presents.
    ///
    /// Layer 0 is always shown and re-uploaded. Each layer's decal batch is consumed in
    /// submission order and is empty afterwards, whether or not the layer was shown.
    pub fn composite_frame(&mut self) {
        let r = self.gfx.renderer();
        r.update_viewport(self.viewport.pos, self.viewport.size);
        r.clear_buffer(BLACK, true);

        if let Some(base) = self.layers.first_mut() {
            base.update = true;
            base.show = true;
        }
        self.decal_mode = DecalMode::Normal;
        r.prepare_drawing();

        for layer in self.layers.iter_mut().rev() {
            if layer.show {
                match layer.hook.as_mut() {
                    Some(hook) => hook(&mut *r, &layer.decals),
                    None => {
                        if let Some(id) = layer.draw_target.decal().and_then(Decal::id) {
                            r.apply_texture(id);
                            if !self.suspend_texture_transfer && layer.update {
                                r.update_texture(id, layer.draw_target.sprite());
                                layer.update = false;
                            }
                        }
                        r.draw_layer_quad(layer.offset, layer.scale, layer.tint);
                        for decal in &layer.decals {
                            r.draw_decal(decal);
                        }
                    }
                }
            }
            layer.decals.clear();
        }

        r.display_frame();
        self.gfx.collect_released();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn register_extension(&mut self, ext: Box<dyn Extension>) {
        self.extensions.push(ext);
    }

    // ── layers ──

    /// Adds a screen-sized layer on top of the stack and returns its index. New layers start
    /// hidden.
    pub fn create_layer(&mut self) -> usize {
        let mut target = Renderable::new();
        target.create(&mut self.gfx, self.screen_size.x, self.screen_size.y, false, true);
        self.layers.push(LayerDesc::new(target));
        let index = self.layers.len() - 1;
        log::info!("created layer {index}");
        index
    }

    pub fn layers(&self) -> &[LayerDesc] {
        &self.layers
    }

    pub fn enable_layer(&mut self, layer: usize, show: bool) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.show = show;
        }
    }

    pub fn set_layer_offset(&mut self, layer: usize, offset: Vec2) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.offset = offset;
        }
    }

    pub fn set_layer_scale(&mut self, layer: usize, scale: Vec2) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.scale = scale;
        }
    }

    pub fn set_layer_tint(&mut self, layer: usize, tint: Pixel) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.tint = tint;
        }
    }

    /// Replaces the default compositing of `layer`. `None` restores it.
    pub fn set_layer_custom_render_function(&mut self, layer: usize, hook: Option<LayerHook>) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.hook = hook;
        }
    }

    // ── draw targets ──

    /// Targets `layer` for both pixel and decal drawing. `dirty` marks its canvas for upload.
    /// Returns the off-screen sprite that was targeted before, if any.
    pub fn set_draw_target_layer(&mut self, layer: usize, dirty: bool) -> Option<Sprite> {
        let l = self.layers.get_mut(layer)?;
        l.update = dirty;
        self.target_layer = layer;
        self.sprite_target.take()
    }

    /// Sends pixel drawing to `sprite`. Decals keep going to the current layer. Returns the
    /// previous off-screen target.
    pub fn set_draw_target_sprite(&mut self, sprite: Sprite) -> Option<Sprite> {
        self.sprite_target.replace(sprite)
    }

    /// `Some` behaves as [`Engine::set_draw_target_sprite`]; `None` returns to layer 0.
    pub fn set_draw_target(&mut self, target: Option<Sprite>) -> Option<Sprite> {
        match target {
            Some(s) => self.set_draw_target_sprite(s),
            None => {
                self.target_layer = 0;
                self.sprite_target.take()
            }
        }
    }

    /// The sprite pixel drawing currently lands in.
    pub fn draw_target(&self) -> Option<&Sprite> {
        match self.sprite_target.as_ref() {
            Some(s) => Some(s),
            None => self.layers.get(self.target_layer).map(LayerDesc::sprite),
        }
    }

    pub fn draw_target_width(&self) -> i32 {
        self.draw_target().map_or(0, Sprite::width)
    }

    pub fn draw_target_height(&self) -> i32 {
        self.draw_target().map_or(0, Sprite::height)
    }

    pub fn target_layer(&self) -> usize {
        self.target_layer
    }

    /// Pixel canvas over the current draw target, or `None` before layer 0 exists.
    pub fn canvas(&mut self) -> Option<Canvas<'_>> {
        let target = match self.sprite_target.as_mut() {
            Some(s) => s,
            None => self.layers.get_mut(self.target_layer)?.draw_target.sprite_mut(),
        };
        Some(Canvas::new(target, &self.pixel_mode, self.blend_factor))
    }

    // ── pixel & decal state ──

    pub fn set_pixel_mode(&mut self, mode: PixelMode) {
        self.pixel_mode = mode;
    }

    pub fn pixel_mode(&self) -> &PixelMode {
        &self.pixel_mode
    }

    /// Alpha-mode blend factor, clamped to `[0, 1]`.
    pub fn set_pixel_blend(&mut self, blend: f32) {
        self.blend_factor = blend.clamp(0.0, 1.0);
    }

    pub fn set_decal_mode(&mut self, mode: DecalMode) {
        self.decal_mode = mode;
    }

    pub fn set_decal_structure(&mut self, structure: DecalStructure) {
        self.decal_structure = structure;
    }

    /// With transfer disabled, dirty layers are not re-uploaded during compositing.
    pub fn enable_pixel_transfer(&mut self, enable: bool) {
        self.suspend_texture_transfer = !enable;
    }

    // ── screen & viewport ──

    pub fn screen_width(&self) -> i32 {
        self.screen_size.x
    }

    pub fn screen_height(&self) -> i32 {
        self.screen_size.y
    }

    pub fn screen_size(&self) -> Vec2i {
        self.screen_size
    }

    pub fn inv_screen_size(&self) -> Vec2 {
        self.inv_screen_size
    }

    pub fn pixel_size(&self) -> Vec2i {
        self.pixel_size
    }

    pub fn window_size(&self) -> Vec2i {
        self.window_size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Changes the logical resolution. Every layer canvas is recreated blank and marked
    /// dirty, and drawing returns to layer 0.
    pub fn set_screen_size(&mut self, w: i32, h: i32) -> Result<()> {
        anyhow::ensure!(w > 0 && h > 0, "screen size must be positive, got {w}x{h}");
        check_area(Vec2i::new(w, h))?;
        self.screen_size = Vec2i::new(w, h);
        self.inv_screen_size = inverse(self.screen_size);

        for layer in self.layers.iter_mut() {
            layer.draw_target.create(&mut self.gfx, w, h, false, true);
            layer.update = true;
        }
        if self.set_draw_target(None).is_some() {
            log::debug!("off-screen draw target released by screen resize");
        }
        self.update_viewport();

        let r = self.gfx.renderer();
        r.clear_buffer(BLACK, true);
        r.display_frame();
        r.clear_buffer(BLACK, true);
        r.update_viewport(self.viewport.pos, self.viewport.size);
        log::info!("screen resized to {w}x{h}");
        Ok(())
    }

    pub fn update_window_size(&mut self, size: Vec2i) {
        self.window_size = size;
        self.update_viewport();
    }

    /// Re-derives the view rectangle from the window, screen and pixel sizes.
    pub fn update_viewport(&mut self) {
        let (viewport, pixel) =
            Viewport::fit(self.window_size, self.screen_size, self.pixel_size, self.config.cohesion);
        self.viewport = viewport;
        if let Some(p) = pixel.filter(|p| p.x > 0 && p.y > 0) {
            self.pixel_size = p;
        }
    }

    // ── input ──

    pub fn get_key(&self, key: Key) -> HwButton {
        self.keyboard[key.index()]
    }

    pub fn get_mouse(&self, button: MouseButton) -> HwButton {
        self.mouse[button.index()]
    }

    /// Cursor position in screen pixels.
    pub fn mouse_pos(&self) -> Vec2i {
        self.mouse_pos
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_pos.x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_pos.y
    }

    pub fn mouse_window_pos(&self) -> Vec2i {
        self.mouse_window_pos
    }

    /// Wheel movement during the last frame.
    pub fn mouse_wheel(&self) -> i32 {
        self.wheel
    }

    pub fn is_focused(&self) -> bool {
        self.key_focus
    }

    pub fn has_mouse_focus(&self) -> bool {
        self.mouse_focus
    }

    // ── text entry ──

    pub fn text_entry_enable(&mut self, on: bool, text: &str) {
        self.text_entry.enable(on, text);
    }

    pub fn is_text_entry_enabled(&self) -> bool {
        self.text_entry.is_enabled()
    }

    pub fn text_entry_get_string(&self) -> String {
        self.text_entry.text()
    }

    pub fn text_entry_get_cursor(&self) -> usize {
        self.text_entry.cursor()
    }

    // ── resources ──

    pub fn gfx(&mut self) -> &mut Graphics {
        &mut self.gfx
    }

    /// Seconds the current frame covers, before any extension adjusts it.
    pub fn elapsed_time(&self) -> f32 {
        self.last_elapsed
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    /// Uploads `sprite` as a new decal.
    pub fn create_decal(&mut self, sprite: &Sprite, filter: bool, clamp: bool) -> Decal {
        Decal::new(&mut self.gfx, sprite, filter, clamp)
    }

    pub fn create_renderable(&mut self, w: i32, h: i32, filter: bool, clamp: bool) -> Renderable {
        let mut r = Renderable::new();
        r.create(&mut self.gfx, w, h, filter, clamp);
        r
    }

    /// Loads an image through the bound loader into a new renderable.
    pub fn load_renderable(&mut self, path: &Path, filter: bool, clamp: bool) -> Result<Renderable, LoadError> {
        let mut r = Renderable::new();
        r.load(&mut self.gfx, self.loader.as_ref(), path, filter, clamp)?;
        Ok(r)
    }

    /// Decodes an image into `sprite` through the bound loader.
    pub fn load_sprite(&self, sprite: &mut Sprite, path: &Path) -> Result<(), LoadError> {
        self.loader.load_image_resource(sprite, path)
    }

    pub fn font_sprite(&self) -> &Sprite {
        self.font.sprite()
    }
}

fn inverse(size: Vec2i) -> Vec2 {
    Vec2::new(1.0 / size.x as f32, 1.0 / size.y as f32)
}
