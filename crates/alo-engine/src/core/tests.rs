use std::sync::{Arc, Mutex};

use super::*;
use crate::coords::{Vec2, Vec2i};
use crate::decal::DecalInstance;
use crate::input::{Key, MouseButton};
use crate::loader::ImageCrateLoader;
use crate::paint::{BLUE, GREEN, RED};
use crate::platform::HeadlessPlatform;
use crate::render::{CallLog, HeadlessRenderer, RenderCall};

fn engine_with_log(w: i32, h: i32) -> (Engine, CallLog, Arc<HeadlessPlatform>) {
    let renderer = HeadlessRenderer::new();
    let log = renderer.log();
    let platform = Arc::new(HeadlessPlatform::new());
    let mut e = Engine::construct(
        EngineConfig::new("test", w, h, 1, 1),
        Box::new(renderer),
        platform.clone(),
        Box::new(ImageCrateLoader),
    )
    .expect("construct");
    e.prepare().expect("prepare");
    (e, log, platform)
}

fn drawn(log: &CallLog) -> Vec<DecalInstance> {
    log.lock()
        .expect("log")
        .iter()
        .filter_map(|c| match c {
            RenderCall::DrawDecal(d) => Some(d.clone()),
            _ => None,
        })
        .collect()
}

fn clear_log(log: &CallLog) {
    log.lock().expect("log").clear();
}

/// Runs a fixed number of frames, optionally drawing in each.
struct Frames {
    left: u32,
    seen: Arc<Mutex<Vec<f32>>>,
}

impl App for Frames {
    fn on_user_update(&mut self, _engine: &mut Engine, elapsed: f32) -> bool {
        if let Ok(mut s) = self.seen.lock() {
            s.push(elapsed);
        }
        self.left = self.left.saturating_sub(1);
        self.left > 0
    }
}

struct Idle;

impl App for Idle {
    fn on_user_update(&mut self, _engine: &mut Engine, _elapsed: f32) -> bool {
        true
    }
}

// ── construction ──

#[test]
fn zero_sized_screen_is_rejected() {
    let cfg = EngineConfig::new("bad", 0, 10, 1, 1);
    assert!(Engine::headless(cfg).is_err());
    let cfg = EngineConfig::new("bad", 10, 10, 1, -1);
    assert!(Engine::headless(cfg).is_err());
}

#[test]
fn oversized_screen_is_rejected() {
    assert!(Engine::headless(EngineConfig::new("big", 50_000, 50_000, 1, 1)).is_err());
    assert!(Engine::headless(EngineConfig::new("big", 40_000, 40_000, 2, 2)).is_err());
    assert!(Engine::headless(EngineConfig::new("big", 10, 10, i32::MAX, 1)).is_err());
    assert!(Engine::headless(EngineConfig::new("ok", 1920, 1080, 1, 1)).is_ok());
}

#[test]
fn prepare_creates_visible_base_layer() {
    let (e, log, _) = engine_with_log(100, 100);
    assert_eq!(e.layers().len(), 1);
    assert!(e.layers()[0].is_visible());
    assert_eq!(e.layers()[0].sprite().size(), Vec2i::new(100, 100));
    assert!(matches!(log.lock().expect("log")[0], RenderCall::CreateDevice { .. }));
}

// ── compositing ──

#[test]
fn fill_rect_decal_end_to_end() {
    let (mut e, log, _) = engine_with_log(100, 100);
    e.fill_rect_decal(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0), RED);

    let pending = e.layers()[0].decals().to_vec();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].points(), 4);
    assert_eq!(pending[0].decal, None);
    assert!(pending[0].tint.iter().all(|&t| t == RED));

    clear_log(&log);
    e.composite_frame();
    assert_eq!(drawn(&log), pending);
    assert!(e.layers()[0].decals().is_empty());
}

#[test]
fn batch_is_consumed_in_call_order() {
    let (mut e, log, _) = engine_with_log(64, 64);
    for (i, col) in [RED, GREEN, BLUE].into_iter().enumerate() {
        e.fill_rect_decal(Vec2::splat(i as f32), Vec2::splat(4.0), col);
    }
    clear_log(&log);
    e.composite_frame();

    let tints: Vec<_> = drawn(&log).iter().map(|d| d.tint[0]).collect();
    assert_eq!(tints, [RED, GREEN, BLUE]);
}

#[test]
fn frame_call_sequence() {
    let (mut e, log, _) = engine_with_log(32, 32);
    clear_log(&log);
    e.composite_frame();

    let calls = log.lock().expect("log").clone();
    assert!(matches!(calls[0], RenderCall::UpdateViewport { .. }));
    assert!(matches!(calls[1], RenderCall::ClearBuffer { depth: true, .. }));
    assert!(matches!(calls[2], RenderCall::PrepareDrawing));
    assert!(matches!(calls[3], RenderCall::ApplyTexture(_)));
    assert!(matches!(calls[4], RenderCall::UpdateTexture(_)));
    assert!(matches!(calls[5], RenderCall::DrawLayerQuad { .. }));
    assert!(matches!(calls.last(), Some(RenderCall::DisplayFrame)));
}

#[test]
fn base_layer_is_always_shown_and_uploaded() {
    let (mut e, log, _) = engine_with_log(32, 32);
    e.enable_layer(0, false);
    clear_log(&log);
    e.composite_frame();
    assert!(e.layers()[0].is_visible());

    clear_log(&log);
    e.composite_frame();
    let calls = log.lock().expect("log").clone();
    assert_eq!(calls.iter().filter(|c| matches!(c, RenderCall::UpdateTexture(_))).count(), 1);
    assert_eq!(calls.iter().filter(|c| matches!(c, RenderCall::DrawLayerQuad { .. })).count(), 1);
}

#[test]
fn layers_composite_back_to_front() {
    let (mut e, log, _) = engine_with_log(32, 32);
    let top = e.create_layer();
    e.enable_layer(top, true);
    e.set_layer_tint(top, GREEN);
    clear_log(&log);
    e.composite_frame();

    let tints: Vec<_> = log
        .lock()
        .expect("log")
        .iter()
        .filter_map(|c| match c {
            RenderCall::DrawLayerQuad { tint, .. } => Some(*tint),
            _ => None,
        })
        .collect();
    assert_eq!(tints.len(), 2);
    assert_eq!(tints[0], GREEN);
}

#[test]
fn hidden_layer_batch_is_discarded() {
    let (mut e, log, _) = engine_with_log(32, 32);
    let l = e.create_layer();
    e.set_draw_target_layer(l, false);
    e.fill_rect_decal(Vec2::zero(), Vec2::splat(2.0), RED);
    clear_log(&log);
    e.composite_frame();
    assert!(drawn(&log).is_empty());
    assert!(e.layers()[l].decals().is_empty());
}

#[test]
fn clean_layer_is_not_reuploaded() {
    let (mut e, log, _) = engine_with_log(32, 32);
    let l = e.create_layer();
    e.enable_layer(l, true);
    e.set_draw_target_layer(l, true);
    clear_log(&log);
    e.composite_frame();
    let uploads = |log: &CallLog| {
        log.lock()
            .expect("log")
            .iter()
            .filter(|c| matches!(c, RenderCall::UpdateTexture(_)))
            .count()
    };
    assert_eq!(uploads(&log), 2);

    clear_log(&log);
    e.composite_frame();
    assert_eq!(uploads(&log), 1);
}

#[test]
fn suspended_transfer_skips_uploads() {
    let (mut e, log, _) = engine_with_log(16, 16);
    e.enable_pixel_transfer(false);
    clear_log(&log);
    e.composite_frame();
    assert!(!log.lock().expect("log").iter().any(|c| matches!(c, RenderCall::UpdateTexture(_))));
}

#[test]
fn custom_hook_replaces_default_path() {
    let (mut e, log, _) = engine_with_log(16, 16);
    let seen = Arc::new(Mutex::new(0usize));
    let seen_in_hook = Arc::clone(&seen);
    e.set_layer_custom_render_function(
        0,
        Some(Box::new(move |_r, decals| {
            if let Ok(mut n) = seen_in_hook.lock() {
                *n += decals.len();
            }
        })),
    );
    e.fill_rect_decal(Vec2::zero(), Vec2::splat(2.0), RED);
    e.fill_rect_decal(Vec2::zero(), Vec2::splat(2.0), RED);
    clear_log(&log);
    e.composite_frame();

    assert_eq!(*seen.lock().expect("seen"), 2);
    assert!(drawn(&log).is_empty());
    assert!(e.layers()[0].decals().is_empty());
}

#[test]
fn warp_degeneracy_reaches_no_backend() {
    let (mut e, log, _) = engine_with_log(64, 64);
    let decal = e.create_decal(&crate::sprite::Sprite::new(4, 4), false, true);
    let line = [Vec2::zero(), Vec2::splat(1.0), Vec2::splat(2.0), Vec2::splat(3.0)];
    e.draw_warped_decal(&decal, &line, RED);
    clear_log(&log);
    e.composite_frame();
    assert!(drawn(&log).is_empty());
}

#[test]
fn dropped_decal_texture_is_released_after_frame() {
    let (mut e, log, _) = engine_with_log(16, 16);
    let decal = e.create_decal(&crate::sprite::Sprite::new(2, 2), false, true);
    let id = decal.id().expect("texture");
    drop(decal);
    clear_log(&log);
    e.composite_frame();
    assert!(log.lock().expect("log").contains(&RenderCall::DeleteTexture(id)));
}

// ── draw targets ──

#[test]
fn sprite_target_receives_pixels_and_is_returned() {
    let (mut e, _, _) = engine_with_log(16, 16);
    let before = e.set_draw_target_sprite(crate::sprite::Sprite::new(4, 4));
    assert!(before.is_none());
    e.clear(RED);
    assert_eq!(e.draw_target_width(), 4);

    let back = e.set_draw_target(None).expect("sprite target");
    assert!(back.data().iter().all(|&p| p == RED));
    assert_eq!(e.draw_target_width(), 16);
    assert_ne!(e.layers()[0].sprite().get_pixel(0, 0), RED);
}

#[test]
fn invalid_layer_target_is_ignored() {
    let (mut e, _, _) = engine_with_log(16, 16);
    assert!(e.set_draw_target_layer(7, true).is_none());
    assert_eq!(e.target_layer(), 0);
}

#[test]
fn screen_resize_recreates_layers() {
    let (mut e, _, _) = engine_with_log(16, 16);
    let l = e.create_layer();
    e.set_draw_target_layer(l, false);
    e.set_screen_size(40, 20).expect("resize");

    assert_eq!(e.screen_size(), Vec2i::new(40, 20));
    assert_eq!(e.target_layer(), 0);
    assert!(e.layers().iter().all(|l| l.sprite().size() == Vec2i::new(40, 20) && l.is_dirty()));
    assert!(e.set_screen_size(0, 5).is_err());
    assert!(e.set_screen_size(50_000, 50_000).is_err());
    assert_eq!(e.screen_size(), Vec2i::new(40, 20));
}

#[test]
fn pixel_blend_is_clamped() {
    let (mut e, _, _) = engine_with_log(4, 4);
    e.set_pixel_blend(3.0);
    assert_eq!(e.blend_factor, 1.0);
    e.set_pixel_blend(-1.0);
    assert_eq!(e.blend_factor, 0.0);
}

// ── frame loop ──

#[test]
fn input_is_latched_once_per_frame() {
    let (mut e, _, _) = engine_with_log(100, 100);
    let hooks = e.hooks();
    hooks.update_key_state(Key::A, true);
    hooks.update_mouse_state(MouseButton::Left, true);
    hooks.update_mouse(50, 25);
    hooks.update_mouse_wheel(120);

    e.run_frame(&mut Idle, 0.01);
    assert!(e.get_key(Key::A).pressed);
    assert!(e.get_key(Key::A).held);
    assert!(e.get_mouse(MouseButton::Left).pressed);
    assert_eq!(e.mouse_pos(), Vec2i::new(50, 25));
    assert_eq!(e.mouse_wheel(), 120);
    assert!(e.has_mouse_focus());

    e.run_frame(&mut Idle, 0.01);
    assert!(!e.get_key(Key::A).pressed);
    assert!(e.get_key(Key::A).held);
    assert_eq!(e.mouse_wheel(), 0);

    hooks.update_key_state(Key::A, false);
    e.run_frame(&mut Idle, 0.01);
    assert!(e.get_key(Key::A).released);
    assert!(!e.get_key(Key::A).held);
}

#[test]
fn window_resize_refits_viewport() {
    let (mut e, _, _) = engine_with_log(100, 50);
    e.hooks().update_window_size(400, 400);
    e.run_frame(&mut Idle, 0.01);
    assert_eq!(e.window_size(), Vec2i::new(400, 400));
    assert_eq!(e.viewport().size, Vec2i::new(400, 200));
    assert_eq!(e.viewport().pos, Vec2i::new(0, 100));
}

#[test]
fn update_returning_false_stops_the_engine() {
    let (mut e, _, _) = engine_with_log(8, 8);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut app = Frames { left: 1, seen: Arc::clone(&seen) };
    e.running.store(true, std::sync::atomic::Ordering::SeqCst);
    e.run_frame(&mut app, 0.5);
    assert!(!e.is_running());
    assert_eq!(*seen.lock().expect("seen"), vec![0.5]);
}

#[test]
fn text_entry_completes_into_app() {
    struct Typist {
        done: Option<String>,
    }
    impl App for Typist {
        fn on_user_update(&mut self, _e: &mut Engine, _dt: f32) -> bool {
            true
        }
        fn on_text_entry_complete(&mut self, _e: &mut Engine, text: &str) {
            self.done = Some(text.to_string());
        }
    }

    let (mut e, _, _) = engine_with_log(8, 8);
    let hooks = e.hooks();
    let mut app = Typist { done: None };
    e.text_entry_enable(true, "");

    hooks.update_key_state(Key::H, true);
    e.run_frame(&mut app, 0.01);
    hooks.update_key_state(Key::H, false);
    hooks.update_key_state(Key::I, true);
    e.run_frame(&mut app, 0.01);
    assert_eq!(e.text_entry_get_string(), "hi");
    assert_eq!(e.text_entry_get_cursor(), 2);

    hooks.update_key_state(Key::Enter, true);
    e.run_frame(&mut app, 0.01);
    assert_eq!(app.done.as_deref(), Some("hi"));
    assert!(!e.is_text_entry_enabled());
}

#[test]
fn extension_can_block_update() {
    struct Gate;
    impl Extension for Gate {
        fn on_before_user_update(&mut self, _e: &mut Engine, dt: &mut f32) -> bool {
            *dt *= 2.0;
            true
        }
    }
    struct Count(Arc<Mutex<u32>>);
    impl Extension for Count {
        fn on_after_user_update(&mut self, _e: &mut Engine, dt: f32) {
            if let Ok(mut n) = self.0.lock() {
                *n += (dt * 10.0) as u32;
            }
        }
    }

    let (mut e, _, _) = engine_with_log(8, 8);
    let after = Arc::new(Mutex::new(0));
    e.register_extension(Box::new(Gate));
    e.register_extension(Box::new(Count(Arc::clone(&after))));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut app = Frames { left: 5, seen: Arc::clone(&seen) };
    e.run_frame(&mut app, 0.1);

    assert!(seen.lock().expect("seen").is_empty());
    assert_eq!(*after.lock().expect("after"), 2);
}

#[test]
fn fps_title_is_set_once_per_second() {
    let (mut e, _, platform) = engine_with_log(8, 8);
    e.run_frame(&mut Idle, 0.6);
    assert_eq!(platform.title(), "");
    e.run_frame(&mut Idle, 0.6);
    assert_eq!(platform.title(), "test - FPS: 2");
}

#[test]
fn start_runs_until_update_returns_false() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Frames { left: 3, seen: Arc::clone(&seen) };
    let e = Engine::headless(EngineConfig::new("run", 16, 16, 2, 2)).expect("construct");
    e.start(app).expect("start");
    assert_eq!(seen.lock().expect("seen").len(), 3);
}

#[test]
fn start_reports_a_panicking_app() {
    struct Crash;
    impl App for Crash {
        fn on_user_update(&mut self, _e: &mut Engine, _dt: f32) -> bool {
            panic!("app failure");
        }
    }

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let e = Engine::headless(EngineConfig::new("crash", 16, 16, 1, 1)).expect("construct");
        let _ = tx.send(e.start(Crash).is_err());
    });
    let failed = rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("start returned");
    assert!(failed);
}

#[test]
fn destroy_veto_keeps_running() {
    struct Stubborn {
        vetoes: u32,
        frames: u32,
    }
    impl App for Stubborn {
        fn on_user_update(&mut self, _e: &mut Engine, _dt: f32) -> bool {
            self.frames += 1;
            false
        }
        fn on_user_destroy(&mut self, _e: &mut Engine) -> bool {
            if self.vetoes > 0 {
                self.vetoes -= 1;
                false
            } else {
                true
            }
        }
    }

    let (mut e, _, _) = engine_with_log(8, 8);
    let mut app = Stubborn { vetoes: 2, frames: 0 };
    e.running.store(true, std::sync::atomic::Ordering::SeqCst);
    e.run(&mut app).expect("run");
    assert_eq!(app.frames, 3);
    assert_eq!(app.vetoes, 0);
}
