use alo_engine::coords::Vec2;
use alo_engine::core::{App, Engine};
use alo_engine::decal::DecalMode;
use alo_engine::input::Key;
use alo_engine::paint::{Pixel, BLACK, WHITE};
use alo_quickgui::prelude::*;

use crate::gears::{unit_circle, Gears, CIRCLE_VERTS};
use crate::palette::{Palette, Stock};

/// Centre of the fixed gear on the 1920x1080 canvas.
const FIXED_CENTRE: Vec2 = Vec2::new(960.0, 540.0);

/// Drawing-time units advanced per second while drawing.
const DRAW_SPEED: f32 = 5.0;

/// Drawing time that spans the whole palette once.
const PALETTE_PERIOD: f32 = 300.0;

/// Radius of the marker drawn at the pen tip.
const PEN_MARKER: f32 = 4.0;

struct Controls {
    outer: ControlId,
    inner: ControlId,
    pen: ControlId,
    clear: ControlId,
    show_gears: ControlId,
    draw: ControlId,
}

/// Draws spirographs onto layer 0 while a GUI on the right tunes the gears.
pub struct Spirograph {
    gui: Manager,
    ids: Controls,
    palette: Palette,
    circle: Vec<Vec2>,
    t: f32,
    last_pen: Option<Vec2>,
}

impl Default for Spirograph {
    fn default() -> Self {
        Self::new()
    }
}

impl Spirograph {
    pub fn new() -> Self {
        let mut gui = Manager::new();
        let slider = |y: f32, min: f32, max: f32, value: f32| {
            Slider::new(Vec2::new(1700.0, y), Vec2::new(1900.0, y), min, max, value)
        };
        let ids = Controls {
            outer: gui.add(slider(10.0, 0.0, 400.0, 200.0)),
            inner: gui.add(slider(30.0, -256.0, 256.0, 77.0)),
            pen: gui.add(slider(50.0, 0.0, 256.0, 65.0)),
            clear: gui.add(Button::new("Clear All", Vec2::new(1700.0, 80.0), Vec2::new(100.0, 16.0))),
            show_gears: gui.add(CheckBox::new(
                "Show Gears",
                true,
                Vec2::new(1810.0, 80.0),
                Vec2::new(90.0, 16.0),
            )),
            draw: gui.add(Button::new("Draw!", Vec2::new(1700.0, 110.0), Vec2::new(200.0, 20.0))),
        };
        Self {
            gui,
            ids,
            palette: Palette::new(Stock::Spectrum),
            circle: unit_circle(CIRCLE_VERTS),
            t: 0.0,
            last_pen: None,
        }
    }

    /// Drawing time elapsed since the last reset.
    pub fn time(&self) -> f32 {
        self.t
    }

    pub fn gui(&self) -> &Manager {
        &self.gui
    }

    pub fn gears(&self) -> Gears {
        let value = |id| self.gui.slider(id).map_or(0.0, |s| s.value);
        Gears {
            fixed_radius: value(self.ids.outer),
            moving_radius: value(self.ids.inner),
            pen_radius: value(self.ids.pen),
        }
    }

    fn reset(&mut self, engine: &mut Engine) {
        log::debug!("clearing canvas");
        self.last_pen = None;
        self.t = 0.0;
        engine.clear(BLACK);
    }

    fn button(&self, id: ControlId) -> ControlState {
        self.gui.button(id).map(|b| b.state).unwrap_or_default()
    }

    fn circle_decal(&self, engine: &mut Engine, centre: Vec2, radius: f32, col: Pixel) {
        if radius == 0.0 {
            return;
        }
        let verts: Vec<Vec2> = self.circle.iter().map(|&v| v * radius + centre).collect();
        engine.set_decal_mode(DecalMode::Wireframe);
        engine.draw_polygon_decal(None, &verts, &verts, col);
        engine.set_decal_mode(DecalMode::Normal);
    }
}

impl App for Spirograph {
    fn on_user_create(&mut self, engine: &mut Engine) -> bool {
        self.reset(engine);
        true
    }

    fn on_user_update(&mut self, engine: &mut Engine, elapsed: f32) -> bool {
        self.gui.update(engine);

        if engine.get_key(Key::R).pressed || self.button(self.ids.clear).pressed {
            self.reset(engine);
        }

        let drawing = engine.get_key(Key::Space).held || self.button(self.ids.draw).held;
        if drawing {
            self.t += elapsed * DRAW_SPEED;
        }

        let gears = self.gears();
        let pose = gears.pose(self.t);
        let moving = FIXED_CENTRE + pose.moving_centre;
        let pen = pose.pen(FIXED_CENTRE);
        let last = self.last_pen.unwrap_or(pen);

        if self.gui.check_box(self.ids.show_gears).is_some_and(|c| c.checked) {
            self.circle_decal(engine, FIXED_CENTRE, gears.fixed_radius, WHITE);
            self.circle_decal(engine, moving, gears.moving_radius.abs(), WHITE);
            self.circle_decal(engine, pen, PEN_MARKER, WHITE);
            let arm = pose.pen_offset.norm() * gears.moving_radius;
            engine.draw_line_decal(moving + arm, moving - arm, WHITE);
        }

        self.gui.draw_decal(engine);

        if drawing {
            let col = self.palette.sample(self.t / PALETTE_PERIOD);
            engine.draw_line(last.to_i(), pen.to_i(), col);
        }

        self.last_pen = Some(pen);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alo_engine::core::EngineConfig;

    fn engine() -> Engine {
        let mut e = Engine::headless(EngineConfig::new("Spirographs", 1920, 1080, 1, 1)).expect("engine");
        e.prepare().expect("prepare");
        e
    }

    fn lit_pixels(e: &Engine) -> usize {
        e.draw_target()
            .expect("target")
            .data()
            .iter()
            .filter(|p| **p != BLACK)
            .count()
    }

    #[test]
    fn default_gears() {
        let app = Spirograph::new();
        assert_eq!(
            app.gears(),
            Gears { fixed_radius: 200.0, moving_radius: 77.0, pen_radius: 65.0 }
        );
        assert_eq!(app.gui().len(), 6);
    }

    #[test]
    fn space_draws_and_r_clears() {
        let mut e = engine();
        let hooks = e.hooks();
        let mut app = Spirograph::new();
        assert!(app.on_user_create(&mut e));
        assert_eq!(lit_pixels(&e), 0);

        hooks.update_key_state(Key::Space, true);
        for _ in 0..4 {
            e.run_frame(&mut app, 0.1);
        }
        assert!((app.time() - 2.0).abs() < 1e-4);
        assert!(lit_pixels(&e) > 0);

        hooks.update_key_state(Key::Space, false);
        hooks.update_key_state(Key::R, true);
        e.run_frame(&mut app, 0.1);
        assert_eq!(app.time(), 0.0);
        assert_eq!(lit_pixels(&e), 0);
    }

    #[test]
    fn time_stands_still_without_input() {
        let mut e = engine();
        let mut app = Spirograph::new();
        app.on_user_create(&mut e);
        for _ in 0..3 {
            e.run_frame(&mut app, 0.1);
        }
        assert_eq!(app.time(), 0.0);
        assert_eq!(lit_pixels(&e), 0);
    }

    #[test]
    fn gears_render_as_wireframe_decals() {
        let mut e = engine();
        let mut app = Spirograph::new();
        app.on_user_create(&mut e);
        app.on_user_update(&mut e, 0.0);

        let decals = e.layers()[0].decals();
        let circles = decals
            .iter()
            .filter(|d| d.mode == DecalMode::Wireframe && d.points() == CIRCLE_VERTS)
            .count();
        assert_eq!(circles, 3);
    }
}
