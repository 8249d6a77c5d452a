use alo_engine::core::{App, Engine, EngineConfig};
use alo_engine::decal::DecalMode;
use alo_engine::input::{Key, MouseButton};
use alo_engine::paint::WHITE;
use alo_engine::platform::EngineHooks;

use crate::painter::{text_origin, Alignment};
use crate::prelude::*;

/// An app that only updates its GUI.
struct Gui(Manager);

impl App for Gui {
    fn on_user_update(&mut self, engine: &mut Engine, _elapsed: f32) -> bool {
        self.0.update(engine);
        true
    }
}

fn setup() -> (Engine, EngineHooks, Gui) {
    let mut e = Engine::headless(EngineConfig::new("gui", 200, 200, 1, 1)).expect("engine");
    e.prepare().expect("prepare");
    let hooks = e.hooks();
    (e, hooks, Gui(Manager::new()))
}

fn mouse(hooks: &EngineHooks, x: i32, y: i32, down: bool) {
    hooks.update_mouse(x, y);
    hooks.update_mouse_state(MouseButton::Left, down);
}

fn frame(e: &mut Engine, gui: &mut Gui, dt: f32) {
    e.run_frame(gui, dt);
}

fn button_at(x: f32, y: f32) -> Button {
    Button::new("Go", Vec2::new(x, y), Vec2::new(50.0, 20.0))
}

// ── manager ──

#[test]
fn typed_access_checks_kind() {
    let mut m = Manager::new();
    let b = m.add(button_at(0.0, 0.0));
    let l = m.add(Label::new("hi", Vec2::zero(), Vec2::splat(10.0)));
    assert_eq!(m.len(), 2);
    assert!(m.button(b).is_some());
    assert!(m.button(l).is_none());
    assert!(m.label(l).is_some());
    assert!(matches!(m.get(l), Some(Control::Label(_))));
    let order: Vec<_> = m.iter().map(|(id, _)| id.index()).collect();
    assert_eq!(order, [0, 1]);
}

#[test]
fn copy_theme_from_copies_everything() {
    let mut a = Manager::new();
    a.theme_mut().grab_rad = 3.0;
    a.theme_mut().hover = WHITE;
    let mut b = Manager::new();
    b.copy_theme_from(&a);
    assert_eq!(b.theme(), a.theme());
}

// ── button ──

#[test]
fn button_hover_fades_in_and_out() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(button_at(10.0, 10.0));

    mouse(&hooks, 20, 20, false);
    frame(&mut e, &mut gui, 0.05);
    let b = gui.0.button(id).expect("button");
    assert_eq!(b.state.status(), Status::Hover);
    assert!((b.state.transition() - 0.5).abs() < 1e-5);

    mouse(&hooks, 150, 150, false);
    frame(&mut e, &mut gui, 0.05);
    let b = gui.0.button(id).expect("button");
    assert_eq!(b.state.status(), Status::Normal);
    assert!((b.state.transition() - 0.3).abs() < 1e-5);
}

#[test]
fn button_click_holds_until_release_anywhere() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(button_at(10.0, 10.0));

    mouse(&hooks, 20, 20, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.button(id).expect("button").state;
    assert!(s.pressed && s.held);
    assert_eq!(s.status(), Status::Click);

    mouse(&hooks, 150, 150, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.button(id).expect("button").state;
    assert!(!s.pressed && s.held);
    assert_eq!(s.status(), Status::Click);

    mouse(&hooks, 150, 150, false);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.button(id).expect("button").state;
    assert!(s.released && !s.held);
    assert_eq!(s.status(), Status::Normal);
}

#[test]
fn disabled_button_ignores_input() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(button_at(10.0, 10.0));
    gui.0.get_mut(id).expect("control").enable(false);

    mouse(&hooks, 20, 20, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.button(id).expect("button").state;
    assert!(!s.pressed);
    assert_eq!(s.status(), Status::Disabled);
}

// ── check box ──

#[test]
fn check_box_toggles_on_each_press() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(CheckBox::new("Show", false, Vec2::new(10.0, 10.0), Vec2::new(50.0, 20.0)));

    mouse(&hooks, 20, 20, true);
    frame(&mut e, &mut gui, 0.01);
    assert!(gui.0.check_box(id).expect("check box").checked);

    mouse(&hooks, 20, 20, false);
    frame(&mut e, &mut gui, 0.01);
    assert!(gui.0.check_box(id).expect("check box").checked);

    mouse(&hooks, 20, 20, true);
    frame(&mut e, &mut gui, 0.01);
    assert!(!gui.0.check_box(id).expect("check box").checked);
}

// ── slider ──

fn track() -> Slider {
    Slider::new(Vec2::new(20.0, 50.0), Vec2::new(120.0, 50.0), 0.0, 100.0, 50.0)
}

#[test]
fn slider_drag_projects_onto_track() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(track());
    assert_eq!(gui.0.slider(id).expect("slider").handle_pos(), Vec2::new(70.0, 50.0));

    mouse(&hooks, 72, 52, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.slider(id).expect("slider");
    assert!(s.state.pressed);
    assert_eq!(s.state.status(), Status::Click);

    mouse(&hooks, 40, 90, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.slider(id).expect("slider");
    assert!((s.value - 20.0).abs() < 1e-4);
    assert!(s.state.held);

    mouse(&hooks, 500, 50, true);
    frame(&mut e, &mut gui, 0.01);
    assert_eq!(gui.0.slider(id).expect("slider").value, 100.0);

    mouse(&hooks, 500, 50, false);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.slider(id).expect("slider");
    assert!(s.state.released);
    assert_eq!(s.state.status(), Status::Normal);
}

#[test]
fn slider_grab_needs_mouse_within_radius() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(track());

    mouse(&hooks, 79, 50, true);
    frame(&mut e, &mut gui, 0.01);
    let s = gui.0.slider(id).expect("slider");
    assert_eq!(s.state.status(), Status::Normal);
    assert_eq!(s.value, 50.0);
}

// ── text box ──

#[test]
fn text_box_edits_through_text_entry() {
    let (mut e, hooks, mut gui) = setup();
    let id = gui.0.add(TextBox::new("ab", Vec2::new(10.0, 10.0), Vec2::new(100.0, 20.0)));

    mouse(&hooks, 20, 20, true);
    frame(&mut e, &mut gui, 0.01);
    assert!(e.is_text_entry_enabled());
    assert!(gui.0.text_box(id).expect("text box").is_editing());

    mouse(&hooks, 20, 20, false);
    hooks.update_key_state(Key::C, true);
    frame(&mut e, &mut gui, 0.01);
    assert_eq!(gui.0.text_box(id).expect("text box").text(), "abc");
    assert!(e.is_text_entry_enabled());

    hooks.update_key_state(Key::C, false);
    mouse(&hooks, 150, 150, true);
    frame(&mut e, &mut gui, 0.01);
    mouse(&hooks, 150, 150, false);
    frame(&mut e, &mut gui, 0.01);

    let tb = gui.0.text_box(id).expect("text box");
    assert!(!tb.is_editing());
    assert_eq!(tb.text(), "abc");
    assert!(!e.is_text_entry_enabled());
}

// ── list box ──

fn items(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item {i}")).collect()
}

#[test]
fn list_box_selects_clicked_row() {
    let (mut e, hooks, mut gui) = setup();
    let theme = *gui.0.theme();
    let id = gui.0.add(ListBox::new(&theme, items(20), Vec2::zero(), Vec2::new(100.0, 54.0)));

    mouse(&hooks, 10, 35, true);
    frame(&mut e, &mut gui, 0.01);
    let lb = gui.0.list_box(id).expect("list box");
    assert_eq!(lb.selected, 3);
    assert_eq!(lb.selected_item(), Some("item 3"));
}

#[test]
fn list_box_selection_follows_scroll_and_clamps() {
    let (mut e, hooks, mut gui) = setup();
    let theme = *gui.0.theme();
    let id = gui.0.add(ListBox::new(&theme, items(12), Vec2::zero(), Vec2::new(100.0, 54.0)));
    if let Some(s) = gui.0.list_box_mut(id).and_then(ListBox::scroll_bar_mut) {
        s.value = 10.0;
    }

    mouse(&hooks, 10, 45, true);
    frame(&mut e, &mut gui, 0.01);
    assert_eq!(gui.0.list_box(id).expect("list box").selected, 11);
}

// ── drawing ──

#[test]
fn invisible_controls_draw_nothing() {
    let (mut e, _, mut gui) = setup();
    let id = gui.0.add(button_at(10.0, 10.0));
    gui.0.get_mut(id).expect("control").state_mut().visible = false;
    gui.0.draw_decal(&mut e);
    assert!(e.layers()[0].decals().is_empty());
}

#[test]
fn button_decal_is_fill_then_wire_border() {
    let (mut e, _, mut gui) = setup();
    gui.0.add(button_at(10.0, 10.0));
    gui.0.draw_decal(&mut e);

    let theme = *gui.0.theme();
    let decals = e.layers()[0].decals();
    assert!(decals.len() > 2);
    assert_eq!(decals[0].mode, DecalMode::Normal);
    assert_eq!(decals[0].tint[0], theme.normal);
    assert_eq!(decals[1].mode, DecalMode::Wireframe);
    assert_eq!(decals[1].tint[0], theme.border);
}

#[test]
fn button_raster_fill_and_border() {
    let (mut e, _, mut gui) = setup();
    gui.0.add(button_at(10.0, 10.0));
    gui.0.draw(&mut e);

    let theme = *gui.0.theme();
    let target = e.draw_target().expect("target");
    assert_eq!(target.get_pixel(10, 10), theme.border);
    assert_eq!(target.get_pixel(12, 12), theme.normal);
}

#[test]
fn text_alignment_inside_box() {
    let (e, _, _) = setup();
    let w = e.get_text_size_prop("ab").x as f32;
    let pos = Vec2::zero();
    let size = Vec2::new(100.0, 20.0);
    assert_eq!(text_origin(&e, pos, size, "ab", Alignment::Left).x, 2.0);
    assert_eq!(text_origin(&e, pos, size, "ab", Alignment::Right).x, 100.0 - w - 2.0);
    assert_eq!(text_origin(&e, pos, size, "ab", Alignment::Centre), Vec2::new((100.0 - w) * 0.5, 6.0));
}
