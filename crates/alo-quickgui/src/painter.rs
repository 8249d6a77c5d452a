//! Drawing helpers shared by the controls.
//!
//! Every helper comes in two flavours: raster (writes into the current draw target) and
//! decal (queues GPU geometry on the current layer).

use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::paint::Pixel;

/// Horizontal text placement inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Centre,
    Right,
}

/// Height of one text row in list controls.
pub(crate) const ROW_HEIGHT: f32 = 10.0;

/// Gap between a box edge and left/right aligned text.
const TEXT_INSET: f32 = 2.0;

const ONE: Vec2 = Vec2::new(1.0, 1.0);
const TWO: Vec2 = Vec2::new(2.0, 2.0);

pub(crate) fn text_size(engine: &Engine, text: &str) -> Vec2 {
    engine.get_text_size_prop(text).to_f32()
}

/// Top-left of `text` placed in the box at `pos`/`size`, vertically centred.
pub(crate) fn text_origin(engine: &Engine, pos: Vec2, size: Vec2, text: &str, align: Alignment) -> Vec2 {
    let t = text_size(engine, text);
    let y = pos.y + (size.y - t.y) * 0.5;
    match align {
        Alignment::Left => Vec2::new(pos.x + TEXT_INSET, y),
        Alignment::Centre => pos + (size - t) * 0.5,
        Alignment::Right => Vec2::new(pos.x + size.x - t.x - TEXT_INSET, y),
    }
}

// ── raster ────────────────────────────────────────────────────────────────

pub(crate) fn panel(engine: &mut Engine, pos: Vec2, size: Vec2, background: Option<Pixel>, border: Option<Pixel>) {
    if let Some(col) = background {
        engine.fill_rect((pos + ONE).to_i(), (size - TWO).to_i(), col);
    }
    if let Some(col) = border {
        engine.draw_rect(pos.to_i(), (size - ONE).to_i(), col);
    }
}

pub(crate) fn text(engine: &mut Engine, pos: Vec2, text: &str, col: Pixel) {
    engine.draw_string_prop(pos.to_i(), text, col, 1);
}

// ── decal ─────────────────────────────────────────────────────────────────

pub(crate) fn panel_decal(
    engine: &mut Engine,
    pos: Vec2,
    size: Vec2,
    background: Option<Pixel>,
    border: Option<Pixel>,
) {
    if let Some(col) = background {
        engine.fill_rect_decal(pos + ONE, size - TWO, col);
    }
    if let Some(col) = border {
        engine.draw_rect_decal(pos + ONE, size - TWO, col);
    }
}

pub(crate) fn text_decal(engine: &mut Engine, pos: Vec2, text: &str, col: Pixel) {
    engine.draw_string_prop_decal(pos, text, col, Vec2::splat(1.0));
}

/// Text-entry cursor bar at character `cursor` of `text` drawn from `pos`.
pub(crate) fn cursor_rect(engine: &Engine, pos: Vec2, size: Vec2, text: &str, cursor: usize) -> (Vec2, Vec2) {
    let head: String = text.chars().take(cursor).collect();
    let offset = text_size(engine, &head);
    (
        Vec2::new(pos.x + TEXT_INSET + offset.x, pos.y + (size.y - ROW_HEIGHT) * 0.5),
        Vec2::new(2.0, ROW_HEIGHT),
    )
}
