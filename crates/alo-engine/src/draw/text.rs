use super::Canvas;
use crate::coords::{Vec2, Vec2i};
use crate::core::Engine;
use crate::font::{glyph_origin, glyph_spacing, GLYPH_SIZE};
use crate::paint::{Pixel, PixelMode};

use super::decal::DecalSource;

/// Width of a tab in spaces.
pub const TAB_SIZE_IN_SPACES: i32 = 4;

/// Size in pixels of `text` in the monospaced font at scale 1.
pub fn text_size(text: &str) -> Vec2i {
    let mut size = Vec2i::new(0, 1);
    let mut pos = Vec2i::new(0, 1);
    for c in text.chars() {
        match c {
            '\n' => {
                pos.y += 1;
                pos.x = 0;
            }
            '\t' => pos.x += TAB_SIZE_IN_SPACES,
            _ => pos.x += 1,
        }
        size.x = size.x.max(pos.x);
        size.y = size.y.max(pos.y);
    }
    size * GLYPH_SIZE
}

/// Size in pixels of `text` in the proportional font at scale 1.
pub fn text_size_prop(text: &str) -> Vec2i {
    let mut size = Vec2i::new(0, 1);
    let mut pos = Vec2i::new(0, 1);
    for c in text.chars() {
        match c {
            '\n' => {
                pos.y += 1;
                pos.x = 0;
            }
            '\t' => pos.x += TAB_SIZE_IN_SPACES * GLYPH_SIZE,
            _ => pos.x += glyph_spacing(c).y,
        }
        size.x = size.x.max(pos.x);
        size.y = size.y.max(pos.y);
    }
    Vec2i::new(size.x, size.y * GLYPH_SIZE)
}

/// Source rectangle of a glyph in the font sheet: `(origin, size)`.
fn glyph_rect(c: char, proportional: bool) -> (Vec2i, Vec2i) {
    let o = glyph_origin(c);
    if proportional {
        let s = glyph_spacing(c);
        (Vec2i::new(o.x + s.x, o.y), Vec2i::new(s.y, GLYPH_SIZE))
    } else {
        (o, Vec2i::new(GLYPH_SIZE, GLYPH_SIZE))
    }
}

impl Engine {
    /// Draws `text` with the 8×8 font into the pixel target. Unless a custom pixel mode is
    /// active, opaque colours are masked and translucent ones alpha blended.
    pub fn draw_string(&mut self, pos: Vec2i, text: &str, col: Pixel, scale: u32) {
        self.raster_string(pos, text, col, scale, false);
    }

    /// As [`Engine::draw_string`] with per-glyph widths.
    pub fn draw_string_prop(&mut self, pos: Vec2i, text: &str, col: Pixel, scale: u32) {
        self.raster_string(pos, text, col, scale, true);
    }

    pub fn get_text_size(&self, text: &str) -> Vec2i {
        text_size(text)
    }

    pub fn get_text_size_prop(&self, text: &str) -> Vec2i {
        text_size_prop(text)
    }

    fn raster_string(&mut self, pos: Vec2i, text: &str, col: Pixel, scale: u32, proportional: bool) {
        let text_mode = match self.pixel_mode {
            PixelMode::Custom(_) => None,
            _ if col.a != 255 => Some(PixelMode::Alpha),
            _ => Some(PixelMode::Mask),
        };
        let mode = text_mode.as_ref().unwrap_or(&self.pixel_mode);
        let target = match self.sprite_target.as_mut() {
            Some(s) => s,
            None => match self.layers.get_mut(self.target_layer) {
                Some(l) => l.draw_target.sprite_mut(),
                None => return,
            },
        };
        let mut canvas = Canvas::new(target, mode, self.blend_factor);
        let font = self.font.sprite();
        let scale = scale.max(1) as i32;

        let (mut sx, mut sy) = (0, 0);
        for c in text.chars() {
            match c {
                '\n' => {
                    sx = 0;
                    sy += GLYPH_SIZE * scale;
                }
                '\t' => sx += GLYPH_SIZE * TAB_SIZE_IN_SPACES * scale,
                _ => {
                    let (origin, size) = glyph_rect(c, proportional);
                    for i in 0..size.x {
                        for j in 0..size.y {
                            if font.get_pixel(origin.x + i, origin.y + j).r == 0 {
                                continue;
                            }
                            for is in 0..scale {
                                for js in 0..scale {
                                    canvas.draw(pos.x + sx + i * scale + is, pos.y + sy + j * scale + js, col);
                                }
                            }
                        }
                    }
                    sx += size.x * scale;
                }
            }
        }
    }

    /// Queues one partial decal per glyph of `text`.
    pub fn draw_string_decal(&mut self, pos: Vec2, text: &str, col: Pixel, scale: Vec2) {
        self.string_decal(pos, text, col, scale, false);
    }

    pub fn draw_string_prop_decal(&mut self, pos: Vec2, text: &str, col: Pixel, scale: Vec2) {
        self.string_decal(pos, text, col, scale, true);
    }

    fn string_decal(&mut self, pos: Vec2, text: &str, col: Pixel, scale: Vec2, proportional: bool) {
        let Some(font) = self.font.decal().map(DecalSource::from) else {
            return;
        };
        let glyph = GLYPH_SIZE as f32;
        let mut spos = Vec2::zero();
        for c in text.chars() {
            match c {
                '\n' => {
                    spos.x = 0.0;
                    spos.y += glyph * scale.y;
                }
                '\t' => spos.x += glyph * TAB_SIZE_IN_SPACES as f32 * scale.x,
                _ => {
                    let (origin, size) = glyph_rect(c, proportional);
                    let size = Vec2::from(size);
                    self.partial_decal(pos + spos, font, Vec2::from(origin), size, scale, col);
                    spos.x += size.x * scale.x;
                }
            }
        }
    }

    /// Rotated text. `center` is in unscaled text pixels relative to the first glyph.
    pub fn draw_rotated_string_decal(
        &mut self,
        pos: Vec2,
        text: &str,
        angle: f32,
        center: Vec2,
        col: Pixel,
        scale: Vec2,
    ) {
        self.rotated_string_decal(pos, text, angle, center, col, scale, false);
    }

    pub fn draw_rotated_string_prop_decal(
        &mut self,
        pos: Vec2,
        text: &str,
        angle: f32,
        center: Vec2,
        col: Pixel,
        scale: Vec2,
    ) {
        self.rotated_string_decal(pos, text, angle, center, col, scale, true);
    }

    #[allow(clippy::too_many_arguments)]
    fn rotated_string_decal(
        &mut self,
        pos: Vec2,
        text: &str,
        angle: f32,
        center: Vec2,
        col: Pixel,
        scale: Vec2,
        proportional: bool,
    ) {
        let Some(font) = self.font.decal().map(DecalSource::from) else {
            return;
        };
        let glyph = GLYPH_SIZE as f32;
        // Each glyph rotates about `spos`, which walks backwards so glyphs advance forwards.
        let mut spos = center;
        for c in text.chars() {
            match c {
                '\n' => {
                    spos.x = center.x;
                    spos.y -= glyph;
                }
                '\t' => spos.x += glyph * TAB_SIZE_IN_SPACES as f32 * scale.x,
                _ => {
                    let (origin, size) = glyph_rect(c, proportional);
                    let size = Vec2::from(size);
                    self.partial_rotated_decal(pos, font, angle, spos, Vec2::from(origin), size, scale, col);
                    spos.x -= size.x;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::paint::{BLANK, RED};

    fn engine() -> Engine {
        let mut e = Engine::headless(EngineConfig::new("text", 64, 32, 1, 1)).expect("construct");
        e.prepare().expect("prepare");
        e
    }

    // ── measuring ──

    #[test]
    fn text_size_counts_lines_and_tabs() {
        assert_eq!(text_size(""), Vec2i::new(0, 8));
        assert_eq!(text_size("abc"), Vec2i::new(24, 8));
        assert_eq!(text_size("ab\nc"), Vec2i::new(16, 16));
        assert_eq!(text_size("\tx"), Vec2i::new(40, 8));
    }

    #[test]
    fn prop_size_uses_glyph_widths() {
        let w: i32 = "il".chars().map(|c| glyph_spacing(c).y).sum();
        assert_eq!(text_size_prop("il"), Vec2i::new(w, 8));
        assert!(text_size_prop("il").x < text_size("il").x);
        assert_eq!(text_size_prop("a\nb").y, 16);
    }

    // ── raster text ──

    #[test]
    fn draw_string_marks_pixels_and_restores_mode() {
        let mut e = engine();
        e.canvas().expect("canvas").clear(BLANK);
        e.draw_string(Vec2i::new(0, 0), "#", RED, 1);
        let ink = e.layers()[0].sprite().data().iter().filter(|&&p| p == RED).count();
        assert!(ink > 0);
        assert!(matches!(e.pixel_mode(), PixelMode::Normal));
        // Nothing lands outside the first glyph cell.
        let s = e.layers()[0].sprite();
        assert!((8..64).all(|x| (0..32).all(|y| s.get_pixel(x, y) == BLANK)));
    }

    #[test]
    fn scaled_string_covers_more_pixels() {
        let mut e = engine();
        e.canvas().expect("canvas").clear(BLANK);
        e.draw_string(Vec2i::new(0, 0), "A", RED, 1);
        let one = e.layers()[0].sprite().data().iter().filter(|&&p| p == RED).count();
        e.canvas().expect("canvas").clear(BLANK);
        e.draw_string(Vec2i::new(0, 0), "A", RED, 2);
        let two = e.layers()[0].sprite().data().iter().filter(|&&p| p == RED).count();
        assert_eq!(two, one * 4);
    }

    // ── string decals ──

    #[test]
    fn string_decal_emits_one_quad_per_glyph() {
        let mut e = engine();
        e.draw_string_decal(Vec2::zero(), "ab\n\tc", RED, Vec2::splat(1.0));
        let decals = e.layers()[0].decals();
        assert_eq!(decals.len(), 3);
        let font = e.font.decal().and_then(|d| d.id());
        assert!(decals.iter().all(|d| d.decal == font && d.points() == 4));
    }

    #[test]
    fn rotated_string_decal_skips_control_chars() {
        let mut e = engine();
        e.draw_rotated_string_prop_decal(Vec2::splat(10.0), "x\ny", 0.5, Vec2::zero(), RED, Vec2::splat(1.0));
        assert_eq!(e.layers()[0].decals().len(), 2);
    }
}
