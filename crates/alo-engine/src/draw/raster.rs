use crate::coords::Vec2i;
use crate::paint::{Pixel, PixelMode};
use crate::sprite::{Flip, Sprite};

/// Solid line pattern.
pub const SOLID: u32 = 0xFFFF_FFFF;

/// Draws every octant of a circle.
pub const ALL_OCTANTS: u8 = 0xFF;

/// Pixel-level drawing into one sprite under a pixel mode.
///
/// Every primitive goes through [`Canvas::draw`], so out-of-bounds pixels are skipped and the
/// mode decides what lands in the sprite.
pub struct Canvas<'a> {
    target: &'a mut Sprite,
    mode: &'a PixelMode,
    blend: f32,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut Sprite, mode: &'a PixelMode, blend: f32) -> Self {
        Self { target, mode, blend }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.target.height()
    }

    /// Plots one pixel. Returns `false` if nothing was written.
    pub fn draw(&mut self, x: i32, y: i32, p: Pixel) -> bool {
        let dst = if self.mode.reads_destination() {
            self.target.get_pixel(x, y)
        } else {
            Pixel::default()
        };
        match self.mode.resolve(x, y, p, dst, self.blend) {
            Some(out) => self.target.set_pixel(x, y, out),
            None => false,
        }
    }

    /// Overwrites every pixel, ignoring the pixel mode.
    pub fn clear(&mut self, p: Pixel) {
        self.target.fill(p);
    }

    /// Bresenham line. Bit 0 of the pattern, rotated left once per step, gates each pixel.
    pub fn draw_line(&mut self, a: Vec2i, b: Vec2i, p: Pixel, mut pattern: u32) {
        let mut rol = || {
            pattern = pattern.rotate_left(1);
            pattern & 1 != 0
        };

        let (x1, y1, x2, y2) = (a.x, a.y, b.x, b.y);
        let dx = x2 - x1;
        let dy = y2 - y1;

        if dx == 0 {
            for y in y1.min(y2)..=y1.max(y2) {
                if rol() {
                    self.draw(x1, y, p);
                }
            }
            return;
        }
        if dy == 0 {
            for x in x1.min(x2)..=x1.max(x2) {
                if rol() {
                    self.draw(x, y1, p);
                }
            }
            return;
        }

        let dx1 = dx.abs();
        let dy1 = dy.abs();
        let same_sign = (dx < 0 && dy < 0) || (dx > 0 && dy > 0);
        let step = if same_sign { 1 } else { -1 };

        if dy1 <= dx1 {
            let mut px = 2 * dy1 - dx1;
            let (mut x, mut y, xe) = if dx >= 0 { (x1, y1, x2) } else { (x2, y2, x1) };
            if rol() {
                self.draw(x, y, p);
            }
            while x < xe {
                x += 1;
                if px < 0 {
                    px += 2 * dy1;
                } else {
                    y += step;
                    px += 2 * (dy1 - dx1);
                }
                if rol() {
                    self.draw(x, y, p);
                }
            }
        } else {
            let mut py = 2 * dx1 - dy1;
            let (mut x, mut y, ye) = if dy >= 0 { (x1, y1, y2) } else { (x2, y2, y1) };
            if rol() {
                self.draw(x, y, p);
            }
            while y < ye {
                y += 1;
                if py <= 0 {
                    py += 2 * dx1;
                } else {
                    x += step;
                    py += 2 * (dx1 - dy1);
                }
                if rol() {
                    self.draw(x, y, p);
                }
            }
        }
    }

    /// Circle outline. Each bit of `mask` enables one octant, starting at the top going
    /// clockwise.
    pub fn draw_circle(&mut self, c: Vec2i, radius: i32, p: Pixel, mask: u8) {
        let (x, y) = (c.x, c.y);
        if radius < 0
            || x < -radius
            || y < -radius
            || x - self.width() > radius
            || y - self.height() > radius
        {
            return;
        }
        if radius == 0 {
            self.draw(x, y, p);
            return;
        }

        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            if mask & 0x01 != 0 { self.draw(x + x0, y - y0, p); }
            if mask & 0x04 != 0 { self.draw(x + y0, y + x0, p); }
            if mask & 0x10 != 0 { self.draw(x - x0, y + y0, p); }
            if mask & 0x40 != 0 { self.draw(x - y0, y - x0, p); }
            if x0 != 0 && x0 != y0 {
                if mask & 0x02 != 0 { self.draw(x + y0, y - x0, p); }
                if mask & 0x08 != 0 { self.draw(x + x0, y + y0, p); }
                if mask & 0x20 != 0 { self.draw(x - y0, y + x0, p); }
                if mask & 0x80 != 0 { self.draw(x - x0, y - y0, p); }
            }

            if d < 0 {
                d += 4 * x0 + 6;
                x0 += 1;
            } else {
                d += 4 * (x0 - y0) + 10;
                x0 += 1;
                y0 -= 1;
            }
        }
    }

    pub fn fill_circle(&mut self, c: Vec2i, radius: i32, p: Pixel) {
        let (x, y) = (c.x, c.y);
        if radius < 0
            || x < -radius
            || y < -radius
            || x - self.width() > radius
            || y - self.height() > radius
        {
            return;
        }
        if radius == 0 {
            self.draw(x, y, p);
            return;
        }

        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            self.span(x - y0, x + y0, y - x0, p);
            if x0 > 0 {
                self.span(x - y0, x + y0, y + x0, p);
            }

            if d < 0 {
                d += 4 * x0 + 6;
                x0 += 1;
            } else {
                if x0 != y0 {
                    self.span(x - x0, x + x0, y - y0, p);
                    self.span(x - x0, x + x0, y + y0, p);
                }
                d += 4 * (x0 - y0) + 10;
                x0 += 1;
                y0 -= 1;
            }
        }
    }

    /// Outline covering `pos ..= pos + size`.
    pub fn draw_rect(&mut self, pos: Vec2i, size: Vec2i, p: Pixel) {
        let (x, y, w, h) = (pos.x, pos.y, size.x, size.y);
        self.draw_line(Vec2i::new(x, y), Vec2i::new(x + w, y), p, SOLID);
        self.draw_line(Vec2i::new(x + w, y), Vec2i::new(x + w, y + h), p, SOLID);
        self.draw_line(Vec2i::new(x + w, y + h), Vec2i::new(x, y + h), p, SOLID);
        self.draw_line(Vec2i::new(x, y + h), Vec2i::new(x, y), p, SOLID);
    }

    /// Fills `pos .. pos + size` (half-open), clipped to the target.
    pub fn fill_rect(&mut self, pos: Vec2i, size: Vec2i, p: Pixel) {
        let (w, h) = (self.width(), self.height());
        let x1 = pos.x.clamp(0, w);
        let y1 = pos.y.clamp(0, h);
        let x2 = (pos.x + size.x).clamp(0, w);
        let y2 = (pos.y + size.y).clamp(0, h);

        for i in x1..x2 {
            for j in y1..y2 {
                self.draw(i, j, p);
            }
        }
    }

    pub fn draw_triangle(&mut self, a: Vec2i, b: Vec2i, c: Vec2i, p: Pixel) {
        self.draw_line(a, b, p, SOLID);
        self.draw_line(b, c, p, SOLID);
        self.draw_line(c, a, p, SOLID);
    }

    /// Scanline fill: each row spans the long edge `v0 → v2` and whichever short edge covers
    /// that row.
    pub fn fill_triangle(&mut self, a: Vec2i, b: Vec2i, c: Vec2i, p: Pixel) {
        let mut v = [a, b, c];
        v.sort_by_key(|q| q.y);
        let [v0, v1, v2] = v;

        if v0.y == v2.y {
            let lo = v0.x.min(v1.x).min(v2.x);
            let hi = v0.x.max(v1.x).max(v2.x);
            self.span(lo, hi, v0.y, p);
            return;
        }

        for y in v0.y..=v2.y {
            let xa = edge_x(v0, v2, y);
            let xb = if y < v1.y { edge_x(v0, v1, y) } else { edge_x(v1, v2, y) };
            self.span(xa.min(xb), xa.max(xb), y, p);
        }
    }

    /// Blits `sprite` with its top-left at `pos`, each source pixel covering a
    /// `scale × scale` block.
    pub fn draw_sprite(&mut self, pos: Vec2i, sprite: &Sprite, scale: u32, flip: Flip) {
        self.draw_partial_sprite(pos, sprite, Vec2i::zero(), sprite.size(), scale, flip);
    }

    /// Blits the `size` region of `sprite` starting at `src`.
    pub fn draw_partial_sprite(
        &mut self,
        pos: Vec2i,
        sprite: &Sprite,
        src: Vec2i,
        size: Vec2i,
        scale: u32,
        flip: Flip,
    ) {
        let scale = scale.max(1) as i32;
        let (fxs, fxm) = if flip.contains(Flip::HORIZ) { (size.x - 1, -1) } else { (0, 1) };
        let (fys, fym) = if flip.contains(Flip::VERT) { (size.y - 1, -1) } else { (0, 1) };

        let mut fx = fxs;
        for i in 0..size.x {
            let mut fy = fys;
            for j in 0..size.y {
                let px = sprite.get_pixel(fx + src.x, fy + src.y);
                for is in 0..scale {
                    for js in 0..scale {
                        self.draw(pos.x + i * scale + is, pos.y + j * scale + js, px);
                    }
                }
                fy += fym;
            }
            fx += fxm;
        }
    }

    fn span(&mut self, x1: i32, x2: i32, y: i32, p: Pixel) {
        for x in x1..=x2 {
            self.draw(x, y, p);
        }
    }
}

/// X of edge `a → b` on row `y`.
fn edge_x(a: Vec2i, b: Vec2i, y: i32) -> i32 {
    if a.y == b.y {
        return a.x;
    }
    let t = (b.x - a.x) as i64 * (y - a.y) as i64 / (b.y - a.y) as i64;
    a.x + t as i32
}

#[derive(Copy, Clone)]
struct Outcode(u8);

impl Outcode {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const BOTTOM: u8 = 4;
    const TOP: u8 = 8;

    fn of(v: Vec2i, screen: Vec2i) -> Self {
        let mut i = 0;
        if v.x < 0 {
            i |= Self::LEFT;
        } else if v.x > screen.x {
            i |= Self::RIGHT;
        }
        if v.y < 0 {
            i |= Self::BOTTOM;
        } else if v.y > screen.y {
            i |= Self::TOP;
        }
        Self(i)
    }
}

/// Cohen–Sutherland clip of the segment `p1 → p2` against `[0, screen]`. Returns `false` when
/// the segment lies entirely outside; otherwise the endpoints are moved onto the boundary.
pub fn clip_line(p1: &mut Vec2i, p2: &mut Vec2i, screen: Vec2i) -> bool {
    let mut s1 = Outcode::of(*p1, screen);
    let mut s2 = Outcode::of(*p2, screen);

    loop {
        if s1.0 | s2.0 == 0 {
            return true;
        }
        if s1.0 & s2.0 != 0 {
            return false;
        }

        let s3 = if s2.0 > s1.0 { s2.0 } else { s1.0 };
        let (a, b) = (*p1, *p2);
        let n = if s3 & Outcode::TOP != 0 {
            Vec2i::new(a.x + (b.x - a.x) * (screen.y - a.y) / (b.y - a.y), screen.y)
        } else if s3 & Outcode::BOTTOM != 0 {
            Vec2i::new(a.x + (b.x - a.x) * (0 - a.y) / (b.y - a.y), 0)
        } else if s3 & Outcode::RIGHT != 0 {
            Vec2i::new(screen.x, a.y + (b.y - a.y) * (screen.x - a.x) / (b.x - a.x))
        } else {
            Vec2i::new(0, a.y + (b.y - a.y) * (0 - a.x) / (b.x - a.x))
        };

        if s3 == s1.0 {
            *p1 = n;
            s1 = Outcode::of(*p1, screen);
        } else {
            *p2 = n;
            s2 = Outcode::of(*p2, screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{BLANK, BLUE, RED, WHITE};

    fn v(x: i32, y: i32) -> Vec2i {
        Vec2i::new(x, y)
    }

    fn lit(s: &Sprite, p: Pixel) -> usize {
        s.data().iter().filter(|&&q| q == p).count()
    }

    fn blank(w: i32, h: i32) -> Sprite {
        let mut s = Sprite::new(w, h);
        s.fill(BLANK);
        s
    }

    // ── pixel modes ──

    #[test]
    fn mask_mode_skips_translucent_pixels() {
        let mut s = blank(4, 4);
        let mode = PixelMode::Mask;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        assert!(!c.draw(1, 1, Pixel::rgba(255, 0, 0, 10)));
        assert!(c.draw(2, 2, RED));
        assert_eq!(s.get_pixel(1, 1), BLANK);
        assert_eq!(s.get_pixel(2, 2), RED);
    }

    #[test]
    fn alpha_mode_blends_with_destination() {
        let mut s = Sprite::new(1, 1);
        s.fill(Pixel::rgb(0, 0, 0));
        let mode = PixelMode::Alpha;
        let mut c = Canvas::new(&mut s, &mode, 0.5);
        c.draw(0, 0, WHITE);
        let p = s.get_pixel(0, 0);
        assert_eq!((p.r, p.a), (127, 255));
    }

    #[test]
    fn custom_mode_sees_coordinates() {
        let mut s = blank(2, 1);
        let mode = PixelMode::Custom(Box::new(|x, _, src, _| if x == 0 { src } else { BLUE }));
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw(0, 0, RED);
        c.draw(1, 0, RED);
        assert_eq!(s.get_pixel(0, 0), RED);
        assert_eq!(s.get_pixel(1, 0), BLUE);
    }

    #[test]
    fn out_of_bounds_draw_is_rejected() {
        let mut s = blank(2, 2);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        assert!(!c.draw(-1, 0, RED));
        assert!(!c.draw(2, 0, RED));
        assert_eq!(lit(&s, RED), 0);
    }

    // ── lines ──

    #[test]
    fn horizontal_and_vertical_lines_are_inclusive() {
        let mut s = blank(8, 8);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_line(v(5, 1), v(1, 1), RED, SOLID);
        c.draw_line(v(0, 2), v(0, 6), WHITE, SOLID);
        assert_eq!(lit(&s, RED), 5);
        assert_eq!(lit(&s, WHITE), 5);
    }

    #[test]
    fn diagonal_line_hits_both_endpoints() {
        let mut s = blank(8, 8);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_line(v(6, 0), v(0, 6), RED, SOLID);
        assert_eq!(s.get_pixel(6, 0), RED);
        assert_eq!(s.get_pixel(0, 6), RED);
        assert_eq!(s.get_pixel(3, 3), RED);
        assert_eq!(lit(&s, RED), 7);
    }

    #[test]
    fn steep_line_steps_once_per_row() {
        let mut s = blank(8, 8);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_line(v(1, 0), v(3, 7), RED, SOLID);
        for y in 0..8 {
            assert_eq!((0..8).filter(|&x| s.get_pixel(x, y) == RED).count(), 1, "row {y}");
        }
    }

    #[test]
    fn pattern_gates_pixels() {
        let mut s = blank(8, 1);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        // Alternating bits: the first rotation lands on a 1.
        c.draw_line(v(0, 0), v(7, 0), RED, 0xAAAA_AAAA);
        assert_eq!(s.get_pixel(0, 0), RED);
        assert_eq!(s.get_pixel(1, 0), BLANK);
        assert_eq!(lit(&s, RED), 4);
    }

    #[test]
    fn clip_rejects_and_trims() {
        let screen = v(100, 100);
        let (mut a, mut b) = (v(-10, -10), v(-5, -20));
        assert!(!clip_line(&mut a, &mut b, screen));

        let (mut a, mut b) = (v(-50, 50), v(150, 50));
        assert!(clip_line(&mut a, &mut b, screen));
        assert_eq!((a, b), (v(0, 50), v(100, 50)));

        let (mut a, mut b) = (v(10, 10), v(20, 20));
        assert!(clip_line(&mut a, &mut b, screen));
        assert_eq!((a, b), (v(10, 10), v(20, 20)));
    }

    // ── circles ──

    #[test]
    fn circle_is_symmetric() {
        let mut s = blank(21, 21);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_circle(v(10, 10), 6, RED, ALL_OCTANTS);
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(s.get_pixel(x, y), s.get_pixel(20 - x, y));
                assert_eq!(s.get_pixel(x, y), s.get_pixel(x, 20 - y));
            }
        }
        assert_eq!(s.get_pixel(10, 4), RED);
        assert_eq!(s.get_pixel(10, 10), BLANK);
    }

    #[test]
    fn circle_mask_limits_octants() {
        let mut s = blank(21, 21);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_circle(v(10, 10), 6, RED, 0x01);
        assert_eq!(s.get_pixel(10, 4), RED);
        assert_eq!(s.get_pixel(10, 16), BLANK);
        assert!((0..21).all(|y| (0..10).all(|x| s.get_pixel(x, y) == BLANK)));
    }

    #[test]
    fn fill_circle_covers_centre_and_axis() {
        let mut s = blank(21, 21);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.fill_circle(v(10, 10), 5, RED);
        for d in -5..=5 {
            assert_eq!(s.get_pixel(10 + d, 10), RED);
            assert_eq!(s.get_pixel(10, 10 + d), RED);
        }
        assert_eq!(s.get_pixel(10, 16), BLANK);
        assert_eq!(s.get_pixel(0, 0), BLANK);
    }

    #[test]
    fn zero_radius_is_a_dot_and_negative_is_nothing() {
        let mut s = blank(5, 5);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_circle(v(2, 2), 0, RED, ALL_OCTANTS);
        c.fill_circle(v(2, 2), -1, WHITE);
        assert_eq!(lit(&s, RED), 1);
        assert_eq!(lit(&s, WHITE), 0);
    }

    // ── rects & triangles ──

    #[test]
    fn fill_rect_is_half_open_and_clipped() {
        let mut s = blank(10, 10);
        let mode = PixelMode::Normal;
        Canvas::new(&mut s, &mode, 1.0).fill_rect(v(2, 2), v(3, 4), RED);
        assert_eq!(lit(&s, RED), 12);
        Canvas::new(&mut s, &mode, 1.0).fill_rect(v(-5, 8), v(100, 100), WHITE);
        assert_eq!(lit(&s, WHITE), 20);
    }

    #[test]
    fn draw_rect_outline_is_inclusive() {
        let mut s = blank(10, 10);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_rect(v(1, 1), v(3, 3), RED);
        assert_eq!(lit(&s, RED), 12);
        assert_eq!(s.get_pixel(4, 4), RED);
        assert_eq!(s.get_pixel(2, 2), BLANK);
    }

    #[test]
    fn fill_triangle_covers_interior_only() {
        let mut s = blank(12, 12);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.fill_triangle(v(0, 0), v(10, 0), v(0, 10), RED);
        assert_eq!(s.get_pixel(0, 0), RED);
        assert_eq!(s.get_pixel(10, 0), RED);
        assert_eq!(s.get_pixel(0, 10), RED);
        assert_eq!(s.get_pixel(3, 3), RED);
        assert_eq!(s.get_pixel(9, 9), BLANK);
        for y in 0..=10 {
            assert_eq!((0..12).filter(|&x| s.get_pixel(x, y) == RED).count() as i32, 11 - y);
        }
    }

    #[test]
    fn flat_triangle_is_one_row() {
        let mut s = blank(12, 3);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.fill_triangle(v(2, 1), v(8, 1), v(5, 1), RED);
        assert_eq!(lit(&s, RED), 7);
    }

    // ── sprites ──

    #[test]
    fn sprite_blit_scales_and_flips() {
        let mut src = Sprite::new(2, 1);
        src.set_pixel(0, 0, RED);
        src.set_pixel(1, 0, BLUE);

        let mut s = blank(4, 2);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_sprite(v(0, 0), &src, 2, Flip::HORIZ);
        assert_eq!(s.get_pixel(0, 0), BLUE);
        assert_eq!(s.get_pixel(1, 1), BLUE);
        assert_eq!(s.get_pixel(2, 0), RED);
        assert_eq!(s.get_pixel(3, 1), RED);
    }

    #[test]
    fn partial_sprite_reads_source_region() {
        let mut src = Sprite::new(4, 4);
        src.fill(WHITE);
        src.set_pixel(2, 3, RED);

        let mut s = blank(2, 2);
        let mode = PixelMode::Normal;
        let mut c = Canvas::new(&mut s, &mode, 1.0);
        c.draw_partial_sprite(v(0, 0), &src, v(2, 2), v(2, 2), 1, Flip::NONE);
        assert_eq!(s.get_pixel(0, 1), RED);
        assert_eq!(lit(&s, WHITE), 3);
    }
}
