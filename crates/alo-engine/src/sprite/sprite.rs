use crate::coords::Vec2i;
use crate::paint::{BLANK, Pixel};

/// How out-of-range reads are resolved.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SampleMode {
    /// Out-of-range reads return fully transparent black.
    #[default]
    Normal,
    /// Coordinates wrap around the buffer.
    Periodic,
    /// Coordinates clamp to the nearest edge.
    Clamp,
}

/// Mirroring applied when blitting a sprite.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Flip(u8);

impl Flip {
    pub const NONE: Flip = Flip(0);
    pub const HORIZ: Flip = Flip(1);
    pub const VERT: Flip = Flip(2);

    #[inline]
    pub fn contains(self, other: Flip) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl core::ops::BitOr for Flip {
    type Output = Flip;
    fn bitor(self, rhs: Flip) -> Flip {
        Flip(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sprite {
    width: i32,
    height: i32,
    data: Vec<Pixel>,
    pub sample_mode: SampleMode,
}

impl Sprite {
    /// A `w × h` buffer filled with the default pixel (opaque black).
    /// Negative sizes produce an empty sprite.
    pub fn new(w: i32, h: i32) -> Self {
        let (w, h) = (w.max(0), h.max(0));
        Self {
            width: w,
            height: h,
            data: vec![Pixel::default(); w as usize * h as usize],
            sample_mode: SampleMode::Normal,
        }
    }

    /// Wraps decoded pixels. Returns `None` when `data.len() != w * h`.
    pub fn from_pixels(w: i32, h: i32, data: Vec<Pixel>) -> Option<Self> {
        if w < 0 || h < 0 || data.len() != w as usize * h as usize {
            return None;
        }
        Some(Self { width: w, height: h, data, sample_mode: SampleMode::Normal })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2i {
        Vec2i::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Drops the contents, leaving a 0×0 sprite.
    pub fn reset(&mut self) {
        self.width = 0;
        self.height = 0;
        self.data.clear();
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        if self.data.is_empty() {
            return BLANK;
        }
        let (w, h) = (self.width, self.height);
        match self.sample_mode {
            SampleMode::Normal => {
                if x >= 0 && x < w && y >= 0 && y < h {
                    self.data[(y * w + x) as usize]
                } else {
                    BLANK
                }
            }
            SampleMode::Periodic => self.data[(y.rem_euclid(h) * w + x.rem_euclid(w)) as usize],
            SampleMode::Clamp => {
                self.data[(y.clamp(0, h - 1) * w + x.clamp(0, w - 1)) as usize]
            }
        }
    }

    /// Returns `false` (and writes nothing) when `(x, y)` is outside the buffer.
    pub fn set_pixel(&mut self, x: i32, y: i32, p: Pixel) -> bool {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.data[(y * self.width + x) as usize] = p;
            true
        } else {
            false
        }
    }

    /// Nearest-neighbour read at normalized `(u, v)`.
    pub fn sample(&self, u: f32, v: f32) -> Pixel {
        let sx = ((u * self.width as f32) as i32).min(self.width - 1);
        let sy = ((v * self.height as f32) as i32).min(self.height - 1);
        self.get_pixel(sx, sy)
    }

    /// Bilinear read at normalized `(u, v)`, texel centres at half offsets. The result is opaque.
    pub fn sample_bl(&self, u: f32, v: f32) -> Pixel {
        let u = u * self.width as f32 - 0.5;
        let v = v * self.height as f32 - 0.5;
        let x = u.floor() as i32;
        let y = v.floor() as i32;
        let ur = u - x as f32;
        let vr = v - y as f32;
        let uo = 1.0 - ur;
        let vo = 1.0 - vr;

        let p1 = self.get_pixel(x.max(0), y.max(0));
        let p2 = self.get_pixel((x + 1).min(self.width - 1), y.max(0));
        let p3 = self.get_pixel(x.max(0), (y + 1).min(self.height - 1));
        let p4 = self.get_pixel((x + 1).min(self.width - 1), (y + 1).min(self.height - 1));

        let mix = |a: u8, b: u8, c: u8, d: u8| -> u8 {
            ((a as f32 * uo + b as f32 * ur) * vo + (c as f32 * uo + d as f32 * ur) * vr) as u8
        };

        Pixel::rgb(
            mix(p1.r, p2.r, p3.r, p4.r),
            mix(p1.g, p2.g, p3.g, p4.g),
            mix(p1.b, p2.b, p3.b, p4.b),
        )
    }

    /// Full copy, including the sample mode.
    pub fn duplicate(&self) -> Sprite {
        self.clone()
    }

    /// Copies `size` pixels starting at `pos`; reads follow this sprite's sample mode.
    pub fn duplicate_region(&self, pos: Vec2i, size: Vec2i) -> Sprite {
        let mut out = Sprite::new(size.x, size.y);
        for y in 0..size.y {
            for x in 0..size.x {
                out.set_pixel(x, y, self.get_pixel(pos.x + x, pos.y + y));
            }
        }
        out
    }

    /// Overwrites every pixel.
    pub fn fill(&mut self, p: Pixel) {
        self.data.fill(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{BLUE, GREEN, RED, WHITE};

    fn checker() -> Sprite {
        let mut s = Sprite::new(2, 2);
        s.set_pixel(0, 0, RED);
        s.set_pixel(1, 0, GREEN);
        s.set_pixel(0, 1, BLUE);
        s.set_pixel(1, 1, WHITE);
        s
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_fills_default_pixel() {
        let s = Sprite::new(3, 2);
        assert_eq!(s.data().len(), 6);
        assert!(s.data().iter().all(|p| *p == Pixel::default()));
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(Sprite::from_pixels(2, 2, vec![RED; 3]).is_none());
        assert!(Sprite::from_pixels(2, 2, vec![RED; 4]).is_some());
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn normal_mode_out_of_bounds_is_transparent() {
        let s = checker();
        assert_eq!(s.get_pixel(-1, 0).a, 0);
        assert_eq!(s.get_pixel(2, 0).a, 0);
        assert_eq!(s.get_pixel(0, 2).a, 0);
    }

    #[test]
    fn set_pixel_out_of_bounds_fails_without_change() {
        let mut s = checker();
        let before = s.clone();
        assert!(!s.set_pixel(2, 0, RED));
        assert!(!s.set_pixel(0, -1, RED));
        assert_eq!(s, before);
    }

    #[test]
    fn periodic_wraps() {
        let mut s = checker();
        s.sample_mode = SampleMode::Periodic;
        assert_eq!(s.get_pixel(2, 0), s.get_pixel(0, 0));
        assert_eq!(s.get_pixel(3, 3), WHITE);

        let mut row = Sprite::new(3, 1);
        row.set_pixel(0, 0, RED);
        row.set_pixel(1, 0, GREEN);
        row.set_pixel(2, 0, BLUE);
        row.sample_mode = SampleMode::Periodic;
        assert_eq!(row.get_pixel(-1, 0), BLUE);
        assert_eq!(row.get_pixel(-3, 0), RED);
        assert_eq!(row.get_pixel(-4, -1), BLUE);
    }

    #[test]
    fn clamp_sticks_to_edges() {
        let mut s = checker();
        s.sample_mode = SampleMode::Clamp;
        assert_eq!(s.get_pixel(-5, -5), RED);
        assert_eq!(s.get_pixel(9, 0), GREEN);
    }

    #[test]
    fn empty_sprite_reads_blank() {
        let mut s = Sprite::new(0, 0);
        s.sample_mode = SampleMode::Periodic;
        assert_eq!(s.get_pixel(0, 0), BLANK);
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn sample_maps_unit_square() {
        let s = checker();
        assert_eq!(s.sample(0.0, 0.0), RED);
        assert_eq!(s.sample(0.99, 0.0), GREEN);
        assert_eq!(s.sample(1.0, 1.0), WHITE);
    }

    #[test]
    fn sample_bl_at_texel_centre_is_exact() {
        let s = checker();
        assert_eq!(s.sample_bl(0.25, 0.25), RED);
        assert_eq!(s.sample_bl(0.75, 0.75), WHITE);
    }

    // ── duplicate ─────────────────────────────────────────────────────────

    #[test]
    fn duplicate_region_copies_window() {
        let s = checker();
        let d = s.duplicate_region(Vec2i::new(1, 0), Vec2i::new(1, 2));
        assert_eq!(d.size(), Vec2i::new(1, 2));
        assert_eq!(d.get_pixel(0, 0), GREEN);
        assert_eq!(d.get_pixel(0, 1), WHITE);
    }

    #[test]
    fn flip_flags_combine() {
        let f = Flip::HORIZ | Flip::VERT;
        assert!(f.contains(Flip::HORIZ));
        assert!(f.contains(Flip::VERT));
        assert!(!Flip::NONE.contains(Flip::HORIZ));
    }
}
