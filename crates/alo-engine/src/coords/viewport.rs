use super::{Vec2, Vec2i};

/// Region of the window that the screen is presented into, in physical window pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub pos: Vec2i,
    pub size: Vec2i,
}

impl Viewport {
    #[inline]
    pub const fn new(pos: Vec2i, size: Vec2i) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.size.x > 0 && self.size.y > 0
    }

    /// Fits `screen * pixel` into `window`.
    ///
    /// With `cohesion` the view is the largest whole multiple of the screen that fits, so
    /// every screen pixel covers the same number of window pixels. Otherwise the view keeps
    /// the aspect ratio and letterboxes. Either way the view is centred.
    ///
    /// Returns the viewport and the effective size of one screen pixel (only updated in
    /// cohesion mode, `None` otherwise).
    pub fn fit(window: Vec2i, screen: Vec2i, pixel: Vec2i, cohesion: bool) -> (Self, Option<Vec2i>) {
        let ww = screen.x * pixel.x;
        let wh = screen.y * pixel.y;
        let aspect = ww as f32 / wh.max(1) as f32;

        let mut screen_pixel = None;
        let size = if cohesion && screen.x > 0 && screen.y > 0 {
            let per = window / screen;
            screen_pixel = Some(per);
            per * screen
        } else {
            let mut size = Vec2i::new(window.x, (window.x as f32 / aspect) as i32);
            if size.y > window.y {
                size.y = window.y;
                size.x = (window.y as f32 * aspect) as i32;
            }
            size
        };

        (Self::new((window - size) / 2, size), screen_pixel)
    }

    /// Maps a window-space position to a screen pixel, clamped to `[0, screen - 1]`.
    pub fn window_to_screen(self, window_pos: Vec2i, window: Vec2i, screen: Vec2i) -> Vec2i {
        let span = window - self.pos * 2;
        let rel = Vec2::from(window_pos - self.pos);
        let x = (rel.x / span.x.max(1) as f32 * screen.x as f32) as i32;
        let y = (rel.y / span.y.max(1) as f32 * screen.y as f32) as i32;
        Vec2i::new(
            x.clamp(0, (screen.x - 1).max(0)),
            y.clamp(0, (screen.y - 1).max(0)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> Vec2i { Vec2i::new(x, y) }

    // ── fit ───────────────────────────────────────────────────────────────

    #[test]
    fn fit_exact_window_fills_everything() {
        let (vp, px) = Viewport::fit(v(640, 480), v(320, 240), v(2, 2), false);
        assert_eq!(vp, Viewport::new(v(0, 0), v(640, 480)));
        assert_eq!(px, None);
    }

    #[test]
    fn fit_wide_window_letterboxes_horizontally() {
        let (vp, _) = Viewport::fit(v(800, 300), v(100, 100), v(1, 1), false);
        assert_eq!(vp.size, v(300, 300));
        assert_eq!(vp.pos, v(250, 0));
    }

    #[test]
    fn fit_tall_window_letterboxes_vertically() {
        let (vp, _) = Viewport::fit(v(200, 600), v(100, 50), v(1, 1), false);
        assert_eq!(vp.size, v(200, 100));
        assert_eq!(vp.pos, v(0, 250));
    }

    #[test]
    fn fit_cohesion_uses_whole_multiples() {
        let (vp, px) = Viewport::fit(v(700, 500), v(100, 100), v(1, 1), true);
        assert_eq!(px, Some(v(7, 5)));
        assert_eq!(vp.size, v(700, 500));
        assert_eq!(vp.pos, v(0, 0));
    }

    // ── window_to_screen ──────────────────────────────────────────────────

    #[test]
    fn window_to_screen_scales_through_view() {
        let window = v(640, 480);
        let (vp, _) = Viewport::fit(window, v(320, 240), v(2, 2), false);
        assert_eq!(vp.window_to_screen(v(320, 240), window, v(320, 240)), v(160, 120));
    }

    #[test]
    fn window_to_screen_clamps_outside_view() {
        let window = v(800, 300);
        let (vp, _) = Viewport::fit(window, v(100, 100), v(1, 1), false);
        assert_eq!(vp.window_to_screen(v(0, 0), window, v(100, 100)), v(0, 0));
        assert_eq!(vp.window_to_screen(v(799, 299), window, v(100, 100)), v(99, 99));
    }
}
