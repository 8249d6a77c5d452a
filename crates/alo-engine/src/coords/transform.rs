use super::Vec2;

/// Screen position (top-left origin, +Y down) to normalized device coordinates.
///
/// `inv_screen` is `(1/W, 1/H)`.
#[inline]
pub fn screen_to_ndc(p: Vec2, inv_screen: Vec2) -> Vec2 {
    Vec2::new(
        (p.x * inv_screen.x) * 2.0 - 1.0,
        -((p.y * inv_screen.y) * 2.0 - 1.0),
    )
}

/// Inverse of [`screen_to_ndc`] for a screen of `screen` size.
#[inline]
pub fn ndc_to_screen(ndc: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * screen.x,
        (1.0 - ndc.y) * 0.5 * screen.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: Vec2 = Vec2::new(1920.0, 1080.0);

    fn inv(s: Vec2) -> Vec2 { Vec2::new(1.0 / s.x, 1.0 / s.y) }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn corners_and_centre() {
        assert!(close(screen_to_ndc(Vec2::new(0.0, 0.0), inv(HD)), Vec2::new(-1.0, 1.0)));
        assert!(close(screen_to_ndc(Vec2::new(1920.0, 1080.0), inv(HD)), Vec2::new(1.0, -1.0)));
        assert!(close(screen_to_ndc(Vec2::new(960.0, 540.0), inv(HD)), Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn round_trip_recovers_screen_position() {
        for &(x, y) in &[(0.0, 0.0), (13.5, 700.25), (1919.0, 1.0), (-40.0, 2000.0)] {
            let p = Vec2::new(x, y);
            assert!(close(ndc_to_screen(screen_to_ndc(p, inv(HD)), HD), p));
        }
    }
}
