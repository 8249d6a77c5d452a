use alo_engine::coords::Vec2;

/// Vertices in a unit circle outline.
pub const CIRCLE_VERTS: usize = 64;

/// `verts` points on the unit circle; the last one closes back onto the first.
pub fn unit_circle(verts: usize) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / (verts.max(2) - 1) as f32;
    (0..verts)
        .map(|i| {
            let a = step * i as f32;
            Vec2::new(a.cos(), a.sin())
        })
        .collect()
}

/// A fixed outer gear with a moving inner gear rolling inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gears {
    pub fixed_radius: f32,
    /// Negative radii roll the gear on the outside of the track.
    pub moving_radius: f32,
    /// Pen distance from the moving gear's centre.
    pub pen_radius: f32,
}

/// Where everything is at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Moving gear centre, relative to the fixed gear centre.
    pub moving_centre: Vec2,
    /// Pen position, relative to the moving gear centre.
    pub pen_offset: Vec2,
}

impl Gears {
    pub fn pose(&self, t: f32) -> Pose {
        let track = self.fixed_radius - self.moving_radius;
        let ratio = if self.moving_radius == 0.0 { 0.0 } else { self.fixed_radius / self.moving_radius };
        // The pen turns against the direction of travel.
        let spin = -t * ratio;
        Pose {
            moving_centre: Vec2::new(track * t.cos(), track * t.sin()),
            pen_offset: Vec2::new(self.pen_radius * spin.cos(), self.pen_radius * spin.sin()),
        }
    }
}

impl Pose {
    pub fn pen(&self, centre: Vec2) -> Vec2 {
        centre + self.moving_centre + self.pen_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).mag() < 1e-3
    }

    #[test]
    fn unit_circle_is_closed() {
        let c = unit_circle(CIRCLE_VERTS);
        assert_eq!(c.len(), CIRCLE_VERTS);
        assert!(close(c[0], Vec2::new(1.0, 0.0)));
        assert!(close(c[CIRCLE_VERTS - 1], c[0]));
        assert!(c.iter().all(|v| (v.mag() - 1.0).abs() < 1e-5));
    }

    #[test]
    fn pose_at_start() {
        let g = Gears { fixed_radius: 200.0, moving_radius: 77.0, pen_radius: 65.0 };
        let p = g.pose(0.0);
        assert!(close(p.moving_centre, Vec2::new(123.0, 0.0)));
        assert!(close(p.pen_offset, Vec2::new(65.0, 0.0)));
        assert!(close(p.pen(Vec2::new(960.0, 540.0)), Vec2::new(1148.0, 540.0)));
    }

    #[test]
    fn pen_turns_against_travel() {
        let g = Gears { fixed_radius: 200.0, moving_radius: 100.0, pen_radius: 10.0 };
        let quarter = std::f32::consts::FRAC_PI_4;
        let p = g.pose(quarter);
        assert!(p.moving_centre.y > 0.0);
        assert!(p.pen_offset.y < 0.0);
        assert!(close(p.pen_offset, Vec2::new(0.0, -10.0)));
    }

    #[test]
    fn zero_moving_radius_stays_finite() {
        let g = Gears { fixed_radius: 200.0, moving_radius: 0.0, pen_radius: 65.0 };
        assert!(g.pose(3.0).pen(Vec2::zero()).is_finite());
    }
}
