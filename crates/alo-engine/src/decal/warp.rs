use crate::coords::Vec2;

/// Perspective factors for a quad with corners `p[0..4]` in drawing order.
///
/// The diagonals `p0-p2` and `p1-p3` are intersected; each corner's factor is
/// `(d[i] + d[i+2]) / d[i+2]` where `d` is the distance from the intersection.
/// Returns `None` when the diagonals are parallel, which makes the quad undrawable.
pub fn warp_factors(p: &[Vec2; 4]) -> Option<[f32; 4]> {
    let rd = (p[2].x - p[0].x) * (p[3].y - p[1].y) - (p[3].x - p[1].x) * (p[2].y - p[0].y);
    if rd == 0.0 {
        return None;
    }
    let rd = 1.0 / rd;
    let rn = ((p[3].x - p[1].x) * (p[0].y - p[1].y) - (p[3].y - p[1].y) * (p[0].x - p[1].x)) * rd;
    let sn = ((p[2].x - p[0].x) * (p[0].y - p[1].y) - (p[2].y - p[0].y) * (p[0].x - p[1].x)) * rd;

    // A crossing outside either segment leaves the centre at the origin.
    let mut center = Vec2::zero();
    if (0.0..=1.0).contains(&rn) && (0.0..=1.0).contains(&sn) {
        center = p[0] + (p[2] - p[0]) * rn;
    }

    let d = [
        (p[0] - center).mag(),
        (p[1] - center).mag(),
        (p[2] - center).mag(),
        (p[3] - center).mag(),
    ];

    let mut q = [1.0f32; 4];
    for i in 0..4 {
        let opposite = d[(i + 2) & 3];
        if d[i] != 0.0 && opposite != 0.0 {
            q[i] = (d[i] + opposite) / opposite;
        }
    }
    Some(q)
}
