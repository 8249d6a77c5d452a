use alo_engine::paint::{
    pixel_lerp, Pixel, BLACK, BLUE, CYAN, DARK_BLUE, DARK_GREEN, GREEN, VERY_DARK_BLUE, WHITE, YELLOW,
};

/// Built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stock {
    #[default]
    Empty,
    Greyscale,
    ColdHot,
    Spectrum,
}

/// A colour ramp: control points at positions in `[0, 1]`, kept sorted by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    stops: Vec<(f32, Pixel)>,
}

impl Palette {
    pub fn new(stock: Stock) -> Self {
        let stops = match stock {
            Stock::Empty => Vec::new(),
            Stock::Greyscale => vec![(0.0, BLACK), (1.0, WHITE)],
            Stock::ColdHot => vec![(0.0, CYAN), (0.5, BLACK), (1.0, YELLOW)],
            Stock::Spectrum => vec![
                (0.0 / 6.0, DARK_BLUE),
                (1.0 / 6.0, BLUE),
                (2.0 / 6.0, CYAN),
                (3.0 / 6.0, WHITE),
                (4.0 / 6.0, GREEN),
                (5.0 / 6.0, DARK_GREEN),
                (6.0 / 6.0, VERY_DARK_BLUE),
            ],
        };
        Self { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Control point `i` as `(position, colour)`.
    pub fn index(&self, i: usize) -> Option<(f32, Pixel)> {
        self.stops.get(i).copied()
    }

    /// Sets the colour at position `d` (clamped to `[0, 1]`), replacing an existing point
    /// at exactly that position.
    pub fn set_colour(&mut self, d: f32, col: Pixel) {
        let d = d.clamp(0.0, 1.0);
        match self.stops.iter_mut().find(|(pos, _)| *pos == d) {
            Some(stop) => stop.1 = col,
            None => {
                let at = self.stops.partition_point(|(pos, _)| *pos < d);
                self.stops.insert(at, (d, col));
            }
        }
    }

    /// Colour at `t`, wrapping every whole unit.
    ///
    /// Positive whole numbers map to the end of the ramp rather than the start, so
    /// `sample(1.0)` is the last control point and `sample(1.25) == sample(0.25)`.
    /// Between control points the colour is interpolated linearly.
    pub fn sample(&self, t: f32) -> Pixel {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return BLACK,
        };
        if self.stops.len() == 1 {
            return first.1;
        }

        let mut i = t.rem_euclid(1.0);
        if i == 0.0 && t > 0.0 {
            i = 1.0;
        }

        let next = self.stops.partition_point(|(pos, _)| i > *pos);
        match next {
            0 => first.1,
            n if n >= self.stops.len() => last.1,
            n => {
                let (p0, c0) = self.stops[n - 1];
                let (p1, c1) = self.stops[n];
                pixel_lerp(c0, c1, (i - p0) / (p1 - p0))
            }
        }
    }
}
