use super::Pixel;

/// User blend function: `(x, y, source, destination) -> written pixel`.
pub type CustomPixelFn = Box<dyn Fn(i32, i32, Pixel, Pixel) -> Pixel + Send>;

/// Blending policy for raw pixel writes into a sprite.
#[derive(Default)]
pub enum PixelMode {
    /// Overwrite.
    #[default]
    Normal,
    /// Write only fully opaque pixels.
    Mask,
    /// Blend RGB by `source.a / 255 * blend_factor`; the result is opaque.
    Alpha,
    Custom(CustomPixelFn),
}

impl PixelMode {
    /// Pixel to store at `(x, y)` given the current destination, or `None` to skip the write.
    pub fn resolve(&self, x: i32, y: i32, src: Pixel, dst: Pixel, blend: f32) -> Option<Pixel> {
        match self {
            PixelMode::Normal => Some(src),
            PixelMode::Mask => (src.a == 255).then_some(src),
            PixelMode::Alpha => {
                let a = (src.a as f32 / 255.0) * blend;
                let c = 1.0 - a;
                let r = a * src.r as f32 + c * dst.r as f32;
                let g = a * src.g as f32 + c * dst.g as f32;
                let b = a * src.b as f32 + c * dst.b as f32;
                Some(Pixel::rgb(r as u8, g as u8, b as u8))
            }
            PixelMode::Custom(f) => Some(f(x, y, src, dst)),
        }
    }

    /// `true` when the destination pixel is read during a write.
    pub fn reads_destination(&self) -> bool {
        matches!(self, PixelMode::Alpha | PixelMode::Custom(_))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PixelMode::Custom(_))
    }
}

impl std::fmt::Debug for PixelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelMode::Normal => f.write_str("Normal"),
            PixelMode::Mask => f.write_str("Mask"),
            PixelMode::Alpha => f.write_str("Alpha"),
            PixelMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
