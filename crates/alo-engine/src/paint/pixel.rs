use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// Alpha written by [`Pixel::default`] and by opaque constructors.
pub const DEFAULT_ALPHA: u8 = 0xFF;

/// 32-bit RGBA colour with 8-bit straight-alpha channels.
///
/// Memory layout is `r, g, b, a`, so [`Pixel::to_u32`] packs as
/// `r | g << 8 | b << 16 | a << 24` on little-endian targets and
/// `&[Pixel]` can be uploaded as `Rgba8Unorm` texels directly.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, DEFAULT_ALPHA)
    }

    /// Builds a pixel from floats in `[0, 1]`. Values are truncated, not rounded.
    #[inline]
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, (a * 255.0) as u8)
    }

    #[inline]
    pub const fn from_u32(n: u32) -> Self {
        Self::rgba(n as u8, (n >> 8) as u8, (n >> 16) as u8, (n >> 24) as u8)
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16 | (self.a as u32) << 24
    }

    /// RGB inverted, alpha kept.
    #[inline]
    pub const fn inv(self) -> Self {
        Self::rgba(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Channels as normalized floats, for GPU clear colours.
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Pixel {
    #[inline]
    fn default() -> Self {
        Self::rgba(0, 0, 0, DEFAULT_ALPHA)
    }
}

#[inline]
fn scale_channel(c: u8, f: f32) -> u8 {
    (c as f32 * f).clamp(0.0, 255.0) as u8
}

impl Mul<f32> for Pixel {
    type Output = Pixel;
    #[inline]
    fn mul(self, i: f32) -> Pixel {
        Pixel::rgba(scale_channel(self.r, i), scale_channel(self.g, i), scale_channel(self.b, i), self.a)
    }
}

impl MulAssign<f32> for Pixel {
    #[inline]
    fn mul_assign(&mut self, i: f32) {
        *self = *self * i;
    }
}

impl Div<f32> for Pixel {
    type Output = Pixel;
    #[inline]
    fn div(self, i: f32) -> Pixel {
        Pixel::rgba(
            (self.r as f32 / i).clamp(0.0, 255.0) as u8,
            (self.g as f32 / i).clamp(0.0, 255.0) as u8,
            (self.b as f32 / i).clamp(0.0, 255.0) as u8,
            self.a,
        )
    }
}

impl DivAssign<f32> for Pixel {
    #[inline]
    fn div_assign(&mut self, i: f32) {
        *self = *self / i;
    }
}

/// Saturating per-channel sum; the left-hand alpha is kept.
impl Add for Pixel {
    type Output = Pixel;
    #[inline]
    fn add(self, p: Pixel) -> Pixel {
        Pixel::rgba(
            self.r.saturating_add(p.r),
            self.g.saturating_add(p.g),
            self.b.saturating_add(p.b),
            self.a,
        )
    }
}

impl AddAssign for Pixel {
    #[inline]
    fn add_assign(&mut self, p: Pixel) {
        *self = *self + p;
    }
}

/// Saturating per-channel difference; the left-hand alpha is kept.
impl Sub for Pixel {
    type Output = Pixel;
    #[inline]
    fn sub(self, p: Pixel) -> Pixel {
        Pixel::rgba(
            self.r.saturating_sub(p.r),
            self.g.saturating_sub(p.g),
            self.b.saturating_sub(p.b),
            self.a,
        )
    }
}

impl SubAssign for Pixel {
    #[inline]
    fn sub_assign(&mut self, p: Pixel) {
        *self = *self - p;
    }
}

/// `p2 * t + p1 * (1 - t)`. Alpha comes from `p2`.
#[inline]
pub fn pixel_lerp(p1: Pixel, p2: Pixel, t: f32) -> Pixel {
    (p2 * t) + p1 * (1.0 - t)
}

pub const GREY: Pixel = Pixel::rgb(192, 192, 192);
pub const DARK_GREY: Pixel = Pixel::rgb(128, 128, 128);
pub const VERY_DARK_GREY: Pixel = Pixel::rgb(64, 64, 64);
pub const RED: Pixel = Pixel::rgb(255, 0, 0);
pub const DARK_RED: Pixel = Pixel::rgb(128, 0, 0);
pub const VERY_DARK_RED: Pixel = Pixel::rgb(64, 0, 0);
pub const YELLOW: Pixel = Pixel::rgb(255, 255, 0);
pub const DARK_YELLOW: Pixel = Pixel::rgb(128, 128, 0);
pub const VERY_DARK_YELLOW: Pixel = Pixel::rgb(64, 64, 0);
pub const GREEN: Pixel = Pixel::rgb(0, 255, 0);
pub const DARK_GREEN: Pixel = Pixel::rgb(0, 128, 0);
pub const VERY_DARK_GREEN: Pixel = Pixel::rgb(0, 64, 0);
pub const CYAN: Pixel = Pixel::rgb(0, 255, 255);
pub const DARK_CYAN: Pixel = Pixel::rgb(0, 128, 128);
pub const VERY_DARK_CYAN: Pixel = Pixel::rgb(0, 64, 64);
pub const BLUE: Pixel = Pixel::rgb(0, 0, 255);
pub const DARK_BLUE: Pixel = Pixel::rgb(0, 0, 128);
pub const VERY_DARK_BLUE: Pixel = Pixel::rgb(0, 0, 64);
pub const MAGENTA: Pixel = Pixel::rgb(255, 0, 255);
pub const DARK_MAGENTA: Pixel = Pixel::rgb(128, 0, 128);
pub const VERY_DARK_MAGENTA: Pixel = Pixel::rgb(64, 0, 64);
pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
pub const BLANK: Pixel = Pixel::rgba(0, 0, 0, 0);
