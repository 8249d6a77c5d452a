use anyhow::Context;

use crate::coords::Vec2i;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Shown in the window title.
    pub app_name: String,
    /// Logical screen resolution.
    pub screen_size: Vec2i,
    /// Window pixels per screen pixel.
    pub pixel_size: Vec2i,
    pub full_screen: bool,
    pub vsync: bool,
    /// Scale the view by whole multiples of the screen only.
    pub cohesion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "alo-engine".to_string(),
            screen_size: Vec2i::new(256, 240),
            pixel_size: Vec2i::new(4, 4),
            full_screen: false,
            vsync: false,
            cohesion: false,
        }
    }
}

impl EngineConfig {
    pub fn new(app_name: impl Into<String>, screen_w: i32, screen_h: i32, pixel_w: i32, pixel_h: i32) -> Self {
        Self {
            app_name: app_name.into(),
            screen_size: Vec2i::new(screen_w, screen_h),
            pixel_size: Vec2i::new(pixel_w, pixel_h),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.screen_size.x > 0 && self.screen_size.y > 0,
            "screen size must be positive, got {}x{}",
            self.screen_size.x,
            self.screen_size.y
        );
        anyhow::ensure!(
            self.pixel_size.x > 0 && self.pixel_size.y > 0,
            "pixel size must be positive, got {}x{}",
            self.pixel_size.x,
            self.pixel_size.y
        );
        check_area(self.screen_size)?;
        let window = self
            .screen_size
            .x
            .checked_mul(self.pixel_size.x)
            .zip(self.screen_size.y.checked_mul(self.pixel_size.y))
            .map(|(w, h)| Vec2i::new(w, h))
            .context("window size (screen size times pixel size) is too large")?;
        check_area(window)?;
        Ok(())
    }
}

/// Fails when a `w × h` buffer would not be addressable with `i32` pixel indices.
pub(crate) fn check_area(size: Vec2i) -> anyhow::Result<()> {
    let checked = size.x.checked_mul(size.y);
    anyhow::ensure!(checked.is_some(), "{}x{} pixels is too large", size.x, size.y);
    Ok(())
}
