use alo_engine::paint::{Pixel, BLUE, CYAN, DARK_BLUE, DARK_GREY, WHITE};

/// Colours and timings shared by every control in a [`Manager`](crate::Manager).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub normal: Pixel,
    pub hover: Pixel,
    pub click: Pixel,
    pub disable: Pixel,
    pub border: Pixel,
    pub text: Pixel,
    /// Transition units per second while moving Normal -> Hover.
    pub hover_speed_on: f32,
    /// Transition units per second while moving Hover -> Normal.
    pub hover_speed_off: f32,
    /// Slider handle radius.
    pub grab_rad: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            normal: DARK_BLUE,
            hover: BLUE,
            click: CYAN,
            disable: DARK_GREY,
            border: WHITE,
            text: WHITE,
            hover_speed_on: 10.0,
            hover_speed_off: 4.0,
            grab_rad: 8.0,
        }
    }
}
