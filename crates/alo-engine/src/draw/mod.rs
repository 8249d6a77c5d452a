//! Drawing operations on the engine.
//!
//! Raster operations write into the current pixel target through a [`Canvas`]. Decal
//! operations convert to device coordinates immediately and queue one instance on the
//! current target layer.

mod decal;
mod raster;
mod text;

pub use raster::{clip_line, Canvas, ALL_OCTANTS, SOLID};
pub use text::{text_size, text_size_prop, TAB_SIZE_IN_SPACES};

use crate::coords::Vec2i;
use crate::core::Engine;
use crate::paint::Pixel;
use crate::sprite::{Flip, Sprite};

impl Engine {
    /// Plots one pixel into the current target under the pixel mode.
    pub fn draw(&mut self, pos: Vec2i, p: Pixel) -> bool {
        self.canvas().is_some_and(|mut c| c.draw(pos.x, pos.y, p))
    }

    pub fn draw_line(&mut self, a: Vec2i, b: Vec2i, p: Pixel) {
        self.draw_line_pattern(a, b, p, SOLID);
    }

    pub fn draw_line_pattern(&mut self, a: Vec2i, b: Vec2i, p: Pixel, pattern: u32) {
        if let Some(mut c) = self.canvas() {
            c.draw_line(a, b, p, pattern);
        }
    }

    pub fn draw_circle(&mut self, center: Vec2i, radius: i32, p: Pixel) {
        self.draw_circle_masked(center, radius, p, ALL_OCTANTS);
    }

    pub fn draw_circle_masked(&mut self, center: Vec2i, radius: i32, p: Pixel, mask: u8) {
        if let Some(mut c) = self.canvas() {
            c.draw_circle(center, radius, p, mask);
        }
    }

    pub fn fill_circle(&mut self, center: Vec2i, radius: i32, p: Pixel) {
        if let Some(mut c) = self.canvas() {
            c.fill_circle(center, radius, p);
        }
    }

    pub fn draw_rect(&mut self, pos: Vec2i, size: Vec2i, p: Pixel) {
        if let Some(mut c) = self.canvas() {
            c.draw_rect(pos, size, p);
        }
    }

    pub fn fill_rect(&mut self, pos: Vec2i, size: Vec2i, p: Pixel) {
        if let Some(mut c) = self.canvas() {
            c.fill_rect(pos, size, p);
        }
    }

    pub fn draw_triangle(&mut self, a: Vec2i, b: Vec2i, c: Vec2i, p: Pixel) {
        if let Some(mut cv) = self.canvas() {
            cv.draw_triangle(a, b, c, p);
        }
    }

    pub fn fill_triangle(&mut self, a: Vec2i, b: Vec2i, c: Vec2i, p: Pixel) {
        if let Some(mut cv) = self.canvas() {
            cv.fill_triangle(a, b, c, p);
        }
    }

    pub fn draw_sprite(&mut self, pos: Vec2i, sprite: &Sprite, scale: u32, flip: Flip) {
        if let Some(mut c) = self.canvas() {
            c.draw_sprite(pos, sprite, scale, flip);
        }
    }

    pub fn draw_partial_sprite(
        &mut self,
        pos: Vec2i,
        sprite: &Sprite,
        src: Vec2i,
        size: Vec2i,
        scale: u32,
        flip: Flip,
    ) {
        if let Some(mut c) = self.canvas() {
            c.draw_partial_sprite(pos, sprite, src, size, scale, flip);
        }
    }

    /// Fills the whole pixel target.
    pub fn clear(&mut self, p: Pixel) {
        if let Some(mut c) = self.canvas() {
            c.clear(p);
        }
    }

    /// Clips `a → b` to the screen. Returns `false` if nothing of it is visible.
    pub fn clip_line_to_screen(&self, a: &mut Vec2i, b: &mut Vec2i) -> bool {
        clip_line(a, b, self.screen_size)
    }
}
