//! The built-in control kinds.

mod button;
mod checkbox;
mod label;
mod listbox;
mod slider;
mod textbox;

pub use button::Button;
pub use checkbox::CheckBox;
pub use label::Label;
pub use listbox::ListBox;
pub use slider::Slider;
pub use textbox::TextBox;

use alo_engine::coords::Vec2;

/// Half-open hit test of `p` against the box at `pos`/`size`.
pub(crate) fn contains(pos: Vec2, size: Vec2, p: Vec2) -> bool {
    p.x >= pos.x && p.x < pos.x + size.x && p.y >= pos.y && p.y < pos.y + size.y
}
