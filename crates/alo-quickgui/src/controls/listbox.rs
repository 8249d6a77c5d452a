use alo_engine::coords::Vec2;
use alo_engine::core::Engine;
use alo_engine::input::MouseButton;

use super::Slider;
use crate::painter::{self, ROW_HEIGHT};
use crate::{ControlId, ControlState, Manager, Theme};

/// A scrolling list of strings with one selected row.
///
/// The list scrolls with a vertical [`Slider`] that lives in the list box's own
/// [`Manager`]; its value is the index of the first visible row.
#[derive(Debug, Clone)]
pub struct ListBox {
    pub state: ControlState,
    pub pos: Vec2,
    pub size: Vec2,
    pub has_border: bool,
    pub has_background: bool,
    pub items: Vec<String>,
    pub selected: usize,
    group: Manager,
    scroll: ControlId,
}

impl ListBox {
    /// The scroll bar is sized from `theme.grab_rad`; pass the theme of the manager the
    /// list box will be added to.
    pub fn new(theme: &Theme, items: Vec<String>, pos: Vec2, size: Vec2) -> Self {
        let mut group = Manager::with_theme(*theme);
        let grab = theme.grab_rad;
        let x = pos.x + size.x - grab - 1.0;
        let scroll = group.add(Slider::new(
            Vec2::new(x, pos.y + grab + 1.0),
            Vec2::new(x, pos.y + size.y - grab - 1.0),
            0.0,
            items.len() as f32,
            0.0,
        ));
        Self {
            state: ControlState::default(),
            pos,
            size,
            has_border: true,
            has_background: true,
            items,
            selected: 0,
            group,
            scroll,
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// The scroll bar.
    pub fn scroll_bar(&self) -> Option<&Slider> {
        self.group.slider(self.scroll)
    }

    pub fn scroll_bar_mut(&mut self) -> Option<&mut Slider> {
        self.group.slider_mut(self.scroll)
    }

    fn first_row(&self) -> usize {
        self.scroll_bar().map_or(0.0, |s| s.value) as usize
    }

    fn visible_rows(&self) -> std::ops::Range<usize> {
        let first = self.first_row();
        let fit = ((self.size.y - 4.0) / ROW_HEIGHT) as usize;
        first..(first + fit).min(self.items.len())
    }

    /// Width of the highlight bar, leaving room for the scroll bar.
    fn row_width(&self) -> f32 {
        self.size.x - self.group.theme().grab_rad * 2.0
    }

    pub(crate) fn update(&mut self, engine: &mut Engine) {
        if !self.state.is_live() {
            return;
        }
        let mouse = engine.mouse_pos().to_f32() - self.pos + Vec2::new(2.0, 0.0);
        if engine.get_mouse(MouseButton::Left).pressed
            && mouse.x >= 0.0
            && mouse.x < self.row_width()
            && mouse.y >= 0.0
            && mouse.y < self.size.y
        {
            let row = self.scroll_bar().map_or(0.0, |s| s.value) + mouse.y / ROW_HEIGHT;
            self.selected = row as usize;
        }
        self.selected = self.selected.min(self.items.len().saturating_sub(1));

        let rows = self.items.len() as f32;
        if let Some(scroll) = self.scroll_bar_mut() {
            scroll.max = rows;
        }
        self.group.update(engine);
    }

    pub(crate) fn draw(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        painter::panel(
            engine,
            self.pos,
            self.size,
            self.has_background.then_some(theme.normal),
            self.has_border.then_some(theme.border),
        );

        let mut at = self.pos + Vec2::splat(2.0);
        for idx in self.visible_rows() {
            if idx == self.selected {
                engine.fill_rect(
                    (at - Vec2::splat(1.0)).to_i(),
                    Vec2::new(self.row_width(), ROW_HEIGHT).to_i(),
                    self.group.theme().hover,
                );
            }
            painter::text(engine, at, &self.items[idx], theme.text);
            at.y += ROW_HEIGHT;
        }

        self.group.draw(engine);
    }

    pub(crate) fn draw_decal(&self, engine: &mut Engine, theme: &Theme) {
        if !self.state.visible {
            return;
        }
        painter::panel_decal(engine, self.pos, self.size, self.has_background.then_some(theme.normal), None);

        let mut at = self.pos + Vec2::splat(2.0);
        for idx in self.visible_rows() {
            if idx == self.selected {
                engine.fill_rect_decal(
                    at - Vec2::splat(1.0),
                    Vec2::new(self.row_width(), ROW_HEIGHT),
                    self.group.theme().hover,
                );
            }
            painter::text_decal(engine, at, &self.items[idx], theme.text);
            at.y += ROW_HEIGHT;
        }

        painter::panel_decal(engine, self.pos, self.size, None, self.has_border.then_some(theme.border));
        self.group.draw_decal(engine);
    }
}
