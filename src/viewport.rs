use egui::{Pos2, Rect, Vec2};

/// The visible window onto a canvas.
///
/// Holds the scroll offset (canvas position shown at the top-left of the
/// screen rect) and the screen rect itself. Zoom is not part of the viewport:
/// zooming rescales primitive coordinates directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll: Vec2,
    pub screen_rect: Rect,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl Viewport {
    pub fn new(screen_rect: Rect) -> Self {
        Self {
            scroll: Vec2::ZERO,
            screen_rect,
        }
    }

    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        screen - self.screen_rect.min.to_vec2() + self.scroll
    }

    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        canvas - self.scroll + self.screen_rect.min.to_vec2()
    }

    /// Canvas-space rectangle currently on screen.
    pub fn visible_canvas_rect(&self) -> Rect {
        Rect::from_min_size(self.scroll.to_pos2(), self.screen_rect.size())
    }

    /// Scroll by a screen delta, clamped so the view stays within `extent`.
    pub fn scroll_by(&mut self, delta: Vec2, extent: Rect) {
        self.scroll += delta;
        self.clamp_to(extent);
    }

    pub fn clamp_to(&mut self, extent: Rect) {
        let size = self.screen_rect.size();
        let max_x = (extent.max.x - size.x).max(extent.min.x);
        let max_y = (extent.max.y - size.y).max(extent.min.y);
        self.scroll.x = self.scroll.x.clamp(extent.min.x, max_x);
        self.scroll.y = self.scroll.y.clamp(extent.min.y, max_y);
    }
}
