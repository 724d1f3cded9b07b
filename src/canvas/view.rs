//! Zoom, scrolling and the toggle switch slide.

use egui::{Pos2, Rect, Vec2};

use super::Canvas;
use crate::event::CanvasEvent;
use crate::object::ObjectId;
use crate::viewport::Viewport;

impl Canvas {
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the on-screen area, keeping the view inside the background.
    pub fn set_screen_rect(&mut self, rect: Rect) {
        if self.viewport.screen_rect == rect {
            return;
        }
        self.viewport.screen_rect = rect;
        let extent = self.extent();
        self.viewport.clamp_to(extent);
    }

    /// Scroll by a canvas delta.
    pub fn scroll_by(&mut self, delta: Vec2) {
        let extent = self.extent();
        self.viewport.scroll_by(delta, extent);
    }

    /// Cumulative zoom factor, 1 at creation.
    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// Zoom about the canvas point under `screen`.
    pub fn zoom_at(&mut self, screen: Pos2, zoom_in: bool) -> bool {
        let origin = self.viewport.screen_to_canvas(screen);
        self.zoom_about(origin, zoom_in)
    }

    /// Scale every primitive about `origin` by one zoom step.
    ///
    /// Zooming in stops once the background is taller than the configured
    /// extent; zooming out stops before the background gets narrower than
    /// the view plus the configured margin. Returns `false` when refused.
    pub fn zoom_about(&mut self, origin: Pos2, zoom_in: bool) -> bool {
        let extent = self.extent();
        let factor = if zoom_in {
            if extent.height() > self.config.max_zoomed_extent {
                return false;
            }
            self.config.zoom_in_factor
        } else {
            if extent.width() - self.config.min_zoom_margin < self.viewport.screen_rect.width() {
                return false;
            }
            self.config.zoom_out_factor
        };

        self.cancel_gesture();
        self.finish_animations();

        self.surface.scale([self.background], origin, factor);
        for object in self.objects.values_mut() {
            object.scale(&mut self.surface, origin, factor);
        }
        self.zoom_level *= factor;
        let extent = self.extent();
        self.viewport.clamp_to(extent);

        log::debug!("Zoomed by {factor} about {origin:?}");
        self.status(&format!("Zoom Level: {}", self.zoom_level));
        self.emit(CanvasEvent::ZoomChanged {
            zoom_level: self.zoom_level,
        });
        true
    }

    /// Advance every running slide by one step. Returns `true` while any
    /// slide is still running.
    pub fn tick(&mut self) -> bool {
        for animation in &mut self.animations {
            self.surface.move_by([animation.primitive], animation.step);
            animation.remaining = animation.remaining.saturating_sub(1);
        }
        self.animations.retain(|animation| animation.remaining > 0);
        !self.animations.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Run every slide to the end.
    pub fn finish_animations(&mut self) {
        while self.tick() {}
    }

    pub(super) fn finish_animation_of(&mut self, id: ObjectId) {
        for animation in self.animations.iter_mut().filter(|a| a.object == id) {
            let rest = animation.step * animation.remaining as f32;
            self.surface.move_by([animation.primitive], rest);
            animation.remaining = 0;
        }
        self.animations.retain(|animation| animation.remaining > 0);
    }
}
