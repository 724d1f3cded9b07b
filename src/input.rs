use egui::{Context, Modifiers, PointerButton, Pos2, Rect, Vec2};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer input as the canvas sees it, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        location: InputLocation,
    },
    /// The pointer left the window or the grab was lost mid-gesture.
    PointerGone,
    /// Scroll wheel or trackpad. With the command modifier this is a zoom
    /// request, positive `delta.y` zooming in.
    Wheel {
        location: InputLocation,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn location(&self) -> Option<InputLocation> {
        match self {
            Self::PointerDown { location, .. }
            | Self::PointerUp { location, .. }
            | Self::PointerMove { location }
            | Self::Wheel { location, .. } => Some(*location),
            Self::PointerGone => None,
        }
    }

    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        self.location().is_some_and(|location| location.is_in_canvas)
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

/// Nothing counts as inside the canvas until a rect is set.
impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let modifiers = input.modifiers;
            let hover = input.pointer.hover_pos();

            match hover {
                Some(pos) if Some(pos) != self.last_pointer_pos => {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
                None if self.last_pointer_pos.is_some() => events.push(InputEvent::PointerGone),
                _ => {}
            }
            self.last_pointer_pos = hover;

            for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = hover {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                            modifiers,
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    match hover {
                        Some(pos) => events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                            modifiers,
                        }),
                        // Released outside the window: nothing to drop onto.
                        None => events.push(InputEvent::PointerGone),
                    }
                }
            }

            let Some(pos) = hover else {
                return;
            };
            let zoom = input.zoom_delta();
            if zoom != 1.0 {
                events.push(InputEvent::Wheel {
                    location: self.make_location(pos),
                    delta: Vec2::new(0.0, zoom - 1.0),
                    modifiers: Modifiers::COMMAND,
                });
            } else if input.raw_scroll_delta != Vec2::ZERO {
                events.push(InputEvent::Wheel {
                    location: self.make_location(pos),
                    delta: input.raw_scroll_delta,
                    modifiers,
                });
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn location_tracks_canvas_bounds() {
        let handler = InputHandler::new(Rect::from_min_size(pos2(0.0, 20.0), vec2(100.0, 100.0)));
        assert!(handler.make_location(pos2(50.0, 50.0)).is_in_canvas);
        assert!(!handler.make_location(pos2(50.0, 5.0)).is_in_canvas);
    }

    #[test]
    fn pointer_gone_has_no_location() {
        assert_eq!(InputEvent::PointerGone.location(), None);
        assert!(!InputEvent::PointerGone.is_in_canvas());
    }

    #[test]
    fn raw_input_becomes_pointer_events() {
        let ctx = Context::default();
        let mut handler = InputHandler::new(Rect::from_min_size(Pos2::ZERO, vec2(200.0, 200.0)));
        let raw = egui::RawInput {
            events: vec![
                egui::Event::PointerMoved(pos2(10.0, 10.0)),
                egui::Event::PointerButton {
                    pos: pos2(10.0, 10.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ],
            ..Default::default()
        };
        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| events = handler.process_input(ctx));
        assert!(matches!(events[0], InputEvent::PointerMove { .. }));
        assert!(matches!(
            events[1],
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            }
        ));
    }
}
