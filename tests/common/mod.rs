#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use eframe_shapes::{Canvas, CanvasConfig, CanvasEvent, InputEvent, InputLocation};
use egui::{Modifiers, PointerButton, Pos2};

pub fn canvas() -> Canvas {
    Canvas::with_builtins(CanvasConfig::default())
}

fn at(position: Pos2) -> InputLocation {
    InputLocation {
        position,
        is_in_canvas: true,
    }
}

pub fn press_with(canvas: &mut Canvas, pos: Pos2, modifiers: Modifiers) {
    canvas.handle_input(&InputEvent::PointerDown {
        location: at(pos),
        button: PointerButton::Primary,
        modifiers,
    });
}

pub fn press(canvas: &mut Canvas, pos: Pos2) {
    press_with(canvas, pos, Modifiers::NONE);
}

pub fn move_to(canvas: &mut Canvas, pos: Pos2) {
    canvas.handle_input(&InputEvent::PointerMove { location: at(pos) });
}

pub fn release(canvas: &mut Canvas, pos: Pos2) {
    canvas.handle_input(&InputEvent::PointerUp {
        location: at(pos),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    });
}

pub fn drag(canvas: &mut Canvas, from: Pos2, to: Pos2) {
    press(canvas, from);
    move_to(canvas, to);
    release(canvas, to);
}

/// Collects every status message the canvas pushes.
pub fn record_status(canvas: &mut Canvas) -> Rc<RefCell<Vec<String>>> {
    let messages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&messages);
    canvas.register_status_sink(Box::new(move |message: &str| {
        sink.borrow_mut().push(message.to_owned());
    }));
    messages
}

pub fn drain_events(canvas: &mut Canvas) -> Vec<CanvasEvent> {
    std::iter::from_fn(|| canvas.poll_event())
        .map(|envelope| envelope.event)
        .collect()
}

pub fn item_center(canvas: &Canvas, tag: &str, item: &str) -> Pos2 {
    canvas
        .object(tag)
        .and_then(|object| object.item(item))
        .and_then(|item| item.center_point(canvas.surface()))
        .unwrap()
}

pub fn approx(a: Pos2, b: Pos2) -> bool {
    (a - b).length() < 1e-3
}
