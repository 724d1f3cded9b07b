mod common;

use common::{approx, canvas, drag, item_center, move_to, press, press_with, record_status, release};
use eframe_shapes::{Canvas, InputEvent, ShapeArgs};
use egui::{Modifiers, Pos2, Rect, pos2, vec2};

fn rect_bbox(canvas: &Canvas, tag: &str) -> Rect {
    canvas
        .object(tag)
        .and_then(|object| object.item("GRect"))
        .and_then(|item| item.bbox(canvas.surface()))
        .unwrap()
}

fn bound_rect(canvas: &mut Canvas, tag: &str, at: Pos2) {
    canvas
        .create("GRect", ShapeArgs::new(tag).at(at.x, at.y).size(50.0, 50.0))
        .unwrap();
    canvas.add_mouse_bindings(tag).unwrap();
}

#[test]
fn test_drag_moves_the_object() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "r", pos2(100.0, 100.0));
    let status = record_status(&mut canvas);

    drag(&mut canvas, pos2(125.0, 125.0), pos2(135.0, 140.0));

    assert_eq!(rect_bbox(&canvas, "r").min, pos2(110.0, 115.0));
    assert_eq!(canvas.object("r").unwrap().position(), pos2(110.0, 115.0));
    assert!(!canvas.object("r").unwrap().is_dragging());
    assert_eq!(status.borrow().as_slice(), ["Dragging r at 135x140"]);
}

#[test]
fn test_press_release_without_motion_moves_nothing() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "r", pos2(100.0, 100.0));
    let revision = canvas.surface().revision();

    press(&mut canvas, pos2(125.0, 125.0));
    release(&mut canvas, pos2(125.0, 125.0));

    assert_eq!(rect_bbox(&canvas, "r").min, pos2(100.0, 100.0));
    // Only hover styling may have changed.
    assert!(canvas.object("r").unwrap().item("GRect").unwrap().is_highlighted());
    assert!(canvas.surface().revision() > revision);
}

#[test]
fn test_unbound_objects_ignore_gestures() {
    let mut canvas = canvas();
    canvas
        .create("GRect", ShapeArgs::new("r").at(100.0, 100.0).size(50.0, 50.0))
        .unwrap();

    drag(&mut canvas, pos2(125.0, 125.0), pos2(135.0, 140.0));

    assert_eq!(rect_bbox(&canvas, "r").min, pos2(100.0, 100.0));
    assert!(!canvas.object("r").unwrap().item("GRect").unwrap().is_highlighted());
}

#[test]
fn test_dragging_a_selected_object_moves_the_selection() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "a", pos2(100.0, 100.0));
    bound_rect(&mut canvas, "b", pos2(300.0, 100.0));
    bound_rect(&mut canvas, "c", pos2(500.0, 100.0));
    canvas.select("a").unwrap();
    canvas.select("b").unwrap();

    drag(&mut canvas, pos2(125.0, 125.0), pos2(125.0, 175.0));

    assert_eq!(rect_bbox(&canvas, "a").min, pos2(100.0, 150.0));
    assert_eq!(rect_bbox(&canvas, "b").min, pos2(300.0, 150.0));
    assert_eq!(rect_bbox(&canvas, "c").min, pos2(500.0, 100.0));
}

#[test]
fn test_dragging_an_unselected_object_leaves_the_selection() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "a", pos2(100.0, 100.0));
    bound_rect(&mut canvas, "b", pos2(300.0, 100.0));
    canvas.select("b").unwrap();

    drag(&mut canvas, pos2(125.0, 125.0), pos2(125.0, 175.0));

    assert_eq!(rect_bbox(&canvas, "a").min, pos2(100.0, 150.0));
    assert_eq!(rect_bbox(&canvas, "b").min, pos2(300.0, 100.0));
}

#[test]
fn test_command_click_toggles_selection() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "r", pos2(100.0, 100.0));

    press_with(&mut canvas, pos2(125.0, 125.0), Modifiers::COMMAND);
    release(&mut canvas, pos2(125.0, 125.0));
    assert!(canvas.object("r").unwrap().is_selected());
    assert!(canvas.object("r").unwrap().item("GRect").unwrap().is_selected());

    press_with(&mut canvas, pos2(125.0, 125.0), Modifiers::COMMAND);
    release(&mut canvas, pos2(125.0, 125.0));
    assert!(!canvas.object("r").unwrap().is_selected());
    assert_eq!(rect_bbox(&canvas, "r").min, pos2(100.0, 100.0));
}

#[test]
fn test_pointer_gone_cancels_a_drag() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "r", pos2(100.0, 100.0));

    press(&mut canvas, pos2(125.0, 125.0));
    move_to(&mut canvas, pos2(130.0, 125.0));
    canvas.handle_input(&InputEvent::PointerGone);
    assert!(!canvas.is_busy());
    assert!(!canvas.object("r").unwrap().is_dragging());

    move_to(&mut canvas, pos2(200.0, 200.0));
    assert_eq!(rect_bbox(&canvas, "r").min, pos2(105.0, 100.0));
}

#[test]
fn test_wires_follow_a_dragged_gate() {
    let mut canvas = canvas();
    canvas.create("GNotGate", ShapeArgs::new("a").at(100.0, 100.0)).unwrap();
    canvas.create("GNotGate", ShapeArgs::new("b").at(300.0, 100.0)).unwrap();
    canvas.add_mouse_bindings("b").unwrap();
    canvas
        .create("GWire", ShapeArgs::new("w").endpoints(Pos2::ZERO, Pos2::ZERO))
        .unwrap();
    let out = canvas.node("a", "output").unwrap();
    let input = canvas.node("b", "input").unwrap();
    canvas.connect("w", out, input).unwrap();
    canvas.update_wire("w").unwrap();

    let start = item_center(&canvas, "a", "output_dot");
    assert!(approx(item_center(&canvas, "b", "input_dot"), pos2(285.0, 128.0)));

    // Inside the triangle body.
    drag(&mut canvas, pos2(320.0, 128.0), pos2(320.0, 178.0));

    let [wire_start, wire_end] = canvas.object("w").unwrap().wire_endpoints().unwrap();
    assert!(approx(wire_start, start));
    assert!(approx(wire_end, pos2(285.0, 178.0)));
}

#[test]
fn test_clicking_the_slider_flips_the_switch() {
    let mut canvas = canvas();
    canvas
        .create("GToggleSwitch", ShapeArgs::new("s").at(100.0, 100.0))
        .unwrap();
    canvas.add_mouse_bindings("s").unwrap();

    press(&mut canvas, pos2(140.2, 116.0));
    release(&mut canvas, pos2(140.2, 116.0));
    assert!(canvas.object("s").unwrap().is_on());
    assert!(canvas.is_animating());
}

#[test]
fn test_command_drag_on_bare_canvas_pans() {
    let mut canvas = canvas();
    press_with(&mut canvas, pos2(400.0, 300.0), Modifiers::COMMAND);
    move_to(&mut canvas, pos2(350.0, 280.0));
    release(&mut canvas, pos2(350.0, 280.0));
    assert_eq!(canvas.viewport().scroll, vec2(50.0, 20.0));
}

#[test]
fn test_hover_highlights_and_leaves() {
    let mut canvas = canvas();
    bound_rect(&mut canvas, "r", pos2(100.0, 100.0));

    move_to(&mut canvas, pos2(125.0, 125.0));
    let item = canvas.object("r").unwrap().item("GRect").unwrap();
    assert!(item.is_highlighted());
    let primitive = canvas.surface().get(item.primitive().unwrap()).unwrap();
    assert_eq!(primitive.stroke_width, 5.0);

    move_to(&mut canvas, pos2(400.0, 400.0));
    let item = canvas.object("r").unwrap().item("GRect").unwrap();
    assert!(!item.is_highlighted());
}
