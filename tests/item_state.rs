mod common;

use common::{canvas, move_to};
use eframe_shapes::{Canvas, ShapeArgs, palette};
use egui::{Pos2, pos2, vec2};

fn primitive_of(canvas: &Canvas, tag: &str, item: &str) -> eframe_shapes::PrimitiveId {
    canvas
        .object(tag)
        .and_then(|object| object.item(item))
        .and_then(|item| item.primitive())
        .unwrap()
}

fn highlighted(canvas: &Canvas, tag: &str, item: &str) -> bool {
    canvas.object(tag).unwrap().item(item).unwrap().is_highlighted()
}

#[test]
fn test_hide_twice_touches_the_surface_once() {
    let mut canvas = canvas();
    canvas
        .create("GOval", ShapeArgs::new("o").at(10.0, 10.0).size(20.0, 20.0))
        .unwrap();

    canvas.hide("o").unwrap();
    let revision = canvas.surface().revision();
    let primitive = primitive_of(&canvas, "o", "GOval");
    assert!(!canvas.surface().get(primitive).unwrap().visible);

    canvas.hide("o").unwrap();
    assert_eq!(canvas.surface().revision(), revision);

    canvas.show("o").unwrap();
    assert!(canvas.surface().get(primitive).unwrap().visible);
    assert!(canvas.surface().revision() > revision);
}

#[test]
fn test_highlight_group_lights_body_and_bubble_together() {
    let mut canvas = canvas();
    canvas.create("GNotGate", ShapeArgs::new("not").at(100.0, 100.0)).unwrap();

    let body = primitive_of(&canvas, "not", "body");
    let bubble = primitive_of(&canvas, "not", "not_dot");

    assert!(canvas.enter_item(body));
    assert!(highlighted(&canvas, "not", "body"));
    assert!(highlighted(&canvas, "not", "not_dot"));
    assert!(!highlighted(&canvas, "not", "output_dot"));

    canvas.leave_item(body);
    assert!(!highlighted(&canvas, "not", "body"));
    assert!(!highlighted(&canvas, "not", "not_dot"));

    canvas.enter_item(bubble);
    assert!(highlighted(&canvas, "not", "body"));
    assert!(highlighted(&canvas, "not", "not_dot"));
    canvas.leave_item(bubble);
    assert!(!highlighted(&canvas, "not", "body"));
}

#[test]
fn test_highlight_uses_the_active_outline() {
    let mut canvas = canvas();
    canvas.create("GAndGate", ShapeArgs::new("and").at(100.0, 100.0)).unwrap();
    let dot = primitive_of(&canvas, "and", "output_dot");

    canvas.enter_item(dot);
    let primitive = canvas.surface().get(dot).unwrap();
    assert_eq!(primitive.stroke_color, palette::ACTIVE_OUTLINE);
    assert_eq!(primitive.stroke_width, 5.0);

    canvas.leave_item(dot);
    let primitive = canvas.surface().get(dot).unwrap();
    assert_eq!(primitive.stroke_color, palette::OUTLINE);
    assert_eq!(primitive.stroke_width, 2.0);
}

#[test]
fn test_dots_do_not_show_selection() {
    let mut canvas = canvas();
    canvas.create("GAndGate", ShapeArgs::new("and").at(100.0, 100.0)).unwrap();
    canvas.select("and").unwrap();

    let gate = canvas.object("and").unwrap();
    let dot = gate.item("output_dot").unwrap();
    assert!(dot.is_selected());
    assert_eq!(dot.current_fill_color(), palette::FILL);
    assert_eq!(gate.item("body").unwrap().current_fill_color(), palette::SELECTED_FILL);
}

#[test]
fn test_background_is_never_hovered() {
    let mut canvas = canvas();
    canvas
        .create("GGraphPaper", ShapeArgs::new("paper").at(0.0, 0.0).size(100.0, 100.0))
        .unwrap();
    canvas.add_mouse_bindings("paper").unwrap();
    let sheet = primitive_of(&canvas, "paper", "background_rect");

    assert!(!canvas.enter_item(sheet));
    move_to(&mut canvas, pos2(50.0, 50.0));
    assert!(!highlighted(&canvas, "paper", "background_rect"));
}

#[test]
fn test_hover_raises_the_object() {
    let mut canvas = canvas();
    canvas
        .create("GRect", ShapeArgs::new("under").at(100.0, 100.0).size(60.0, 60.0))
        .unwrap();
    canvas
        .create("GRect", ShapeArgs::new("over").at(130.0, 130.0).size(60.0, 60.0))
        .unwrap();
    let under = primitive_of(&canvas, "under", "GRect");
    let over = primitive_of(&canvas, "over", "GRect");
    let surface = canvas.surface();
    assert!(surface.stacking_index(under) < surface.stacking_index(over));

    canvas.enter_item(under);
    let surface = canvas.surface();
    assert!(surface.stacking_index(under) > surface.stacking_index(over));
}

#[test]
fn test_hover_keeps_attached_wires_on_top() {
    let mut canvas = canvas();
    canvas.create("GBufferGate", ShapeArgs::new("a").at(100.0, 100.0)).unwrap();
    canvas.create("GBufferGate", ShapeArgs::new("b").at(300.0, 100.0)).unwrap();
    canvas
        .create("GWire", ShapeArgs::new("w").endpoints(Pos2::ZERO, Pos2::ZERO))
        .unwrap();
    let out = canvas.node("a", "output").unwrap();
    let input = canvas.node("b", "input").unwrap();
    canvas.connect("w", out, input).unwrap();
    canvas.update_wire("w").unwrap();

    let body = primitive_of(&canvas, "b", "body");
    let dot = primitive_of(&canvas, "b", "input_dot");
    canvas.enter_item(body);

    let surface = canvas.surface();
    let top = surface.stacking_index(body).max(surface.stacking_index(dot));
    for item in canvas.object("w").unwrap().items() {
        let wire = item.primitive().unwrap();
        assert!(surface.stacking_index(wire) > top);
    }
}

#[test]
fn test_set_outline_width_reaches_every_item() {
    let mut canvas = canvas();
    canvas.create("GOrGate", ShapeArgs::new("or").at(100.0, 100.0)).unwrap();
    canvas.set_outline_width("or", 3.0).unwrap();
    canvas.set_active_outline_width("or", 6.0).unwrap();

    for item in canvas.object("or").unwrap().items() {
        assert_eq!(item.outline_width(), 3.0);
        let primitive = canvas.surface().get(item.primitive().unwrap()).unwrap();
        assert_eq!(primitive.stroke_width, 3.0);
    }
    let body = canvas.object("or").unwrap().item("body").unwrap();
    assert_eq!(body.active_outline_width(), 6.0);
}

#[test]
fn test_points_follow_a_moved_polygon() {
    let mut canvas = canvas();
    let coords = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 10.0)];
    canvas.create("GPolygon", ShapeArgs::new("p").coords(coords)).unwrap();
    canvas.move_object("p", vec2(100.0, 0.0)).unwrap();

    let item = canvas.object("p").unwrap().item("GPolygon").unwrap();
    assert_eq!(
        item.points(canvas.surface()),
        vec![pos2(100.0, 0.0), pos2(110.0, 0.0), pos2(105.0, 10.0)]
    );
}
