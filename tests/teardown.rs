mod common;

use common::{canvas, drain_events, move_to, press, release};
use eframe_shapes::{Canvas, CanvasEvent, ShapeArgs, ShapeError};
use egui::{Pos2, pos2};

fn wired_pair() -> Canvas {
    let mut canvas = canvas();
    canvas.create("GNotGate", ShapeArgs::new("a").at(100.0, 100.0)).unwrap();
    canvas.create("GNotGate", ShapeArgs::new("b").at(300.0, 100.0)).unwrap();
    canvas
        .create("GWire", ShapeArgs::new("w").endpoints(Pos2::ZERO, Pos2::ZERO))
        .unwrap();
    let out = canvas.node("a", "output").unwrap();
    let input = canvas.node("b", "input").unwrap();
    canvas.connect("w", out, input).unwrap();
    canvas.update_wire("w").unwrap();
    drain_events(&mut canvas);
    canvas
}

#[test]
fn test_destroy_cascades_to_attached_wires() {
    let mut canvas = wired_pair();
    let input = canvas.node("b", "input").unwrap();

    canvas.destroy("a").unwrap();

    assert!(canvas.object("a").is_none());
    assert!(canvas.object("w").is_none());
    assert!(canvas.object("b").is_some());
    let node = canvas.node_info(input).unwrap();
    assert!(!node.is_connected());
    assert!(node.has_capacity());

    let destroyed: Vec<String> = drain_events(&mut canvas)
        .into_iter()
        .filter_map(|event| match event {
            CanvasEvent::ObjectDestroyed { tag } => Some(tag),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed, ["w", "a"]);
}

#[test]
fn test_destroy_removes_primitives_and_lookups() {
    let mut canvas = wired_pair();
    let primitives: Vec<_> = canvas.object("a").unwrap().primitives().collect();
    let output = canvas.node("a", "output").unwrap();
    let before = canvas.surface().len();

    canvas.destroy("a").unwrap();

    for primitive in &primitives {
        assert!(!canvas.surface().contains(*primitive));
        assert!(canvas.get_object_by_id(*primitive).is_none());
        assert!(canvas.get_item_by_id(*primitive).is_none());
    }
    // The gate and both wire strokes.
    assert_eq!(canvas.surface().len(), before - primitives.len() - 2);
    assert!(canvas.node_info(output).is_none());
    assert!(matches!(
        canvas.node("a", "output"),
        Err(ShapeError::UnknownObject(_))
    ));
}

#[test]
fn test_destroyed_names_can_be_reused() {
    let mut canvas = wired_pair();
    canvas.destroy("b").unwrap();
    canvas.create("GAndGate", ShapeArgs::new("b").at(300.0, 100.0)).unwrap();
    canvas
        .create("GWire", ShapeArgs::new("w").endpoints(Pos2::ZERO, Pos2::ZERO))
        .unwrap();
    assert_eq!(canvas.object("b").unwrap().kind(), "GAndGate");
}

#[test]
fn test_destroying_a_wire_frees_both_nodes() {
    let mut canvas = wired_pair();
    let out = canvas.node("a", "output").unwrap();
    let input = canvas.node("b", "input").unwrap();

    canvas.destroy("w").unwrap();

    assert!(canvas.object("a").is_some());
    assert!(canvas.object("b").is_some());
    assert!(canvas.node_info(out).unwrap().has_capacity());
    assert!(canvas.node_info(input).unwrap().has_capacity());

    canvas
        .create("GWire", ShapeArgs::new("w2").endpoints(Pos2::ZERO, Pos2::ZERO))
        .unwrap();
    canvas.connect("w2", out, input).unwrap();
}

#[test]
fn test_unknown_objects_are_reported() {
    let mut canvas = wired_pair();
    canvas.destroy("w").unwrap();
    assert!(matches!(
        canvas.destroy("w"),
        Err(ShapeError::UnknownObject(tag)) if tag == "w"
    ));
    assert!(matches!(canvas.hide("ghost"), Err(ShapeError::UnknownObject(_))));
}

#[test]
fn test_destroying_during_a_drag_is_safe() {
    let mut canvas = canvas();
    canvas
        .create("GRect", ShapeArgs::new("r").at(100.0, 100.0).size(50.0, 50.0))
        .unwrap();
    canvas.add_mouse_bindings("r").unwrap();

    press(&mut canvas, pos2(125.0, 125.0));
    move_to(&mut canvas, pos2(130.0, 130.0));
    canvas.destroy("r").unwrap();
    assert!(!canvas.is_busy());

    move_to(&mut canvas, pos2(140.0, 140.0));
    release(&mut canvas, pos2(140.0, 140.0));
    assert!(canvas.is_empty());
}

#[test]
fn test_destroying_a_selected_object_updates_the_selection() {
    let mut canvas = wired_pair();
    canvas.select("a").unwrap();
    canvas.select("b").unwrap();
    drain_events(&mut canvas);

    canvas.destroy("b").unwrap();

    assert_eq!(canvas.selected_tags(), ["a"]);
    let events = drain_events(&mut canvas);
    assert!(matches!(
        events.last(),
        Some(CanvasEvent::SelectionChanged { selected }) if selected == &["a"]
    ));
}

#[test]
fn test_destroying_mid_connection_drops_the_preview() {
    let mut canvas = wired_pair();
    canvas.destroy("w").unwrap();
    canvas.add_mouse_bindings("a").unwrap();
    let primitives = canvas.surface().len();

    // Output dot of the NOT gate.
    press(&mut canvas, pos2(181.0, 128.0));
    move_to(&mut canvas, pos2(250.0, 150.0));
    assert_eq!(canvas.surface().len(), primitives + 2);

    canvas.destroy("a").unwrap();
    assert!(!canvas.is_busy());
    let gate_primitives = canvas.surface().len();
    release(&mut canvas, pos2(285.0, 128.0));
    assert_eq!(canvas.surface().len(), gate_primitives);
    assert!(canvas.object("b").is_some());
}
