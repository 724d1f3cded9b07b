mod common;

use common::{approx, canvas, drain_events, item_center};
use eframe_shapes::{Canvas, CanvasEvent, ShapeArgs, ShapeError, palette};
use egui::{Pos2, pos2, vec2};

fn switch() -> Canvas {
    let mut canvas = canvas();
    canvas
        .create("GToggleSwitch", ShapeArgs::new("switch").at(100.0, 100.0))
        .unwrap();
    drain_events(&mut canvas);
    canvas
}

fn slider(canvas: &Canvas) -> Pos2 {
    item_center(canvas, "switch", "slider_switch")
}

#[test]
fn test_switch_recolors_and_slides() {
    let mut canvas = switch();
    assert!(approx(slider(&canvas), pos2(140.2, 116.0)));

    assert!(canvas.toggle("switch").unwrap());
    let inner = canvas.object("switch").unwrap().item("inner").unwrap();
    assert_eq!(inner.current_fill_color(), palette::SWITCH_ON);
    // The knob moves on ticks, not immediately.
    assert!(approx(slider(&canvas), pos2(140.2, 116.0)));

    for _ in 0..4 {
        assert!(canvas.tick());
    }
    assert!(approx(slider(&canvas), pos2(108.2, 116.0)));
    assert!(!canvas.tick());
    assert!(approx(slider(&canvas), pos2(100.2, 116.0)));
    assert!(!canvas.is_animating());
}

#[test]
fn test_switch_slides_back_when_turned_off() {
    let mut canvas = switch();
    canvas.toggle("switch").unwrap();
    canvas.finish_animations();

    assert!(!canvas.toggle("switch").unwrap());
    canvas.finish_animations();
    assert!(approx(slider(&canvas), pos2(140.2, 116.0)));
    let inner = canvas.object("switch").unwrap().item("inner").unwrap();
    assert_eq!(inner.current_fill_color(), palette::SWITCH_OFF);
}

#[test]
fn test_toggling_mid_slide_finishes_the_slide_first() {
    let mut canvas = switch();
    canvas.toggle("switch").unwrap();
    canvas.tick();
    canvas.tick();

    canvas.toggle("switch").unwrap();
    assert!(approx(slider(&canvas), pos2(100.2, 116.0)));
    canvas.finish_animations();
    assert!(approx(slider(&canvas), pos2(140.2, 116.0)));
}

#[test]
fn test_slide_distance_follows_the_zoom() {
    let mut canvas = switch();
    canvas.zoom_about(pos2(100.0, 100.0), true);
    let start = slider(&canvas);

    canvas.toggle("switch").unwrap();
    canvas.finish_animations();
    assert!(approx(slider(&canvas), start - vec2(44.0, 0.0)));
}

#[test]
fn test_bulb_lights_and_dims() {
    let mut canvas = canvas();
    canvas.create("GLightBulb", ShapeArgs::new("bulb").at(100.0, 200.0)).unwrap();

    assert!(canvas.toggle("bulb").unwrap());
    let bulb = canvas.object("bulb").unwrap();
    assert!(bulb.is_on());
    assert_eq!(bulb.item("body").unwrap().current_fill_color(), palette::BULB_LIT);
    let filament = bulb.item("filament").unwrap();
    assert_eq!(filament.current_fill_color(), palette::BULB_LIT);
    assert_eq!(filament.outline_color(), palette::FILAMENT_GLOW);
    let primitive = canvas.surface().get(filament.primitive().unwrap()).unwrap();
    assert_eq!(primitive.stroke_color, palette::FILAMENT_GLOW);
    assert!(!canvas.is_animating());

    assert!(!canvas.toggle("bulb").unwrap());
    let bulb = canvas.object("bulb").unwrap();
    assert_eq!(bulb.item("body").unwrap().current_fill_color(), palette::FILL);
    assert_eq!(bulb.item("filament").unwrap().outline_color(), palette::OUTLINE);
}

#[test]
fn test_static_objects_cannot_toggle() {
    let mut canvas = canvas();
    canvas.create("GAndGate", ShapeArgs::new("and").at(0.0, 0.0)).unwrap();
    drain_events(&mut canvas);

    let err = canvas.toggle("and").unwrap_err();
    assert!(matches!(err, ShapeError::InvalidArguments { .. }));
    assert!(!canvas.object("and").unwrap().is_on());
    assert!(drain_events(&mut canvas).is_empty());
    assert!(matches!(canvas.toggle("nope"), Err(ShapeError::UnknownObject(_))));
}

#[test]
fn test_toggle_is_announced() {
    let mut canvas = switch();
    canvas.toggle("switch").unwrap();
    canvas.toggle("switch").unwrap();
    let events = drain_events(&mut canvas);
    assert!(matches!(
        events.as_slice(),
        [
            CanvasEvent::Toggled { on: true, .. },
            CanvasEvent::Toggled { tag, on: false },
        ] if tag == "switch"
    ));
}

#[test]
fn test_destroying_a_sliding_switch_stops_the_slide() {
    let mut canvas = switch();
    canvas.toggle("switch").unwrap();
    assert!(canvas.is_animating());
    canvas.destroy("switch").unwrap();
    assert!(!canvas.is_animating());
    assert!(!canvas.tick());
}

#[test]
fn test_set_state_only_acts_on_a_change() {
    let mut canvas = switch();
    assert!(canvas.set_state("switch", true).unwrap());
    assert!(!canvas.set_state("switch", true).unwrap());
    canvas.finish_animations();
    assert!(approx(slider(&canvas), pos2(100.2, 116.0)));
    assert!(canvas.object("switch").unwrap().is_on());

    let events = drain_events(&mut canvas);
    assert!(matches!(events.as_slice(), [CanvasEvent::Toggled { on: true, .. }]));

    assert!(canvas.set_state("switch", false).unwrap());
    canvas.finish_animations();
    assert!(approx(slider(&canvas), pos2(140.2, 116.0)));
}

#[test]
fn test_set_state_drives_a_bulb() {
    let mut canvas = canvas();
    canvas.create("GLightBulb", ShapeArgs::new("bulb").at(100.0, 200.0)).unwrap();
    drain_events(&mut canvas);

    assert!(!canvas.set_state("bulb", false).unwrap());
    assert!(drain_events(&mut canvas).is_empty());
    assert!(canvas.set_state("bulb", true).unwrap());
    let bulb = canvas.object("bulb").unwrap();
    assert_eq!(bulb.item("body").unwrap().current_fill_color(), palette::BULB_LIT);
    assert!(matches!(canvas.set_state("nope", true), Err(ShapeError::UnknownObject(_))));
}
