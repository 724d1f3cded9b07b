//! The built-in shape catalogue.
//!
//! Every constructor returns a [`Blueprint`] built at zoom 1; the canvas
//! realizes it and scales it to the current zoom.

mod basic;
mod gates;
mod toggles;
mod wire;

pub use basic::{graph_paper, oval, polygon, rect};
pub use gates::{GATES, GateBody, GateDef};
pub use toggles::{CAPSULE_LENGTH, SWITCH_SIZE, light_bulb, toggle_switch};
pub use wire::{FAT_LINE, THIN_LINE, wire};

pub(crate) use wire::preview_primitives;

use egui::{Pos2, Vec2};

use crate::blueprint::Blueprint;
use crate::item::Item;
use crate::palette;
use crate::registry::Registry;

/// Type names registered by [`register_builtins`].
pub const BUILTIN_TYPES: [&str; 15] = [
    "GGraphPaper",
    "GRect",
    "GOval",
    "GPolygon",
    "GBufferGate",
    "GNotGate",
    "GAndGate",
    "GNandGate",
    "GOrGate",
    "GNorGate",
    "GXOrGate",
    "GXNorGate",
    "GWire",
    "GToggleSwitch",
    "GLightBulb",
];

pub fn register_builtins(registry: &mut Registry) {
    registry.register("GGraphPaper", graph_paper);
    registry.register("GRect", rect);
    registry.register("GOval", oval);
    registry.register("GPolygon", polygon);
    for gate in GATES {
        registry.register(gate.type_name, move |args, ctx| gates::build(gate, args, ctx));
    }
    registry.register("GWire", wire);
    registry.register("GToggleSwitch", toggle_switch);
    registry.register("GLightBulb", light_bulb);
}

/// Diameter of a connection dot.
pub const DOT_SIZE: f32 = 10.0;
/// Length of the lead joining a dot to its body.
pub const LEAD_LENGTH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinRole {
    Input,
    Output,
}

fn lead(name: impl Into<String>, origin: Pos2, length: f32) -> Item {
    Item::horz_line(name, origin, length)
        .shown()
        .with_flags(|f| {
            f.draggable = false;
            f.clickable = false;
        })
}

fn dot(name: impl Into<String>, origin: Pos2, role: PinRole) -> Item {
    Item::oval(name, origin, Vec2::splat(DOT_SIZE))
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 5.0)
        .with_flags(|f| {
            f.draggable = false;
            f.show_selection = false;
            f.connectable_initiator = role == PinRole::Output;
            f.connectable_terminator = role == PinRole::Input;
        })
}

fn body(name: impl Into<String>, points: Vec<Pos2>) -> Item {
    Item::polygon(name, points, false)
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 5.0)
}

/// Output lead and dot starting at `at`, plus the `output` node.
fn with_output(blueprint: Blueprint, type_name: &str, at: Pos2) -> Blueprint {
    blueprint
        .with_item(lead("output_line", at, LEAD_LENGTH))
        .with_item(dot(
            "output_dot",
            Pos2::new(at.x + LEAD_LENGTH, at.y - DOT_SIZE / 2.0),
            PinRole::Output,
        ))
        .with_node("output", format!("{type_name} Output"), "output_dot")
}

/// Input lead ending at `at` (drawn leftwards), its dot, and the node.
fn with_input(blueprint: Blueprint, type_name: &str, at: Pos2, index: Option<usize>) -> Blueprint {
    let (suffix, key, label) = match index {
        Some(n) => (n.to_string(), format!("input_{n}"), format!("{type_name} Input {n}")),
        None => (String::new(), "input".to_owned(), format!("{type_name} Input")),
    };
    let dot_item = format!("input_dot{suffix}");
    blueprint
        .with_item(lead(format!("input_line{suffix}"), at, -LEAD_LENGTH))
        .with_item(dot(
            dot_item.clone(),
            Pos2::new(at.x - 2.0 * LEAD_LENGTH, at.y - DOT_SIZE / 2.0),
            PinRole::Input,
        ))
        .with_node(key, label, dot_item)
}
