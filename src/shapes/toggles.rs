//! Stateful shapes: the toggle switch and the light bulb.

use egui::{Pos2, Vec2, pos2};

use super::{DOT_SIZE, LEAD_LENGTH, PinRole, dot, with_output};
use crate::blueprint::Blueprint;
use crate::error::ShapeResult;
use crate::geometry::arc;
use crate::item::Item;
use crate::object::Behavior;
use crate::palette;
use crate::registry::{BuildContext, ShapeArgs};

/// Radius of the switch capsule ends.
pub const SWITCH_SIZE: f32 = 16.0;
/// Distance between the centers of the capsule ends, and the slider travel.
pub const CAPSULE_LENGTH: f32 = 40.0;

const SLIDER_SIZE: f32 = 26.0;
const BULB_RADIUS: f32 = 30.0;
const BULB_BASE: f32 = 48.0;

fn capsule(at: Pos2, radius: f32) -> Vec<Pos2> {
    let mut points = vec![at];
    points.extend(arc(
        pos2(at.x + CAPSULE_LENGTH, at.y + SWITCH_SIZE),
        Vec2::splat(radius),
        -90..90,
    ));
    points.extend(arc(pos2(at.x, at.y + SWITCH_SIZE), Vec2::splat(radius), 90..270));
    points
}

/// A capsule with a sliding knob. Clicking the knob flips the state.
pub fn toggle_switch(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    const GROUP: &str = "body_and_slider";
    let at = args.position;
    let Pos2 { x, y } = at;

    let body = Item::polygon("body", capsule(at, SWITCH_SIZE), false)
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 2.0)
        .with_highlight_group(GROUP);
    let inner = Item::polygon("inner", capsule(pos2(x, y + 4.0), SWITCH_SIZE - 4.0), false)
        .shown()
        .with_fill(palette::SWITCH_OFF)
        .with_outline(palette::OUTLINE, 0.25)
        .with_active_outline(palette::OUTLINE, 0.25)
        .with_highlight_group(GROUP);
    let slider = Item::oval("slider_switch", pos2(x + 27.2, y + 3.0), Vec2::splat(SLIDER_SIZE))
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 1.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 2.0)
        .with_highlight_group(GROUP)
        .with_flags(|f| {
            f.draggable = false;
            f.clickable = true;
        });

    let blueprint = with_output(
        Blueprint::new(at),
        "GToggleSwitch",
        pos2(x + CAPSULE_LENGTH + SWITCH_SIZE, y + SWITCH_SIZE),
    )
    .with_items([body, inner, slider])
    .with_behavior(Behavior::ToggleSwitch {
        capsule_length: CAPSULE_LENGTH,
    });
    Ok(blueprint)
}

/// A bulb standing on its input lead at `position`. Lights up when toggled.
pub fn light_bulb(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    const GROUP: &str = "body_and_filament";
    let at = args.position;
    let Pos2 { x, y } = at;
    let neck = BULB_BASE / 5.0;

    let mut outline = vec![pos2(x + neck, y), pos2(x - neck, y)];
    outline.extend(arc(pos2(x, y - BULB_BASE), Vec2::splat(BULB_RADIUS), -250..70));
    let body = Item::polygon("body", outline, true)
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 5.0)
        .with_highlight_group(GROUP)
        .with_flags(|f| f.clickable = false);

    let coil = vec![
        pos2(x + neck / 2.0, y - BULB_BASE / 2.3),
        pos2(x - neck / 2.0, y - BULB_BASE / 2.3),
        pos2(x - neck / 4.0, y - BULB_BASE / 2.0),
        pos2(x - neck, y - BULB_BASE),
        pos2(x + neck, y - BULB_BASE),
        pos2(x + neck / 4.0, y - BULB_BASE / 2.0),
    ];
    let filament = Item::polygon("filament", coil, false)
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 1.0)
        .with_active_outline(palette::OUTLINE, 1.0)
        .with_highlight_group(GROUP)
        .with_flags(|f| f.clickable = false);

    let input_line = Item::vert_line("input_line", at, LEAD_LENGTH)
        .shown()
        .with_flags(|f| {
            f.draggable = false;
            f.clickable = false;
        });
    let input_dot = dot(
        "input_dot",
        pos2(x - DOT_SIZE / 2.0, y + LEAD_LENGTH),
        PinRole::Input,
    );

    Ok(Blueprint::new(at)
        .with_items([input_line, input_dot, body, filament])
        .with_node("input", "GLightBulb Input", "input_dot")
        .with_behavior(Behavior::LightBulb))
}
