//! Logic gates, described by one table instead of one type per gate.

use egui::{Pos2, Vec2, pos2, vec2};

use super::{body, with_input, with_output};
use crate::blueprint::Blueprint;
use crate::error::ShapeResult;
use crate::geometry::arc;
use crate::item::Item;
use crate::palette;
use crate::registry::{BuildContext, ShapeArgs};

/// Diameter of the inversion bubble.
pub const BUBBLE_SIZE: f32 = 8.0;
const BODY_GROUP: &str = "gate_body";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateBody {
    /// Buffer / NOT triangle.
    Triangle,
    /// Flat back, semicircular front.
    And,
    /// Curved back, pointed front.
    Or,
    /// OR body plus a second curved back line.
    XOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDef {
    pub type_name: &'static str,
    pub body: GateBody,
    /// Draws a bubble on the output.
    pub inverted: bool,
}

const fn gate(type_name: &'static str, body: GateBody, inverted: bool) -> GateDef {
    GateDef {
        type_name,
        body,
        inverted,
    }
}

pub const GATES: &[GateDef] = &[
    gate("GBufferGate", GateBody::Triangle, false),
    gate("GNotGate", GateBody::Triangle, true),
    gate("GAndGate", GateBody::And, false),
    gate("GNandGate", GateBody::And, true),
    gate("GOrGate", GateBody::Or, false),
    gate("GNorGate", GateBody::Or, true),
    gate("GXOrGate", GateBody::XOr, false),
    gate("GXNorGate", GateBody::XOr, true),
];

impl GateBody {
    /// Output edge of the body, relative to the gate position.
    fn output_edge(self) -> Vec2 {
        match self {
            Self::Triangle => vec2(58.0, 28.0),
            Self::And => vec2(59.0, 30.0),
            Self::Or | Self::XOr => vec2(65.0, 30.0),
        }
    }

    /// Vertical offsets of the inputs.
    fn input_offsets(self) -> &'static [f32] {
        match self {
            Self::Triangle => &[28.0],
            Self::And | Self::Or | Self::XOr => &[17.0, 43.0],
        }
    }

    /// Where input leads meet the body; the OR back curve sits further right.
    fn input_x(self) -> f32 {
        match self {
            Self::Or => 7.0,
            _ => 0.0,
        }
    }

    fn outline(self, at: Pos2) -> Vec<Pos2> {
        let Pos2 { x, y } = at;
        match self {
            Self::Triangle => vec![at, pos2(x + 58.0, y + 28.0), pos2(x, y + 56.0)],
            Self::And => {
                let mut points = vec![at, pos2(x + 29.0, y)];
                points.extend(arc(pos2(x + 29.0, y + 30.0), vec2(30.0, 30.0), -90..90));
                points.push(pos2(x, y + 60.0));
                points
            }
            Self::Or | Self::XOr => curved_back(at, 65.0),
        }
    }
}

/// Pointed front of half-width `reach` with an 8 unit deep curved back.
fn curved_back(at: Pos2, reach: f32) -> Vec<Pos2> {
    let center = pos2(at.x, at.y + 30.0);
    let mut points = vec![at];
    points.extend(arc(center, vec2(reach, 30.0), -90..90));
    points.extend(arc(center, vec2(-8.0, 30.0), 90..270));
    points
}

pub(super) fn build(gate: &GateDef, args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    let at = args.position;
    let name = gate.type_name;

    let edge = at + gate.body.output_edge();
    let output_start = if gate.inverted {
        pos2(edge.x + BUBBLE_SIZE, edge.y)
    } else {
        edge
    };
    let mut blueprint = with_output(Blueprint::new(at), name, output_start);

    let offsets = gate.body.input_offsets();
    for (index, dy) in offsets.iter().enumerate() {
        let lead_end = pos2(at.x + gate.body.input_x(), at.y + dy);
        let number = (offsets.len() > 1).then_some(index + 1);
        blueprint = with_input(blueprint, name, lead_end, number);
    }

    if gate.inverted {
        let bubble = Item::oval(
            "not_dot",
            pos2(edge.x, edge.y - BUBBLE_SIZE / 2.0),
            Vec2::splat(BUBBLE_SIZE),
        )
        .shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 5.0)
        .with_highlight_group(BODY_GROUP);
        blueprint = blueprint.with_item(bubble);
    }

    let mut main = body("body", gate.body.outline(at));
    if gate.inverted {
        main = main.with_highlight_group(BODY_GROUP);
    }
    blueprint = blueprint.with_item(main);

    if gate.body == GateBody::XOr {
        let back = arc(pos2(at.x - 8.0, at.y + 30.0), vec2(8.0, 30.0), -90..91).collect();
        blueprint = blueprint.with_item(
            Item::line("arc2", back)
                .shown()
                .with_outline(palette::OUTLINE, 2.0),
        );
    }

    Ok(blueprint)
}
