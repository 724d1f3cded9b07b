//! Wires: a fat outer stroke with a thin stroke on top.

use egui::{Color32, Pos2};

use crate::blueprint::Blueprint;
use crate::error::{ShapeError, ShapeResult};
use crate::geometry::smooth_coords;
use crate::item::Item;
use crate::palette;
use crate::registry::{BuildContext, ShapeArgs};
use crate::surface::{Primitive, PrimitiveKind};

pub const FAT_LINE: &str = "fat_line";
pub const THIN_LINE: &str = "thin_line";

const FAT_WIDTH: f32 = 5.0;
const THIN_WIDTH: f32 = 2.0;

fn stroke(name: &str, coords: &[Pos2], color: Color32, width: f32) -> Item {
    Item::wire(name, coords.to_vec())
        .shown()
        .with_outline(color, width)
        .with_flags(|f| {
            f.always_on_top = true;
            f.draggable = false;
            f.clickable = false;
        })
}

/// A wire between `args.endpoints`, or between exactly two `args.coords`.
///
/// Built for the current zoom: stroke widths and the curve offset are
/// already scaled.
pub fn wire(args: &ShapeArgs, ctx: &BuildContext) -> ShapeResult<Blueprint> {
    let (start, end) = match (args.endpoints, args.coords.as_slice()) {
        (Some(endpoints), _) => endpoints,
        (None, [start, end]) => (*start, *end),
        (None, coords) => {
            return Err(ShapeError::invalid_args(
                "GWire",
                format!("two endpoints are required, got {} coords", coords.len()),
            ));
        }
    };
    let coords = smooth_coords(start, end, ctx.wire_curve_offset * ctx.zoom);
    Ok(Blueprint::new(start)
        .with_item(stroke(FAT_LINE, &coords, palette::WIRE_OUTER, FAT_WIDTH * ctx.zoom))
        .with_item(stroke(THIN_LINE, &coords, palette::WIRE_INNER, THIN_WIDTH * ctx.zoom))
        .connector(start, end))
}

/// Unowned primitives drawn while a connection is being dragged out.
pub(crate) fn preview_primitives(coords: [Pos2; 4], zoom: f32) -> [Primitive; 2] {
    let line = |color, width: f32| Primitive {
        kind: PrimitiveKind::Line { smooth: true },
        points: coords.to_vec(),
        fill: None,
        stroke_color: color,
        stroke_width: width * zoom,
        visible: true,
    };
    [
        line(palette::WIRE_OUTER, FAT_WIDTH),
        line(palette::WIRE_INNER, THIN_WIDTH),
    ]
}
