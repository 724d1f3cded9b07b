use egui::{Pos2, Vec2};

use crate::blueprint::Blueprint;
use crate::error::{ShapeError, ShapeResult};
use crate::item::Item;
use crate::palette;
use crate::registry::{BuildContext, ShapeArgs};

/// Spacing of graph paper lines.
pub const GRID_STEP: i64 = 10;
/// Every line on a multiple of this is drawn darker.
pub const GRID_MAJOR_STEP: i64 = 100;

fn required_size(kind: &str, args: &ShapeArgs) -> ShapeResult<Vec2> {
    match args.size {
        Some(size) if size.is_finite() && size.x > 0.0 && size.y > 0.0 => Ok(size),
        Some(size) => Err(ShapeError::invalid_args(
            kind,
            format!("size must be positive and finite, got {}x{}", size.x, size.y),
        )),
        None => Err(ShapeError::invalid_args(kind, "a size is required")),
    }
}

fn plain(item: Item) -> Item {
    item.shown()
        .with_fill(palette::FILL)
        .with_outline(palette::OUTLINE, 2.0)
        .with_active_outline(palette::ACTIVE_OUTLINE, 5.0)
}

pub fn rect(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    let size = required_size("GRect", args)?;
    Ok(Blueprint::new(args.position).with_item(plain(Item::rect("GRect", args.position, size))))
}

pub fn oval(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    let size = required_size("GOval", args)?;
    Ok(Blueprint::new(args.position).with_item(plain(Item::oval("GOval", args.position, size))))
}

pub fn polygon(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    if args.coords.len() < 3 {
        return Err(ShapeError::invalid_args(
            "GPolygon",
            format!("at least 3 coords are required, got {}", args.coords.len()),
        ));
    }
    let position = args.coords[0];
    Ok(Blueprint::new(position)
        .with_item(plain(Item::polygon("GPolygon", args.coords.clone(), false))))
}

/// Engineer's graph paper: a tinted sheet with a line every 10 units.
pub fn graph_paper(args: &ShapeArgs, _ctx: &BuildContext) -> ShapeResult<Blueprint> {
    let size = required_size("GGraphPaper", args)?;
    let Pos2 { x, y } = args.position;

    let sheet = Item::rect("background_rect", args.position, size)
        .shown()
        .with_fill(palette::PAPER)
        .with_outline(palette::PAPER, 1.0)
        .without_highlight()
        .with_flags(|f| {
            f.draggable = false;
            f.raisable = false;
            f.highlightable = false;
            f.show_selection = false;
        });

    let grid_line = |name: String, from: Pos2, to: Pos2, at: i64| {
        let color = if at % GRID_MAJOR_STEP == 0 {
            palette::GRID_MAJOR
        } else {
            palette::GRID_MINOR
        };
        Item::line(name, vec![from, to])
            .shown()
            .with_outline(color, 1.0)
            .with_flags(|f| {
                f.draggable = false;
                f.clickable = false;
            })
    };

    let (x0, y0) = (x.round() as i64, y.round() as i64);
    let (x1, y1) = ((x + size.x).round() as i64, (y + size.y).round() as i64);

    let verticals = (x0..x1).step_by(GRID_STEP as usize).map(|i| {
        let gx = i as f32;
        grid_line(
            format!("vline_{i}"),
            Pos2::new(gx, y),
            Pos2::new(gx, y + size.y),
            i,
        )
    });
    let horizontals = (y0..y1).step_by(GRID_STEP as usize).map(|i| {
        let gy = i as f32;
        grid_line(
            format!("hline_{i}"),
            Pos2::new(x, gy),
            Pos2::new(x + size.x, gy),
            i,
        )
    });

    Ok(Blueprint::new(args.position)
        .with_item(sheet)
        .with_items(verticals)
        .with_items(horizontals)
        .background())
}
