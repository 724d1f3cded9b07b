//! Named colors used by the built-in shapes.

use egui::Color32;

pub const FILL: Color32 = Color32::WHITE;
pub const SELECTED_FILL: Color32 = Color32::from_rgb(0x11, 0x11, 0xff);
pub const OUTLINE: Color32 = Color32::from_rgb(0x00, 0x00, 0xff);
pub const ACTIVE_OUTLINE: Color32 = Color32::from_rgb(0xff, 0xa5, 0x00);

pub const SWITCH_OFF: Color32 = Color32::from_rgb(0x77, 0x77, 0x77);
pub const SWITCH_ON: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);

pub const BULB_LIT: Color32 = Color32::from_rgb(0xff, 0xff, 0x00);
pub const FILAMENT_GLOW: Color32 = Color32::from_rgb(0xff, 0x80, 0x00);

pub const PAPER: Color32 = Color32::from_rgb(0xee, 0xff, 0xee);
pub const GRID_MAJOR: Color32 = Color32::from_rgb(0xaa, 0xff, 0xaa);
pub const GRID_MINOR: Color32 = Color32::from_rgb(0xcc, 0xff, 0xcc);

pub const WIRE_OUTER: Color32 = OUTLINE;
pub const WIRE_INNER: Color32 = Color32::WHITE;

pub const MARQUEE: Color32 = Color32::BLACK;
