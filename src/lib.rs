#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod blueprint;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod item;
pub mod node;
pub mod object;
pub mod palette;
pub mod registry;
pub mod renderer;
pub mod shapes;
pub mod surface;
pub mod viewport;

pub use app::ShapesApp;
pub use blueprint::{Blueprint, NodeDecl};
pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use error::{ShapeError, ShapeResult};
pub use event::{CanvasEvent, EventEnvelope, EventQueue};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use item::{Item, ItemFlags, ItemShape};
pub use node::{Connection, ConnectionId, Node, NodeId};
pub use object::{Behavior, Object, ObjectFlags, ObjectId};
pub use registry::{BuildContext, Registry, ShapeArgs};
pub use renderer::Renderer;
pub use surface::{Primitive, PrimitiveId, PrimitiveKind, Surface};
pub use viewport::Viewport;
