//! Notifications from the canvas to the embedding application.

mod events;
mod queue;

pub use events::{CanvasEvent, EventEnvelope};
pub use queue::EventQueue;
