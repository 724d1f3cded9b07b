use crate::node::{ConnectionId, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectCreated {
        tag: String,
        kind: String,
    },
    ObjectDestroyed {
        tag: String,
    },
    /// A wire's connection now holds both nodes.
    Connected {
        wire: String,
        connection: ConnectionId,
        from: NodeId,
        to: NodeId,
    },
    /// Tags of every selected object after the change.
    SelectionChanged {
        selected: Vec<String>,
    },
    ZoomChanged {
        zoom_level: f32,
    },
    Toggled {
        tag: String,
        on: bool,
    },
}

impl CanvasEvent {
    /// Tag of the object the event is about, if there is a single one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::ObjectCreated { tag, .. }
            | Self::ObjectDestroyed { tag }
            | Self::Toggled { tag, .. } => Some(tag),
            Self::Connected { wire, .. } => Some(wire),
            Self::SelectionChanged { .. } | Self::ZoomChanged { .. } => None,
        }
    }
}

/// An event stamped with its per-canvas sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    pub id: u64,
    pub event: CanvasEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_name_the_object_they_concern() {
        let toggled = CanvasEvent::Toggled {
            tag: "switch".into(),
            on: true,
        };
        assert_eq!(toggled.tag(), Some("switch"));
        let zoomed = CanvasEvent::ZoomChanged { zoom_level: 1.1 };
        assert_eq!(zoomed.tag(), None);
    }
}
