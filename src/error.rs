use thiserror::Error;

/// Errors reported by the canvas, the shape registry and the connection protocol.
///
/// Rejected gestures never surface here; they are logged and abandoned.
#[derive(Debug, Clone, Error)]
pub enum ShapeError {
    #[error("unknown shape type: {0}")]
    UnknownType(String),

    #[error("name already in use: {0}")]
    NameInUse(String),

    #[error("no object named {0}")]
    UnknownObject(String),

    #[error("no node {node} on {object}")]
    UnknownNode { object: String, node: String },

    #[error("no item {item} on {object}")]
    UnknownItem { object: String, item: String },

    #[error("{0} is not a connector")]
    NotAConnector(String),

    #[error("connection of {0} already joins two nodes")]
    ConnectionFull(String),

    #[error("node {node} already holds {max} connection(s)")]
    NodeAtCapacity { node: String, max: usize },

    #[error("invalid arguments for {kind}: {reason}")]
    InvalidArguments { kind: String, reason: String },

    #[error("invalid canvas configuration: {0}")]
    Config(String),
}

impl ShapeError {
    pub(crate) fn invalid_args(kind: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            kind: kind.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result type for canvas operations
pub type ShapeResult<T> = Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = ShapeError::UnknownType("GTriangle".into());
        assert_eq!(err.to_string(), "unknown shape type: GTriangle");

        let err = ShapeError::NodeAtCapacity {
            node: "GAndGate Output".into(),
            max: 1,
        };
        assert!(err.to_string().contains("GAndGate Output"));
    }
}
