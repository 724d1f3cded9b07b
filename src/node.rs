//! Attachment points and the links between them.
//!
//! Nodes and connections live in per-canvas arenas and refer to each other
//! and to their owners by id only.

use std::fmt;

use crate::error::{ShapeError, ShapeResult};
use crate::object::ObjectId;

pub const DEFAULT_MAX_CONNECTIONS: usize = 1;
pub const MAX_NODES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub(crate) u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection {}", self.0)
    }
}

/// A named attachment point backed by one item of its owning object.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    /// Human readable, e.g. `"GAndGate Output"`.
    name: String,
    /// Lookup key on the owner, e.g. `"output"`.
    key: String,
    object: ObjectId,
    item: String,
    connections: Vec<ConnectionId>,
    max_connections: usize,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<String>,
        key: impl Into<String>,
        object: ObjectId,
        item: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            key: key.into(),
            object,
            item: item.into(),
            connections: Vec::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Name of the item whose center is this node's position.
    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn has_capacity(&self) -> bool {
        self.connections.len() < self.max_connections
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    pub(crate) fn check_capacity(&self) -> ShapeResult<()> {
        if self.has_capacity() {
            Ok(())
        } else {
            Err(ShapeError::NodeAtCapacity {
                node: self.name.clone(),
                max: self.max_connections,
            })
        }
    }

    pub(crate) fn attach(&mut self, connection: ConnectionId) {
        self.connections.push(connection);
    }

    pub(crate) fn detach(&mut self, connection: ConnectionId) {
        self.connections.retain(|c| *c != connection);
    }
}

/// The logical link a wire renders. Pending until it holds two nodes.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    name: String,
    owner: ObjectId,
    nodes: Vec<NodeId>,
    max_nodes: usize,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, name: impl Into<String>, owner: ObjectId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            nodes: Vec::new(),
            max_nodes: MAX_NODES,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire object rendering this connection.
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn is_pending(&self) -> bool {
        self.nodes.len() < self.max_nodes
    }

    /// Both ends, once the connection is complete.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        match self.nodes.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    pub(crate) fn set_endpoints(&mut self, a: NodeId, b: NodeId) {
        self.nodes = vec![a, b];
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}
