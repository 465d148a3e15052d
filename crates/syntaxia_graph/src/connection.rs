// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use crate::port::PortRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed connection: the target port receives the value produced at the
/// source port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub from_node: NodeId,
    /// Source port
    pub from_port: PortRole,
    /// Target node ID
    pub to_node: NodeId,
    /// Target port
    pub to_port: PortRole,
}

impl Connection {
    /// Create a new connection
    pub fn new(from_node: NodeId, from_port: PortRole, to_node: NodeId, to_port: PortRole) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Check if this connection feeds a specific input
    pub fn targets(&self, node_id: NodeId, port: PortRole) -> bool {
        self.to_node == node_id && self.to_port == port
    }

    /// Check if another connection links the same ports, ignoring identity
    pub fn is_same_link(&self, other: &Connection) -> bool {
        self.from_node == other.from_node
            && self.from_port == other.from_port
            && self.to_node == other.to_node
            && self.to_port == other.to_port
    }
}
