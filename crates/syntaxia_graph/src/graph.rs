// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.
//!
//! The graph is the single owner of every node and connection in an editing
//! session. Connections refer to nodes by id only, so deleting a node is a map
//! removal plus a sweep over the connections that mention it.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId, NodeKind};
use crate::port::PortRole;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Connections in insertion order
    connections: IndexMap<ConnectionId, Connection>,
    /// Bumped on every successful edit
    #[serde(skip)]
    revision: u64,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node of `kind` at `position` with the kind's defaults
    pub fn add_node(&mut self, kind: NodeKind, position: [f32; 2]) -> NodeId {
        self.insert_node(Node::new(kind).with_position(position[0], position[1]))
    }

    /// Add a pre-built node to the graph
    pub fn insert_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        tracing::trace!(?id, kind = ?node.kind, "node added");
        self.nodes.insert(id, node);
        self.touch();
        id
    }

    /// Remove a node and its connections
    pub fn delete_node(&mut self, node_id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&node_id)?;
        let before = self.connections.len();
        self.connections.retain(|_, c| !c.involves_node(node_id));
        tracing::trace!(
            id = ?node_id,
            dropped_connections = before - self.connections.len(),
            "node deleted"
        );
        self.touch();
        Some(removed)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    ///
    /// Edits made through this reference do not bump [`Graph::revision`];
    /// prefer the dedicated setters.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Move a node on the canvas
    pub fn move_node(&mut self, node_id: NodeId, position: [f32; 2]) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        node.position = position;
        self.touch();
        true
    }

    /// Replace a node's literal content
    pub fn set_content(&mut self, node_id: NodeId, content: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        node.content = content.into();
        self.touch();
        true
    }

    /// Replace a node's display title
    pub fn set_title(&mut self, node_id: NodeId, title: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        node.title = title.into();
        self.touch();
        true
    }

    /// Closest node whose centre lies within `max_distance` of `position`
    pub fn nearest_node(&self, position: [f32; 2], max_distance: f32) -> Option<NodeId> {
        let limit = max_distance * max_distance;
        self.nodes
            .values()
            .map(|n| (n.id, n.distance_sq(position)))
            .filter(|(_, d)| *d < limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Connect `source_port` on `source` to `target_port` on `target`.
    ///
    /// Self-loops, duplicates of an existing link and links to nodes that are
    /// not in the graph are ignored and yield `None`. Port roles are not
    /// checked against the node kinds; a mismatched link is simply never
    /// looked up.
    pub fn add_connection(
        &mut self,
        source: NodeId,
        source_port: PortRole,
        target: NodeId,
        target_port: PortRole,
    ) -> Option<ConnectionId> {
        if source == target {
            tracing::debug!(node = ?source, "rejected self-loop connection");
            return None;
        }
        if !self.nodes.contains_key(&source) || !self.nodes.contains_key(&target) {
            tracing::debug!(?source, ?target, "rejected connection to unknown node");
            return None;
        }

        let connection = Connection::new(source, source_port, target, target_port);
        if self.connections.values().any(|c| c.is_same_link(&connection)) {
            tracing::debug!(?source, ?source_port, ?target, ?target_port, "rejected duplicate connection");
            return None;
        }

        let id = connection.id;
        self.connections.insert(id, connection);
        self.touch();
        Some(id)
    }

    /// Remove a connection
    pub fn delete_connection(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let removed = self.connections.shift_remove(&connection_id)?;
        self.touch();
        Some(removed)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.involves_node(node_id))
    }

    /// Get connections feeding a specific input
    pub fn connections_to(&self, node_id: NodeId, port: PortRole) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.targets(node_id, port))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The connection feeding `port` on `node_id`. When several exist the
    /// earliest added wins.
    pub fn input_connection(&self, node_id: NodeId, port: PortRole) -> Option<&Connection> {
        self.connections_to(node_id, port).next()
    }

    /// The node feeding `port` on `node_id`
    pub fn input_source(&self, node_id: NodeId, port: PortRole) -> Option<&Node> {
        let connection = self.input_connection(node_id, port)?;
        self.nodes.get(&connection.from_node)
    }

    /// The first print node in insertion order
    pub fn print_node(&self) -> Option<&Node> {
        self.nodes.values().find(|n| n.kind == NodeKind::Print)
    }

    /// Remove every node and connection
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.touch();
    }

    /// Counter that changes whenever the graph is edited
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
