// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the playground graph.

use crate::port::PortRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed set of node kinds the playground language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Numeric literal
    Number,
    /// Addition
    Plus,
    /// Subtraction
    Minus,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Sink node, root of evaluation and code generation
    Print,
    /// Equality branch
    IfElse,
    /// Literal whose runtime type follows its surface form
    Variable,
    /// Counted loop
    Loop,
    /// Text literal
    Text,
}

impl NodeKind {
    /// Get all node kinds
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Number,
            NodeKind::Plus,
            NodeKind::Minus,
            NodeKind::Multiply,
            NodeKind::Divide,
            NodeKind::Print,
            NodeKind::IfElse,
            NodeKind::Variable,
            NodeKind::Loop,
            NodeKind::Text,
        ]
    }

    /// Ports that are meaningful on this kind, inputs first
    pub fn ports(&self) -> &'static [PortRole] {
        match self {
            Self::Number | Self::Variable | Self::Text => &[PortRole::Output],
            Self::Plus | Self::Minus | Self::Multiply | Self::Divide => {
                &[PortRole::Left, PortRole::Right, PortRole::Output]
            }
            Self::Print => &[PortRole::Input],
            Self::IfElse => &[
                PortRole::IfConditionLeft,
                PortRole::IfConditionRight,
                PortRole::IfThen,
                PortRole::IfElse,
                PortRole::IfOutput,
            ],
            Self::Loop => &[
                PortRole::LoopStart,
                PortRole::LoopEnd,
                PortRole::LoopBody,
                PortRole::LoopOutput,
            ],
        }
    }

    /// Check whether a port role belongs to this kind
    pub fn has_port(&self, role: PortRole) -> bool {
        self.ports().contains(&role)
    }

    /// Title given to freshly created nodes
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Plus => "+",
            Self::Minus => "–",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Print => "Print",
            Self::IfElse => "IfElse",
            Self::Variable => "Var",
            Self::Loop => "Loop",
            Self::Text => "Text",
        }
    }

    /// Content given to freshly created nodes
    pub fn default_content(&self) -> &'static str {
        match self {
            Self::Number => "0",
            Self::Variable => "x",
            Self::Text => "\"Hello\"",
            Self::Plus
            | Self::Minus
            | Self::Multiply
            | Self::Divide
            | Self::Print
            | Self::IfElse
            | Self::Loop => "",
        }
    }

    /// Operator symbol used in generated code, for arithmetic kinds only
    pub fn operator_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Multiply => Some("*"),
            Self::Divide => Some("/"),
            Self::Number
            | Self::Print
            | Self::IfElse
            | Self::Variable
            | Self::Loop
            | Self::Text => None,
        }
    }

    /// Whether this kind is one of the four binary arithmetic operators
    pub fn is_arithmetic(&self) -> bool {
        self.operator_symbol().is_some()
    }

    /// Whether the node's content is user-editable (literal kinds)
    pub fn has_editable_content(&self) -> bool {
        matches!(self, Self::Number | Self::Variable | Self::Text)
    }

    /// Get the color for this kind (for UI)
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Number | Self::Plus | Self::Minus | Self::Multiply | Self::Divide => {
                [0, 122, 255]
            }
            Self::Print | Self::IfElse => [255, 59, 48],
            Self::Variable => [255, 149, 0],
            Self::Loop => [52, 199, 89],
            Self::Text => [175, 82, 222],
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node kind
    pub kind: NodeKind,
    /// Display title
    pub title: String,
    /// Centre of the node in canvas space; never read by evaluation
    pub position: [f32; 2],
    /// Literal content for number, text and variable nodes
    pub content: String,
}

impl Node {
    /// Create a new node with the defaults for its kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            title: kind.default_title().to_string(),
            position: [0.0, 0.0],
            content: kind.default_content().to_string(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Squared distance from the node centre to a canvas point
    pub fn distance_sq(&self, point: [f32; 2]) -> f32 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}
