// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port roles and port geometry.
//!
//! A port is not an object of its own: it is a named role scoped to a node,
//! and connections refer to it as a `(NodeId, PortRole)` pair. Which roles are
//! meaningful depends on the owning node's [`NodeKind`].

use crate::node::{Node, NodeKind};
use serde::{Deserialize, Serialize};

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// A named connection point on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// Value produced by literals and arithmetic
    Output,
    /// Left operand
    Left,
    /// Right operand
    Right,
    /// Print input
    Input,
    /// Left side of the ifElse equality
    IfConditionLeft,
    /// Right side of the ifElse equality
    IfConditionRight,
    /// Branch taken when the condition holds
    IfThen,
    /// Branch taken otherwise
    IfElse,
    /// Value produced by ifElse
    IfOutput,
    /// First loop index
    LoopStart,
    /// Loop bound, exclusive
    LoopEnd,
    /// Loop body
    LoopBody,
    /// Value produced by loop
    LoopOutput,
}

impl PortRole {
    /// Direction of this role
    pub fn direction(&self) -> PortDirection {
        match self {
            Self::Output | Self::IfOutput | Self::LoopOutput => PortDirection::Output,
            Self::Left
            | Self::Right
            | Self::Input
            | Self::IfConditionLeft
            | Self::IfConditionRight
            | Self::IfThen
            | Self::IfElse
            | Self::LoopStart
            | Self::LoopEnd
            | Self::LoopBody => PortDirection::Input,
        }
    }

    /// Whether values flow out of this role
    pub fn is_output(&self) -> bool {
        self.direction() == PortDirection::Output
    }

    /// Short label drawn next to the port
    pub fn label(&self) -> &'static str {
        match self {
            Self::Output | Self::IfOutput | Self::LoopOutput => "OUT",
            Self::Left => "L",
            Self::Right => "R",
            Self::Input => "IN",
            Self::IfConditionLeft => "IF L",
            Self::IfConditionRight => "IF R",
            Self::IfThen => "THEN",
            Self::IfElse => "ELSE",
            Self::LoopStart => "Start",
            Self::LoopEnd => "End",
            Self::LoopBody => "Body",
        }
    }
}

/// Offset of a port from its node's centre, or `None` when the role does not
/// belong to the kind.
pub fn port_offset(kind: NodeKind, role: PortRole) -> Option<[f32; 2]> {
    let offset = match (kind, role) {
        (NodeKind::Number | NodeKind::Variable | NodeKind::Text, PortRole::Output) => [70.0, 0.0],
        (NodeKind::Plus | NodeKind::Minus | NodeKind::Multiply | NodeKind::Divide, role) => {
            match role {
                PortRole::Left => [-70.0, -15.0],
                PortRole::Right => [-70.0, 15.0],
                PortRole::Output => [70.0, 0.0],
                _ => return None,
            }
        }
        (NodeKind::Print, PortRole::Input) => [-70.0, 0.0],
        (NodeKind::IfElse, role) => match role {
            PortRole::IfConditionLeft => [-80.0, -30.0],
            PortRole::IfConditionRight => [-20.0, -30.0],
            PortRole::IfThen => [-80.0, 30.0],
            PortRole::IfElse => [-20.0, 30.0],
            PortRole::IfOutput => [80.0, 0.0],
            _ => return None,
        },
        (NodeKind::Loop, role) => match role {
            PortRole::LoopStart => [-90.0, -30.0],
            PortRole::LoopEnd => [-90.0, 30.0],
            PortRole::LoopBody => [0.0, 50.0],
            PortRole::LoopOutput => [90.0, 0.0],
            _ => return None,
        },
        _ => return None,
    };
    Some(offset)
}

/// Canvas position of a port. Falls back to the node's own position for a
/// role the node's kind does not have.
pub fn port_position(node: &Node, role: PortRole) -> [f32; 2] {
    match port_offset(node.kind, role) {
        Some([dx, dy]) => [node.position[0] + dx, node.position[1] + dy],
        None => node.position,
    }
}

/// Cubic bezier control points for a connection drawn from `from` to `to`.
pub fn connection_curve(from: [f32; 2], to: [f32; 2]) -> [[f32; 2]; 4] {
    let span = to[0] - from[0];
    [
        from,
        [from[0] + span * 0.3, from[1]],
        [from[0] + span * 0.7, to[1]],
        to,
    ]
}
