// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node catalog shown in the playground side panel.

use crate::node::NodeKind;
use serde::{Deserialize, Serialize};

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Numbers and arithmetic
    #[default]
    Math,
    /// Variables
    Variable,
    /// Loops
    Loop,
    /// Text literals
    Text,
    /// Branching and output
    Logic,
}

impl NodeCategory {
    /// Get display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeCategory::Math => "Math",
            NodeCategory::Variable => "Variable",
            NodeCategory::Loop => "Loop",
            NodeCategory::Text => "Text",
            NodeCategory::Logic => "Logic",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [NodeCategory] {
        &[
            NodeCategory::Math,
            NodeCategory::Variable,
            NodeCategory::Loop,
            NodeCategory::Text,
            NodeCategory::Logic,
        ]
    }

    /// Kinds offered under this category
    pub fn kinds(&self) -> &'static [NodeKind] {
        match self {
            NodeCategory::Math => &[
                NodeKind::Number,
                NodeKind::Plus,
                NodeKind::Minus,
                NodeKind::Multiply,
                NodeKind::Divide,
            ],
            NodeCategory::Variable => &[NodeKind::Variable],
            NodeCategory::Loop => &[NodeKind::Loop],
            NodeCategory::Text => &[NodeKind::Text],
            NodeCategory::Logic => &[NodeKind::IfElse, NodeKind::Print],
        }
    }
}

impl NodeKind {
    /// Catalog category this kind is listed under
    pub fn category(&self) -> NodeCategory {
        match self {
            Self::Number | Self::Plus | Self::Minus | Self::Multiply | Self::Divide => NodeCategory::Math,
            Self::Variable => NodeCategory::Variable,
            Self::Loop => NodeCategory::Loop,
            Self::Text => NodeCategory::Text,
            Self::IfElse | Self::Print => NodeCategory::Logic,
        }
    }
}
