// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pseudo-code generation.
//!
//! Walks the same input connections as evaluation but renders each node as
//! text instead of computing it. Missing inputs never abort generation; they
//! become inline placeholder comments so a half-built graph still shows
//! something useful.

use crate::config::CodegenConfig;
use crate::evaluation::NO_PRINT_NODE_MESSAGE;
use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::PortRole;

/// Placeholder for an arithmetic node with a missing operand
pub const INCOMPLETE_OPERATION: &str = "/* incomplete operation */";
/// Placeholder for an ifElse node with a missing connection
pub const INCOMPLETE_IF_ELSE: &str = "/* incomplete ifElse */";
/// Placeholder for a print node with no input
pub const INCOMPLETE_PRINT: &str = "print(/* incomplete print */)";
/// Placeholder for a loop node with a missing connection
pub const INCOMPLETE_LOOP: &str = "/* incomplete loop */";
/// Placeholder for a node reached again while it is being rendered
pub const CYCLIC_REFERENCE: &str = "/* cyclic reference */";
/// Placeholder for inputs nested beyond the depth limit
pub const TOO_DEEP: &str = "/* nested too deeply */";

/// Renders a graph as indented pseudo-code
pub struct CodeGenerator<'a> {
    graph: &'a Graph,
    config: CodegenConfig,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator with the default layout
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_config(graph, &CodegenConfig::default())
    }

    /// Create a generator with an explicit layout
    pub fn with_config(graph: &'a Graph, config: &CodegenConfig) -> Self {
        Self {
            graph,
            config: config.clone(),
        }
    }

    /// Render the graph reachable from the print node
    pub fn generate(&self) -> String {
        match self.graph.print_node() {
            Some(print) => self.code_for_node(print.id, ""),
            None => NO_PRINT_NODE_MESSAGE.to_string(),
        }
    }

    /// Render one node and its inputs with its first line at `indent`.
    /// Continuation lines and closing braces repeat `indent`; block bodies go
    /// one indent unit deeper.
    pub fn code_for_node(&self, node_id: NodeId, indent: &str) -> String {
        let mut path = Vec::new();
        format!("{indent}{}", self.emit(node_id, indent, &mut path))
    }

    // Bodies are written after their indentation, so `emit` leaves the first
    // line bare.

    fn emit(&self, node_id: NodeId, indent: &str, path: &mut Vec<NodeId>) -> String {
        let Some(node) = self.graph.node(node_id) else {
            return String::new();
        };
        if path.contains(&node_id) {
            tracing::debug!(node = ?node_id, "cycle while generating code");
            return CYCLIC_REFERENCE.to_string();
        }
        if path.len() >= self.config.max_depth {
            return TOO_DEEP.to_string();
        }

        path.push(node_id);
        let code = self.emit_node(node, indent, path);
        path.pop();
        code
    }

    fn emit_node(&self, node: &Node, indent: &str, path: &mut Vec<NodeId>) -> String {
        match node.kind {
            NodeKind::Number | NodeKind::Variable | NodeKind::Text => node.content.clone(),
            NodeKind::Plus | NodeKind::Minus | NodeKind::Multiply | NodeKind::Divide => {
                let (Some(left), Some(right)) = (
                    self.source(node, PortRole::Left),
                    self.source(node, PortRole::Right),
                ) else {
                    return INCOMPLETE_OPERATION.to_string();
                };
                let op = node.kind.operator_symbol().unwrap_or("?");
                format!(
                    "({} {} {})",
                    self.emit(left, "", path),
                    op,
                    self.emit(right, "", path)
                )
            }
            NodeKind::IfElse => {
                let (Some(cond_left), Some(cond_right), Some(then_branch), Some(else_branch)) = (
                    self.source(node, PortRole::IfConditionLeft),
                    self.source(node, PortRole::IfConditionRight),
                    self.source(node, PortRole::IfThen),
                    self.source(node, PortRole::IfElse),
                ) else {
                    return INCOMPLETE_IF_ELSE.to_string();
                };
                let inner = self.indented(indent);
                format!(
                    "if {} == {} {{\n{inner}{}\n{indent}}} else {{\n{inner}{}\n{indent}}}",
                    self.emit(cond_left, "", path),
                    self.emit(cond_right, "", path),
                    self.emit(then_branch, &inner, path),
                    self.emit(else_branch, &inner, path),
                )
            }
            NodeKind::Print => match self.source(node, PortRole::Input) {
                Some(input) => format!("print({})", self.emit(input, "", path)),
                None => INCOMPLETE_PRINT.to_string(),
            },
            NodeKind::Loop => {
                let (Some(start), Some(end), Some(body)) = (
                    self.source(node, PortRole::LoopStart),
                    self.source(node, PortRole::LoopEnd),
                    self.source(node, PortRole::LoopBody),
                ) else {
                    return INCOMPLETE_LOOP.to_string();
                };
                let inner = self.indented(indent);
                format!(
                    "for i in {}..<{} {{\n{inner}{}\n{indent}}}",
                    self.emit(start, "", path),
                    self.emit(end, "", path),
                    self.emit(body, &inner, path),
                )
            }
        }
    }

    fn indented(&self, indent: &str) -> String {
        format!("{indent}{}", self.config.indent_unit)
    }

    fn source(&self, node: &Node, port: PortRole) -> Option<NodeId> {
        self.graph.input_source(node.id, port).map(|n| n.id)
    }
}
