// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph evaluation.
//!
//! Evaluation starts from a node and recursively resolves each required input
//! through the connection feeding that port. Nothing is cached, so the result
//! is a pure function of the graph and the starting node.
//!
//! Malformed graphs never panic: a missing input, a text operand in
//! arithmetic or a division by zero make the node produce no value, and that
//! failure propagates to every node depending on it.

use crate::config::EvaluationConfig;
use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::PortRole;
use crate::value::Value;

/// Reported by [`Evaluator::run`] and the code generator when the graph has
/// no print node.
pub const NO_PRINT_NODE_MESSAGE: &str = "Error: No Print node found.";

/// Reported by [`Evaluator::run`] when the print node produces no value.
pub const EVALUATION_FAILED_MESSAGE: &str = "Error: Evaluation failed.";

/// Reported by [`Evaluator::run`] when evaluation re-enters a node.
pub const CYCLE_MESSAGE: &str = "Error: Graph contains a cycle.";

/// Reported by [`Evaluator::run`] when inputs nest beyond the depth limit.
pub const TOO_DEEP_MESSAGE: &str = "Error: Graph is nested too deeply.";

/// Why a node produced no value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// The graph has no print node
    #[error("No print node found")]
    NoPrintNode,

    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A required input has no connection
    #[error("Missing input {port:?} on node {node:?}")]
    MissingInput {
        /// Node whose input is unconnected
        node: NodeId,
        /// The unconnected port
        port: PortRole,
    },

    /// Arithmetic on a non-numeric operand
    #[error("Non-numeric operand for node {node:?}")]
    TypeMismatch {
        /// The arithmetic node
        node: NodeId,
    },

    /// Right operand of a divide node is zero
    #[error("Division by zero in node {node:?}")]
    DivisionByZero {
        /// The divide node
        node: NodeId,
    },

    /// Evaluation reached a node that is already being evaluated
    #[error("Graph contains a cycle through {0:?}")]
    CycleDetected(NodeId),

    /// Inputs nest deeper than the configured limit
    #[error("Evaluation exceeded the depth limit of {0}")]
    DepthExceeded(usize),
}

impl EvaluationError {
    /// Fixed, user-facing message for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoPrintNode => NO_PRINT_NODE_MESSAGE,
            Self::CycleDetected(_) => CYCLE_MESSAGE,
            Self::DepthExceeded(_) => TOO_DEEP_MESSAGE,
            Self::NodeNotFound(_)
            | Self::MissingInput { .. }
            | Self::TypeMismatch { .. }
            | Self::DivisionByZero { .. } => EVALUATION_FAILED_MESSAGE,
        }
    }
}

/// State carried down one evaluation walk
struct EvaluationContext {
    /// Nodes currently being evaluated, outermost first
    path: Vec<NodeId>,
    /// Maximum length of `path`
    max_depth: usize,
}

impl EvaluationContext {
    fn new(max_depth: usize) -> Self {
        Self {
            path: Vec::new(),
            max_depth,
        }
    }

    fn enter(&mut self, node_id: NodeId) -> Result<(), EvaluationError> {
        if self.path.contains(&node_id) {
            return Err(EvaluationError::CycleDetected(node_id));
        }
        if self.path.len() >= self.max_depth {
            return Err(EvaluationError::DepthExceeded(self.max_depth));
        }
        self.path.push(node_id);
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

/// Computes values from a graph
pub struct Evaluator<'a> {
    graph: &'a Graph,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with default limits
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_config(graph, &EvaluationConfig::default())
    }

    /// Create an evaluator with explicit limits
    pub fn with_config(graph: &'a Graph, config: &EvaluationConfig) -> Self {
        Self {
            graph,
            max_depth: config.max_depth,
        }
    }

    /// Evaluate the print node and render the result for display.
    ///
    /// Failures are rendered as one of the fixed `Error: ...` messages.
    pub fn run(&self) -> String {
        match self.run_value() {
            Ok(value) => value.to_string(),
            Err(err) => {
                tracing::debug!("Evaluation failed: {err}");
                err.user_message().to_string()
            }
        }
    }

    /// Evaluate the print node
    pub fn run_value(&self) -> Result<Value, EvaluationError> {
        let print = self.graph.print_node().ok_or(EvaluationError::NoPrintNode)?;
        self.try_evaluate(print.id)
    }

    /// Value of a node, or `None` when it cannot be computed
    pub fn evaluate(&self, node_id: NodeId) -> Option<Value> {
        self.try_evaluate(node_id).ok()
    }

    /// Value of a node, or the reason it cannot be computed
    pub fn try_evaluate(&self, node_id: NodeId) -> Result<Value, EvaluationError> {
        let mut ctx = EvaluationContext::new(self.max_depth);
        self.eval(node_id, &mut ctx)
    }

    fn eval(&self, node_id: NodeId, ctx: &mut EvaluationContext) -> Result<Value, EvaluationError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or(EvaluationError::NodeNotFound(node_id))?;

        ctx.enter(node_id)?;
        let result = self.eval_node(node, ctx);
        ctx.leave();

        tracing::trace!(node = ?node_id, kind = ?node.kind, ?result, "evaluated");
        result
    }

    fn eval_node(&self, node: &Node, ctx: &mut EvaluationContext) -> Result<Value, EvaluationError> {
        match node.kind {
            NodeKind::Number => Ok(Value::Number(node.content.parse().unwrap_or(0.0))),
            NodeKind::Text => Ok(Value::Text(node.content.clone())),
            NodeKind::Variable => Ok(Value::parse_literal(&node.content)),
            NodeKind::Plus | NodeKind::Minus | NodeKind::Multiply | NodeKind::Divide => {
                self.eval_arithmetic(node, ctx)
            }
            NodeKind::IfElse => self.eval_if_else(node, ctx),
            NodeKind::Print => {
                let input = self.source(node, PortRole::Input)?;
                self.eval(input, ctx)
            }
            // Loop bodies only take shape in generated code.
            NodeKind::Loop => Ok(Value::Number(0.0)),
        }
    }

    fn eval_arithmetic(&self, node: &Node, ctx: &mut EvaluationContext) -> Result<Value, EvaluationError> {
        let left = self.source(node, PortRole::Left)?;
        let right = self.source(node, PortRole::Right)?;
        let left = self.eval(left, ctx)?;
        let right = self.eval(right, ctx)?;

        let (Some(l), Some(r)) = (left.as_number(), right.as_number()) else {
            tracing::debug!(
                node = ?node.id,
                left = left.kind_name(),
                right = right.kind_name(),
                "non-numeric operand"
            );
            return Err(EvaluationError::TypeMismatch { node: node.id });
        };

        let result = match node.kind {
            NodeKind::Plus => l + r,
            NodeKind::Minus => l - r,
            NodeKind::Multiply => l * r,
            NodeKind::Divide if r == 0.0 => {
                return Err(EvaluationError::DivisionByZero { node: node.id });
            }
            NodeKind::Divide => l / r,
            _ => return Err(EvaluationError::TypeMismatch { node: node.id }),
        };
        Ok(Value::Number(result))
    }

    fn eval_if_else(&self, node: &Node, ctx: &mut EvaluationContext) -> Result<Value, EvaluationError> {
        let cond_left = self.source(node, PortRole::IfConditionLeft)?;
        let cond_right = self.source(node, PortRole::IfConditionRight)?;
        let then_branch = self.source(node, PortRole::IfThen)?;
        let else_branch = self.source(node, PortRole::IfElse)?;

        let left = self.eval(cond_left, ctx)?;
        let right = self.eval(cond_right, ctx)?;

        if left.loosely_equals(&right) {
            self.eval(then_branch, ctx)
        } else {
            self.eval(else_branch, ctx)
        }
    }

    /// Id of the node feeding `port`, provided that node still exists
    fn source(&self, node: &Node, port: PortRole) -> Result<NodeId, EvaluationError> {
        self.graph
            .input_source(node.id, port)
            .map(|n| n.id)
            .ok_or(EvaluationError::MissingInput { node: node.id, port })
    }
}
