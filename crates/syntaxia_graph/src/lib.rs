// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual node graph for the Syntaxia playground.
//!
//! Learners build small programs by wiring nodes together: literals,
//! arithmetic, an equality branch, a counted loop and a print sink. This
//! crate holds that graph and gives it two readings:
//! - [`Evaluator`] computes the value reaching the print node
//! - [`CodeGenerator`] renders the same graph as indented pseudo-code
//!
//! ## Architecture
//!
//! - [`Graph`] owns every node and connection; connections refer to nodes by
//!   id and name ports by [`PortRole`]
//! - Editing operations keep the graph valid by silently ignoring self-loops
//!   and duplicate connections
//! - Evaluation and generation are stateless walks over the graph
//! - [`ui::PlaygroundView`] is an egui front end over the same operations

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod connection;
pub mod evaluation;
pub mod graph;
pub mod node;
pub mod port;
pub mod ui;
pub mod value;

pub use catalog::NodeCategory;
pub use codegen::CodeGenerator;
pub use config::{ConfigError, PlaygroundConfig};
pub use connection::{Connection, ConnectionId};
pub use evaluation::{EvaluationError, Evaluator};
pub use graph::Graph;
pub use node::{Node, NodeId, NodeKind};
pub use port::{port_position, PortDirection, PortRole};
pub use value::Value;
