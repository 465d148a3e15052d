// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tests driving the graph the way the playground does.

use syntaxia_graph::codegen::{INCOMPLETE_OPERATION, TOO_DEEP};
use syntaxia_graph::evaluation::{
    CYCLE_MESSAGE, EVALUATION_FAILED_MESSAGE, NO_PRINT_NODE_MESSAGE, TOO_DEEP_MESSAGE,
};
use syntaxia_graph::{CodeGenerator, Evaluator, Graph, NodeId, NodeKind, PlaygroundConfig, PortRole};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("syntaxia_graph=trace")
        .with_test_writer()
        .try_init();
}

fn number(graph: &mut Graph, value: &str) -> NodeId {
    let id = graph.add_node(NodeKind::Number, [300.0, 300.0]);
    graph.set_content(id, value);
    id
}

fn feed(graph: &mut Graph, from: NodeId, to: NodeId, port: PortRole) {
    graph.add_connection(from, PortRole::Output, to, port);
}

fn run(graph: &Graph) -> String {
    Evaluator::new(graph).run()
}

fn code(graph: &Graph) -> String {
    CodeGenerator::new(graph).generate()
}

#[test]
fn test_plus_feeding_print() {
    init_tracing();
    let mut graph = Graph::new();
    let a = number(&mut graph, "3");
    let b = number(&mut graph, "4");
    let plus = graph.add_node(NodeKind::Plus, [500.0, 300.0]);
    let print = graph.add_node(NodeKind::Print, [700.0, 300.0]);
    feed(&mut graph, a, plus, PortRole::Left);
    feed(&mut graph, b, plus, PortRole::Right);
    feed(&mut graph, plus, print, PortRole::Input);

    assert_eq!(run(&graph), "7");
    assert_eq!(code(&graph), "print((3 + 4))");
}

#[test]
fn test_divide_by_zero_reports_failure() {
    init_tracing();
    let mut graph = Graph::new();
    let a = number(&mut graph, "5");
    let b = number(&mut graph, "0");
    let divide = graph.add_node(NodeKind::Divide, [0.0, 0.0]);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, a, divide, PortRole::Left);
    feed(&mut graph, b, divide, PortRole::Right);
    feed(&mut graph, divide, print, PortRole::Input);

    assert_eq!(run(&graph), EVALUATION_FAILED_MESSAGE);
    // Generation does not compute, so it is unaffected
    assert_eq!(code(&graph), "print((5 / 0))");
}

#[test]
fn test_missing_print_node() {
    let mut graph = Graph::new();
    assert_eq!(run(&graph), NO_PRINT_NODE_MESSAGE);
    assert_eq!(code(&graph), NO_PRINT_NODE_MESSAGE);

    number(&mut graph, "1");
    assert_eq!(run(&graph), NO_PRINT_NODE_MESSAGE);
    assert_eq!(code(&graph), NO_PRINT_NODE_MESSAGE);
}

#[test]
fn test_if_else_program() {
    let mut graph = Graph::new();
    let guess = graph.add_node(NodeKind::Variable, [0.0, 0.0]);
    graph.set_content(guess, "2");
    let answer = number(&mut graph, "2");
    let right = graph.add_node(NodeKind::Text, [0.0, 0.0]);
    graph.set_content(right, "correct");
    let wrong = graph.add_node(NodeKind::Plus, [0.0, 0.0]); // never wired
    let branch = graph.add_node(NodeKind::IfElse, [0.0, 0.0]);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, guess, branch, PortRole::IfConditionLeft);
    feed(&mut graph, answer, branch, PortRole::IfConditionRight);
    feed(&mut graph, right, branch, PortRole::IfThen);
    feed(&mut graph, wrong, branch, PortRole::IfElse);
    graph.add_connection(branch, PortRole::IfOutput, print, PortRole::Input);

    assert_eq!(run(&graph), "correct");
    assert_eq!(
        code(&graph),
        format!("print(if 2 == 2 {{\n    correct\n}} else {{\n    {INCOMPLETE_OPERATION}\n}})")
    );

    graph.set_content(guess, "3");
    assert_eq!(run(&graph), EVALUATION_FAILED_MESSAGE);
}

#[test]
fn test_cascade_delete_then_evaluate() {
    let mut graph = Graph::new();
    let a = number(&mut graph, "1");
    let b = number(&mut graph, "2");
    let plus = graph.add_node(NodeKind::Plus, [0.0, 0.0]);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, a, plus, PortRole::Left);
    feed(&mut graph, b, plus, PortRole::Right);
    feed(&mut graph, plus, print, PortRole::Input);
    assert_eq!(run(&graph), "3");

    graph.delete_node(b);
    assert!(graph.connections().all(|c| c.from_node != b && c.to_node != b));
    assert_eq!(graph.connection_count(), 2);
    assert_eq!(run(&graph), EVALUATION_FAILED_MESSAGE);
    assert!(code(&graph).contains("incomplete operation"));
}

#[test]
fn test_rejected_edits_leave_graph_unchanged() {
    let mut graph = Graph::new();
    let a = number(&mut graph, "1");
    let plus = graph.add_node(NodeKind::Plus, [0.0, 0.0]);

    assert!(graph.add_connection(plus, PortRole::Output, plus, PortRole::Output).is_none());
    assert_eq!(graph.connection_count(), 0);

    feed(&mut graph, a, plus, PortRole::Left);
    feed(&mut graph, a, plus, PortRole::Left);
    assert_eq!(graph.connection_count(), 1);
}

#[test]
fn test_cyclic_graph_does_not_overflow() {
    init_tracing();
    let mut graph = Graph::new();
    let a = graph.add_node(NodeKind::Plus, [0.0, 0.0]);
    let b = graph.add_node(NodeKind::Multiply, [0.0, 0.0]);
    let one = number(&mut graph, "1");
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, b, a, PortRole::Left);
    feed(&mut graph, one, a, PortRole::Right);
    feed(&mut graph, a, b, PortRole::Left);
    feed(&mut graph, one, b, PortRole::Right);
    feed(&mut graph, a, print, PortRole::Input);

    assert_eq!(run(&graph), CYCLE_MESSAGE);
    assert_eq!(code(&graph), "print(((/* cyclic reference */ * 1) + 1))");
}

#[test]
fn test_loop_asymmetry() {
    let mut graph = Graph::new();
    let start = number(&mut graph, "0");
    let end = number(&mut graph, "5");
    let body = graph.add_node(NodeKind::Text, [0.0, 0.0]);
    let looped = graph.add_node(NodeKind::Loop, [0.0, 0.0]);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, start, looped, PortRole::LoopStart);
    feed(&mut graph, end, looped, PortRole::LoopEnd);
    feed(&mut graph, body, looped, PortRole::LoopBody);
    graph.add_connection(looped, PortRole::LoopOutput, print, PortRole::Input);

    assert_eq!(run(&graph), "0");
    assert_eq!(code(&graph), "print(for i in 0..<5 {\n    \"Hello\"\n})");
}

#[test]
fn test_config_drives_evaluator_and_generator() {
    let config = PlaygroundConfig::from_ron_str(
        "(evaluation: (max_depth: 2), codegen: (indent_unit: \"  \"))",
    )
    .unwrap();

    let mut graph = Graph::new();
    let a = number(&mut graph, "1");
    let b = number(&mut graph, "2");
    let plus = graph.add_node(NodeKind::Plus, [0.0, 0.0]);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, a, plus, PortRole::Left);
    feed(&mut graph, b, plus, PortRole::Right);
    feed(&mut graph, plus, print, PortRole::Input);

    let evaluator = Evaluator::with_config(&graph, &config.evaluation);
    assert_eq!(evaluator.run(), TOO_DEEP_MESSAGE);
    assert_eq!(Evaluator::new(&graph).run(), "3");

    let generator = CodeGenerator::with_config(&graph, &config.codegen);
    assert_eq!(generator.generate(), "print((1 + 2))");
}

#[test]
fn test_deep_chain_hits_depth_limit() {
    init_tracing();
    let mut graph = Graph::new();
    let one = number(&mut graph, "1");
    let mut current = one;
    for _ in 0..300 {
        let plus = graph.add_node(NodeKind::Plus, [0.0, 0.0]);
        feed(&mut graph, current, plus, PortRole::Left);
        feed(&mut graph, one, plus, PortRole::Right);
        current = plus;
    }
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    feed(&mut graph, current, print, PortRole::Input);

    assert_eq!(run(&graph), TOO_DEEP_MESSAGE);
    let code = code(&graph);
    assert!(code.starts_with("print(("));
    assert!(code.contains(TOO_DEEP));
}

#[test]
fn test_cycle_behind_untaken_branch() {
    let mut graph = Graph::new();
    let a = graph.add_node(NodeKind::Plus, [0.0, 0.0]);
    let b = graph.add_node(NodeKind::Minus, [0.0, 0.0]);
    let one = number(&mut graph, "1");
    let two = number(&mut graph, "2");
    feed(&mut graph, b, a, PortRole::Left);
    feed(&mut graph, one, a, PortRole::Right);
    feed(&mut graph, a, b, PortRole::Left);
    feed(&mut graph, one, b, PortRole::Right);
    let branch = graph.add_node(NodeKind::IfElse, [0.0, 0.0]);
    feed(&mut graph, one, branch, PortRole::IfConditionLeft);
    feed(&mut graph, one, branch, PortRole::IfConditionRight);
    feed(&mut graph, two, branch, PortRole::IfThen);
    feed(&mut graph, a, branch, PortRole::IfElse);
    let print = graph.add_node(NodeKind::Print, [0.0, 0.0]);
    graph.add_connection(branch, PortRole::IfOutput, print, PortRole::Input);

    assert_eq!(run(&graph), "2");
    // Generation renders both branches, so the cycle shows up as a placeholder
    assert!(code(&graph).contains("/* cyclic reference */"));
}
