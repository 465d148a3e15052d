// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playground UI built on egui.
//!
//! Features:
//! - Node catalog grouped by category
//! - Node rendering with ports at their fixed offsets
//! - Connection rendering (bezier curves)
//! - Node dragging, panning and scroll zoom
//! - Connection drag-to-create from an output onto an input
//! - Secondary click to delete nodes and connections
//! - Run output and live generated code

use crate::catalog::NodeCategory;
use crate::codegen::CodeGenerator;
use crate::config::PlaygroundConfig;
use crate::evaluation::Evaluator;
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::port::{connection_curve, port_position, PortRole};
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

const NODE_ROUNDING: f32 = 12.0;
const NODE_SHADOW_OFFSET: f32 = 4.0;
const CONNECTION_THICKNESS: f32 = 2.0;
const GRID_SPACING: f32 = 40.0;
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 4.0;
const BOTTOM_PANEL_HEIGHT: f32 = 180.0;

/// Dragging state for creating connections
#[derive(Debug, Clone)]
pub struct ConnectionDrag {
    /// Source node
    pub from_node: NodeId,
    /// Source port
    pub from_port: PortRole,
    /// Current pointer position (screen space)
    pub current_pos: Pos2,
}

/// Canvas interaction mode
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Waiting for input
    #[default]
    Normal,
    /// Panning the view
    Panning,
    /// Dragging a node
    DraggingNode(NodeId),
    /// Creating a connection
    CreatingConnection(ConnectionDrag),
}

/// The playground: catalog, canvas, generated code and run output
pub struct PlaygroundView {
    /// The graph being edited
    pub graph: Graph,
    /// Settings
    pub config: PlaygroundConfig,
    /// Category shown in the catalog
    pub category: NodeCategory,
    /// Current pan offset (screen space)
    pub pan: Vec2,
    /// Current zoom level
    pub zoom: f32,
    /// Selected node
    pub selected: Option<NodeId>,
    /// Current interaction mode
    pub mode: InteractionMode,
    /// Output of the last run
    pub terminal_output: String,
    /// Code for the current graph
    pub generated_code: String,
    /// Graph revision `generated_code` was built from
    code_revision: Option<u64>,
}

impl PlaygroundView {
    /// Create a playground with default settings
    pub fn new() -> Self {
        Self::with_config(PlaygroundConfig::default())
    }

    /// Create a playground with explicit settings
    pub fn with_config(config: PlaygroundConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
            category: NodeCategory::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            selected: None,
            mode: InteractionMode::Normal,
            terminal_output: String::new(),
            generated_code: String::new(),
            code_revision: None,
        }
    }

    /// Evaluate the graph and store the result for the terminal
    pub fn run_code(&mut self) -> &str {
        self.terminal_output = Evaluator::with_config(&self.graph, &self.config.evaluation).run();
        tracing::debug!("Run output: {}", self.terminal_output);
        &self.terminal_output
    }

    /// Regenerate code if the graph changed since the last call
    pub fn refresh_code(&mut self) {
        let revision = self.graph.revision();
        if self.code_revision != Some(revision) {
            self.generated_code =
                CodeGenerator::with_config(&self.graph, &self.config.codegen).generate();
            self.code_revision = Some(revision);
        }
    }

    /// Render the playground
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.toolbar(ui);
        ui.separator();
        self.content_editor(ui);

        let height = (ui.available_height() - BOTTOM_PANEL_HEIGHT).max(200.0);
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), height),
            egui::Sense::click_and_drag(),
        );
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, Color32::from_rgb(20, 20, 24));
        if self.config.canvas.show_grid {
            self.draw_grid(&painter, rect);
        }

        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom_at(hover, 1.0 + scroll * 0.001, rect);
            }
        }
        self.handle_input(&response, rect);

        self.draw_connections(&painter, rect);
        if let InteractionMode::CreatingConnection(ref drag) = self.mode {
            self.draw_connection_drag(&painter, rect, drag);
        }
        self.draw_nodes(&painter, rect);

        self.refresh_code();
        ui.separator();
        self.bottom_panel(ui);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Category")
                .selected_text(self.category.display_name())
                .show_ui(ui, |ui| {
                    for category in NodeCategory::all() {
                        ui.selectable_value(&mut self.category, *category, category.display_name());
                    }
                });

            ui.separator();

            for kind in self.category.kinds() {
                let [r, g, b] = kind.color();
                let button = egui::Button::new(
                    egui::RichText::new(kind.default_title()).color(Color32::WHITE),
                )
                .fill(Color32::from_rgb(r, g, b));
                if ui.add(button).clicked() {
                    let id = self.graph.add_node(*kind, self.config.canvas.spawn_position);
                    self.selected = Some(id);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Run Code").clicked() {
                    self.run_code();
                }
                if ui.button("Clear").clicked() {
                    self.graph.clear();
                    self.selected = None;
                    self.mode = InteractionMode::Normal;
                }
            });
        });
    }

    fn content_editor(&mut self, ui: &mut egui::Ui) {
        let Some(id) = self.selected else {
            ui.label("Select a node to edit it. Right-click a node or port to delete.");
            return;
        };
        let Some(node) = self.graph.node(id) else {
            self.selected = None;
            return;
        };
        if !node.kind.has_editable_content() {
            ui.label(format!("{} node", node.title));
            return;
        }

        let mut content = node.content.clone();
        let title = node.title.clone();
        ui.horizontal(|ui| {
            ui.label(title);
            if ui.text_edit_singleline(&mut content).changed() {
                self.graph.set_content(id, content);
            }
        });
    }

    fn bottom_panel(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |columns| {
            columns[0].label("Code");
            egui::ScrollArea::vertical()
                .id_salt("generated_code")
                .show(&mut columns[0], |ui| {
                    ui.monospace(&self.generated_code);
                });

            columns[1].label("Terminal");
            egui::ScrollArea::vertical()
                .id_salt("terminal_output")
                .show(&mut columns[1], |ui| {
                    ui.label(
                        egui::RichText::new(&self.terminal_output)
                            .monospace()
                            .color(Color32::from_rgb(80, 220, 100)),
                    );
                });
        });
    }

    /// Convert graph position to screen position
    pub fn graph_to_screen(&self, graph_pos: [f32; 2], rect: Rect) -> Pos2 {
        rect.min + self.pan + Vec2::new(graph_pos[0], graph_pos[1]) * self.zoom
    }

    /// Convert screen position to graph position
    pub fn screen_to_graph(&self, screen_pos: Pos2, rect: Rect) -> [f32; 2] {
        let pos = (screen_pos - rect.min - self.pan) / self.zoom;
        [pos.x, pos.y]
    }

    /// Scale the view by `factor`, keeping the graph point under `anchor` fixed
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32, rect: Rect) {
        let [x, y] = self.screen_to_graph(anchor, rect);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = anchor - rect.min - Vec2::new(x, y) * self.zoom;
    }

    fn node_rect(&self, node: &Node, rect: Rect) -> Rect {
        let [w, h] = self.config.canvas.node_size;
        Rect::from_center_size(
            self.graph_to_screen(node.position, rect),
            Vec2::new(w, h) * self.zoom,
        )
    }

    fn handle_input(&mut self, response: &egui::Response, rect: Rect) {
        let pointer = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos());

        match &mut self.mode {
            InteractionMode::Normal => {
                let Some(pointer) = pointer else { return };

                if response.drag_started_by(egui::PointerButton::Primary) {
                    if let Some((node_id, role)) = self.port_at(pointer, rect) {
                        if role.is_output() {
                            self.mode = InteractionMode::CreatingConnection(ConnectionDrag {
                                from_node: node_id,
                                from_port: role,
                                current_pos: pointer,
                            });
                            return;
                        }
                    }
                    self.mode = match self.node_at(pointer, rect) {
                        Some(node_id) => {
                            self.selected = Some(node_id);
                            InteractionMode::DraggingNode(node_id)
                        }
                        None => InteractionMode::Panning,
                    };
                } else if response.drag_started_by(egui::PointerButton::Middle) {
                    self.mode = InteractionMode::Panning;
                } else if response.clicked() {
                    self.selected = self.node_at(pointer, rect);
                } else if response.secondary_clicked() {
                    self.delete_at(pointer, rect);
                }
            }

            InteractionMode::Panning => {
                if response.dragged() {
                    self.pan += response.drag_delta();
                }
                if response.drag_stopped() {
                    self.mode = InteractionMode::Normal;
                }
            }

            InteractionMode::DraggingNode(node_id) => {
                let node_id = *node_id;
                if response.dragged() {
                    let delta = response.drag_delta() / self.zoom;
                    if let Some(node) = self.graph.node(node_id) {
                        let position = [node.position[0] + delta.x, node.position[1] + delta.y];
                        self.graph.move_node(node_id, position);
                    }
                }
                if response.drag_stopped() {
                    self.mode = InteractionMode::Normal;
                }
            }

            InteractionMode::CreatingConnection(drag) => {
                if let Some(pointer) = pointer {
                    drag.current_pos = pointer;
                }
                if response.drag_stopped() {
                    let (from_node, from_port, drop_pos) = (drag.from_node, drag.from_port, drag.current_pos);
                    if let Some((to_node, to_port)) = self.port_at(drop_pos, rect) {
                        if !to_port.is_output() {
                            self.graph.add_connection(from_node, from_port, to_node, to_port);
                        }
                    }
                    self.mode = InteractionMode::Normal;
                }
            }
        }
    }

    fn node_at(&self, pointer: Pos2, rect: Rect) -> Option<NodeId> {
        // Last drawn is on top
        self.graph
            .nodes()
            .filter(|n| self.node_rect(n, rect).contains(pointer))
            .last()
            .map(|n| n.id)
    }

    fn port_at(&self, pointer: Pos2, rect: Rect) -> Option<(NodeId, PortRole)> {
        let radius = self.config.canvas.port_radius * self.zoom;
        self.graph.nodes().find_map(|node| {
            node.kind
                .ports()
                .iter()
                .find(|role| {
                    self.graph_to_screen(port_position(node, **role), rect)
                        .distance(pointer)
                        <= radius
                })
                .map(|role| (node.id, *role))
        })
    }

    fn delete_at(&mut self, pointer: Pos2, rect: Rect) {
        if let Some((node_id, role)) = self.port_at(pointer, rect) {
            let doomed: Vec<_> = self
                .graph
                .connections()
                .filter(|c| {
                    (c.to_node == node_id && c.to_port == role)
                        || (c.from_node == node_id && c.from_port == role)
                })
                .map(|c| c.id)
                .collect();
            for id in doomed {
                self.graph.delete_connection(id);
            }
            return;
        }

        if let Some(node_id) = self.node_at(pointer, rect) {
            self.graph.delete_node(node_id);
            if self.selected == Some(node_id) {
                self.selected = None;
            }
        }
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: Rect) {
        let color = Color32::from_rgba_unmultiplied(60, 60, 60, 100);
        let spacing = GRID_SPACING * self.zoom;

        let mut x = rect.left() + self.pan.x.rem_euclid(spacing);
        while x < rect.right() {
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                Stroke::new(1.0, color),
            );
            x += spacing;
        }

        let mut y = rect.top() + self.pan.y.rem_euclid(spacing);
        while y < rect.bottom() {
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                Stroke::new(1.0, color),
            );
            y += spacing;
        }
    }

    fn draw_connections(&self, painter: &egui::Painter, rect: Rect) {
        for connection in self.graph.connections() {
            let from = self.graph.node(connection.from_node);
            let to = self.graph.node(connection.to_node);
            if let (Some(from), Some(to)) = (from, to) {
                let start = port_position(from, connection.from_port);
                let end = port_position(to, connection.to_port);
                self.draw_bezier_connection(painter, rect, start, end, Color32::from_gray(230));
            }
        }
    }

    fn draw_connection_drag(&self, painter: &egui::Painter, rect: Rect, drag: &ConnectionDrag) {
        if let Some(node) = self.graph.node(drag.from_node) {
            let start = port_position(node, drag.from_port);
            let end = self.screen_to_graph(drag.current_pos, rect);
            self.draw_bezier_connection(painter, rect, start, end, Color32::from_rgb(255, 220, 120));
        }
    }

    fn draw_bezier_connection(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        from: [f32; 2],
        to: [f32; 2],
        color: Color32,
    ) {
        let curve = connection_curve(from, to).map(|p| self.graph_to_screen(p, rect));
        let points = bezier_points(curve[0], curve[1], curve[2], curve[3], 32);
        for pair in points.windows(2) {
            painter.line_segment([pair[0], pair[1]], Stroke::new(CONNECTION_THICKNESS * self.zoom, color));
        }
    }

    fn draw_nodes(&self, painter: &egui::Painter, rect: Rect) {
        let rounding = NODE_ROUNDING * self.zoom;
        for node in self.graph.nodes() {
            let node_rect = self.node_rect(node, rect);
            if !node_rect.expand(self.config.canvas.port_radius * 8.0 * self.zoom).intersects(rect) {
                continue;
            }

            painter.rect_filled(
                node_rect.translate(Vec2::splat(NODE_SHADOW_OFFSET * self.zoom)),
                rounding,
                Color32::from_rgba_unmultiplied(0, 0, 0, 120),
            );

            let [r, g, b] = node.kind.color();
            painter.rect_filled(node_rect, rounding, Color32::from_rgb(r, g, b));

            let outline = if self.selected == Some(node.id) {
                Stroke::new(4.0, Color32::from_rgb(255, 220, 120))
            } else {
                Stroke::new(4.0, Color32::WHITE)
            };
            painter.rect_stroke(node_rect, rounding, outline);

            let has_content = node.kind.has_editable_content();
            let title_pos = if has_content {
                node_rect.center() - Vec2::new(0.0, 12.0 * self.zoom)
            } else {
                node_rect.center()
            };
            painter.text(
                title_pos,
                egui::Align2::CENTER_CENTER,
                &node.title,
                egui::FontId::proportional(16.0 * self.zoom),
                Color32::WHITE,
            );
            if has_content {
                painter.text(
                    node_rect.center() + Vec2::new(0.0, 12.0 * self.zoom),
                    egui::Align2::CENTER_CENTER,
                    &node.content,
                    egui::FontId::monospace(13.0 * self.zoom),
                    Color32::from_gray(235),
                );
            }

            self.draw_ports(painter, rect, node);
        }
    }

    fn draw_ports(&self, painter: &egui::Painter, rect: Rect, node: &Node) {
        let radius = self.config.canvas.port_radius * self.zoom;
        for role in node.kind.ports() {
            let pos = self.graph_to_screen(port_position(node, *role), rect);
            let fill = if role.is_output() {
                Color32::WHITE
            } else {
                Color32::from_rgba_unmultiplied(255, 255, 255, 180)
            };
            painter.circle_filled(pos, radius, fill);
            painter.circle_stroke(pos, radius, Stroke::new(3.0, Color32::BLACK));
            painter.text(
                pos + Vec2::new(0.0, radius + 6.0),
                egui::Align2::CENTER_CENTER,
                role.label(),
                egui::FontId::proportional(10.0 * self.zoom),
                Color32::WHITE,
            );
        }
    }
}

impl Default for PlaygroundView {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate points along a cubic bezier curve
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Pos2::new(x, y));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_bezier_endpoints() {
        let points = bezier_points(
            Pos2::new(0.0, 0.0),
            Pos2::new(30.0, 0.0),
            Pos2::new(70.0, 50.0),
            Pos2::new(100.0, 50.0),
            8,
        );
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Pos2::new(0.0, 0.0));
        assert_eq!(points[8], Pos2::new(100.0, 50.0));
    }

    #[test]
    fn test_screen_graph_round_trip() {
        let mut view = PlaygroundView::new();
        view.pan = Vec2::new(15.0, -5.0);
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(800.0, 600.0));
        let screen = view.graph_to_screen([10.0, 20.0], rect);
        assert_eq!(screen, Pos2::new(125.0, 65.0));
        assert_eq!(view.screen_to_graph(screen, rect), [10.0, 20.0]);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut view = PlaygroundView::new();
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(800.0, 600.0));
        let anchor = view.graph_to_screen([200.0, 100.0], rect);

        view.zoom_at(anchor, 2.0, rect);
        assert_eq!(view.zoom, 2.0);
        assert_eq!(view.screen_to_graph(anchor, rect), [200.0, 100.0]);
        assert_eq!(view.graph_to_screen([210.0, 100.0], rect), anchor + Vec2::new(20.0, 0.0));

        view.zoom_at(anchor, 100.0, rect);
        assert_eq!(view.zoom, MAX_ZOOM);
        view.zoom_at(anchor, 0.0001, rect);
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_hit_testing_follows_zoom() {
        let mut view = PlaygroundView::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let plus = view.graph.add_node(NodeKind::Plus, [200.0, 100.0]);
        view.zoom = 2.0;

        assert_eq!(view.node_at(Pos2::new(400.0, 200.0), rect), Some(plus));
        // Output port sits 70 graph units right of the centre
        assert_eq!(view.port_at(Pos2::new(540.0, 200.0), rect), Some((plus, PortRole::Output)));
        assert_eq!(view.port_at(Pos2::new(270.0, 100.0), rect), None);
    }

    #[test]
    fn test_port_and_node_hit_testing() {
        let mut view = PlaygroundView::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let plus = view.graph.add_node(NodeKind::Plus, [300.0, 300.0]);

        assert_eq!(view.port_at(Pos2::new(230.0, 285.0), rect), Some((plus, PortRole::Left)));
        assert_eq!(view.port_at(Pos2::new(370.0, 300.0), rect), Some((plus, PortRole::Output)));
        assert_eq!(view.node_at(Pos2::new(300.0, 300.0), rect), Some(plus));
        assert_eq!(view.node_at(Pos2::new(10.0, 10.0), rect), None);
    }

    #[test]
    fn test_delete_at_port_removes_its_connections() {
        let mut view = PlaygroundView::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let a = view.graph.add_node(NodeKind::Number, [100.0, 100.0]);
        let print = view.graph.add_node(NodeKind::Print, [400.0, 100.0]);
        view.graph.add_connection(a, PortRole::Output, print, PortRole::Input);

        view.delete_at(Pos2::new(330.0, 100.0), rect);
        assert_eq!(view.graph.connection_count(), 0);
        assert_eq!(view.graph.node_count(), 2);

        view.delete_at(Pos2::new(400.0, 110.0), rect);
        assert_eq!(view.graph.node_count(), 1);
    }

    #[test]
    fn test_run_and_refresh() {
        let mut view = PlaygroundView::new();
        view.refresh_code();
        assert_eq!(view.generated_code, crate::evaluation::NO_PRINT_NODE_MESSAGE);

        let a = view.graph.add_node(NodeKind::Number, [0.0, 0.0]);
        view.graph.set_content(a, "42");
        let print = view.graph.add_node(NodeKind::Print, [200.0, 0.0]);
        view.graph.add_connection(a, PortRole::Output, print, PortRole::Input);

        view.refresh_code();
        assert_eq!(view.generated_code, "print(42)");
        assert_eq!(view.run_code(), "42");
    }
}
