use super::canvas::{Canvas, Primitive, Rgb, VAnchor};
use super::title::{compose_title, format_number, target_caption};
use crate::common::{RenderError, RenderResult};
use crate::config::RenderConfig;
use crate::domains::layout::{classify_edges, curved_route, node_size, EdgeRoute, Layout, Position2D};
use crate::domains::scenario::{AgentId, Assignment, Metric, Node, ScenarioSnapshot, TargetId};
use std::collections::BTreeMap;
use tracing::debug;

/// Fixed vertical range: both rows plus the caption line under the targets.
pub const Y_LIMITS: (f64, f64) = (-0.6, 0.4);
/// Distance between a target node and its caption.
pub const CAPTION_OFFSET: f64 = 0.08;

/// What to draw for one view.
#[derive(Clone, Copy)]
pub struct ViewRequest<'a> {
    pub title: &'a str,
    pub assignment: Option<&'a dyn Assignment>,
    pub metric: Metric,
    pub metric_value: Option<f64>,
    /// Replaces the agent index labels; agents missing from the map stay unlabeled.
    pub agent_labels: Option<&'a BTreeMap<AgentId, String>>,
    /// Replaces the target value labels; targets missing from the map stay unlabeled.
    pub target_labels: Option<&'a BTreeMap<TargetId, String>>,
}

impl<'a> ViewRequest<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            assignment: None,
            metric: Metric::Score,
            metric_value: None,
            agent_labels: None,
            target_labels: None,
        }
    }

    pub fn with_assignment(mut self, assignment: &'a dyn Assignment) -> Self {
        self.assignment = Some(assignment);
        self
    }

    pub fn with_metric(mut self, metric: Metric, value: Option<f64>) -> Self {
        self.metric = metric;
        self.metric_value = value;
        self
    }

    pub fn with_agent_labels(mut self, labels: &'a BTreeMap<AgentId, String>) -> Self {
        self.agent_labels = Some(labels);
        self
    }

    pub fn with_target_labels(mut self, labels: &'a BTreeMap<TargetId, String>) -> Self {
        self.target_labels = Some(labels);
        self
    }
}

/// Draws a scenario onto a canvas in layer order: agent graph, targets and
/// action sets, assignment highlight, labels, then title and axes.
pub struct SceneRenderer<'c> {
    config: &'c RenderConfig,
}

impl<'c> SceneRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    pub fn draw(&self, snapshot: &ScenarioSnapshot, request: &ViewRequest<'_>, canvas: &mut Canvas) -> RenderResult<()> {
        let layout = Layout::compute(snapshot.agent_count, snapshot.target_count)?;
        let size = node_size(snapshot.agent_count);
        let cfg = self.config;

        // Agent graph
        for agent in 1..=snapshot.agent_count as AgentId {
            canvas.push(Primitive::Node { at: at(&layout, Node::Agent(agent))?, size, color: cfg.agent_color });
        }
        let classified = classify_edges(&snapshot.graph);
        let arc = curved_route(cfg.arc_rads_scale, snapshot.agent_count);
        for &(u, v) in &classified.straight {
            self.edge(canvas, &layout, Node::Agent(u), Node::Agent(v), EdgeRoute::Straight, cfg.normal_edge_color, size)?;
        }
        for &(u, v) in &classified.curved {
            self.edge(canvas, &layout, Node::Agent(u), Node::Agent(v), arc, cfg.normal_edge_color, size)?;
        }

        // Targets and action sets
        for target in 1..=snapshot.target_count as TargetId {
            canvas.push(Primitive::Node { at: at(&layout, Node::Target(target))?, size, color: cfg.target_color });
        }
        for (agent, target) in snapshot.action_set_edges() {
            self.edge(canvas, &layout, Node::Agent(agent), Node::Target(target), EdgeRoute::Straight, cfg.normal_edge_color, size)?;
        }

        // Assignment highlight goes last among edges so nothing covers it
        let mut highlighted = 0;
        if let Some(assignment) = request.assignment {
            for (agent, target) in snapshot.assignment_edges(assignment)? {
                self.edge(canvas, &layout, Node::Agent(agent), Node::Target(target), EdgeRoute::Straight, cfg.highlight_edge_color, size)?;
                highlighted += 1;
            }
        }

        self.labels(snapshot, request, &layout, canvas)?;

        if cfg.show_title {
            canvas.title = Some(compose_title(
                request.title,
                request.assignment.is_some(),
                request.metric,
                request.metric_value,
                cfg.show_metric_value,
            ));
            canvas.title_size = cfg.title_size;
            canvas.title_color = Some(cfg.text_color);
        }
        let (lo, hi) = layout.x_bounds();
        let pad = (0.05 * (hi - lo)).max(0.5);
        canvas.x_limits = Some((lo - pad, hi + pad));
        canvas.y_limits = Some(Y_LIMITS);
        canvas.axis_visible = false;

        debug!(
            agents = snapshot.agent_count,
            targets = snapshot.target_count,
            straight = classified.straight.len(),
            curved = classified.curved.len(),
            highlighted,
            "scene drawn"
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn edge(
        &self,
        canvas: &mut Canvas,
        layout: &Layout,
        from: Node,
        to: Node,
        route: EdgeRoute,
        color: Rgb,
        node_size: f64,
    ) -> RenderResult<()> {
        canvas.push(Primitive::Edge { from: at(layout, from)?, to: at(layout, to)?, route, color, node_size });
        Ok(())
    }

    fn labels(
        &self,
        snapshot: &ScenarioSnapshot,
        request: &ViewRequest<'_>,
        layout: &Layout,
        canvas: &mut Canvas,
    ) -> RenderResult<()> {
        let cfg = self.config;
        let agent_labels: Vec<(AgentId, String)> = match request.agent_labels {
            Some(labels) => labels.iter().map(|(a, l)| (*a, l.clone())).collect(),
            None => (1..=snapshot.agent_count as AgentId).map(|a| (a, a.to_string())).collect(),
        };
        for (agent, text) in agent_labels {
            canvas.push(Primitive::Text {
                at: at(layout, Node::Agent(agent))?,
                text,
                size: cfg.agent_label_size,
                color: cfg.text_color,
                anchor: VAnchor::Center,
            });
        }

        let target_labels: Vec<(TargetId, String)> = match request.target_labels {
            Some(labels) => labels.iter().map(|(t, l)| (*t, l.clone())).collect(),
            None => snapshot.target_values.iter().map(|(t, v)| (*t, format_number(*v))).collect(),
        };
        for (target, text) in target_labels {
            canvas.push(Primitive::Text {
                at: at(layout, Node::Target(target))?,
                text,
                size: cfg.target_label_size,
                color: cfg.text_color,
                anchor: VAnchor::Center,
            });
        }

        for target in 1..=snapshot.target_count as TargetId {
            let p = at(layout, Node::Target(target))?;
            canvas.push(Primitive::Text {
                at: Position2D::new(p.x, p.y - CAPTION_OFFSET),
                text: target_caption(target),
                size: cfg.caption_size,
                color: cfg.text_color,
                anchor: VAnchor::Top,
            });
        }
        Ok(())
    }
}

fn at(layout: &Layout, node: Node) -> RenderResult<Position2D> {
    layout
        .position(node)
        .ok_or_else(|| RenderError::MalformedScenario(format!("no position for node {}", node)))
}
