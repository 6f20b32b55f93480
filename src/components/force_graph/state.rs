use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Palette color for an owner slot, cycling once the palette runs out.
pub fn owner_color(slot: usize) -> &'static str {
	COLORS[slot % COLORS.len()]
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	ids: HashMap<String, DefaultNodeIdx>,
	/// Owner slot per edge, stored under both endpoint orders.
	owners: HashMap<(DefaultNodeIdx, DefaultNodeIdx), usize>,
}

impl ForceGraphState {
	/// An empty canvas; nothing is drawn until [`Self::load`].
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: simulation(),
			edges: Vec::new(),
			ids: HashMap::new(),
			owners: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Replaces the whole graph. Nodes start on a circle around the origin,
	/// wide enough that large maps do not begin as one blob.
	pub fn load(&mut self, data: &GraphData) {
		let mut graph = simulation();
		let mut ids = HashMap::new();
		let mut edges = Vec::new();
		let n = data.nodes.len().max(1) as f64;
		let radius = 100.0 * (n / 10.0).sqrt().max(1.0);

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / n;
			let idx = graph.add_node(NodeData {
				x: (radius * angle.cos()) as f32,
				y: (radius * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: node.color.clone(),
				},
			});
			ids.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (ids.get(&link.source), ids.get(&link.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.ids = ids;
		self.edges = edges;
		self.owners.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};
	}

	pub fn node_count(&self) -> usize {
		self.ids.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	fn edge_between(&self, source: &str, target: &str) -> Option<(DefaultNodeIdx, DefaultNodeIdx)> {
		let (a, b) = (self.node_index(source)?, self.node_index(target)?);
		self.edges
			.iter()
			.any(|&(s, t)| (s, t) == (a, b) || (s, t) == (b, a))
			.then_some((a, b))
	}

	pub fn has_edge(&self, source: &str, target: &str) -> bool {
		self.edge_between(source, target).is_some()
	}

	/// Colors the edge between two node ids. Returns false if no such edge
	/// was loaded.
	pub fn set_edge_owner(&mut self, source: &str, target: &str, owner: usize) -> bool {
		let Some((a, b)) = self.edge_between(source, target) else {
			return false;
		};
		self.owners.insert((a, b), owner);
		self.owners.insert((b, a), owner);
		true
	}

	pub fn edge_owner(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> Option<usize> {
		self.owners.get(&(a, b)).copied()
	}

	pub fn node_index(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.ids.get(id).copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn triangle() -> GraphData {
		let node = |id: &str| GraphNode {
			id: id.into(),
			label: None,
			color: COLORS[1].into(),
		};
		let link = |s: &str, t: &str| GraphLink {
			source: s.into(),
			target: t.into(),
		};
		GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c"), link("c", "missing")],
		}
	}

	#[test]
	fn load_skips_links_to_unknown_nodes() {
		let mut state = ForceGraphState::new(800.0, 600.0);
		assert_eq!(state.node_count(), 0);
		state.load(&triangle());
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edge_count(), 2);
	}

	#[test]
	fn edge_owner_is_symmetric_and_cleared_on_reload() {
		let mut state = ForceGraphState::new(800.0, 600.0);
		state.load(&triangle());
		assert!(state.set_edge_owner("c", "b", 3));
		assert!(!state.set_edge_owner("a", "c", 3));
		assert!(!state.set_edge_owner("a", "zzz", 3));
		assert!(state.has_edge("b", "a"));
		assert!(!state.has_edge("a", "c"));

		let (b, c) = (state.node_index("b").unwrap(), state.node_index("c").unwrap());
		assert_eq!(state.edge_owner(b, c), Some(3));
		assert_eq!(state.edge_owner(c, b), Some(3));

		state.load(&triangle());
		let (b, c) = (state.node_index("b").unwrap(), state.node_index("c").unwrap());
		assert_eq!(state.edge_owner(b, c), None);
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = ForceGraphState::new(800.0, 600.0);
		state.load(&triangle());
		let b = state.node_index("b").unwrap();
		state.set_hover(Some(b));
		assert_eq!(state.hover.neighbors.len(), 2);
		assert!(state.is_highlighted(state.node_index("a").unwrap()));
		state.set_hover(None);
		assert!(state.has_active_highlight());
		assert_eq!(state.hover.prev_node, Some(b));
	}

	#[test]
	fn owner_colors_cycle() {
		assert_eq!(owner_color(0), owner_color(COLORS.len()));
		assert_ne!(owner_color(0), owner_color(1));
	}
}
