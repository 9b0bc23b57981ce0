use log::debug;

use super::config::EvidenceMapConfig;
use super::detail::NodeDetail;
use super::graph::{EvidenceGraph, Node, NodeId, Point};
use super::layout::{Viewport, apply_radial_layout};
use super::style::node_radius;
use super::types::EvidenceInput;

/// At most one node is selected at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Unselected,
	Selected(NodeId),
}

impl Selection {
	pub fn node_id(&self) -> Option<&NodeId> {
		match self {
			Selection::Unselected => None,
			Selection::Selected(id) => Some(id),
		}
	}
}

/// Laid-out graph snapshot plus the selection made on it.
pub struct EvidenceMapState {
	pub graph: EvidenceGraph,
	pub viewport: Viewport,
	pub selection: Selection,
	pub hovered: Option<NodeId>,
	pub config: EvidenceMapConfig,
}

impl EvidenceMapState {
	pub fn new(input: &EvidenceInput, viewport: Viewport, config: EvidenceMapConfig) -> Self {
		let mut graph = EvidenceGraph::build(input);
		apply_radial_layout(&mut graph, viewport, &config.layout);
		Self {
			graph,
			viewport,
			selection: Selection::Unselected,
			hovered: None,
			config,
		}
	}

	/// Replace the graph with one built from `input`; any selection is dropped.
	pub fn rebuild(&mut self, input: &EvidenceInput) {
		let mut graph = EvidenceGraph::build(input);
		apply_radial_layout(&mut graph, self.viewport, &self.config.layout);
		self.graph = graph;
		self.hovered = None;
		self.clear_selection();
	}

	/// Returns whether the layout had to be recomputed.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		let viewport = Viewport::new(width, height);
		if viewport == self.viewport {
			return false;
		}
		self.viewport = viewport;
		apply_radial_layout(&mut self.graph, viewport, &self.config.layout);
		true
	}

	/// Topmost node whose disc contains the point.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<&NodeId> {
		let point = Point::new(x, y);
		// nodes are drawn in order, so the last hit is the one on top
		self.graph
			.nodes()
			.iter()
			.rev()
			.find(|node| node.position.distance_to(point) <= node_radius(node.kind(), &self.config))
			.map(|node| &node.id)
	}

	/// A click on a node selects it; a click on the background clears.
	pub fn click(&mut self, x: f64, y: f64) -> &Selection {
		match self.node_at_position(x, y).cloned() {
			Some(id) => self.select(id),
			None => self.clear_selection(),
		}
		&self.selection
	}

	/// Select `id`, replacing any previous selection. Unknown ids clear instead.
	pub fn select(&mut self, id: NodeId) {
		if self.graph.contains(&id) {
			debug!("selected {id}");
			self.selection = Selection::Selected(id);
		} else {
			self.clear_selection();
		}
	}

	pub fn clear_selection(&mut self) {
		if self.selection != Selection::Unselected {
			debug!("selection cleared");
		}
		self.selection = Selection::Unselected;
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeId>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.selection.node_id().and_then(|id| self.graph.node(id))
	}

	pub fn detail(&self) -> Option<NodeDetail> {
		self.selected_node()
			.map(|node| NodeDetail::from_node(node, &self.config.thresholds))
	}

	pub fn is_selected(&self, id: &NodeId) -> bool {
		self.selection.node_id() == Some(id)
	}

	/// Whether `id` is drawn faded because another node's neighbourhood is in focus.
	pub fn is_dimmed(&self, id: &NodeId) -> bool {
		match self.selected_node() {
			Some(selected) => &selected.id != id && !selected.adjacency.contains(id),
			None => false,
		}
	}
}
