//! Deterministic two-ring radial layout.
//!
//! The verdict sits at the viewport center, claims are spread evenly on a ring
//! around it, and each claim's citations are spread on a smaller ring around
//! that claim. Every call recomputes all positions from scratch.

use std::collections::HashMap;
use std::f64::consts::TAU;

use log::debug;

use super::config::LayoutConfig;
use super::graph::{EvidenceGraph, NodeId, NodePayload, Point};

/// Size of the drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	/// Negative or NaN dimensions collapse to zero.
	pub fn new(width: f64, height: f64) -> Self {
		let sane = |v: f64| if v.is_nan() { 0.0 } else { v.max(0.0) };
		Self {
			width: sane(width),
			height: sane(height),
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Angle of slot `index` when `count` slots share a full circle.
pub fn slot_angle(index: usize, count: usize) -> f64 {
	index as f64 * TAU / count.max(1) as f64
}

fn on_ring(center: Point, radius: f64, angle: f64) -> Point {
	Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Assign a position to every node of `graph`.
pub fn apply_radial_layout(graph: &mut EvidenceGraph, viewport: Viewport, config: &LayoutConfig) {
	let center = viewport.center();
	let claim_count = graph.claims().count();

	let mut linked: HashMap<NodeId, usize> = HashMap::new();
	for node in graph.nodes() {
		if let NodePayload::Citation { claim, .. } = &node.payload {
			*linked.entry(claim.clone()).or_default() += 1;
		}
	}

	let mut claim_positions: HashMap<NodeId, Point> = HashMap::with_capacity(claim_count);
	let mut claim_index = 0;
	for node in graph.nodes_mut() {
		node.position = match &node.payload {
			NodePayload::Main(_) => center,
			NodePayload::Claim(_) => {
				let angle = slot_angle(claim_index, claim_count);
				claim_index += 1;
				let position = on_ring(center, config.claim_ring_radius, angle);
				claim_positions.insert(node.id.clone(), position);
				position
			}
			// placed in the second pass, once every claim has a position
			NodePayload::Citation { .. } => center,
		};
	}

	let mut placed: HashMap<NodeId, usize> = HashMap::new();
	for node in graph.nodes_mut() {
		let NodePayload::Citation { claim, .. } = &node.payload else {
			continue;
		};
		let parent = claim_positions.get(claim).copied().unwrap_or(center);
		let total = linked.get(claim).copied().unwrap_or(0);
		let slot = placed.entry(claim.clone()).or_default();
		node.position = on_ring(parent, config.citation_ring_radius, slot_angle(*slot, total));
		*slot += 1;
	}

	debug!(
		"radial layout: {} claims in {}x{} viewport",
		claim_count, viewport.width, viewport.height
	);
}
