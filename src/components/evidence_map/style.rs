//! Mapping from stance, confidence and trust onto color, opacity and dashes.

use super::config::{EvidenceMapConfig, Palette, Thresholds};
use super::graph::{Connection, ConnectionKind, Node, NodeKind, NodePayload};
use super::types::Stance;

/// Semantic color of a node or edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
	Positive,
	Caution,
	Negative,
	Emphasis,
	Neutral,
}

impl Tone {
	/// CSS class used by the detail panel and legend.
	pub fn css_class(self) -> &'static str {
		match self {
			Tone::Positive => "tone-positive",
			Tone::Caution => "tone-caution",
			Tone::Negative => "tone-negative",
			Tone::Emphasis => "tone-emphasis",
			Tone::Neutral => "tone-neutral",
		}
	}

	pub fn color(self, palette: &Palette) -> &str {
		match self {
			Tone::Positive => &palette.positive,
			Tone::Caution => &palette.caution,
			Tone::Negative => &palette.negative,
			Tone::Emphasis => &palette.emphasis,
			Tone::Neutral => &palette.neutral,
		}
	}
}

pub fn score_tone(score: f64, thresholds: &Thresholds) -> Tone {
	if score > thresholds.score_positive {
		Tone::Positive
	} else if score > thresholds.score_caution {
		Tone::Caution
	} else {
		Tone::Negative
	}
}

pub fn confidence_tone(confidence: f64, thresholds: &Thresholds) -> Tone {
	if confidence > thresholds.confidence_emphasis {
		Tone::Emphasis
	} else {
		Tone::Neutral
	}
}

pub fn stance_tone(stance: Stance) -> Tone {
	match stance {
		Stance::Support => Tone::Positive,
		Stance::Refute => Tone::Negative,
		Stance::Neutral => Tone::Neutral,
	}
}

pub fn node_tone(node: &Node, thresholds: &Thresholds) -> Tone {
	match &node.payload {
		NodePayload::Main(verdict) => score_tone(verdict.score(), thresholds),
		NodePayload::Claim(claim) => confidence_tone(claim.confidence(), thresholds),
		NodePayload::Citation { record, .. } => stance_tone(record.stance),
	}
}

pub fn node_radius(kind: NodeKind, config: &EvidenceMapConfig) -> f64 {
	match kind {
		NodeKind::Main => config.radii.main,
		NodeKind::Claim => config.radii.claim,
		NodeKind::Citation => config.radii.citation,
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	pub tone: Tone,
	pub opacity: f64,
	pub dashed: bool,
}

pub fn edge_style(connection: &Connection) -> EdgeStyle {
	let tone = match connection.kind {
		ConnectionKind::Support => Tone::Positive,
		ConnectionKind::Refute => Tone::Negative,
		ConnectionKind::Neutral => Tone::Neutral,
	};
	EdgeStyle {
		tone,
		opacity: connection.strength,
		dashed: connection.kind == ConnectionKind::Refute,
	}
}
