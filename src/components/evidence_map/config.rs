//! Fixed design constants for the evidence map.

/// Ring radii used by the radial layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Distance from the verdict node to every claim node (R1).
	pub claim_ring_radius: f64,
	/// Distance from a claim node to each of its citation nodes (R2).
	pub citation_ring_radius: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			claim_ring_radius: 180.0,
			citation_ring_radius: 70.0,
		}
	}
}

/// Visual radius of each node kind.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRadii {
	pub main: f64,
	pub claim: f64,
	pub citation: f64,
}

impl Default for NodeRadii {
	fn default() -> Self {
		Self {
			main: 38.0,
			claim: 20.0,
			citation: 11.0,
		}
	}
}

/// Cutoffs for the color encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
	/// Scores strictly above this are positive.
	pub score_positive: f64,
	/// Scores strictly above this (and not positive) are cautionary.
	pub score_caution: f64,
	/// Claims with confidence strictly above this are emphasized.
	pub confidence_emphasis: f64,
}

impl Default for Thresholds {
	fn default() -> Self {
		Self {
			score_positive: 70.0,
			score_caution: 40.0,
			confidence_emphasis: 0.7,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub positive: String,
	pub caution: String,
	pub negative: String,
	pub emphasis: String,
	pub neutral: String,
	pub background: String,
	pub label: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			positive: "#22c55e".into(),
			caution: "#eab308".into(),
			negative: "#ef4444".into(),
			emphasis: "#3b82f6".into(),
			neutral: "#9ca3af".into(),
			background: "#1a1a2e".into(),
			label: "#ffffff".into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceMapConfig {
	pub layout: LayoutConfig,
	pub radii: NodeRadii,
	pub thresholds: Thresholds,
	pub palette: Palette,
	/// Used until the container reports a real size.
	pub fallback_width: f64,
	pub fallback_height: f64,
}

impl Default for EvidenceMapConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			radii: NodeRadii::default(),
			thresholds: Thresholds::default(),
			palette: Palette::default(),
			fallback_width: 800.0,
			fallback_height: 600.0,
		}
	}
}
