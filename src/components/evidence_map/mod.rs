//! Evidence map: a radial node-link view of a verdict, its claims and their sources.

mod component;
pub mod config;
mod detail;
pub mod graph;
pub mod layout;
mod legend;
mod render;
pub mod state;
pub mod style;
pub mod types;

pub use component::EvidenceMap;
pub use config::EvidenceMapConfig;
pub use detail::{DetailPanel, NodeDetail};
pub use graph::{Connection, ConnectionKind, EvidenceGraph, Node, NodeId, NodeKind, NodePayload};
pub use layout::{Viewport, apply_radial_layout};
pub use legend::EvidenceLegend;
pub use state::{EvidenceMapState, Selection};
pub use types::{CitationRecord, ClaimRecord, EvidenceInput, Stance, VerdictSummary};
