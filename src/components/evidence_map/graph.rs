//! Builds the evidence graph from claims, citations and the verdict.
//!
//! The graph is a snapshot: any change to the input produces a brand new
//! [`EvidenceGraph`] rather than patching the previous one.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use log::debug;

use super::types::{
	CitationRecord, ClaimRecord, EvidenceInput, Stance, VerdictSummary, clamp_unit,
};

/// Identity of a node within one graph snapshot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
	/// The single verdict node.
	pub fn main() -> Self {
		Self("main".into())
	}

	pub fn claim(claim_id: &str) -> Self {
		Self(format!("claim:{claim_id}"))
	}

	/// A citation as it appears under one particular claim.
	pub fn citation(claim: &NodeId, citation_id: &str) -> Self {
		Self(format!("{}/citation:{citation_id}", claim.0))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Main,
	Claim,
	Citation,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodePayload {
	Main(VerdictSummary),
	Claim(ClaimRecord),
	Citation {
		/// Claim node this citation instance hangs off.
		claim: NodeId,
		record: CitationRecord,
	},
}

impl NodePayload {
	pub fn kind(&self) -> NodeKind {
		match self {
			NodePayload::Main(_) => NodeKind::Main,
			NodePayload::Claim(_) => NodeKind::Claim,
			NodePayload::Citation { .. } => NodeKind::Citation,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub payload: NodePayload,
	pub position: Point,
	pub adjacency: BTreeSet<NodeId>,
}

impl Node {
	fn new(id: NodeId, payload: NodePayload) -> Self {
		Self {
			id,
			payload,
			position: Point::default(),
			adjacency: BTreeSet::new(),
		}
	}

	pub fn kind(&self) -> NodeKind {
		self.payload.kind()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
	Support,
	Refute,
	Neutral,
}

impl From<Stance> for ConnectionKind {
	fn from(stance: Stance) -> Self {
		match stance {
			Stance::Support => ConnectionKind::Support,
			Stance::Refute => ConnectionKind::Refute,
			Stance::Neutral => ConnectionKind::Neutral,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub from: NodeId,
	pub to: NodeId,
	pub kind: ConnectionKind,
	/// Always within `[0, 1]`.
	pub strength: f64,
}

impl Connection {
	pub fn touches(&self, id: &NodeId) -> bool {
		&self.from == id || &self.to == id
	}
}

/// Number of citation nodes per stance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StanceCounts {
	pub support: usize,
	pub refute: usize,
	pub neutral: usize,
}

/// Case-insensitive, bidirectional containment test linking a citation to a claim.
///
/// A citation belongs to a claim when its snippet contains the claim text, or
/// the claim text contains its title. Empty strings are contained in anything,
/// so an empty title links to every claim.
pub fn is_linked(claim: &ClaimRecord, citation: &CitationRecord) -> bool {
	let text = claim.text.to_lowercase();
	citation.snippet.to_lowercase().contains(&text)
		|| text.contains(&citation.title.to_lowercase())
}

/// Nodes and connections of one evidence map, in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceGraph {
	nodes: Vec<Node>,
	connections: Vec<Connection>,
}

impl EvidenceGraph {
	/// Build a fresh graph.
	///
	/// Node order is: the verdict, every claim in input order, then citation
	/// instances grouped by claim (claim order, then citation input order).
	pub fn build(input: &EvidenceInput) -> Self {
		let mut builder = GraphBuilder::default();
		let main = builder.push(NodeId::main(), NodePayload::Main(input.verdict.clone()));

		let claim_nodes: Vec<usize> = input
			.claims
			.iter()
			.map(|claim| {
				let idx = builder.push(NodeId::claim(&claim.id), NodePayload::Claim(claim.clone()));
				builder.connect(main, idx, ConnectionKind::Neutral, claim.confidence());
				idx
			})
			.collect();

		for (claim, &claim_idx) in input.claims.iter().zip(&claim_nodes) {
			let claim_id = builder.nodes[claim_idx].id.clone();
			for citation in input.citations.iter().filter(|c| is_linked(claim, c)) {
				let idx = builder.push(
					NodeId::citation(&claim_id, &citation.id),
					NodePayload::Citation {
						claim: claim_id.clone(),
						record: citation.clone(),
					},
				);
				builder.connect(claim_idx, idx, citation.stance.into(), citation.trust());
			}
		}

		let graph = builder.finish();
		debug!(
			"evidence graph rebuilt: {} nodes, {} connections",
			graph.nodes.len(),
			graph.connections.len()
		);
		graph
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}

	pub fn contains(&self, id: &NodeId) -> bool {
		self.node(id).is_some()
	}

	pub fn main(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.kind() == NodeKind::Main)
	}

	pub fn claims(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(|n| n.kind() == NodeKind::Claim)
	}

	/// Citation instances scoped to `claim`, in input order.
	pub fn citations_of<'a>(&'a self, claim: &'a NodeId) -> impl Iterator<Item = &'a Node> + 'a {
		self.nodes.iter().filter(move |n| {
			matches!(&n.payload, NodePayload::Citation { claim: owner, .. } if owner == claim)
		})
	}

	pub fn stance_counts(&self) -> StanceCounts {
		let mut counts = StanceCounts::default();
		for node in &self.nodes {
			if let NodePayload::Citation { record, .. } = &node.payload {
				match record.stance {
					Stance::Support => counts.support += 1,
					Stance::Refute => counts.refute += 1,
					Stance::Neutral => counts.neutral += 1,
				}
			}
		}
		counts
	}
}

#[derive(Default)]
struct GraphBuilder {
	nodes: Vec<Node>,
	connections: Vec<Connection>,
	taken: HashSet<NodeId>,
}

impl GraphBuilder {
	/// Adds a node, suffixing the id when the input repeats a record id.
	fn push(&mut self, id: NodeId, payload: NodePayload) -> usize {
		let mut unique = id.clone();
		let mut n = 2;
		while self.taken.contains(&unique) {
			unique = NodeId(format!("{}#{n}", id.0));
			n += 1;
		}
		self.taken.insert(unique.clone());
		self.nodes.push(Node::new(unique, payload));
		self.nodes.len() - 1
	}

	fn connect(&mut self, from: usize, to: usize, kind: ConnectionKind, strength: f64) {
		let (from_id, to_id) = (self.nodes[from].id.clone(), self.nodes[to].id.clone());
		self.nodes[from].adjacency.insert(to_id.clone());
		self.nodes[to].adjacency.insert(from_id.clone());
		self.connections.push(Connection {
			from: from_id,
			to: to_id,
			kind,
			strength: clamp_unit(strength),
		});
	}

	fn finish(self) -> EvidenceGraph {
		EvidenceGraph {
			nodes: self.nodes,
			connections: self.connections,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn citation(id: &str, title: &str, snippet: &str, stance: Stance, trust: f64) -> CitationRecord {
		CitationRecord {
			id: id.into(),
			title: title.into(),
			snippet: snippet.into(),
			url: None,
			domain: "example.org".into(),
			stance,
			trust_score: trust,
		}
	}

	fn input(claims: Vec<ClaimRecord>, citations: Vec<CitationRecord>) -> EvidenceInput {
		EvidenceInput {
			claims,
			citations,
			verdict: VerdictSummary::new("Mostly false", 30.0),
		}
	}

	#[test]
	fn test_empty_input_yields_only_main() {
		let graph = EvidenceGraph::build(&EvidenceInput {
			verdict: VerdictSummary::new("No claims found", 0.0),
			..Default::default()
		});

		assert_eq!(graph.nodes().len(), 1);
		assert_eq!(graph.nodes()[0].kind(), NodeKind::Main);
		assert!(graph.connections().is_empty());
	}

	#[test]
	fn test_flat_earth_scenario() {
		let graph = EvidenceGraph::build(&input(
			vec![ClaimRecord::new("c1", "the earth is flat", 0.9)],
			vec![citation(
				"s1",
				"earth",
				"the earth is flat according to nasa",
				Stance::Refute,
				0.95,
			)],
		));

		let kinds: Vec<_> = graph.nodes().iter().map(Node::kind).collect();
		assert_eq!(kinds, vec![NodeKind::Main, NodeKind::Claim, NodeKind::Citation]);

		let claim = NodeId::claim("c1");
		let cited = NodeId::citation(&claim, "s1");
		assert!(graph.contains(&cited));

		let conns = graph.connections();
		assert_eq!(conns.len(), 2);
		assert_eq!(conns[0].from, NodeId::main());
		assert_eq!(conns[0].to, claim);
		assert_eq!(conns[0].kind, ConnectionKind::Neutral);
		assert_eq!(conns[0].strength, 0.9);
		assert_eq!(conns[1].from, claim);
		assert_eq!(conns[1].to, cited);
		assert_eq!(conns[1].kind, ConnectionKind::Refute);
		assert_eq!(conns[1].strength, 0.95);
	}

	#[test]
	fn test_linking_is_case_insensitive_both_ways() {
		let claim = ClaimRecord::new("c", "Vaccines Cause Autism", 0.5);

		// snippet contains claim text
		assert!(is_linked(
			&claim,
			&citation("a", "unrelated", "Study: VACCINES CAUSE AUTISM is false", Stance::Refute, 1.0)
		));
		// claim text contains title
		assert!(is_linked(&claim, &citation("b", "autism", "nothing here", Stance::Neutral, 1.0)));
		assert!(!is_linked(&claim, &citation("c", "measles", "measles outbreak", Stance::Support, 1.0)));
	}

	#[test]
	fn test_empty_and_blank_strings_link_permissively() {
		let claim = ClaimRecord::new("c", "water is wet", 0.5);
		assert!(is_linked(&claim, &citation("a", "", "dry facts", Stance::Support, 1.0)));
		assert!(is_linked(&claim, &citation("b", " ", "dry facts", Stance::Support, 1.0)));
		assert!(!is_linked(&claim, &citation("c", "  ", "dry facts", Stance::Support, 1.0)));

		let empty = ClaimRecord::new("e", "", 0.5);
		assert!(is_linked(&empty, &citation("d", "unrelated", "any snippet", Stance::Neutral, 1.0)));

		let graph = EvidenceGraph::build(&input(
			vec![claim, ClaimRecord::new("c2", "fire is hot", 0.5)],
			vec![citation("s1", "", "dry facts", Stance::Support, 1.0)],
		));
		assert_eq!(graph.nodes().len(), 5);
		assert_eq!(graph.connections().len(), 4);
	}

	#[test]
	fn test_citation_matching_several_claims_gets_one_node_per_claim() {
		let graph = EvidenceGraph::build(&input(
			vec![
				ClaimRecord::new("c1", "coffee prevents cancer", 0.4),
				ClaimRecord::new("c2", "coffee causes insomnia", 0.8),
			],
			vec![citation("s1", "coffee", "a review of coffee", Stance::Support, 0.7)],
		));

		let c1 = NodeId::claim("c1");
		let c2 = NodeId::claim("c2");
		assert_eq!(graph.citations_of(&c1).count(), 1);
		assert_eq!(graph.citations_of(&c2).count(), 1);
		assert_eq!(graph.nodes().len(), 5);
		assert_eq!(graph.connections().len(), 4);
	}

	#[test]
	fn test_unmatched_citations_are_omitted() {
		let graph = EvidenceGraph::build(&input(
			vec![ClaimRecord::new("c1", "the moon is cheese", 0.2)],
			vec![citation("s1", "mars", "mars has water", Stance::Support, 0.8)],
		));

		assert_eq!(graph.nodes().len(), 2);
		assert_eq!(graph.stance_counts(), StanceCounts::default());
	}

	#[test]
	fn test_adjacency_invariants() {
		let graph = EvidenceGraph::build(&input(
			vec![
				ClaimRecord::new("c1", "sugar makes kids hyper", 0.6),
				ClaimRecord::new("c2", "bulls hate red", 0.3),
			],
			vec![
				citation("s1", "sugar", "meta-analysis", Stance::Refute, 0.9),
				citation("s2", "red", "bulls are colorblind to red", Stance::Refute, 0.8),
				citation("s3", "bulls", "rodeo lore", Stance::Support, 0.2),
			],
		));
		let main = NodeId::main();

		assert_eq!(graph.nodes().iter().filter(|n| n.kind() == NodeKind::Main).count(), 1);
		for node in graph.nodes() {
			match node.kind() {
				NodeKind::Main => {}
				NodeKind::Claim => assert!(node.adjacency.contains(&main)),
				NodeKind::Citation => {
					assert!(!node.adjacency.contains(&main));
					assert!(node.adjacency.iter().any(|id| {
						graph.node(id).map(Node::kind) == Some(NodeKind::Claim)
					}));
				}
			}
		}
	}

	#[test]
	fn test_strength_is_clamped() {
		let graph = EvidenceGraph::build(&input(
			vec![ClaimRecord::new("c1", "x rays are safe", 3.0)],
			vec![citation("s1", "x rays", "", Stance::Support, -1.0)],
		));

		assert!(graph.connections().iter().all(|c| (0.0..=1.0).contains(&c.strength)));
		assert_eq!(graph.connections()[0].strength, 1.0);
		assert_eq!(graph.connections()[1].strength, 0.0);
	}

	#[test]
	fn test_duplicate_record_ids_stay_unique() {
		let graph = EvidenceGraph::build(&input(
			vec![
				ClaimRecord::new("dup", "first claim", 0.5),
				ClaimRecord::new("dup", "second claim", 0.5),
			],
			vec![],
		));

		let ids: HashSet<_> = graph.nodes().iter().map(|n| n.id.clone()).collect();
		assert_eq!(ids.len(), graph.nodes().len());
	}

	#[test]
	fn test_stance_counts() {
		let graph = EvidenceGraph::build(&input(
			vec![ClaimRecord::new("c1", "tides follow the moon", 0.9)],
			vec![
				citation("s1", "tides", "", Stance::Support, 0.9),
				citation("s2", "moon", "", Stance::Support, 0.8),
				citation("s3", "follow", "", Stance::Neutral, 0.1),
			],
		));

		assert_eq!(
			graph.stance_counts(),
			StanceCounts {
				support: 2,
				refute: 0,
				neutral: 1
			}
		);
	}
}
