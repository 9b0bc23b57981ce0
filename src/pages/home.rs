use leptos::prelude::*;
use log::info;

use crate::components::evidence_map::{
	CitationRecord, ClaimRecord, EvidenceInput, EvidenceMap, NodeId, Stance, VerdictSummary,
};

fn citation(
	id: &str,
	title: &str,
	snippet: &str,
	domain: &str,
	stance: Stance,
	trust_score: f64,
) -> CitationRecord {
	CitationRecord {
		id: id.into(),
		title: title.into(),
		snippet: snippet.into(),
		url: Some(format!("https://{domain}/{id}")),
		domain: domain.into(),
		stance,
		trust_score,
	}
}

/// Canned fact-checks standing in for the analysis API.
fn sample_analysis(index: usize) -> EvidenceInput {
	match index % 2 {
		0 => EvidenceInput {
			claims: vec![
				ClaimRecord::new("c1", "the great wall is visible from space", 0.92)
					.with_author("Viral post"),
				ClaimRecord::new("c2", "it was built over two thousand years", 0.64),
				ClaimRecord::new("c3", "the wall is a single continuous structure", 0.41),
			],
			citations: vec![
				citation(
					"s1",
					"visible from space",
					"Astronauts report the great wall is visible from space only under ideal conditions, if at all",
					"nasa.gov",
					Stance::Refute,
					0.95,
				),
				citation(
					"s2",
					"two thousand years",
					"Construction spanned roughly two thousand years across several dynasties",
					"britannica.com",
					Stance::Support,
					0.88,
				),
				citation(
					"s3",
					"single continuous structure",
					"The wall is a network of segments rather than one line",
					"unesco.org",
					Stance::Refute,
					0.81,
				),
				citation(
					"s4",
					"great wall",
					"Travel blog about visiting the wall",
					"travelnotes.example",
					Stance::Neutral,
					0.3,
				),
				citation(
					"s5",
					"moon",
					"Unrelated article about the moon",
					"astro.example",
					Stance::Support,
					0.5,
				),
			],
			verdict: VerdictSummary::new("Mostly false", 34.0),
		},
		_ => EvidenceInput {
			claims: vec![ClaimRecord::new("c1", "honey never spoils", 0.77)],
			citations: vec![citation(
				"s1",
				"honey",
				"Archaeologists found edible honey in ancient tombs; honey never spoils when sealed",
				"smithsonianmag.com",
				Stance::Support,
				0.9,
			)],
			verdict: VerdictSummary::new("True", 88.0),
		},
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let analysis = RwSignal::new(0_usize);
	let data = Signal::derive(move || sample_analysis(analysis.get()));
	let on_select = Callback::new(|selected: Option<NodeId>| {
		match selected {
			Some(id) => info!("evidence map selection: {id}"),
			None => info!("evidence map selection cleared"),
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<EvidenceMap data=data fullscreen=true on_select=on_select />
				<div class="graph-overlay">
					<h1>"Evidence Map"</h1>
					<p class="subtitle">"Click a node for details. Click the background to clear."</p>
					<button on:click=move |_| analysis.update(|i| *i += 1)>"Next analysis"</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
