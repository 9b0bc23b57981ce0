use leptos::callback::UnsyncCallback;
use leptos::prelude::*;

use super::config::Thresholds;
use super::graph::{Node, NodePayload};
use super::style::{Tone, confidence_tone, score_tone, stance_tone};
use super::types::Stance;

/// What the side panel shows for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeDetail {
	Verdict {
		text: String,
		score: f64,
		tone: Tone,
	},
	Claim {
		text: String,
		author: String,
		confidence_percent: u32,
		tone: Tone,
	},
	Citation {
		title: String,
		snippet: String,
		domain: String,
		stance: Stance,
		link: Option<String>,
	},
}

impl NodeDetail {
	pub fn from_node(node: &Node, thresholds: &Thresholds) -> Self {
		match &node.payload {
			NodePayload::Main(verdict) => NodeDetail::Verdict {
				text: verdict.verdict_text.clone(),
				score: verdict.score(),
				tone: score_tone(verdict.score(), thresholds),
			},
			NodePayload::Claim(claim) => NodeDetail::Claim {
				text: claim.text.clone(),
				author: claim.author_or_unknown().to_string(),
				confidence_percent: (claim.confidence() * 100.0).round() as u32,
				tone: confidence_tone(claim.confidence(), thresholds),
			},
			NodePayload::Citation { record, .. } => NodeDetail::Citation {
				title: record.title.clone(),
				snippet: record.snippet.clone(),
				domain: record.domain.clone(),
				stance: record.stance,
				link: record.link().map(str::to_string),
			},
		}
	}

	pub fn heading(&self) -> &'static str {
		match self {
			NodeDetail::Verdict { .. } => "Verdict",
			NodeDetail::Claim { .. } => "Claim",
			NodeDetail::Citation { .. } => "Source",
		}
	}
}

#[component]
pub fn DetailPanel(detail: NodeDetail, #[prop(into)] on_close: UnsyncCallback<()>) -> impl IntoView {
	let heading = detail.heading();
	let body = match detail {
		NodeDetail::Verdict { text, score, tone } => view! {
			<p class="evidence-detail-text">{text}</p>
			<p class=format!("evidence-detail-score {}", tone.css_class())>
				{format!("Score: {:.0}/100", score)}
			</p>
		}
		.into_any(),
		NodeDetail::Claim {
			text,
			author,
			confidence_percent,
			tone,
		} => view! {
			<p class="evidence-detail-text">{text}</p>
			<p class="evidence-detail-meta">{format!("Author: {}", author)}</p>
			<p class=format!("evidence-detail-score {}", tone.css_class())>
				{format!("Confidence: {}%", confidence_percent)}
			</p>
		}
		.into_any(),
		NodeDetail::Citation {
			title,
			snippet,
			domain,
			stance,
			link,
		} => view! {
			<p class="evidence-detail-title">{title}</p>
			<blockquote class="evidence-detail-snippet">{snippet}</blockquote>
			<p class="evidence-detail-meta">{domain}</p>
			<span class=format!("evidence-detail-stance {}", stance_tone(stance).css_class())>
				{stance.label()}
			</span>
			{link.map(|href| view! {
				<a class="evidence-detail-link" href=href target="_blank" rel="noopener noreferrer">
					"Open source"
				</a>
			})}
		}
		.into_any(),
	};

	view! {
		<aside class="evidence-detail">
			<header class="evidence-detail-header">
				<h2>{heading}</h2>
				<button
					class="evidence-detail-close"
					title="Close"
					on:click=move |_| on_close.run(())
				>
					"×"
				</button>
			</header>
			{body}
		</aside>
	}
}
