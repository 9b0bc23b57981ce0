use leptos::prelude::*;

use super::config::Palette;
use super::graph::StanceCounts;
use super::style::stance_tone;
use super::types::Stance;

/// Stance swatches with the number of citation nodes of each kind.
#[component]
pub fn EvidenceLegend(#[prop(into)] counts: Signal<StanceCounts>, palette: Palette) -> impl IntoView {
	let rows = [Stance::Support, Stance::Refute, Stance::Neutral].map(|stance| {
		let color = stance_tone(stance).color(&palette).to_string();
		let count = move || {
			let c = counts.get();
			match stance {
				Stance::Support => c.support,
				Stance::Refute => c.refute,
				Stance::Neutral => c.neutral,
			}
		};
		view! {
			<li class="evidence-legend-row">
				<span
					class="evidence-legend-swatch"
					style=format!("background-color: {}", color)
				></span>
				<span class="evidence-legend-label">{stance.label()}</span>
				<span class="evidence-legend-count">{move || format!("({})", count())}</span>
			</li>
		}
	});

	view! {
		<div class="evidence-legend">
			<h3>"Sources"</h3>
			<ul>{rows.into_iter().collect_view()}</ul>
			<p class="evidence-legend-hint">"Dashed lines refute a claim"</p>
		</div>
	}
}
