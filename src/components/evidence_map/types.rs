use serde::{Deserialize, Serialize};

/// Author shown for claims that arrive without one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// How a citation relates to the claim it is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stance {
	Support,
	Refute,
	#[default]
	Neutral,
}

impl Stance {
	pub fn as_str(self) -> &'static str {
		match self {
			Stance::Support => "support",
			Stance::Refute => "refute",
			Stance::Neutral => "neutral",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Stance::Support => "Supports",
			Stance::Refute => "Refutes",
			Stance::Neutral => "Neutral",
		}
	}
}

impl From<&str> for Stance {
	fn from(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"support" | "supports" | "supporting" => Stance::Support,
			"refute" | "refutes" | "refuting" => Stance::Refute,
			_ => Stance::Neutral,
		}
	}
}

impl From<String> for Stance {
	fn from(raw: String) -> Self {
		Stance::from(raw.as_str())
	}
}

impl From<Stance> for String {
	fn from(stance: Stance) -> Self {
		stance.as_str().to_string()
	}
}

/// An atomic factual statement extracted from the analyzed content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimRecord {
	pub id: String,
	pub text: String,
	pub confidence: f64,
	pub author: Option<String>,
}

impl ClaimRecord {
	pub fn new(id: impl Into<String>, text: impl Into<String>, confidence: f64) -> Self {
		Self {
			id: id.into(),
			text: text.into(),
			confidence,
			author: None,
		}
	}

	pub fn with_author(mut self, author: impl Into<String>) -> Self {
		self.author = Some(author.into());
		self
	}

	/// Confidence clamped to `[0, 1]`.
	pub fn confidence(&self) -> f64 {
		clamp_unit(self.confidence)
	}

	pub fn author_or_unknown(&self) -> &str {
		self.author
			.as_deref()
			.map(str::trim)
			.filter(|a| !a.is_empty())
			.unwrap_or(UNKNOWN_AUTHOR)
	}
}

/// An external source used as evidence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CitationRecord {
	pub id: String,
	pub title: String,
	pub snippet: String,
	pub url: Option<String>,
	pub domain: String,
	pub stance: Stance,
	pub trust_score: f64,
}

impl CitationRecord {
	/// Trust score clamped to `[0, 1]`.
	pub fn trust(&self) -> f64 {
		clamp_unit(self.trust_score)
	}

	/// Outbound link, if the record carries a usable URL.
	pub fn link(&self) -> Option<&str> {
		self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
	}
}

/// Overall assessment of the analyzed content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerdictSummary {
	pub verdict_text: String,
	pub score: f64,
}

impl VerdictSummary {
	pub fn new(verdict_text: impl Into<String>, score: f64) -> Self {
		Self {
			verdict_text: verdict_text.into(),
			score,
		}
	}

	/// Score clamped to `[0, 100]`.
	pub fn score(&self) -> f64 {
		if self.score.is_nan() {
			0.0
		} else {
			self.score.clamp(0.0, 100.0)
		}
	}
}

/// Everything the evidence map is drawn from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceInput {
	pub claims: Vec<ClaimRecord>,
	pub citations: Vec<CitationRecord>,
	pub verdict: VerdictSummary,
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
	if value.is_nan() {
		0.0
	} else {
		value.clamp(0.0, 1.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stance_parsing_is_lenient() {
		assert_eq!(Stance::from("Refute"), Stance::Refute);
		assert_eq!(Stance::from(" SUPPORTS "), Stance::Support);
		assert_eq!(Stance::from("refuting"), Stance::Refute);
		assert_eq!(Stance::from("mixed"), Stance::Neutral);
		assert_eq!(Stance::from(""), Stance::Neutral);
	}

	#[test]
	fn test_decode_api_payload() {
		let json = r#"{
			"claims": [{"id": "c1", "text": "the earth is flat", "confidence": 0.9}],
			"citations": [{
				"id": "s1",
				"title": "earth",
				"snippet": "the earth is flat according to nasa",
				"domain": "nasa.gov",
				"stance": "Refute",
				"trustScore": 0.95
			}],
			"verdict": {"verdictText": "False", "score": 12}
		}"#;
		let input: EvidenceInput = serde_json::from_str(json).unwrap();

		assert_eq!(input.claims[0].author_or_unknown(), UNKNOWN_AUTHOR);
		assert_eq!(input.citations[0].stance, Stance::Refute);
		assert_eq!(input.citations[0].trust(), 0.95);
		assert_eq!(input.citations[0].link(), None);
		assert_eq!(input.verdict.score(), 12.0);
	}

	#[test]
	fn test_missing_fields_fall_back_to_defaults() {
		let citation: CitationRecord = serde_json::from_str(r#"{"id": "s9"}"#).unwrap();
		assert_eq!(citation.stance, Stance::Neutral);
		assert_eq!(citation.trust(), 0.0);
		assert!(citation.title.is_empty());

		let input: EvidenceInput = serde_json::from_str("{}").unwrap();
		assert!(input.claims.is_empty());
		assert!(input.citations.is_empty());
	}

	#[test]
	fn test_out_of_range_values_are_clamped() {
		assert_eq!(ClaimRecord::new("c", "t", 1.7).confidence(), 1.0);
		assert_eq!(ClaimRecord::new("c", "t", f64::NAN).confidence(), 0.0);
		assert_eq!(VerdictSummary::new("v", -5.0).score(), 0.0);
		assert_eq!(VerdictSummary::new("v", 250.0).score(), 100.0);
	}

	#[test]
	fn test_blank_author_and_url_are_treated_as_missing() {
		let claim = ClaimRecord::new("c", "t", 0.5).with_author("   ");
		assert_eq!(claim.author_or_unknown(), UNKNOWN_AUTHOR);

		let citation = CitationRecord {
			url: Some("  ".into()),
			..Default::default()
		};
		assert_eq!(citation.link(), None);
	}
}
