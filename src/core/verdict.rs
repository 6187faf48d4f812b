// shared verdict types and the three-tier classification

use serde::{Deserialize, Serialize};
use std::fmt;

// an empty tally is bumped up to this so "safe" never reads as zero risk
const SAFE_FLOOR: u32 = 10;
const PHISHING_THRESHOLD: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Safe,
    Suspicious,
    Phishing,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Safe => "safe",
            Label::Suspicious => "suspicious",
            Label::Phishing => "phishing",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered check: the points it adds and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub points: u32,
    pub reason: String,
}

impl RuleHit {
    pub fn new(points: u32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub label: Label,
    pub risk_score: f64,
    pub explanation: String,
}

impl ScoreResult {
    /// Sum the hits and turn them into a verdict.
    ///
    /// No hits means `safe` at the floor score with `safe_reason` as the
    /// explanation. Otherwise the total is kept as-is and labelled
    /// `suspicious` below 60, `phishing` from 60 up.
    pub fn classify(hits: Vec<RuleHit>, safe_reason: &str) -> Self {
        let score: u32 = hits.iter().map(|h| h.points).sum();
        let mut reasons: Vec<String> = hits.into_iter().map(|h| h.reason).collect();

        let (label, score) = if score == 0 {
            reasons.push(safe_reason.to_string());
            (Label::Safe, SAFE_FLOOR)
        } else if score < PHISHING_THRESHOLD {
            (Label::Suspicious, score)
        } else {
            (Label::Phishing, score)
        };

        Self {
            label,
            risk_score: f64::from(score),
            explanation: reasons.join(" "),
        }
    }
}
