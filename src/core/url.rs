// url scoring - scheme, length, word and '@' checks

use super::verdict::{RuleHit, ScoreResult};
use crate::Error;
use url::Url;

const SUSPICIOUS_WORDS: [&str; 7] = ["free", "gift", "win", "prize", "login", "verify", "update"];

const MAX_LENGTH: usize = 80;

// longest url accepted at the boundary, as typed
const MAX_URL_LENGTH: usize = 2083;
const EXPECTED: &str = "http(s) url";

const PLAIN_HTTP_POINTS: u32 = 30;
const LENGTH_POINTS: u32 = 20;
const WORD_POINTS: u32 = 10;
const AT_SIGN_POINTS: u32 = 20;

const SAFE_REASON: &str = "No obvious suspicious patterns detected in this simple check.";

pub struct UrlScorer;

impl UrlScorer {
    /// Score the serialized form of a url that already passed [`validate_url`].
    pub fn score(url: &str) -> ScoreResult {
        ScoreResult::classify(Self::hits(url), SAFE_REASON)
    }

    pub fn hits(url: &str) -> Vec<RuleHit> {
        let lower = url.to_lowercase();
        let mut hits = Vec::new();

        if lower.starts_with("http://") {
            hits.push(RuleHit::new(
                PLAIN_HTTP_POINTS,
                "URL is not using HTTPS (secure connection).",
            ));
        }

        if url.chars().count() > MAX_LENGTH {
            hits.push(RuleHit::new(
                LENGTH_POINTS,
                "URL is unusually long, which may hide the real destination.",
            ));
        }

        for word in SUSPICIOUS_WORDS {
            if lower.contains(word) {
                hits.push(RuleHit::new(
                    WORD_POINTS,
                    format!("Contains suspicious word in URL: '{word}'."),
                ));
            }
        }

        if url.contains('@') {
            hits.push(RuleHit::new(
                AT_SIGN_POINTS,
                "URL contains '@', often used to trick users about the real site.",
            ));
        }

        hits
    }
}

/// Reject anything that isn't an absolute http(s) url with a host.
///
/// Returns the parsed url; its serialization (`as_str`) is what gets scored,
/// so `http:example.com` is checked as `http://example.com/`.
pub fn validate_url(raw: &str) -> Result<Url, Error> {
    let trimmed = raw.trim();

    let length = trimmed.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(Error::invalid(
            "url",
            EXPECTED,
            format!("url is {length} characters, at most {MAX_URL_LENGTH} allowed"),
        ));
    }

    let parsed = Url::parse(trimmed).map_err(|e| Error::invalid("url", EXPECTED, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::invalid(
            "url",
            EXPECTED,
            format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
        ));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(Error::invalid("url", EXPECTED, "url has no host")),
    }
}
