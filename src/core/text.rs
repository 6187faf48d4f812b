// free-text scoring - phrase, link and otp checks

use super::verdict::{RuleHit, ScoreResult};

const PHRASES: [&str; 9] = [
    "click here",
    "verify your account",
    "your account has been locked",
    "urgent",
    "password",
    "bank",
    "lottery",
    "free gift",
    "congratulations",
];

const PHRASE_POINTS: u32 = 30;
const LINK_POINTS: u32 = 20;
const OTP_POINTS: u32 = 20;

const SAFE_REASON: &str = "No obvious phishing patterns detected in this simple check.";

pub struct TextScorer;

impl TextScorer {
    pub fn score(text: &str) -> ScoreResult {
        ScoreResult::classify(Self::hits(text), SAFE_REASON)
    }

    // every check that fired, in the order they're explained
    pub fn hits(text: &str) -> Vec<RuleHit> {
        let text = text.to_lowercase();
        let mut hits = Vec::new();

        for phrase in PHRASES {
            if text.contains(phrase) {
                hits.push(RuleHit::new(
                    PHRASE_POINTS,
                    format!("Contains suspicious phrase: '{phrase}'."),
                ));
            }
        }

        if text.contains("http://") || text.contains("https://") {
            hits.push(RuleHit::new(
                LINK_POINTS,
                "Contains a link which may lead to a fake website.",
            ));
        }

        // substring match, so "otp" inside longer words counts too
        if text.contains("otp") {
            hits.push(RuleHit::new(
                OTP_POINTS,
                "Asks for OTP, which is commonly abused in scams.",
            ));
        }

        hits
    }
}
