// output formatting - readable verdicts or raw json

use crate::{Error, ScoreResult};

pub struct Output;

impl Output {
    // verdict block for humans
    pub fn pretty(input: &str, result: &ScoreResult) {
        print!("{}", render(input, result));
    }

    // raw json for scripts
    pub fn raw(result: &ScoreResult) -> Result<(), Error> {
        println!("{}", render_raw(result)?);
        Ok(())
    }
}

fn render(input: &str, result: &ScoreResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("input: {}\n", truncate(input, 60)));
    out.push_str(&format!("label: {}\n", result.label));
    out.push_str(&format!("risk:  {:.0}\n\n", result.risk_score));

    // one reason per line reads better than the joined explanation
    for reason in split_reasons(&result.explanation) {
        out.push_str(&format!("  - {reason}\n"));
    }

    out
}

fn render_raw(result: &ScoreResult) -> Result<String, Error> {
    Ok(serde_json::to_string(result)?)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

// reasons all end in '.', and a sentence boundary is ". " followed by a capital
fn split_reasons(explanation: &str) -> Vec<&str> {
    let mut reasons = Vec::new();
    let mut start = 0;
    let bytes = explanation.as_bytes();

    for (i, _) in explanation.match_indices(". ") {
        if bytes.get(i + 2).is_some_and(|b| b.is_ascii_uppercase()) {
            reasons.push(&explanation[start..=i]);
            start = i + 2;
        }
    }
    reasons.push(&explanation[start..]);

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextScorer;

    #[test]
    fn splits_joined_reasons() {
        let result = TextScorer::score("urgent: click here http://x.io");
        let reasons = split_reasons(&result.explanation);
        assert_eq!(
            reasons,
            [
                "Contains suspicious phrase: 'click here'.",
                "Contains suspicious phrase: 'urgent'.",
                "Contains a link which may lead to a fake website.",
            ]
        );
    }

    #[test]
    fn raw_is_the_result_json() {
        let result = TextScorer::score("urgent");
        let json = render_raw(&result).unwrap();
        let back: ScoreResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!(json.contains("\"label\":\"suspicious\""));
    }

    #[test]
    fn render_truncates_long_input() {
        let input = "a".repeat(100);
        let out = render(&input, &TextScorer::score(&input));
        assert!(out.starts_with(&format!("input: {}...\n", "a".repeat(57))));
        assert!(out.contains("label: safe\n"));
        assert!(out.contains("risk:  10\n"));
    }
}
