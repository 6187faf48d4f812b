// tests for free-text scoring

use shadowshield::{Label, TextScorer};

#[test]
fn test_lottery_click_here_is_phishing() {
    // "congrats" is not "congratulations"
    let result = TextScorer::score("Congrats! You won a lottery, click here to claim.");
    assert_eq!(result.label, Label::Phishing);
    assert_eq!(result.risk_score, 60.0);
    assert_eq!(
        result.explanation,
        "Contains suspicious phrase: 'click here'. Contains suspicious phrase: 'lottery'."
    );
}

#[test]
fn test_plain_message_is_safe() {
    let result = TextScorer::score("Hi, are we still meeting tomorrow at 10?");
    assert_eq!(result.label, Label::Safe);
    assert_eq!(result.risk_score, 10.0);
    assert_eq!(
        result.explanation,
        "No obvious phishing patterns detected in this simple check."
    );
}

#[test]
fn test_messages_without_triggers_are_always_safe() {
    let messages = [
        "Lunch at noon?",
        "   ",
        "!!! ??? ... --- ;;;",
        "Grüße aus München, bis morgen 👋",
        "日本語のメッセージです。",
        "Invoice #4821 attached, thanks.",
        "ftp://files.example.com/report.pdf",
        "HTTP without the colon slash slash",
        "Tab\tseparated\nand multi-line\r\ntext",
    ];

    for message in messages {
        let result = TextScorer::score(message);
        assert_eq!(result.label, Label::Safe, "{message:?}");
        assert_eq!(result.risk_score, 10.0, "{message:?}");
    }
}

#[test]
fn test_empty_text_is_safe() {
    let result = TextScorer::score("");
    assert_eq!(result.label, Label::Safe);
    assert_eq!(result.risk_score, 10.0);
}

#[test]
fn test_single_phrase_is_suspicious() {
    let result = TextScorer::score("URGENT: call me back");
    assert_eq!(result.label, Label::Suspicious);
    assert_eq!(result.risk_score, 30.0);
}

#[test]
fn test_link_and_otp() {
    let result = TextScorer::score("Send the OTP to https://example.com");
    assert_eq!(result.label, Label::Suspicious);
    assert_eq!(result.risk_score, 40.0);
    assert_eq!(
        result.explanation,
        "Contains a link which may lead to a fake website. \
         Asks for OTP, which is commonly abused in scams."
    );
}

#[test]
fn test_everything_stacks_uncapped() {
    let text = "Congratulations! Urgent: your account has been locked. \
                Click here to verify your account, enter your password and bank OTP \
                to claim a free gift and lottery prize: http://x.io";
    let result = TextScorer::score(text);
    // nine phrases, a link, an otp
    assert_eq!(result.risk_score, 9.0 * 30.0 + 20.0 + 20.0);
    assert_eq!(result.label, Label::Phishing);
}

#[test]
fn test_scores_are_multiples_of_ten_and_grow_with_phrases() {
    let phrases = ["urgent", "password", "bank", "lottery", "free gift"];
    let mut text = String::from("hello");
    let mut last = 0.0;

    for phrase in phrases {
        text.push(' ');
        text.push_str(phrase);
        let score = TextScorer::score(&text).risk_score;
        assert_eq!(score % 10.0, 0.0);
        assert!(score >= last);
        last = score;
    }

    assert_eq!(last, 150.0);
}

#[test]
fn test_scoring_is_idempotent() {
    let text = "Please verify your account at http://bank.example";
    assert_eq!(TextScorer::score(text), TextScorer::score(text));
}

#[test]
fn test_rule_hits_carry_points() {
    let hits = TextScorer::hits("click here, urgent");
    let points: Vec<u32> = hits.iter().map(|h| h.points).collect();
    assert_eq!(points, [30, 30]);
}
