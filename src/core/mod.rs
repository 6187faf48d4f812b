// core logic - text and url scoring rules

mod text;
mod url;
mod verdict;

pub use text::TextScorer;
pub use self::url::{UrlScorer, validate_url};
pub use verdict::{Label, RuleHit, ScoreResult};
