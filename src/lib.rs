// shadowshield library - phishing risk scoring for text and urls

pub mod cli;
mod core;
mod error;
mod logging;
mod output;
mod server;
pub mod train;

pub use self::core::{Label, RuleHit, ScoreResult, TextScorer, UrlScorer, validate_url};
pub use error::Error;
pub use server::Server;
