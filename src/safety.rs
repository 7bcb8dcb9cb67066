//! Safety screen
//!
//! Flags utterances that mention high-stakes financial moves so they are
//! handed to a human instead of being answered automatically.

use tracing::debug;

/// Phrases that mark an utterance as high risk (substring match).
const RISK_KEYWORDS: &[&str] = &[
    "retirement",
    "liquidate",
    "loan against",
    "pledge",
    "sell house",
    "quit job",
    "all-in",
    "bet everything",
    "margin",
    "mortgage my",
    "crypto all",
    "withdraw provident fund",
    "pf withdraw",
];

/// Returns true if any risk phrase appears verbatim in the input.
pub fn is_high_risk(text: &str) -> bool {
    let lowered = text.to_lowercase();

    match RISK_KEYWORDS.iter().find(|kw| lowered.contains(**kw)) {
        Some(keyword) => {
            debug!(keyword = %keyword, "High risk keyword found");
            true
        }
        None => false,
    }
}
