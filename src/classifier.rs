//! Intent Classifier
//!
//! Deterministic keyword cascade first, language model only when no keyword
//! set matches:
//! - Budget: "what is my total", "how much did I spend"
//! - Expense: "add 200 for lunch", "spent rs 500"
//! - Advice: "suggest a plan to save for a trip"

use crate::llm::LanguageModel;
use crate::models::Intent;
use crate::Result;
use tracing::debug;

/// Static keyword lists, zero allocation
const BUDGET_KEYWORDS: &[&str] = &[
    "budget", "summary", "total", "total spent", "total spend", "how much", "how much spent",
];

const EXPENSE_KEYWORDS: &[&str] = &[
    "add", "spent", "expense", "expenses", "expense list", "expenses list", "rs", "inr", "$",
];

const ADVICE_KEYWORDS: &[&str] = &["advice", "suggest", "tip", "plan", "how do i", "save for"];

/// Keyword sets in priority order; the first set with a hit decides.
const CASCADE: &[(Intent, &[&str])] = &[
    (Intent::Budget, BUDGET_KEYWORDS),
    (Intent::Expense, EXPENSE_KEYWORDS),
    (Intent::Advice, ADVICE_KEYWORDS),
];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    /// Keyword-only classification. `None` means the model has to decide.
    pub fn classify_keywords(text: &str) -> Option<Intent> {
        let lowered = text.trim().to_lowercase();

        CASCADE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
            .map(|(intent, _)| *intent)
    }

    /// Full classification, falling back to the language model.
    ///
    /// The model's answer is untrusted: anything other than the four legal
    /// labels is treated as `Unknown`.
    pub async fn classify<M>(text: &str, model: &M) -> Result<Intent>
    where
        M: LanguageModel + ?Sized,
    {
        if let Some(intent) = Self::classify_keywords(text) {
            debug!(%intent, "Intent matched by keyword");
            return Ok(intent);
        }

        let label = model.complete(&build_intent_prompt(text)).await?;
        let intent = Intent::from_label(&label);

        debug!(label = %label.trim(), %intent, "Intent decided by model");
        Ok(intent)
    }
}

fn build_intent_prompt(text: &str) -> String {
    format!(
        "Determine the intent of the following user query and return only one of the following intents:\n\
         expense | budget | advice | unknown\n\
         User Query: {}",
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use crate::llm::testing::ScriptedModel;

    #[test]
    fn test_budget_queries() {
        let cases = vec![
            "What is my total expenses",
            "show me a summary",
            "how much did I spend?",
            "am I within budget",
        ];

        for c in cases {
            assert_eq!(IntentClassifier::classify_keywords(c), Some(Intent::Budget), "{}", c);
        }
    }

    #[test]
    fn test_expense_statements() {
        let cases = vec![
            "I spent 1000 for house rent",
            "add 250 for lunch",
            "paid $40 for a gift",
            "500 inr on snacks",
        ];

        for c in cases {
            assert_eq!(IntentClassifier::classify_keywords(c), Some(Intent::Expense), "{}", c);
        }
    }

    #[test]
    fn test_advice_requests() {
        let cases = vec![
            "Give me 3 money saving tips",
            "suggest something",
            "how do I save for a car",
        ];

        for c in cases {
            assert_eq!(IntentClassifier::classify_keywords(c), Some(Intent::Advice), "{}", c);
        }
    }

    #[test]
    fn test_budget_beats_expense() {
        assert_eq!(
            IntentClassifier::classify_keywords("total spent on rent"),
            Some(Intent::Budget)
        );
    }

    #[test]
    fn test_expense_beats_advice() {
        assert_eq!(
            IntentClassifier::classify_keywords("add a tip of 50"),
            Some(Intent::Expense)
        );
    }

    #[test]
    fn test_short_tokens_match_inside_words() {
        // "rs" inside "first" routes to expense
        assert_eq!(
            IntentClassifier::classify_keywords("my first idea"),
            Some(Intent::Expense)
        );
        assert_eq!(IntentClassifier::classify_keywords("hello there"), None);
    }

    #[tokio::test]
    async fn test_keyword_match_skips_model() {
        let model = ScriptedModel::new();
        let intent = IntentClassifier::classify("what is my budget", &model)
            .await
            .unwrap();

        assert_eq!(intent, Intent::Budget);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_model_fallback() {
        let model = ScriptedModel::new().reply(" Advice.\n");
        let intent = IntentClassifier::classify("I want to be wealthy", &model)
            .await
            .unwrap();

        assert_eq!(intent, Intent::Advice);
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("expense | budget | advice | unknown"));
        assert!(prompts[0].contains("User Query: I want to be wealthy"));
    }

    #[tokio::test]
    async fn test_unrecognized_model_label_is_unknown() {
        let model = ScriptedModel::new().reply("investing");
        let intent = IntentClassifier::classify("hello", &model).await.unwrap();
        assert_eq!(intent, Intent::Unknown);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = ScriptedModel::new().fail(BotError::ServiceError("down".to_string()));
        let result = IntentClassifier::classify("hello", &model).await;
        assert!(matches!(result, Err(BotError::ServiceError(_))));
    }
}
