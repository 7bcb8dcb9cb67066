//! Terminal turn handlers
//!
//! Each handler takes the classified state for this turn and returns the
//! next state with `last_response` filled in. No handler hands off to
//! another one.

use crate::extract::{format_amount, parse_amount_and_category};
use crate::llm::LanguageModel;
use crate::models::SessionState;
use crate::Result;
use tracing::debug;

pub const HITL_MESSAGE: &str = "This looks like a high risk transaction. Please consult a financial advisor before proceeding. \
     I'll pause here until a human reviews your request.";

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount";

pub const FALLBACK_MESSAGE: &str = "I can help with: expenses, budget, and advice.";

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "I couldn't process that right now. Please try again.";

/// High risk input: stop and wait for a human.
pub fn hitl(state: &SessionState) -> SessionState {
    debug!(session_id = %state.session_id, "Pausing for human review");
    state.with_response(HITL_MESSAGE)
}

/// Record an expense, or ask for a valid amount if none could be parsed.
pub fn expense(state: &SessionState) -> SessionState {
    let (amount, category) = parse_amount_and_category(&state.current_input);

    let Some(amount) = amount else {
        debug!(session_id = %state.session_id, "No amount found in expense input");
        return state.with_response(INVALID_AMOUNT_MESSAGE);
    };

    debug!(
        session_id = %state.session_id,
        amount,
        %category,
        "Recording expense"
    );

    state
        .with_expense(amount, category)
        .with_response(format!(
            "Added expense: {} for {}",
            format_amount(amount),
            category
        ))
}

/// Report total and per-category spend. Never touches the ledger.
pub fn budget(state: &SessionState) -> Result<SessionState> {
    let summary = state.budget_summary();

    debug!(
        session_id = %state.session_id,
        total_spent = summary.total_spent,
        categories = summary.by_category.len(),
        "Summarizing budget"
    );

    Ok(state.with_response(serde_json::to_string(&summary)?))
}

/// Ask the model for three short money-saving tips.
pub async fn advice<M>(state: &SessionState, model: &M) -> Result<SessionState>
where
    M: LanguageModel + ?Sized,
{
    let tips = model
        .complete(&build_advice_prompt(&state.current_input))
        .await?;

    debug!(session_id = %state.session_id, "Advice received");
    Ok(state.with_response(tips))
}

pub fn fallback(state: &SessionState) -> SessionState {
    state.with_response(FALLBACK_MESSAGE)
}

fn build_advice_prompt(text: &str) -> String {
    format!(
        "Give exactly 3 short one sentence, user friendly money saving tips for the following user query (bulleted list of 1-3): {}",
        text
    )
}
