//! Conversation router
//!
//! One pass per turn:
//! INPUT → SAFETY SCREEN → CLASSIFY → DISPATCH → (exactly one handler)

use crate::classifier::IntentClassifier;
use crate::handlers;
use crate::llm::LanguageModel;
use crate::models::{Intent, Route, SessionState};
use crate::safety::is_high_risk;
use tracing::{debug, warn};

/// Result of routing one utterance.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub state: SessionState,
    pub route: Route,
}

/// Pick the terminal handler. The risk flag beats any classified intent.
pub fn choose_route(risk_flag: bool, intent: Intent) -> Route {
    if risk_flag {
        return Route::Hitl;
    }

    match intent {
        Intent::Expense => Route::Expense,
        Intent::Budget => Route::Budget,
        Intent::Advice => Route::Advice,
        Intent::Unknown => Route::Fallback,
    }
}

pub struct Router {
    model: Box<dyn LanguageModel>,
}

impl Router {
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Route one utterance and produce the next session state.
    ///
    /// Never fails: language model errors become an apology for this turn
    /// and leave the ledger as it was.
    pub async fn step(&self, state: &SessionState, input: &str) -> TurnOutcome {
        let mut current = state.clone();
        current.current_input = input.to_string();
        current.risk_flag = is_high_risk(input);
        current.classified_intent = None;
        current.last_response.clear();

        // Flagged input goes to a human no matter what the model would say.
        let intent = if current.risk_flag {
            IntentClassifier::classify_keywords(input).unwrap_or(Intent::Unknown)
        } else {
            match IntentClassifier::classify(input, &*self.model).await {
                Ok(intent) => intent,
                Err(e) => {
                    warn!(session_id = %current.session_id, "Intent classification failed: {}", e);
                    current.classified_intent = Some(Intent::Unknown);
                    return TurnOutcome {
                        state: current.with_response(handlers::SERVICE_UNAVAILABLE_MESSAGE),
                        route: Route::Fallback,
                    };
                }
            }
        };
        current.classified_intent = Some(intent);

        let route = choose_route(current.risk_flag, intent);
        debug!(
            session_id = %current.session_id,
            %intent,
            risk_flag = current.risk_flag,
            %route,
            "Routing turn"
        );

        let result = match route {
            Route::Hitl => Ok(handlers::hitl(&current)),
            Route::Expense => Ok(handlers::expense(&current)),
            Route::Budget => handlers::budget(&current),
            Route::Advice => handlers::advice(&current, &*self.model).await,
            Route::Fallback => Ok(handlers::fallback(&current)),
        };

        let state = result.unwrap_or_else(|e| {
            warn!(session_id = %current.session_id, %route, "Handler failed: {}", e);
            current.with_response(handlers::SERVICE_UNAVAILABLE_MESSAGE)
        });

        TurnOutcome { state, route }
    }
}
