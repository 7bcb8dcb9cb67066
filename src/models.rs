//! Core data models for the finance bot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

/// Coarse category assigned to one user utterance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Expense,
    Budget,
    Advice,
    Unknown,
}

impl Intent {
    /// Interpret a free-text label returned by the language model.
    ///
    /// Anything that is not one of the four legal labels is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .trim()
            .trim_matches(|c: char| !c.is_ascii_alphabetic())
            .to_lowercase();

        match normalized.as_str() {
            "expense" => Intent::Expense,
            "budget" => Intent::Budget,
            "advice" => Intent::Advice,
            _ => Intent::Unknown,
        }
    }
}

/// Spending category of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Grocery,
    Rent,
    Travel,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Grocery => "grocery",
            Category::Rent => "rent",
            Category::Travel => "travel",
            Category::General => "general",
        }
    }
}

/// Terminal handler selected for a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Hitl,
    Expense,
    Budget,
    Advice,
    Fallback,
}

//
// ================= Ledger =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub amount: f64,
    pub category: Category,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregated view of the ledger, serialized verbatim as the budget reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    pub total_spent: f64,
    pub by_category: BTreeMap<Category, f64>,
}

//
// ================= Session =================
//

/// Conversation memory threaded from one turn to the next.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub current_input: String,
    pub classified_intent: Option<Intent>,
    pub risk_flag: bool,
    expense_log: Vec<ExpenseEntry>,
    pub last_response: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            current_input: String::new(),
            classified_intent: None,
            risk_flag: false,
            expense_log: Vec::new(),
            last_response: String::new(),
        }
    }

    /// Recorded expenses, oldest first.
    pub fn expense_log(&self) -> &[ExpenseEntry] {
        &self.expense_log
    }

    /// Copy of this state with one more ledger entry.
    ///
    /// The ledger only ever grows; there is no way to edit or remove entries.
    pub fn with_expense(&self, amount: f64, category: Category) -> Self {
        let mut next = self.clone();
        next.expense_log.push(ExpenseEntry {
            amount,
            category,
            recorded_at: Utc::now(),
        });
        next
    }

    /// Copy of this state carrying a reply for the current turn.
    pub fn with_response(&self, response: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.last_response = response.into();
        next
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        let mut total_spent = 0.0;
        let mut by_category = BTreeMap::new();

        for entry in &self.expense_log {
            total_spent += entry.amount;
            *by_category.entry(entry.category).or_insert(0.0) += entry.amount;
        }

        BudgetSummary {
            total_spent,
            by_category,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

//
// ================= Display =================
//

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Expense => "expense",
            Intent::Budget => "budget",
            Intent::Advice => "advice",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Route::Hitl => "hitl",
            Route::Expense => "expense",
            Route::Budget => "budget",
            Route::Advice => "advice",
            Route::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}
