//! Personal Finance Bot
//!
//! A small rule-based finance assistant that:
//! - Records expenses into an append-only session ledger
//! - Summarizes spend in total and per category
//! - Asks a language model for money-saving tips
//! - Hands high-risk requests to a human instead of answering them
//!
//! ONE PASS PER TURN:
//! INPUT → SAFETY SCREEN → CLASSIFY → DISPATCH → REPLY

pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod router;
pub mod safety;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::IntentClassifier;
pub use router::{Router, TurnOutcome};
