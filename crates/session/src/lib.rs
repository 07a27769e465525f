//! Session crate for the book recommender.
//!
//! Holds the per-conversation preference state: layered filters and feedback
//! with bounded undo, plus the session orchestrator that turns parsed intents
//! into recommendations.

pub mod error;
pub mod config;
pub mod state;
pub mod history;
pub mod store;
pub mod intent;
pub mod orchestrator;

pub use error::{Result, SessionError};
pub use config::{RecommenderConfig, MAX_HISTORY_STEPS, MAX_RESULTS};
pub use state::{PreferenceState, PreferenceUpdate};
pub use history::HistoryStack;
pub use store::{PreferenceStateStore, StepBack};
pub use intent::{Feedback, FilterIntent, FilterValue, Intent, IntentAction};
pub use orchestrator::{BookRecommendation, RecommendationSession, SessionAction, SessionResponse};
