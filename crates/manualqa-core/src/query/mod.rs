//! Query understanding
//!
//! Provides:
//! - The [`Question`] input type with namespace, scope and prior turns
//! - Style classification of raw question text
//! - The decision-table primitive shared by all keyword dispatch

mod question;
pub mod rules;
mod style;

pub use question::{ConversationTurn, Question, QuestionScope};
pub use style::{decide_style, decide_style_opt, StyleTag};
