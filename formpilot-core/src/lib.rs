//! Matching-and-dispatch core for the formpilot workspace.
//!
//! Two cooperating stages drive a fill run:
//!
//! - [`matcher::FieldMatcher`]: holds the immutable profile with one
//!   precomputed embedding per field name and answers "which profile field
//!   best matches this question?"
//! - [`filler::FormFiller`]: walks the live form one question at a time,
//!   classifies each question's widget, and dispatches to the matching fill
//!   strategy with per-question failure containment.
//!
//! Supporting modules: [`profile`] (flat key/value answers), [`widget`]
//! (structural classification), [`discover`] (question texts and container
//! re-resolution), and [`strategies`] (date/choice/text fill routines).

pub mod discover;
pub mod filler;
pub mod matcher;
pub mod profile;
pub mod strategies;
pub mod widget;

pub use filler::{FillReport, FormFiller, QuestionOutcome};
pub use matcher::{FieldMatcher, MatchResult};
pub use profile::Profile;

/// The three similarity floors used during a run. They are independent
/// knobs; none is derived from another.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Question-to-field acceptance floor for the matcher.
    pub field_match: f32,
    /// High-confidence gate for the semantic stage of choice widgets.
    pub option_high: f32,
    /// Floor for the best-available fallback stage of choice widgets.
    pub option_floor: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            field_match: 0.5,
            option_high: 0.7,
            option_floor: 0.5,
        }
    }
}
