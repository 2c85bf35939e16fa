//! Type-specific fill routines.
//!
//! All strategies share one contract: they report whether the value was
//! written (`true`) or no applicable sub-element/option was found (`false`).
//! A `false` never escalates; the fill pass reports it and moves on to the
//! next question. Fallback is an explicit ordered list of attempts, not
//! exception control flow.

pub mod choice;
pub mod date;
pub mod text;
