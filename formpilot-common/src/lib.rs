//! Common types and utilities shared across formpilot crates.
//!
//! This crate defines the shared error type and the observability helpers
//! used throughout the formpilot workspace. It is intentionally lightweight
//! and dependency‑minimal so that all crates can depend on it without
//! introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`FormError`] and [`Result`]: Shared error handling
//! - [`observability`]: Centralised tracing/logging initialisation
use serde::{Deserialize, Serialize};

pub mod observability;

/// Error types used across the formpilot workspace.
#[derive(thiserror::Error, Debug)]
pub enum FormError {
    /// The browser driver (or an element interaction) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// The embedding backend failed or is unreachable.
    #[error("Embedder error: {0}")]
    Embedder(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The user profile could not be read or parsed.
    #[error("Profile error: {0}")]
    Profile(String),
}

/// Convenient alias for results that use [`FormError`].
pub type Result<T> = std::result::Result<T, FormError>;

/// The six widget shapes a question container can present.
///
/// Classification is structural (presence of a DOM marker), not semantic,
/// and happens per container at fill time. See `formpilot-core` for the
/// probe ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Radio,
    Checkbox,
    Date,
    Dropdown,
    Textarea,
    Text,
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WidgetType::Radio => "radio",
            WidgetType::Checkbox => "checkbox",
            WidgetType::Date => "date",
            WidgetType::Dropdown => "dropdown",
            WidgetType::Textarea => "textarea",
            WidgetType::Text => "text",
        };
        f.write_str(name)
    }
}
