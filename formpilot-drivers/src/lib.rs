//! Driver layer for browser automation.
//!
//! This crate exposes the browser driver and page/element helpers the fill
//! pass uses to interact with a live survey form.
//!
//! - [`form_browser::driver::FormDriver`]: WebDriver client wrapper
//! - [`form_browser::page::FormPage`]: DOM queries and script execution
//! - [`form_browser::pacing::PacingEngine`]: settle delays and paced typing
pub mod form_browser;

pub use fantoccini::key::Key;
