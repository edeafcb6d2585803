//! # LogFox Types
//!
//! Core types, traits, and enums shared across all LogFox crates.
//!
//! This crate provides the fundamental building blocks for the LogFox logging
//! add-on, including:
//!
//! - Severities, tags, colors and markup flavours
//! - Call sites and the per-call [`LogEvent`]
//! - The [`Sink`] and [`Host`] seams
//! - Settings structures
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use logfox_types::{CallSite, Hotkey, Severity};
//!
//! // Resolve a caller from its function path
//! let site = CallSite::from_function_path("game::Engine::boot", 42).unwrap();
//! assert_eq!(site.source_name, "Engine");
//!
//! // Parse the viewer hotkey
//! let key: Hotkey = "F3".parse().unwrap();
//! assert_eq!(key, Hotkey::default());
//!
//! assert!(Severity::Fatal.captures_stack());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod event;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{LogFoxError, Result};
pub use identifiers::{CallSite, Color, Hotkey, SubscriptionId};
pub use enums::{Markup, Severity, Tag};
pub use event::LogEvent;
pub use traits::{Host, Sink, SystemDescriptors};
pub use config::LogFoxSettings;
