//! SmartSkills Core - Shared types library.
//!
//! This crate provides common types used across the SmartSkills client
//! workspace:
//! - `client` - API client, session management, password-reset flow
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no async. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated wrappers for emails, reset codes, and the
//!   session identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
