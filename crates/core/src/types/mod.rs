//! Core types for SmartSkills.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod code;
pub mod email;
pub mod identity;

pub use code::ResetCode;
pub use email::{Email, EmailError};
pub use identity::Identity;
