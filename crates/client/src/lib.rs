//! SmartSkills client library.
//!
//! Everything the SmartSkills front end needs to authenticate against the
//! remote service: a typed client for the REST API, the session store with
//! durable persistence and change notification, the route gate for the
//! protected area, and the three-stage password-reset flow.
//!
//! # Modules
//!
//! - [`api`] - HTTP client for the SmartSkills REST API
//! - [`auth`] - Login and registration submitters
//! - [`config`] - Environment-driven configuration
//! - [`reset`] - Password-reset flow state machine
//! - [`session`] - Session store, persistence port, and route gate
//!
//! # Example
//!
//! ```rust,ignore
//! use smartskills_client::api::ApiClient;
//! use smartskills_client::auth::Authenticator;
//! use smartskills_client::config::ApiConfig;
//! use smartskills_client::session::{FileStorage, SessionStore};
//!
//! let config = ApiConfig::from_env()?;
//! let session = SessionStore::open(FileStorage::new(&config.session_dir));
//! let auth = Authenticator::new(ApiClient::new(&config), session.clone());
//!
//! let identity = auth.login("user@example.com", &password).await?;
//! assert_eq!(session.current(), Some(identity));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod config;
pub mod reset;
pub mod session;
