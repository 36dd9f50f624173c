/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # MISIS ID
//!
//! Asynchronous client for the MISIS student portal (`lk.misis.ru`).
//!
//! The client signs in with the portal's cookie based login form, keeps the
//! authenticated session, and reads the student profile page into a
//! validated [`StudentInfo`](presentation::student::StudentInfo).
//!
//! ## Usage
//!
//! ```ignore
//! use misis_id::prelude::*;
//!
//! let info = MisisClient::scoped(Config::new(), async |client| {
//!     client.authenticate("login", "password").await?;
//!     client.get_student_info().await
//! })
//! .await?;
//!
//! println!("{} ({}, {})", info.full_name(), info.group(), info.faculty());
//! ```
//!
//! ## Modules
//!
//! - [`application`]: the client, its configuration and the service trait
//! - [`session`]: the sign-in flow
//! - [`model`]: credentials, session info, HTTP plumbing and markup extraction
//! - [`presentation`]: the student profile record
//! - [`cli`]: argument parsing and output rendering for the `misis-id` binary

/// Client, configuration and service interfaces
pub mod application;

/// Command line front end
pub mod cli;

/// Library wide constants
pub mod constants;

/// Error types
pub mod error;

/// Requests, session data, HTTP plumbing and markup extraction
pub mod model;

/// Commonly used re-exports
pub mod prelude;

/// Student facing data structures
pub mod presentation;

/// Sign-in flow against the portal
pub mod session;

/// Logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
