/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # MISIS ID Prelude
//!
//! Re-exports the types needed for the usual sign-in and fetch sequence.
//!
//! ```rust
//! use misis_id::prelude::*;
//!
//! let config = Config::with_base_url("https://lk.misis.ru");
//! let client = MisisClient::new(config);
//! assert!(client.is_ok());
//! ```

/// Client configuration
pub use crate::application::config::{Config, PortalConfig};

/// Portal client
pub use crate::application::client::MisisClient;

/// Service trait implemented by the client
pub use crate::application::interfaces::student::StudentService;

/// Error handling
pub use crate::error::{AppError, ErrorKind};

/// Credentials and session info
pub use crate::model::auth::{Credentials, SessionInfo};

/// Student profile
pub use crate::presentation::student::{ProfileFields, StudentInfo};

/// Logging setup
pub use crate::utils::logger::{setup_logger, setup_logger_with_level};

/// Library version information
pub use crate::{VERSION, version};
