/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{LOGIN_COMMIT, LOGIN_UTF8};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login and password for the portal
///
/// The login is trimmed, the password is kept as typed. Neither may be
/// empty. `Debug` output never shows the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    login: String,
    password: String,
    /// Ask the portal for a long lived session cookie
    pub remember_me: bool,
}

impl Credentials {
    /// Validates and builds credentials
    ///
    /// # Errors
    /// `AppError::Validation` when the login is blank or the password empty
    pub fn new(login: &str, password: &str) -> Result<Self, AppError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AppError::Validation("login must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_string()));
        }
        Ok(Self {
            login: login.to_string(),
            password: password.to_string(),
            remember_me: false,
        })
    }

    /// Sets the remember-me flag
    #[must_use]
    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// The trimmed login
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// The password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Builds the form the portal's sign-in page submits
    #[must_use]
    pub fn login_form<'a>(&'a self, csrf_token: &'a str) -> LoginForm<'a> {
        LoginForm {
            login: &self.login,
            password: &self.password,
            remember_me: if self.remember_me { "1" } else { "0" },
            commit: LOGIN_COMMIT,
            utf8: LOGIN_UTF8,
            authenticity_token: csrf_token,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Body of the sign-in POST, sent as `application/x-www-form-urlencoded`
#[derive(Serialize)]
pub struct LoginForm<'a> {
    #[serde(rename = "user[login]")]
    login: &'a str,
    #[serde(rename = "user[password]")]
    password: &'a str,
    #[serde(rename = "user[remember_me]")]
    remember_me: &'static str,
    commit: &'static str,
    utf8: &'static str,
    authenticity_token: &'a str,
}

/// State retained after a successful sign-in
///
/// The cookies live in the HTTP client; this record holds what the client
/// needs to address the authenticated pages.
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionInfo {
    /// Account segment the portal redirects to after signing in
    pub api_id: String,
    /// CSRF token of the sign-in page
    pub csrf_token: String,
    /// Login that opened the session
    pub login: String,
    /// When the portal accepted the credentials
    pub authenticated_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Builds session info, rejecting blank identifiers
    ///
    /// # Errors
    /// `AppError::Parse` when the api id or CSRF token is blank, since both
    /// come from the portal's responses
    pub fn new(api_id: &str, csrf_token: &str, login: &str) -> Result<Self, AppError> {
        let api_id = api_id.trim();
        let csrf_token = csrf_token.trim();
        if api_id.is_empty() {
            return Err(AppError::Parse("api id is empty".to_string()));
        }
        if csrf_token.is_empty() {
            return Err(AppError::Parse("csrf token is empty".to_string()));
        }
        Ok(Self {
            api_id: api_id.to_string(),
            csrf_token: csrf_token.to_string(),
            login: login.to_string(),
            authenticated_at: Utc::now(),
        })
    }

    /// Path of the profile page for this session
    #[must_use]
    pub fn profile_path(&self) -> String {
        format!("/ru/{}/profile", self.api_id)
    }

    /// Time elapsed since the portal accepted the credentials
    #[must_use]
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.authenticated_at
    }
}
