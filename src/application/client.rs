/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Client for the MISIS student portal
//!
//! # Example
//! ```ignore
//! use misis_id::application::client::MisisClient;
//! use misis_id::application::config::Config;
//!
//! let mut client = MisisClient::new(Config::new())?;
//! client.authenticate("login", "password").await?;
//! let info = client.get_student_info().await?;
//! client.close();
//! ```

use crate::application::config::Config;
use crate::application::interfaces::student::StudentService;
use crate::error::AppError;
use crate::model::auth::{Credentials, SessionInfo};
use crate::model::http::make_http_request;
use crate::model::markup::extract_profile;
use crate::presentation::student::StudentInfo;
use crate::session::auth::{PortalAuth, open_http_session};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, error, info, warn};

/// Portal client owning at most one authenticated session
///
/// The HTTP client (and with it the cookie jar and the connection pool) is
/// released by [`close`](MisisClient::close) and when the client is dropped.
/// After closing, [`authenticate`](MisisClient::authenticate) opens a fresh
/// HTTP session.
pub struct MisisClient {
    config: Config,
    http: Option<Client>,
    session: Option<SessionInfo>,
}

impl MisisClient {
    /// Creates a client and opens its HTTP session
    ///
    /// # Errors
    /// `AppError::Config` when the configuration is unusable
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = open_http_session(&config)?;
        debug!("Client created for {}", config.portal.base_url);
        Ok(Self {
            config,
            http: Some(http),
            session: None,
        })
    }

    /// Runs `f` against a fresh client and closes it afterwards
    ///
    /// The client is closed whether `f` succeeds or fails.
    ///
    /// # Example
    /// ```ignore
    /// let info = MisisClient::scoped(Config::new(), async |client| {
    ///     client.authenticate("login", "password").await?;
    ///     client.get_student_info().await
    /// })
    /// .await?;
    /// ```
    pub async fn scoped<F, T>(config: Config, f: F) -> Result<T, AppError>
    where
        F: AsyncFnOnce(&mut MisisClient) -> Result<T, AppError>,
    {
        let mut client = MisisClient::new(config)?;
        let result = f(&mut client).await;
        client.close();
        result
    }

    /// Signs in to the portal
    ///
    /// Any session held before is dropped first. On failure no session is
    /// retained, and cookies collected during the attempt are discarded.
    ///
    /// # Errors
    /// * `AppError::Validation` for a blank login or empty password
    /// * `AppError::Authentication` when the portal rejects the credentials
    /// * `AppError::Network` / `AppError::Unexpected` on transport failures
    /// * `AppError::Parse` when the portal's pages cannot be read
    pub async fn authenticate(
        &mut self,
        login: &str,
        password: &str,
    ) -> Result<SessionInfo, AppError> {
        let credentials =
            Credentials::new(login, password)?.with_remember_me(self.config.remember_me);

        let previous = self.session.take();
        if let Some(previous) = &previous {
            debug!("Dropping session of {} before signing in again", previous.login);
        }

        // A session that was ever authenticated leaves cookies behind
        let http = match self.http.take() {
            Some(http) if previous.is_none() => http,
            _ => open_http_session(&self.config)?,
        };

        info!("Authenticating {}", credentials.login());
        let result = PortalAuth::new(&self.config, &http).login(&credentials).await;
        match result {
            Ok(session) => {
                self.http = Some(http);
                self.session = Some(session.clone());
                Ok(session)
            }
            Err(e) => {
                error!("Authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Fetches the student profile of the current session
    ///
    /// Every call goes to the portal; nothing is cached. A single redirect to
    /// another page of the same host is followed.
    ///
    /// # Errors
    /// * `AppError::NotAuthenticated` without a session
    /// * `AppError::SessionExpired` when the portal sends the request back to
    ///   the sign-in page; the session is dropped
    /// * `AppError::Network` / `AppError::Unexpected` on transport failures
    /// * `AppError::Parse` when the profile page lacks required markup or
    ///   redirects off the host
    /// * `AppError::Validation` when a required field is blank
    pub async fn get_student_info(&mut self) -> Result<StudentInfo, AppError> {
        let (http, url) = match (&self.session, &self.http) {
            (Some(session), Some(http)) => {
                (http.clone(), self.config.url(&session.profile_path()))
            }
            _ => {
                warn!("Student info requested without an active session");
                return Err(AppError::NotAuthenticated);
            }
        };

        let mut response = make_http_request(&http, Method::GET, &url, None::<&()>).await?;

        // one hop, for canonical URL rewrites such as a trailing slash
        if !response.redirects_to_sign_in() {
            if let Some(target) = response.same_host_redirect() {
                debug!("Following profile redirect to {}", target);
                response = make_http_request(&http, Method::GET, &target, None::<&()>).await?;
            }
        }

        if matches!(
            response.status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) || response.redirects_to_sign_in()
        {
            warn!("Session expired, portal answered {}", response.status);
            self.session = None;
            return Err(AppError::SessionExpired);
        }

        if response.status.is_client_error() || response.status.is_server_error() {
            error!("Profile request failed with status {}", response.status);
            return Err(AppError::Unexpected(response.status));
        }

        if response.is_redirect() {
            return Err(AppError::Parse(format!(
                "unexpected redirect from {} to {}",
                response.url,
                response.location.as_deref().unwrap_or("<none>")
            )));
        }

        let fields = extract_profile(&response.body)?;
        let student = StudentInfo::try_from(fields)?;

        info!("Student info obtained: {}", student.full_name());
        Ok(student)
    }

    /// Releases the session and the HTTP client
    ///
    /// Idempotent. A later call to
    /// [`get_student_info`](MisisClient::get_student_info) fails with
    /// `AppError::NotAuthenticated` until the client signs in again.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Closing session of {}", session.login);
        }
        if self.http.take().is_some() {
            debug!("HTTP session released");
        }
    }

    /// Whether the client holds a session
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Session info of the current session
    #[must_use]
    pub fn session_info(&self) -> Option<&SessionInfo> {
        self.session.as_ref()
    }

    /// Configuration the client was created with
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for MisisClient {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl StudentService for MisisClient {
    async fn authenticate(&mut self, login: &str, password: &str) -> Result<SessionInfo, AppError> {
        MisisClient::authenticate(self, login, password).await
    }

    async fn get_student_info(&mut self) -> Result<StudentInfo, AppError> {
        MisisClient::get_student_info(self).await
    }

    fn close(&mut self) {
        MisisClient::close(self);
    }
}
