/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Sign-in flow for the MISIS portal
//!
//! The portal uses a classic form login:
//! 1. `GET /ru/users/sign_in` sets the session cookie and embeds a CSRF token
//! 2. `POST /ru/users/sign_in` with the credentials and the token
//! 3. on success the portal redirects to `/ru/<api id>/...`
//!
//! Cookies are kept by the HTTP client built in [`open_http_session`].

use crate::application::config::Config;
use crate::constants::SIGN_IN_PATH;
use crate::error::AppError;
use crate::model::auth::{Credentials, SessionInfo};
use crate::model::http::{PortalResponse, make_http_request};
use crate::model::markup::{
    extract_api_id_from_location, extract_api_id_from_script, extract_csrf_token,
    looks_like_invalid_credentials,
};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, error, info, warn};

/// Builds the HTTP client that carries one portal session
///
/// Cookies are stored, redirects are never followed (the flow inspects
/// every `Location` itself), and the configured timeout and user agent
/// apply to every request.
///
/// # Errors
/// `AppError::Config` when the client cannot be built
pub fn open_http_session(cfg: &Config) -> Result<Client, AppError> {
    cfg.validate()?;
    let client = Client::builder()
        .user_agent(&cfg.portal.user_agent)
        .cookie_store(true)
        .redirect(Policy::none())
        .timeout(cfg.timeout())
        .build()?;
    Ok(client)
}

/// Authentication handler for the portal
pub struct PortalAuth<'a> {
    cfg: &'a Config,
    http: &'a Client,
}

impl<'a> PortalAuth<'a> {
    /// Creates a handler that signs in through `http`
    ///
    /// # Arguments
    /// * `cfg` - Portal configuration
    /// * `http` - Client whose cookie store receives the session
    pub fn new(cfg: &'a Config, http: &'a Client) -> Self {
        Self { cfg, http }
    }

    /// Loads the sign-in page and returns its CSRF token
    ///
    /// # Errors
    /// * `AppError::Network` on transport failure or a status of 400 and above
    /// * `AppError::Parse` when the page has no usable token
    pub async fn fetch_csrf_token(&self) -> Result<String, AppError> {
        let url = self.cfg.url(SIGN_IN_PATH);
        let response = make_http_request(self.http, Method::GET, &url, None::<&()>).await?;

        if response.status.is_client_error() || response.status.is_server_error() {
            error!("Sign-in page returned status {}", response.status);
            return Err(AppError::Unexpected(response.status));
        }

        let token = extract_csrf_token(&response.body)?;
        debug!("CSRF token obtained (length: {})", token.len());
        Ok(token)
    }

    /// Signs in and returns the resulting session info
    ///
    /// # Errors
    /// * `AppError::Authentication` when the portal rejects the credentials
    /// * `AppError::Network` / `AppError::Unexpected` on transport failures
    ///   and unexpected statuses
    /// * `AppError::Parse` when the sign-in page or redirect cannot be read
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionInfo, AppError> {
        let csrf_token = self.fetch_csrf_token().await?;
        let url = self.cfg.url(SIGN_IN_PATH);
        let form = credentials.login_form(&csrf_token);

        debug!("Sending login request for {} to: {}", credentials.login(), url);
        let response = make_http_request(self.http, Method::POST, &url, Some(&form)).await?;

        let session = session_from_login_response(&response, &csrf_token, credentials.login())?;
        info!("✓ Login successful, account: {}", session.api_id);
        Ok(session)
    }
}

/// Decides the outcome of the sign-in POST
///
/// # Arguments
/// * `response` - Response to the sign-in POST (redirects not followed)
/// * `csrf_token` - Token that was submitted with the form
/// * `login` - Login that was submitted
///
/// # Errors
/// See [`PortalAuth::login`]
pub fn session_from_login_response(
    response: &PortalResponse,
    csrf_token: &str,
    login: &str,
) -> Result<SessionInfo, AppError> {
    let rejected = || AppError::Authentication("invalid login or password".to_string());

    match response.status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY => {
            warn!("Credentials rejected with status {}", response.status);
            return Err(rejected());
        }
        status if status.is_client_error() || status.is_server_error() => {
            error!("Login request failed with status {}", status);
            return Err(AppError::Unexpected(status));
        }
        _ => {}
    }

    if looks_like_invalid_credentials(&response.body) {
        warn!("Portal reported invalid credentials");
        return Err(rejected());
    }

    if let Some(location) = response.location.as_deref() {
        if response.redirects_to_sign_in() {
            warn!("Login redirected back to the sign-in page");
            return Err(rejected());
        }
        let api_id = extract_api_id_from_location(location).ok_or_else(|| {
            AppError::Parse(format!("api id not found in redirect location: {location}"))
        })?;
        return SessionInfo::new(&api_id, csrf_token, login);
    }

    if response.status == StatusCode::OK {
        if let Some(api_id) = extract_api_id_from_script(&response.body) {
            debug!("Api id taken from the inline page script");
            return SessionInfo::new(&api_id, csrf_token, login);
        }
    }

    warn!("Login response with status {} has no redirect", response.status);
    Err(rejected())
}
