/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::SIGN_IN_MARKER;
use crate::error::AppError;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, trace};

/// The parts of a portal response the sign-in and profile flows inspect
#[derive(Debug, Clone)]
pub struct PortalResponse {
    /// HTTP status
    pub status: StatusCode,
    /// URL that produced the response
    pub url: String,
    /// `Location` header, when present and readable
    pub location: Option<String>,
    /// Response body decoded as text
    pub body: String,
}

impl PortalResponse {
    /// Whether the response is a 3xx redirect
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Whether the response sends the browser back to the login form
    #[must_use]
    pub fn redirects_to_sign_in(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|location| location.contains(SIGN_IN_MARKER))
    }

    /// Absolute target of a redirect that stays on the same host
    ///
    /// Relative locations are resolved against [`url`](PortalResponse::url).
    /// A scheme change (`http` to `https`) counts as the same host.
    #[must_use]
    pub fn same_host_redirect(&self) -> Option<String> {
        if !self.is_redirect() {
            return None;
        }
        let base = Url::parse(&self.url).ok()?;
        let target = base.join(self.location.as_deref()?).ok()?;
        (target.host_str() == base.host_str()).then(|| target.to_string())
    }
}

/// Makes an HTTP request to the portal and reads the whole response
///
/// Redirects are handled by the caller, so the client passed in is expected
/// to have redirect following disabled. Every HTTP status is returned as a
/// [`PortalResponse`]; only transport failures become errors.
///
/// # Arguments
/// * `client` - HTTP client carrying the session cookies
/// * `method` - HTTP method
/// * `url` - Absolute URL
/// * `form` - Optional body sent as `application/x-www-form-urlencoded`
///
/// # Errors
/// `AppError::Network` when the request cannot be sent or the body cannot be
/// read (including timeouts)
pub async fn make_http_request<F: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    form: Option<&F>,
) -> Result<PortalResponse, AppError> {
    debug!("{} {}", method, url);

    let mut request = client
        .request(method, url)
        .header(ACCEPT, "text/html,application/xhtml+xml");

    if let Some(f) = form {
        request = request.form(f);
    }

    let response = request.send().await?;
    let status = response.status();
    let final_url = response.url().to_string();
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    debug!("Response status: {}", status);
    trace!("Response headers: {:#?}", response.headers());

    let body = response.text().await?;

    Ok(PortalResponse {
        status,
        url: final_url,
        location,
        body,
    })
}
