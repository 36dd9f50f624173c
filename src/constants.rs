/// Default portal location
pub const DEFAULT_BASE_URL: &str = "https://lk.misis.ru";
/// Path of the sign-in page and of the login form target
pub const SIGN_IN_PATH: &str = "/ru/users/sign_in";
/// Marker present in every URL that sends the user back to the login form
pub const SIGN_IN_MARKER: &str = "sign_in";
/// Default timeout in seconds for a single HTTP request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// User agent string sent to the portal
pub const USER_AGENT: &str = concat!("misis-id/", env!("CARGO_PKG_VERSION"));
/// Value of the `commit` field the portal's login form submits
pub const LOGIN_COMMIT: &str = "Войти";
/// Value of the legacy `utf8` field the portal's login form submits
pub const LOGIN_UTF8: &str = "✓";
/// Message the portal renders when the credentials are rejected
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Неверный логин или пароль";
