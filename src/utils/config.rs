/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::str::FromStr;
use tracing::error;

/// Reads a non-blank environment variable
fn read_env(env_var: &str) -> Option<String> {
    env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Gets an environment variable or returns a default value if it is unset,
/// blank, or cannot be parsed
///
/// Parse failures are logged so a typo in `.env` is visible.
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T {
    match read_env(env_var) {
        Some(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        None => default,
    }
}

/// Gets a boolean flag from the environment
///
/// Accepts `1`, `true`, `yes`, `on` and `0`, `false`, `no`, `off`
/// (case-insensitive). Anything else falls back to `default`.
pub fn get_env_flag(env_var: &str, default: bool) -> bool {
    match read_env(env_var).map(|v| v.to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            error!("Failed to parse {} as a flag: {}, using default", env_var, v);
            default
        }
        None => default,
    }
}
