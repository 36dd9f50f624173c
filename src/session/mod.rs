/// Sign-in flow and HTTP session construction
pub mod auth;
