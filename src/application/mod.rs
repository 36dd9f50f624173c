/// Portal client
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces implemented by the client
pub mod interfaces;
