/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Credentials, login form and session models
pub mod auth;
/// HTTP request helper that captures what the flow inspects
pub mod http;
/// Extraction of tokens and profile fields from portal markup
pub mod markup;
