use crate::error::AppError;
use crate::model::auth::SessionInfo;
use crate::presentation::student::StudentInfo;
use async_trait::async_trait;

/// Interface for the sign-in and profile operations of the portal
///
/// Implemented by [`MisisClient`](crate::application::client::MisisClient).
/// The CLI is written against this trait.
#[async_trait]
pub trait StudentService: Send {
    /// Signs in, replacing any session the service holds
    ///
    /// # Arguments
    /// * `login` - Portal login
    /// * `password` - Portal password
    ///
    /// # Returns
    /// * `Ok(SessionInfo)` - The new session
    /// * `Err(AppError)` - Authentication, network, parsing or validation failure
    async fn authenticate(&mut self, login: &str, password: &str) -> Result<SessionInfo, AppError>;

    /// Fetches the student profile of the current session
    ///
    /// # Returns
    /// * `Ok(StudentInfo)` - Freshly fetched profile
    /// * `Err(AppError)` - Authentication-kind error without a valid session,
    ///   otherwise network, parsing or validation failure
    async fn get_student_info(&mut self) -> Result<StudentInfo, AppError>;

    /// Releases the session and the underlying connections
    fn close(&mut self);
}
