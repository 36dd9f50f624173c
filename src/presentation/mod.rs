/// Student profile models
pub mod student;
