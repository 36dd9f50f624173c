/// Student service interface
pub mod student;
