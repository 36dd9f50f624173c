/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Command line front end of the `misis-id` binary
//!
//! Parsing, the sign-in/fetch/close sequence and rendering live here so the
//! binary itself stays a thin shell and every piece can be tested with a
//! fake [`StudentService`].

use crate::application::interfaces::student::StudentService;
use crate::error::{AppError, ErrorKind};
use crate::presentation::student::StudentInfo;
use clap::{Parser, ValueEnum};
use prettytable::{Cell, Row, Table, format};
use std::io::Write;
use tracing::{debug, info};

/// Exit code for authentication failures
pub const EXIT_AUTHENTICATION: u8 = 2;
/// Exit code for network failures
pub const EXIT_NETWORK: u8 = 3;
/// Exit code for unreadable portal responses
pub const EXIT_PARSING: u8 = 4;
/// Exit code for data that fails validation
pub const EXIT_VALIDATION: u8 = 5;
/// Exit code for every other failure
pub const EXIT_OTHER: u8 = 1;

/// Output format of the student info
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable table
    Text,
    /// Pretty printed JSON object
    Json,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "misis-id",
    version,
    about = "Asynchronous client for the MISIS student portal",
    after_help = "Examples:\n  \
        misis-id --login your_login --password your_password\n  \
        misis-id --login your_login --password your_password --format json\n  \
        misis-id --login your_login --password your_password --verbose"
)]
pub struct Cli {
    /// Login for the MISIS student portal
    #[arg(long, env = "MISIS_LOGIN")]
    pub login: String,

    /// Password for the MISIS student portal
    #[arg(long, env = "MISIS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Verbose (debug level) logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Maps an error to the process exit code
#[must_use]
pub fn exit_code(error: &AppError) -> u8 {
    match error.kind() {
        ErrorKind::Authentication => EXIT_AUTHENTICATION,
        ErrorKind::Network => EXIT_NETWORK,
        ErrorKind::Parsing => EXIT_PARSING,
        ErrorKind::Validation => EXIT_VALIDATION,
        ErrorKind::Other => EXIT_OTHER,
    }
}

/// Renders the student info as a two column table
#[must_use]
pub fn render_text(student: &StudentInfo) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![Cell::new("STUDENT INFO").with_hspan(2)]));

    for (label, value) in student.entries() {
        table.add_row(Row::new(vec![Cell::new(label), Cell::new(value)]));
    }

    table.to_string()
}

/// Renders the student info as a pretty printed JSON object
///
/// # Errors
/// `AppError::Json` if serialization fails
pub fn render_json(student: &StudentInfo) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(student)?)
}

/// Renders the student info in the requested format
///
/// # Errors
/// `AppError::Json` if JSON serialization fails
pub fn render(student: &StudentInfo, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(render_text(student)),
        OutputFormat::Json => render_json(student),
    }
}

/// Signs in, fetches the student info and closes the service
///
/// The service is closed on every path, including failures.
pub async fn fetch_student_info<S: StudentService + ?Sized>(
    service: &mut S,
    login: &str,
    password: &str,
) -> Result<StudentInfo, AppError> {
    let result: Result<StudentInfo, AppError> = async {
        info!("Starting authentication...");
        service.authenticate(login, password).await?;
        info!("Fetching student info...");
        service.get_student_info().await
    }
    .await;
    service.close();
    result
}

/// Runs the command described by `cli` and writes the result to `out`
///
/// # Errors
/// Any error of the sign-in and fetch sequence, or `AppError::Io` when
/// writing the output fails
pub async fn run<S, W>(cli: &Cli, service: &mut S, out: &mut W) -> Result<(), AppError>
where
    S: StudentService + ?Sized,
    W: Write,
{
    let student = fetch_student_info(service, &cli.login, &cli.password).await?;
    let rendered = render(&student, cli.format)?;
    debug!("Writing {:?} output", cli.format);
    writeln!(out, "{rendered}")?;
    out.flush()?;
    Ok(())
}
