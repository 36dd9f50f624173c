/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use clap::Parser;
use misis_id::application::client::MisisClient;
use misis_id::application::config::Config;
use misis_id::cli::{Cli, exit_code, run};
use misis_id::error::AppError;
use misis_id::utils::{level_from_env, setup_logger_with_level};
use std::process::ExitCode;
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        level_from_env()
    };
    setup_logger_with_level(level);

    let result: Result<(), AppError> = async {
        let mut client = MisisClient::new(Config::new())?;
        run(&cli, &mut client, &mut std::io::stdout()).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}
