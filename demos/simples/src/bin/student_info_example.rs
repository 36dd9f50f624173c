use misis_id::prelude::*;
use std::env;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let (Ok(login), Ok(password)) = (env::var("MISIS_LOGIN"), env::var("MISIS_PASSWORD")) else {
        error!("Set MISIS_LOGIN and MISIS_PASSWORD (or use the misis-id binary)");
        return Ok(());
    };

    info!("Creating client and authenticating...");
    let student = MisisClient::scoped(Config::new(), async |client: &mut MisisClient| {
        let session = client.authenticate(&login, &password).await?;
        info!("✓ Authenticated, account: {}", session.api_id);
        client.get_student_info().await
    })
    .await?;

    info!("Student info: {:#?}", student);
    for (label, value) in student.entries() {
        println!("{label}: {value}");
    }

    Ok(())
}
