// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Report;

use launtel_speed::cli::Cli;
use launtel_speed::config::options::{Credentials, RunOptions};
use launtel_speed::core::net::HttpTransport;
use launtel_speed::error::{PortalError, Result};
use launtel_speed::prompt::TerminalPrompter;
use launtel_speed::runner::{self, RunOutcome};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    launtel_speed::log::init(cli.debug);
    let opts = cli.into_options();

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let code = match rt.block_on(run(opts)) {
        Ok(_) => 0,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("Error: {:?}", Report::new(e));
            code
        }
    };
    // Exit without waiting on a prompt still blocked on stdin.
    std::process::exit(code)
}

async fn run(opts: RunOptions) -> Result<RunOutcome> {
    let mut prompter = TerminalPrompter::new();
    let (username, password) = Credentials::from_env();

    // No session yet: an interrupt here just ends the process.
    let creds = tokio::select! {
        c = Credentials::resolve(username, password, &mut prompter) => c?,
        _ = interrupted() => return Err(PortalError::Interrupted),
    };

    let transport = HttpTransport::new(opts.timeout)?;
    runner::run(transport, &opts, &creds, &mut prompter, interrupted).await
}

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No handler could be installed; never report an interrupt.
        std::future::pending::<()>().await;
    }
}
