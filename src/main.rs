//! lftp-client binary entry point.

use std::process::ExitCode;

use lftp_client::cli::{self, Args};
use lftp_client::config::Config;
use lftp_client::{logging, Session};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'lftp-client --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> lftp_client::Result<()> {
    let config = Config::load(&args)?;
    let _ = logging::init_with_filter(config.log_filter());

    let mut session = Session::new(config.to_session_config()?);
    for statement in &args.statements {
        session.raw(statement.as_str());
    }

    if args.dry_run {
        println!("{}", session.redacted_preview().render());
        return Ok(());
    }

    info!(
        target_host = %session.config().target(),
        statements = session.queue().len(),
        "running transfer script"
    );

    let result = session.exec().await?;
    print!("{}", result.output);
    eprint!("{}", result.error);

    if result.has_error_output() {
        info!(exit_code = ?result.exit_code, "transfer engine reported errors");
    }

    Ok(())
}
