//! `etl-smoke` — smoke check for ETL deploy settings files

use std::panic::{self, AssertUnwindSafe};

use clap::Parser;
use clap::error::ErrorKind;

use etl_smoke::cli::args::Cli;
use etl_smoke::cli::check;
use etl_smoke::error::{ExitCode, SmokeError};
use etl_smoke::observability::panic::{payload_text, report_unexpected};
use etl_smoke::observability::{init_logging, install_panic_hook};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::USAGE_ERROR,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    install_panic_hook();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        check::run(&cli, &mut out)
    }));

    match result {
        Ok(Ok(())) => std::process::exit(ExitCode::SUCCESS),
        Ok(Err(e)) => {
            eprintln!("[ERROR] {e}");
            let code = e.exit_code();
            if code == ExitCode::UNEXPECTED {
                report_unexpected();
            }
            std::process::exit(code);
        }
        // The panic hook has already printed the message and backtrace.
        Err(payload) => {
            let err = SmokeError::Unexpected(payload_text(payload.as_ref()));
            tracing::error!(error = %err, "smoke run aborted");
            std::process::exit(err.exit_code());
        }
    }
}
