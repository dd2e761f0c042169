/*!
 * Command-line interface for ofs-ftp-pull
 */

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use ofs_ftp_pull::config::{Args, Config};
use ofs_ftp_pull::error::Result;
use ofs_ftp_pull::puller::Puller;
use ofs_ftp_pull::remote::FtpSource;

fn main() -> ExitCode {
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    // Shell completions short-circuit the run
    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    // Create and validate configuration
    let config = Config::from_args(args)?;
    config.validate()?;

    let puller = Puller::start(config)?;
    let config = puller.config();

    let remote = FtpSource::connect(&config.host, config.port, config.timeout)?;

    let mut stdout = io::stdout().lock();
    let summary = puller.run(remote, &mut stdout)?;

    Ok(summary.exit_code())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (warnings by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
