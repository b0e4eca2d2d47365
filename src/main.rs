//! ftest - TCP proxy probing and load-testing CLI

use clap::Parser;
use ftest::{app::App, build_info, cli::Cli, error::ErrorReporter, PKG_NAME, VERSION};
use std::process;

#[tokio::main]
async fn main() {
    // Worker panics surface as internal errors; the hook only reports them
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
    }));

    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose);

    // Diagnostics stay on stderr so stdout carries only the report
    if cli.debug {
        eprintln!(
            "{} v{} ({}, {}, built {})",
            PKG_NAME,
            VERSION,
            build_info::GIT_COMMIT.unwrap_or("unknown commit"),
            build_info::TARGET_TRIPLE,
            build_info::BUILD_TIME
        );
        eprintln!("Debug mode enabled");
        eprintln!();
    }

    let result = match App::new(cli) {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}
