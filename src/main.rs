//! identscan CLI binary
//!
//! This is the main entry point for the identscan command-line interface.
//! The CLI is a thin adapter over the library: enumerate, scan, report.

use identscan::ingest::discover::list_files;
use identscan::report::Report;
use identscan::scan::scan_files;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = identscan::cli::parse_args();

    // Initialize logger if verbose
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    }

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Execute a scan and print its report.
///
/// Returns the exit status derived from the summary. Only errors that stop
/// the whole run (bad options, worker pool, broken output stream) are
/// returned as `Err`; per-file failures are part of the report.
fn run(cli: &identscan::cli::Cli) -> Result<u8, Box<dyn std::error::Error>> {
    let scan_options = cli.scan_options()?;
    let discovery = list_files(&cli.paths, &cli.discover_options())?;

    log::info!(
        "scanning {} files for {}",
        discovery.files.len(),
        scan_options.target
    );
    let files = scan_files(&discovery.files, &scan_options)?;
    let report = Report::new(&scan_options.target, &files, &discovery.failures);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = if cli.json {
        let summary = report.summary();
        serde_json::to_writer_pretty(&mut out, &report.to_json())?;
        writeln!(out)?;
        summary
    } else {
        let stderr = std::io::stderr();
        let mut err = stderr.lock();
        report.write_text(&mut out, &mut err)?
    };
    out.flush()?;

    Ok(summary.exit_code())
}
