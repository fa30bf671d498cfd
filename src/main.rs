use adresse_geocoder::{
    config::Args,
    fetch::{upload_with_retry, HttpUploader},
    report::quick_report,
    schema::ensure_columns,
    GeocodeError,
};
use anyhow::Result;
use clap::Parser;
use std::{process::ExitCode, thread};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn run(args: &Args) -> Result<()> {
    // ─── 1) input must exist ─────────────────────────────────────────
    if !args.input.exists() {
        return Err(GeocodeError::InputNotFound(args.input.clone()).into());
    }
    let output = args.output_path();
    info!(input = %args.input.display(), output = %output.display(), api = %args.api_url, "startup");

    // ─── 2) check the columns the API needs ──────────────────────────
    let table = ensure_columns(&args.input, args.delimiter)?;
    println!(
        "CSV ready. Rows: {} | Columns: {:?}",
        table.row_count, table.headers
    );

    // ─── 3) upload with retry, stream result to disk ─────────────────
    let uploader = HttpUploader::new(args.api_url.clone(), args.timeout())?;
    let outcome = upload_with_retry(
        &uploader,
        &args.input,
        &output,
        args.retry_policy(),
        thread::sleep,
    )?;
    println!(
        "Geocoding done after {} attempt(s). File written: {}",
        outcome.attempts,
        output.display()
    );

    // ─── 4) report ───────────────────────────────────────────────────
    quick_report(&output)?.print();
    Ok(())
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
