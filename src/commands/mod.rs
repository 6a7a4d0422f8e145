use anyhow::{Context, Result};
use log::info;
use std::future::Future;
use std::io::Write;

use crate::config::LookupConfig;
use crate::lookup::{FindPerson, PersonLookup, find_person_until};

mod report;

pub use report::{OutputFormat, ReportOptions, write_report};

/// Looks up one person and prints the report to stdout.
///
/// Pressing Ctrl-C while the request is in flight cancels it.
#[tracing::instrument(skip(config, options))]
pub async fn find(config: LookupConfig, lookup_key: &str, options: ReportOptions) -> Result<()> {
    let lookup = PersonLookup::new(&config)?;
    let mut out = std::io::stdout();
    run(&lookup, lookup_key, interrupted(), &options, &mut out).await
}

#[tracing::instrument(skip(finder, cancel, options, out))]
pub async fn run<F, C, W>(
    finder: &F,
    lookup_key: &str,
    cancel: C,
    options: &ReportOptions,
    out: &mut W,
) -> Result<()>
where
    F: FindPerson + ?Sized,
    C: Future<Output = ()>,
    W: Write,
{
    info!("Looking up {}...", lookup_key);

    let record = find_person_until(finder, lookup_key, cancel).await?;
    write_report(&record, options, out).context("Failed to write lookup report")?;
    out.flush()?;
    Ok(())
}

/// Completes on Ctrl-C; never completes if the signal handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
