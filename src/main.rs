use anyhow::Result;
use clap::Parser;
use person_lookup::commands::{self, OutputFormat, ReportOptions};
use person_lookup::config::{DEFAULT_TIMEOUT_SECS, LookupConfig};
use person_lookup::error::LookupError;
use std::process::ExitCode;
use std::time::Duration;

/// person-lookup - Directory person lookup client
///
/// Looks up a person by NetID, email address, or UIN and prints the
/// normalized directory record.
///
/// Examples:
///   person-lookup jdoe
///   person-lookup jdoe@illinois.edu --json
#[derive(Parser, Debug)]
#[command(author, version = env!("PERSON_LOOKUP_VERSION"), about)]
struct Cli {
    /// NetID, email address, or UIN to look up
    #[arg(value_name = "LOOKUP_KEY")]
    lookup_key: String,

    /// Person lookup API URL (scheme optional, https is assumed)
    #[arg(long = "api-url", env = "PERSON_LOOKUP_API_URL", value_name = "URL")]
    api_url: String,

    /// API gateway subscription key
    #[arg(
        long = "subscription-key",
        env = "PERSON_LOOKUP_SUBSCRIPTION_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    subscription_key: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "PERSON_LOOKUP_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,

    /// Print the record as JSON
    #[arg(long)]
    json: bool,

    /// Also print the raw response body
    #[arg(long)]
    raw: bool,
}

impl Cli {
    fn lookup_config(&self) -> LookupConfig {
        LookupConfig::new(&self.api_url, &self.subscription_key)
            .with_timeout(Duration::from_secs(self.timeout))
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Summary
            },
            include_raw: self.raw,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LookupError>() {
                Some(lookup_err) => eprintln!("Error ({}): {}", lookup_err.kind(), lookup_err),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    commands::find(cli.lookup_config(), &cli.lookup_key, cli.report_options()).await
}
