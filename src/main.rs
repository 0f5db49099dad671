//! Service wrapper demo binary.
//!
//! Runs the built-in HTTP service under the lifecycle wrapper:
//!
//! ```text
//!   start:      bind HTTP server → register with Consul → install signal handlers
//!   SIGINT/TERM/USR2:
//!               stop HTTP server → deregister → exit 0
//!   any error:  log → exit 1
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use service_wrapper::config::{load_config, LogFormat};
use service_wrapper::http::HttpService;
use service_wrapper::observability::logging::init_logging;
use service_wrapper::{ConsulAgent, ServiceWrapper};

#[derive(Parser)]
#[command(name = "service-wrapper")]
#[command(about = "Run a service registered with a Consul agent", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log format.
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }

    init_logging(&config.observability);

    tracing::info!(
        service = %config.service.name,
        port = config.service.port,
        consul_host = %config.consul.host,
        consul_port = config.consul.port,
        prefixes = ?config.prefixes,
        "Configuration loaded"
    );

    let registry = Arc::new(ConsulAgent::from_config(&config.consul)?);
    let service = Arc::new(HttpService::from_config(&config.service));
    let wrapper = Arc::new(ServiceWrapper::from_config(service, registry, &config));

    wrapper.start().await?;

    // Termination handlers own the exit from here on.
    std::future::pending::<()>().await;
    Ok(())
}
