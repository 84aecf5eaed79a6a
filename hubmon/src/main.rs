use clap::Parser;
use libhubmon::Exporter;
use libhubmon::client::DEFAULT_BASE_URL;
use std::process;

mod server;
mod version;

/// Hubmon - Docker Hub Metrics Exporter
///
/// Polls the Docker Hub repositories API for image metadata and exposes it
/// as Prometheus metrics.
#[derive(Parser, Debug)]
#[command(name = "hubmon")]
#[command(version = Box::leak(version::get_version_string().into_boxed_str()) as &str, about, long_about = None)]
struct Cli {
    /// Address on which to expose metrics and web interface
    #[arg(long, env = "HUBMON_LISTEN_ADDRESS", default_value = "0.0.0.0:9171")]
    listen_address: String,

    /// Path under which to expose metrics
    #[arg(long, env = "HUBMON_TELEMETRY_PATH", default_value = "/metrics")]
    telemetry_path: String,

    /// Organisations/users you wish to monitor: expected format 'org1,org2'
    #[arg(long, env = "HUBMON_ORGANISATIONS", default_value = "")]
    organisations: String,

    /// Images you wish to monitor: expected format 'user/image1,user/image2'
    #[arg(long, env = "HUBMON_IMAGES", default_value = "")]
    images: String,

    /// Fetch attempts per URL before giving up
    #[arg(long, env = "HUBMON_RETRIES", default_value_t = 3)]
    connection_retries: u32,

    /// Request timeout in seconds
    #[arg(long, env = "HUBMON_TIMEOUT", default_value_t = 5)]
    connection_timeout: u64,

    /// Base URL of the repositories API
    #[arg(long, env = "HUBMON_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let organisations = server::split_targets(&cli.organisations);
    let images = server::split_targets(&cli.images);

    if organisations.is_empty() && images.is_empty() {
        tracing::error!("no organisations or images provided");
        process::exit(1);
    }

    tracing::info!(version = %libhubmon::version(), "starting hubmon");

    let exporter = match Exporter::builder()
        .organisations(organisations)
        .images(images)
        .base_url(&cli.base_url)
        .timeout_seconds(cli.connection_timeout)
        .retries(cli.connection_retries)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "invalid exporter configuration");
            process::exit(1);
        }
    };

    let app = server::router(exporter, &cli.telemetry_path);

    let listener = match tokio::net::TcpListener::bind(&cli.listen_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %cli.listen_address, error = %e, "failed to bind listener");
            process::exit(1);
        }
    };
    tracing::info!(address = %cli.listen_address, path = %cli.telemetry_path, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        process::exit(1);
    }
}

/// Initialises the tracing subscriber; `RUST_LOG` overrides the
/// verbosity-derived filter.
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
