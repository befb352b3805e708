//! pingmon binary entry point

use pingmon::config::Config;
use pingmon::{GraphitePublisher, Monitor, PingMetrics, PingProber, Result};
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    // Parse and validate configuration before logging exists
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    // Initialize the application and run
    if let Err(e) = run(config).await {
        error!("Application failed: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run(config: Config) -> Result<()> {
    // Initialize logging based on verbosity
    init_logging(&config);

    info!("pingmon - continuous ping monitor");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    config.print_summary();

    let metrics = PingMetrics::new(&config.publish.metric_prefix, &config.target.host);
    let prober = PingProber::new(
        config.target.host.clone(),
        config.probe.count,
        config.probe.ping_binary.clone(),
        config.probe.timeout,
    );
    let publisher = GraphitePublisher::new(config.publisher_config()?)?;

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    let mut monitor = Monitor::new(metrics, prober, publisher);
    monitor.run(cancel).await
}

/// Cancel the monitor on Ctrl+C or SIGTERM
fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    error!("Failed to listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            result = ctrl_c => {
                if let Err(e) = result {
                    error!("Failed to listen for ctrl+c: {}", e);
                    return;
                }
                warn!("Received Ctrl+C, shutting down...");
            }
            _ = terminate => {
                warn!("Received terminate signal, shutting down...");
            }
        }

        cancel.cancel();
    });
}

/// Initialize logging based on configuration
fn init_logging(config: &Config) {
    let pingmon_level = if config.output.verbose {
        "debug"
    } else {
        "info"
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    format!("pingmon={}", pingmon_level)
                        .parse()
                        .expect("Invalid filter directive"),
                )
                .add_directive("reqwest=warn".parse().expect("Invalid filter directive"))
                .add_directive("hyper=warn".parse().expect("Invalid filter directive")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");

    if config.output.verbose {
        info!("Verbose logging enabled");
    }
}
