use clap::Parser;
use ferrous_split_domain::CliOverrides;
use ferrous_split_jobs::{join_jobs, JobRunner};
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

use server::dns::DnsServerOptions;

#[derive(Parser)]
#[command(name = "ferrous-split")]
#[command(version)]
#[command(about = "Ferrous Split - conditional DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Domain list routed to the primary server
    #[arg(long, value_name = "FILE")]
    domain_list: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        domain_list: cli.domain_list.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Split v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config).await.map_err(|e| {
        error!(error = %e, "Startup failed");
        e
    })?;

    let shutdown = CancellationToken::new();

    let job_handles = JobRunner::new()
        .with_domain_reload(dns_services.reload_job(&config))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let bind_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let options = DnsServerOptions {
        bind_addr,
        udp_workers: config.server.udp_workers,
        tcp_enabled: config.server.tcp_enabled,
    };

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let result = server::start_dns_server(options, dns_services.handler, shutdown.clone()).await;
    shutdown.cancel();

    let failed_jobs = join_jobs(job_handles).await;
    if failed_jobs > 0 {
        error!(failed = failed_jobs, "Background jobs did not shut down cleanly");
    }

    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
    }
    info!("Server shutdown complete");
    result
}
