use clap::Parser;
use cobalt_dns_domain::CliOverrides;
use cobalt_dns_infrastructure::dns::resolver::RecursiveResolver;
use cobalt_dns_infrastructure::dns::server::DnsRequestHandler;
use cobalt_dns_infrastructure::dns::transport::UdpTransport;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "cobalt-dns")]
#[command(version = "0.1.0")]
#[command(about = "Cobalt DNS - Recursive DNS resolver over UDP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Root name server to start every resolution from
    #[arg(long)]
    root_server: Option<Ipv4Addr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        root_server: cli.root_server,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Cobalt DNS v{}", env!("CARGO_PKG_VERSION"));
    info!(root_server = %config.resolver.root_server, "Resolution starts at root server");

    let transport = Arc::new(UdpTransport::new());
    let resolver = Arc::new(RecursiveResolver::new(transport, &config.resolver));
    let handler = DnsRequestHandler::new(resolver);

    let listen_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    server::start_dns_server(listen_addr, handler).await?;

    info!("Server shutdown complete");
    Ok(())
}
