use clap::Parser;

use forward_proxy::cli::Cli;
use forward_proxy::http::HttpServer;
use forward_proxy::net;
use forward_proxy::observability::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = cli.into_config();
    tracing::info!(
        address = %config.listener.bind_address,
        "Starting proxy server"
    );

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start proxy server");
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(config);
    if let Err(e) = server.run(listener).await {
        tracing::error!(error = %e, "Proxy server stopped");
        std::process::exit(1);
    }
}
