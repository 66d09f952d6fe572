#![doc = include_str!("../README.md")]

mod server;

use adservice_tonic_core::AdCatalog;
use adservice_tonic_core::proto::{FILE_DESCRIPTOR_SET, ad_service_server::AdServiceServer};
use clap::Parser;
use server::config::{CliArgs, ServerConfig};
use server::service::handler::AdSelector;
use server::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_health::server::HealthReporter;
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry()?;

    // A misconfigured catalog is fatal here: serving with no inventory would
    // break the random-fallback contract on every context-free request.
    let catalog = Arc::new(AdCatalog::demo_inventory()?);

    let tcp = TcpListener::bind(config.listen_addr).await?;
    let incoming = TcpListenerStream::new(tcp);

    tracing::info!(
        "Starting ad service on {} with {} ads across {} categories",
        config.listen_addr,
        catalog.total_ads(),
        catalog.total_categories()
    );

    run_server(incoming, catalog).await
}

async fn run_server(incoming: TcpListenerStream, catalog: Arc<AdCatalog>) -> anyhow::Result<()> {
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<AdServiceServer<AdSelector>>()
        .await;

    let selector = AdSelector::new(catalog);

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_ad_service(selector))
        .serve_with_incoming_shutdown(incoming, shutdown_signal(health_reporter))
        .await?;

    tracing::info!("Ad service shut down successfully");
    Ok(())
}

fn build_ad_service(selector: AdSelector) -> AdServiceServer<AdSelector> {
    AdServiceServer::new(selector)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}

async fn shutdown_signal(health_reporter: HealthReporter) {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");

    // Publish NOT_SERVING so load balancers stop routing before the listener
    // closes.
    health_reporter
        .set_not_serving::<AdServiceServer<AdSelector>>()
        .await;
}
