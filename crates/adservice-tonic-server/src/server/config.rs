//! CLI and environment configuration for the server binary.
//!
//! Flags can also be supplied through the environment (`HOST`, `PORT`), which
//! is how the service is configured when deployed as a container.

use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};

/// Command-line arguments, parsed by clap with env fallbacks.
#[derive(Parser, Debug, Clone)]
#[command(name = "adservice", version, about = "Contextual ad-selection gRPC service")]
pub struct CliArgs {
    /// Host address to bind the gRPC listener to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the gRPC listener to.
    #[arg(long, env = "PORT", default_value_t = 9555)]
    pub port: u16,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let host: IpAddr = args
            .host
            .parse()
            .with_context(|| format!("invalid listen host {:?}", args.host))?;

        Ok(Self {
            listen_addr: SocketAddr::new(host, args.port),
        })
    }
}
