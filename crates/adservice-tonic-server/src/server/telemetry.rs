//! Log subscriber setup.
//!
//! Installs a `tracing_subscriber` registry with an `EnvFilter` (defaulting
//! to `info`; override with `RUST_LOG`) and a human-readable fmt layer.
//! Spans created by the request handler via `tracing::instrument` show up
//! here; exporting them to an external telemetry backend is a deployment
//! concern outside this binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .try_init()?;

    Ok(())
}
