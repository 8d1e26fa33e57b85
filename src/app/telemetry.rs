use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{
    BunyanFormattingLayer,
    JsonStorageLayer,
};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{
    EnvFilter,
    Registry,
};

/// Install the global `tracing` subscriber: bunyan formatted JSON written to
/// `sink`, filtered by `RUST_LOG` or `env_filter` when it is unset.
///
/// `log` records emitted by dependencies are redirected to `tracing`.
/// It fails when called more than once per process.
pub fn setup_tracing<Sink>(name: String, env_filter: String, sink: Sink) -> Result<(), anyhow::Error>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    LogTracer::init()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    set_global_default(subscriber)?;
    Ok(())
}
