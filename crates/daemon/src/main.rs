//! Hostpulse - Main Entry Point
//!
//! Wires three metric producers and one consumer around the shared
//! bounded queue, then runs until ctrl-c.

mod config;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, SinkFormat};
use hostpulse_core::application::constants::GRACEFUL_SHUTDOWN_TIMEOUT;
use hostpulse_core::application::{shutdown_channel, BoundedQueue, Consumer, Producer};
use hostpulse_core::port::{MetricSource, Sink};
use hostpulse_infra_system::{ConsoleSink, DiskSource, JsonLinesSink, MemorySource, NetworkSource};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (pretty for development, json for production)
    let log_format = std::env::var("HOSTPULSE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Hostpulse v{} starting...", VERSION);

    // 2. Load configuration
    let config = DaemonConfig::from_env()?;
    info!(
        capacity = config.monitor.queue.capacity,
        max_message_bytes = config.monitor.queue.max_message_bytes,
        poll_interval_secs = config.monitor.poll_interval.as_secs(),
        "Configuration loaded"
    );

    // 3. The queue is the only shared mutable state; everything else
    //    hangs off it
    let queue = Arc::new(BoundedQueue::new(&config.monitor.queue));

    // 4. Setup dependencies (DI wiring)
    let sink: Arc<dyn Sink> = match config.sink_format {
        SinkFormat::Text => Arc::new(ConsoleSink),
        SinkFormat::Json => Arc::new(JsonLinesSink),
    };

    let sources: Vec<(Arc<dyn MetricSource>, std::time::Duration)> = vec![
        (Arc::new(MemorySource::new()), config.memory_interval),
        (
            Arc::new(DiskSource::new(config.disk_mount.clone())),
            config.disk_interval,
        ),
        (
            Arc::new(NetworkSource::new(config.net_interface.clone())),
            config.network_interval,
        ),
    ];

    // 5. Start producers
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut producer_handles = Vec::with_capacity(sources.len());

    for (source, interval) in sources {
        let producer = Producer::new(
            source,
            queue.clone(),
            interval,
            config.monitor.queue.max_message_bytes,
            config.failure_policy,
        );
        let token = shutdown_rx.clone();
        producer_handles.push(tokio::spawn(async move {
            if let Err(e) = producer.run(token).await {
                error!(error = ?e, "Producer failed");
            }
        }));
    }

    // 6. Start the consumer (drains until the queue closes)
    let consumer = Consumer::new(queue.clone(), sink);
    let consumer_handle = tokio::spawn(async move {
        if let Err(e) = consumer.run().await {
            error!(error = ?e, "Consumer failed");
        }
    });

    info!("System ready. Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown: stop producers first, then close the
    //    queue so the consumer drains the residue and exits
    shutdown_tx.shutdown();
    for handle in producer_handles {
        let _ = tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, handle).await;
    }

    queue.close();
    let _ = tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, consumer_handle).await;

    info!("Shutdown complete.");

    Ok(())
}
