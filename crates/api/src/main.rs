use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use contactbook_api::app::validator::Validator;
use contactbook_api::{AppConfig, BootstrapConfig};
use contactbook_events::{InMemoryProducer, MessageProducer};
use contactbook_infra::Database;
use contactbook_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().inspect_err(|e| {
        contactbook_observability::init(LogFormat::default());
        tracing::error!(error = %e, "invalid configuration");
    });
    let config = config.context("invalid configuration")?;
    contactbook_observability::init(config.log_format);

    let producer: Option<Arc<dyn MessageProducer>> = if config.producer_enabled {
        let bus = Arc::new(InMemoryProducer::new());
        spawn_event_logger(&bus);
        let handle: Arc<dyn MessageProducer> = bus;
        Some(handle)
    } else {
        None
    };

    let app = contactbook_api::bootstrap(BootstrapConfig {
        config: config.clone(),
        db: Database::new(),
        validator: Arc::new(Validator::new()),
        producer,
    })
    .context("bootstrap failed")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.web_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, routes = app.bindings.len(), "listening");

    axum::serve(listener, app.router).await.context("server error")?;
    Ok(())
}

/// Drains the in-process bus on a blocking thread and logs each event.
fn spawn_event_logger(bus: &InMemoryProducer) {
    let sub = bus.subscribe();
    tokio::task::spawn_blocking(move || {
        while let Ok(message) = sub.recv() {
            tracing::info!(
                topic = message.topic(),
                key = message.key(),
                event_type = message.event_type(),
                "event published"
            );
        }
    });
}
