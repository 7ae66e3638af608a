use {
    axum::{Router, routing::get},
    std::{collections::HashMap, net::SocketAddr, sync::OnceLock},
    tokio::{net::TcpListener, task::JoinHandle},
};

/// Global metrics registry used by all components.
static REGISTRY: OnceLock<prometheus_metric_storage::StorageRegistry> = OnceLock::new();

/// Configure global metrics registry.
///
/// This function allows specifying common prefix that will be added
/// to all metric names, as well as common labels.
///
/// This function can be called at most once, and it should be done before
/// any call to [`get_registry`], ideally in the very beginning
/// of the `main` function.
///
/// # Panics
///
/// This function panics if it's called twice, or if it's called after
/// any call to [`get_registry`]. This function also panics if registry
/// configuration is invalid.
pub fn setup_registry(prefix: Option<String>, labels: Option<HashMap<String, String>>) {
    let registry = prometheus::Registry::new_custom(prefix, labels).unwrap();
    let storage_registry = prometheus_metric_storage::StorageRegistry::new(registry);
    if REGISTRY.set(storage_registry).is_err() {
        panic!("metrics registry was already initialized");
    }
}

/// Get the global instance of the metrics registry.
pub fn get_registry() -> &'static prometheus::Registry {
    get_storage_registry().registry()
}

/// Get the global instance of the metric storage registry.
///
/// If the registry was not configured with [`setup_registry`] it gets
/// initialized with default values. This keeps unit tests from having to set
/// it up manually.
pub fn get_storage_registry() -> &'static prometheus_metric_storage::StorageRegistry {
    REGISTRY.get_or_init(prometheus_metric_storage::StorageRegistry::default)
}

/// Renders all metrics of the registry in the prometheus text format.
pub fn encode(registry: &prometheus::Registry) -> String {
    let encoder = prometheus::TextEncoder::new();
    match encoder.encode_to_string(&registry.gather()) {
        Ok(encoded) => encoded,
        Err(err) => {
            tracing::error!(?err, "failed to encode metrics");
            String::new()
        }
    }
}

/// Port the metrics endpoint is served on unless configured otherwise.
pub const DEFAULT_METRICS_PORT: u16 = 9586;

/// `/metrics` route exposing encoded prometheus data to monitoring system.
pub fn handle_metrics() -> Router {
    async fn metrics_handler() -> String {
        encode(get_registry())
    }

    Router::new().route("/metrics", get(metrics_handler))
}

/// Serves the metrics of the global registry on the given address.
pub async fn serve_metrics(address: SocketAddr) -> std::io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!(address = %listener.local_addr()?, "serving metrics");
    Ok(tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, handle_metrics()).await {
            tracing::error!(?err, "metrics server failed");
        }
    }))
}
