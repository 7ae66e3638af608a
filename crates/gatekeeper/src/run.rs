#[cfg(unix)]
use tokio::signal::unix::{self, SignalKind};
use {
    crate::{
        api,
        arguments::Arguments,
        transactions::{NodeTransactionFetcher, TransactionFetching},
    },
    anyhow::{Context, Result},
    clap::Parser,
    order_validation::{OrderValidating, OrderValidator},
    std::{future::Future, net::SocketAddr, sync::Arc},
    tokio::{net::TcpListener, sync::oneshot},
};

/// Parses the arguments, sets up logging and metrics and serves the API until
/// a shutdown signal is received.
pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&args.logging.config());
    tracing::info!("running gatekeeper with validated arguments:\n{}", args);
    observe::metrics::setup_registry(Some("gatekeeper".into()), None);

    if let Err(err) = run(args, None, shutdown_signal()).await {
        tracing::error!(?err, "gatekeeper failed");
        std::process::exit(1);
    }
}

/// Serves the API and the metrics endpoint.
///
/// The address the API is bound to gets sent through `bind` which allows
/// binding to port 0 in tests.
pub async fn run(
    args: Arguments,
    bind: Option<oneshot::Sender<SocketAddr>>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let validator: Arc<dyn OrderValidating> = Arc::new(OrderValidator::default());
    let transactions: Arc<dyn TransactionFetching> =
        Arc::new(NodeTransactionFetcher::from_url(args.node_url.clone()));

    let metrics = observe::metrics::serve_metrics(args.metrics_address)
        .await
        .context("failed to bind metrics address")?;

    let listener = TcpListener::bind(args.bind_address)
        .await
        .context("failed to bind api address")?;
    let address = listener.local_addr()?;
    tracing::info!(%address, "serving order validation api");
    if let Some(bind) = bind {
        let _ = bind.send(address);
    }

    let result = axum::serve(
        listener,
        api::handle_all_routes(validator, transactions),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("api server failed");

    tracing::info!("api stopped");
    metrics.abort();
    result
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Intercept main signals for graceful shutdown.
    // Kubernetes sends sigterm, whereas locally sigint (ctrl-c) is most common.
    let (Ok(mut interrupt), Ok(mut terminate)) = (
        unix::signal(SignalKind::interrupt()),
        unix::signal(SignalKind::terminate()),
    ) else {
        tracing::warn!("failed to install signal handlers");
        return std::future::pending().await;
    };
    tokio::select! {
        _ = interrupt.recv() => (),
        _ = terminate.recv() => (),
    };
    tracing::info!("gracefully shutting down");
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on Windows.
    std::future::pending().await
}
