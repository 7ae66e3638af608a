use {
    crate::transactions::TransactionFetching,
    axum::{
        Router,
        extract::{DefaultBodyLimit, MatchedPath, Request},
        http::StatusCode,
        middleware::{self, Next},
        response::{IntoResponse, Json, Response},
        routing::{get, post},
    },
    order_validation::OrderValidating,
    serde::{Deserialize, Serialize},
    std::{borrow::Cow, sync::Arc, time::Instant},
    tower_http::{cors::CorsLayer, trace::TraceLayer},
};

mod get_transaction;
mod validate_order;

/// Application state shared across all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn OrderValidating>,
    pub transactions: Arc<dyn TransactionFetching>,
}

/// Middleware that tracks request metrics labelled by the matched route.
async fn with_matched_path_metric(req: Request, next: Next) -> Response {
    let metrics = ApiMetrics::get();

    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());
    let label = format!("{method} {matched_path}");

    let timer = Instant::now();
    let response = next.run(req).await;
    let status = response.status();

    metrics.on_request_completed(&label, status, timer);
    if status.is_client_error() || status.is_server_error() {
        metrics
            .requests_rejected
            .with_label_values(&[status.as_str()])
            .inc();
    }

    response
}

const MAX_JSON_BODY_PAYLOAD: usize = 1024 * 16;

pub fn handle_all_routes(
    validator: Arc<dyn OrderValidating>,
    transactions: Arc<dyn TransactionFetching>,
) -> Router {
    let state = Arc::new(AppState {
        validator,
        transactions,
    });

    let metrics = ApiMetrics::get();
    metrics.reset_requests_rejected();

    let router = Router::new()
        .route("/", get(liveness))
        .route(
            "/validate/order",
            post(validate_order::validate_order_handler),
        )
        .route(
            "/transaction/{hash}",
            get(get_transaction::get_transaction_handler),
        )
        .route(
            "/transaction/{hash}/receipt",
            get(get_transaction::get_transaction_receipt_handler),
        )
        .with_state(state)
        .layer(middleware::from_fn(with_matched_path_metric));

    finalize_router(router)
}

async fn liveness() -> &'static str {
    "OK"
}

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "api")]
struct ApiMetrics {
    /// Number of completed API requests.
    #[metric(labels("method", "status_code"))]
    requests_complete: prometheus::IntCounterVec,

    /// Number of rejected API requests.
    #[metric(labels("status_code"))]
    requests_rejected: prometheus::IntCounterVec,

    /// Execution time for each API request.
    #[metric(labels("method"), buckets(0.01, 0.05, 0.1, 0.5, 1, 2, 4))]
    requests_duration_seconds: prometheus::HistogramVec,

    /// Outcomes of order validations.
    #[metric(labels("outcome"))]
    validation_outcomes: prometheus::IntCounterVec,
}

impl ApiMetrics {
    // Status codes the API responds with.
    const INITIAL_STATUSES: &'static [StatusCode] = &[
        StatusCode::OK,
        StatusCode::BAD_REQUEST,
        StatusCode::NOT_FOUND,
        StatusCode::PAYLOAD_TOO_LARGE,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        StatusCode::INTERNAL_SERVER_ERROR,
    ];

    fn get() -> &'static Self {
        // Only fails if the metric definitions are invalid.
        Self::instance(observe::metrics::get_storage_registry())
            .expect("unexpected error getting metrics instance")
    }

    fn reset_requests_rejected(&self) {
        for status in Self::INITIAL_STATUSES {
            self.requests_rejected
                .with_label_values(&[status.as_str()])
                .reset();
        }
    }

    fn on_request_completed(&self, method: &str, status: StatusCode, timer: Instant) {
        self.requests_complete
            .with_label_values(&[method, status.as_str()])
            .inc();
        self.requests_duration_seconds
            .with_label_values(&[method])
            .observe(timer.elapsed().as_secs_f64());
    }

    fn on_validation(&self, outcome: &str) {
        self.validation_outcomes.with_label_values(&[outcome]).inc();
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    pub error_type: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

pub fn error(error_type: &'static str, description: impl AsRef<str>) -> Json<Error> {
    Json(Error {
        error_type: error_type.into(),
        description: Cow::Owned(description.as_ref().to_owned()),
    })
}

pub fn internal_error_reply() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error("InternalServerError", ""),
    )
        .into_response()
}

/// Sets up cors, the body size limit and request tracing for all routes.
fn finalize_router(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(vec![
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
            axum::http::Method::HEAD,
        ])
        .allow_headers(vec![
            axum::http::header::ORIGIN,
            axum::http::header::CONTENT_TYPE,
        ]);

    router
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_PAYLOAD))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
