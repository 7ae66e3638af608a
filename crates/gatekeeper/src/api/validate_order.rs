use {
    crate::{
        api::{ApiMetrics, AppState, error},
        dto::ValidationResponse,
    },
    axum::{
        Json,
        body,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    model::order::OrderCreation,
    std::sync::Arc,
};

pub async fn validate_order_handler(
    State(state): State<Arc<AppState>>,
    body: body::Bytes,
) -> Response {
    // Decoded manually so amounts keep their exact decimal text and decoding
    // errors use the common error format.
    let order = match serde_json::from_slice::<OrderCreation>(&body) {
        Ok(order) => order,
        Err(err) => {
            tracing::debug!(?err, "invalid order validation request");
            return (
                StatusCode::BAD_REQUEST,
                error("InvalidRequestBody", err.to_string()),
            )
                .into_response();
        }
    };

    let result = state.validator.validate(&order);
    ApiMetrics::get().on_validation(result.label());
    (StatusCode::OK, Json(ValidationResponse::from(&result))).into_response()
}
