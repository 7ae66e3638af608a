use {
    crate::api::{AppState, error, internal_error_reply},
    alloy::primitives::B256,
    axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    std::sync::Arc,
};

fn parse_hash(hash: &str) -> Result<B256, Response> {
    hash.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            error(
                "InvalidTransactionHash",
                format!("{hash} is not a 32 byte hex string"),
            ),
        )
            .into_response()
    })
}

pub async fn get_transaction_handler(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Response {
    let hash = match parse_hash(&hash) {
        Ok(hash) => hash,
        Err(response) => return response,
    };
    match state.transactions.transaction(hash).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(err) => {
            tracing::error!(?err, "get_transaction");
            internal_error_reply()
        }
    }
}

pub async fn get_transaction_receipt_handler(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Response {
    let hash = match parse_hash(&hash) {
        Ok(hash) => hash,
        Err(response) => return response,
    };
    match state.transactions.receipt(hash).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => {
            tracing::error!(?err, "get_transaction_receipt");
            internal_error_reply()
        }
    }
}
