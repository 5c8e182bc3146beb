//! The invocation endpoint: translates the host's HTTP envelope into a
//! `HostRequest`, runs the function invoker, and writes the result back.

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::Instrument;
use uuid::Uuid;

use super::AppState;
use crate::host::{HostBody, HostRequest, HostResponse};

/// Handles `POST /invoke/{function_id}`.
///
/// Protocol errors have already been converted to 400 responses by the
/// invoker; anything that still comes back as `Err` here is a system fault
/// and becomes a 500 with the invocation id in the log.
pub async fn invoke_handler(
    State(state): State<AppState>,
    Path(function_id): Path<String>,
    request: Request,
) -> Response {
    let invoker = match state.registry.invoker(&function_id) {
        Ok(invoker) => invoker,
        Err(error) => {
            tracing::warn!(%function_id, %error, "invocation for unloaded function");
            return (StatusCode::NOT_FOUND, error.to_string()).into_response();
        }
    };

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%function_id, %error, "failed to buffer request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        }
    };
    // A zero-length body is still a valid binary frame (a request message
    // with no fields set encodes to zero bytes), so the received bytes are
    // always the binary form.
    let host_request = HostRequest {
        method: parts.method,
        url: parts.uri.to_string(),
        headers: parts.headers,
        body: HostBody::Binary(bytes),
    };

    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("invocation", %invocation_id, %function_id);
    match invoker.invoke(&host_request).instrument(span).await {
        Ok(response) => into_http(response),
        Err(error) => {
            tracing::error!(%invocation_id, %function_id, %error, "invocation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("invocation {invocation_id} failed"),
            )
                .into_response()
        }
    }
}

fn into_http(response: HostResponse) -> Response {
    Response::builder()
        .status(response.status)
        .header(http::header::CONTENT_TYPE, response.content_type)
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
