use crate::core::{IntakeHandler, IntakeRequest, IntakeResponse, Notifier, RequestBody};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Mounts the intake handler on `path` for every method, so wrong methods
/// reach the handler and get its 405 payload.
pub fn router<N>(handler: Arc<IntakeHandler<N>>, path: &str) -> Router
where
    N: Notifier + 'static,
{
    Router::new()
        .route(path, any(intake::<N>))
        .with_state(handler)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn intake<N>(
    State(handler): State<Arc<IntakeHandler<N>>>,
    method: Method,
    body: Bytes,
) -> Response
where
    N: Notifier + 'static,
{
    let request = IntakeRequest::new(method.as_str(), RequestBody::Raw(body.to_vec()));
    handler.handle(request).await.into_response()
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        };

        for (name, value) in self.headers {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    response.headers_mut().insert(name, value);
                }
                Err(_) => tracing::warn!("Skipping invalid {} header value: {:?}", name, value),
            }
        }
        response
    }
}
