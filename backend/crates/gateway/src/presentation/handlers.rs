//! HTTP Handlers

use std::sync::Arc;

use auth::AccountRepository;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use platform::clock::Clock;
use tracking::StageRecordRepository;

use crate::application::dispatcher::Dispatcher;
use crate::domain::repository::AccessLogRepository;
use crate::presentation::dto::Envelope;

/// POST /
///
/// The body is read as raw bytes whatever its `Content-Type`, so clients
/// posting `text/plain` work too and an unparsable body still gets an envelope.
pub async fn dispatch<A, S, L, C>(
    State(dispatcher): State<Arc<Dispatcher<A, S, L, C>>>,
    body: Bytes,
) -> Json<Envelope>
where
    A: AccountRepository + Send + Sync + 'static,
    S: StageRecordRepository + Send + Sync + 'static,
    L: AccessLogRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    Json(dispatcher.dispatch(&body).await)
}
