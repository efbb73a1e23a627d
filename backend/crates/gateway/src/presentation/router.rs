//! Gateway Router

use std::sync::Arc;

use auth::AccountRepository;
use axum::{Router, routing::post};
use platform::clock::Clock;
use tracking::StageRecordRepository;

use crate::application::dispatcher::Dispatcher;
use crate::domain::repository::AccessLogRepository;
use crate::presentation::handlers;

/// Create the gateway router for any repository implementation
pub fn gateway_router<A, S, L, C>(dispatcher: Dispatcher<A, S, L, C>) -> Router
where
    A: AccountRepository + Send + Sync + 'static,
    S: StageRecordRepository + Send + Sync + 'static,
    L: AccessLogRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/", post(handlers::dispatch::<A, S, L, C>))
        .with_state(Arc::new(dispatcher))
}
