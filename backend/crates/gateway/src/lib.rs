//! Gateway Backend Module
//!
//! Single JSON endpoint in front of the auth and tracking crates. The body's
//! `mode` selects the operation:
//!
//! | mode | needs | success payload |
//! | --- | --- | --- |
//! | `CREATE` | `username`, `password` | `{"token": ...}` |
//! | `AUTHENTICATE` | `username`, `password` | `{"token": ...}` |
//! | `PUSH` | `token`, `trackingDatas` | `{}` |
//! | `PULL` | `token` | `{"trackingDatas": {...}}` |
//!
//! Every response is HTTP 200 with a `{"result", "payload"}` envelope, and
//! every request leaves one entry in the access log.
//!
//! Clean Architecture structure:
//! - `domain/` - Request modes, access log entry and repository trait
//! - `application/` - Dispatcher
//! - `infra/` - In-memory and PostgreSQL access log
//! - `presentation/` - Envelope DTOs, handler, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::dispatcher::Dispatcher;
pub use domain::repository::AccessLogRepository;
pub use error::{GatewayError, GatewayResult};
pub use infra::memory::InMemoryAccessLogRepository;
pub use infra::postgres::PgAccessLogRepository;
pub use presentation::router::gateway_router;
