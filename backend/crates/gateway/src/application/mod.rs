//! Application Layer
//!
//! Request dispatch.

pub mod dispatcher;

// Re-exports
pub use dispatcher::Dispatcher;
