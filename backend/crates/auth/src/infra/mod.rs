//! Infrastructure Layer
//!
//! Account storage backends.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountRepository;
pub use postgres::PgAccountRepository;
