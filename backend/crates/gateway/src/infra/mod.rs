//! Infrastructure Layer
//!
//! Access log storage backends.

pub mod memory;
pub mod postgres;
