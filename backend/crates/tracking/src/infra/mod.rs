//! Infrastructure Layer
//!
//! Stage record storage backends.

pub mod memory;
pub mod postgres;
