//! Presentation Layer
//!
//! Wire DTOs for tracking data.

pub mod dto;
