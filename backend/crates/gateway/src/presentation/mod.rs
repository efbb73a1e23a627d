//! Presentation Layer
//!
//! HTTP handler, envelope DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;
