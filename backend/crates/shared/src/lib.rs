//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! `auth`, `tracking` and `gateway` crates: the [`username::Username`] value
//! object, which is the only identity that crosses the credential and record
//! boundaries.
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod username;
